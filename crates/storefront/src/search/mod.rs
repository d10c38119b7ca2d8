//! Catalog filtering and sorting.
//!
//! [`apply`] narrows the catalog with the shopper's current criteria and
//! orders what is left. It is a pure function: the same catalog and filter
//! state always give the same sequence, and neither input is modified.
//!
//! # Predicate
//!
//! A product is kept when all of these hold:
//!
//! 1. The category filter is "All Categories", or the product's category is an
//!    exact (case-sensitive) match.
//! 2. The price lies inside the inclusive price range.
//! 3. The query is empty, or the lowercased query is a substring of the
//!    lowercased title.
//!
//! # Ordering
//!
//! Sorting is stable, so ties keep catalog order. `Featured` keeps catalog
//! order outright.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use mycart_core::Product;

/// Label of the category option that disables category filtering.
pub const ALL_CATEGORIES: &str = "All Categories";

/// Upper bound of the price slider.
pub const DEFAULT_MAX_PRICE: Decimal = Decimal::from_parts(2000, 0, 0, false, 0);

/// Category criterion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact category name.
    Only(String),
}

impl CategoryFilter {
    /// Parse a UI option value; the "All Categories" label maps to [`Self::All`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s == ALL_CATEGORIES || s.is_empty() {
            Self::All
        } else {
            Self::Only(s.to_string())
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(name) => name,
        }
    }

    fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(name) => product.category == *name,
        }
    }
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    #[must_use]
    pub const fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::new(Decimal::ZERO, DEFAULT_MAX_PRICE)
    }
}

/// Product sort order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Catalog order.
    #[default]
    Featured,
    PriceLowToHigh,
    PriceHighToLow,
    /// Highest rating first; unrated products count as 0.
    Rating,
    /// Most recently created first.
    Newest,
}

impl SortOrder {
    /// Every order, in the sequence the sort menu lists them.
    pub const ALL: [Self; 5] = [
        Self::Featured,
        Self::PriceLowToHigh,
        Self::PriceHighToLow,
        Self::Rating,
        Self::Newest,
    ];

    /// Parse from a UI option value. Unknown values fall back to `Featured`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "price-low" | "price-ascending" | "price_asc" => Self::PriceLowToHigh,
            "price-high" | "price-descending" | "price_desc" => Self::PriceHighToLow,
            "rating" => Self::Rating,
            "newest" => Self::Newest,
            _ => Self::Featured,
        }
    }

    /// Convert to the UI option value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceLowToHigh => "price-low",
            Self::PriceHighToLow => "price-high",
            Self::Rating => "rating",
            Self::Newest => "newest",
        }
    }

    /// Human-readable menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Featured => "Featured",
            Self::PriceLowToHigh => "Price: Low to High",
            Self::PriceHighToLow => "Price: High to Low",
            Self::Rating => "Highest Rated",
            Self::Newest => "Newest",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Featured => Ordering::Equal,
            Self::PriceLowToHigh => a.price.cmp(&b.price),
            Self::PriceHighToLow => b.price.cmp(&a.price),
            Self::Rating => b.rating_or_zero().total_cmp(&a.rating_or_zero()),
            Self::Newest => b.created_at.cmp(&a.created_at),
        }
    }
}

/// The shopper's current view criteria.
///
/// Lives as long as the product listing view; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub price_range: PriceRange,
    pub sort: SortOrder,
    pub query: String,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub const fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = range;
        self
    }

    #[must_use]
    pub const fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Back to the defaults ("Reset Filters").
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether every criterion is at its default.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    fn matches(&self, product: &Product, folded_query: &str) -> bool {
        self.category.matches(product)
            && self.price_range.contains(product.price)
            && (folded_query.is_empty() || product.title.to_lowercase().contains(folded_query))
    }
}

/// Filter `catalog` by `filter` and order the result.
#[must_use]
pub fn apply<'a>(catalog: &'a [Product], filter: &FilterState) -> Vec<&'a Product> {
    let folded_query = filter.query.to_lowercase();

    let mut visible: Vec<&Product> = catalog
        .iter()
        .filter(|p| filter.matches(p, &folded_query))
        .collect();

    if filter.sort != SortOrder::Featured {
        visible.sort_by(|a, b| filter.sort.compare(a, b));
    }

    tracing::debug!(
        total = catalog.len(),
        visible = visible.len(),
        sort = filter.sort.as_str(),
        "Filters applied"
    );
    visible
}

/// Category options for the filter menu: "All Categories" followed by `names`.
pub fn category_options<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    std::iter::once(ALL_CATEGORIES).chain(names).collect()
}
