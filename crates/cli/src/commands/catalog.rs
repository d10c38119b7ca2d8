//! Catalog browsing commands.

use std::fmt::Write as _;

use clap::Args;
use rust_decimal::Decimal;

use mycart_core::Product;
use mycart_storefront::AppError;
use mycart_storefront::catalog::Catalog;
use mycart_storefront::search::{
    CategoryFilter, FilterState, PriceRange, SortOrder, category_options,
};

/// Filter flags for `mycart products`.
#[derive(Debug, Default, Args)]
pub struct ProductFilterArgs {
    /// Category name (exact match); omit for all categories
    #[arg(short, long)]
    pub category: Option<String>,

    /// Lowest price to include
    #[arg(long)]
    pub min_price: Option<Decimal>,

    /// Highest price to include
    #[arg(long)]
    pub max_price: Option<Decimal>,

    /// featured, price-low, price-high, rating or newest
    #[arg(short, long, default_value = "featured")]
    pub sort: String,

    /// Text to look for in product titles
    #[arg(short, long)]
    pub query: Option<String>,
}

impl ProductFilterArgs {
    /// Build the filter state, starting from the defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for a negative price or an inverted range.
    pub fn into_filter_state(self) -> Result<FilterState, AppError> {
        let defaults = PriceRange::default();
        let range = PriceRange::new(
            self.min_price.unwrap_or(defaults.min),
            self.max_price.unwrap_or(defaults.max),
        );
        if range.min.is_sign_negative() || range.max.is_sign_negative() {
            return Err(AppError::BadRequest("prices cannot be negative".to_string()));
        }
        if range.min > range.max {
            return Err(AppError::BadRequest(format!(
                "min price {} is above max price {}",
                range.min, range.max
            )));
        }

        let mut filter = FilterState::new()
            .with_price_range(range)
            .with_sort(SortOrder::parse(&self.sort));
        if let Some(category) = self.category {
            filter = filter.with_category(CategoryFilter::parse(&category));
        }
        if let Some(query) = self.query {
            filter = filter.with_query(query);
        }
        Ok(filter)
    }
}

/// One line per product: id, price, rating, title.
pub fn render_products(products: &[&Product]) -> String {
    if products.is_empty() {
        return "No products match your filters".to_string();
    }

    let mut out = String::new();
    for product in products {
        let rating = product
            .rating
            .map_or_else(|| "  - ".to_string(), |r| format!("{r:.1}"));
        let _ = writeln!(
            out,
            "{:>4}  {:>10}  {rating:>4}  {}",
            product.id,
            product.unit_price().to_string(),
            product.title
        );
    }
    let _ = write!(out, "{} products", products.len());
    out
}

pub fn render_product(product: &Product) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", product.title);
    let _ = writeln!(out, "{}", product.description);
    let _ = writeln!(
        out,
        "Price:     {} {}",
        product.unit_price(),
        product.currency.code()
    );
    let _ = writeln!(out, "Category:  {}", product.category);
    if let Some(brand) = &product.brand {
        let _ = writeln!(out, "Brand:     {brand}");
    }
    if let Some(rating) = product.rating {
        let reviews = product.reviews.unwrap_or(0);
        let _ = writeln!(out, "Rating:    {rating:.1} ({reviews} reviews)");
    }
    if product.in_stock() {
        let _ = writeln!(out, "Stock:     {} available", product.inventory);
    } else {
        let _ = writeln!(out, "Stock:     Out of stock");
    }
    if let Some(image) = product.primary_image() {
        let _ = writeln!(out, "Image:     {image}");
    }
    let _ = write!(out, "Listed:    {}", product.created_at);
    out
}

/// The first `limit` catalog products, for the home page strip.
pub fn render_trending(catalog: &Catalog, limit: usize) -> String {
    let products: Vec<&Product> = catalog.trending(limit).iter().collect();
    render_products(&products)
}

pub fn render_categories(catalog: &Catalog) -> String {
    category_options(catalog.category_names()).join("\n")
}
