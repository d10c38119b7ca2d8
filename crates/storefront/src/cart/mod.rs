//! Shopping cart store.
//!
//! The cart is an ordered list of entries (insertion order), at most one per
//! product. Every mutation writes the whole list to local storage under
//! [`keys::CART_ITEMS`] before returning. Item count, total price and the
//! order summary are recomputed from the entries on every read.
//!
//! Mutators never fail. A missing product id is a silent no-op, and a storage
//! failure is logged and otherwise ignored: the in-memory cart stays correct
//! for the rest of the session.

mod notice;
mod summary;

use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use mycart_core::{Price, Product, ProductId};

use crate::storage::{SharedStorage, keys, load_json, save_json};

pub use notice::{CartNotice, LogNotifier, Notifier, RecordingNotifier};
pub use summary::{CartSummary, FREE_SHIPPING_THRESHOLD, TAX_RATE};

/// Whether quantities are capped at the product's inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InventoryPolicy {
    /// Never let a quantity exceed inventory.
    #[default]
    Enforce,
    /// Accept any quantity; the caller is responsible for limits.
    Permissive,
}

impl FromStr for InventoryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "enforce" | "strict" => Ok(Self::Enforce),
            "permissive" | "off" => Ok(Self::Permissive),
            other => Err(format!("expected 'enforce' or 'permissive', got '{other}'")),
        }
    }
}

/// A product in the cart with the quantity the shopper wants.
///
/// Serialized as the product's own fields plus `quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartEntry {
    /// Unit price x quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.unit_price().times(self.quantity)
    }

    /// Whether another unit can be added without exceeding inventory.
    #[must_use]
    pub const fn can_increment(&self) -> bool {
        self.quantity < self.product.inventory
    }
}

/// The shopper's cart, backed by local storage.
pub struct CartStore {
    entries: Vec<CartEntry>,
    storage: SharedStorage,
    policy: InventoryPolicy,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("entries", &self.entries)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Restore the cart from storage.
    ///
    /// A missing record yields an empty cart. An unreadable or malformed
    /// record is logged and also yields an empty cart. Entries with a zero
    /// quantity or a repeated product id are dropped.
    #[instrument(skip(storage))]
    pub fn load(storage: SharedStorage, policy: InventoryPolicy) -> Self {
        let entries = match load_json::<Vec<CartEntry>>(storage.as_ref(), keys::CART_ITEMS) {
            Ok(Some(entries)) => sanitize(entries, policy),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable stored cart");
                Vec::new()
            }
        };
        tracing::debug!(entries = entries.len(), "Cart restored");

        Self {
            entries,
            storage,
            policy,
            notifier: Arc::new(LogNotifier),
        }
    }

    /// Replace the acknowledgment receiver.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    #[must_use]
    pub const fn policy(&self) -> InventoryPolicy {
        self.policy
    }

    /// Add one unit of `product`.
    ///
    /// Increments an existing entry or appends a new one with quantity 1.
    /// Under [`InventoryPolicy::Enforce`] the cart is left unchanged when the
    /// product is out of stock or the entry is already at its inventory.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add(&mut self, product: &Product) -> CartNotice {
        self.increment(product, 1)
    }

    /// Add `quantity` units of `product`.
    ///
    /// Same outcome as `quantity` successive [`Self::add`] calls, stopping at
    /// the first refused unit, but the list is persisted and acknowledged
    /// once. Returns `None` when `quantity` is 0.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_many(&mut self, product: &Product, quantity: u32) -> Option<CartNotice> {
        if quantity == 0 {
            return None;
        }
        Some(self.increment(product, quantity))
    }

    fn increment(&mut self, product: &Product, quantity: u32) -> CartNotice {
        let enforce = self.policy == InventoryPolicy::Enforce;
        let ceiling = product.inventory;

        let notice = match self.entries.iter_mut().find(|e| e.product.id == product.id) {
            Some(entry) if enforce && entry.quantity >= ceiling => {
                CartNotice::LimitReached { available: ceiling }
            }
            Some(entry) => {
                let wanted = entry.quantity.saturating_add(quantity);
                if enforce && wanted > ceiling {
                    entry.quantity = ceiling;
                    CartNotice::LimitReached { available: ceiling }
                } else {
                    entry.quantity = wanted;
                    CartNotice::QuantityUpdated
                }
            }
            None if enforce && ceiling == 0 => CartNotice::OutOfStock,
            None => {
                let capped = enforce && quantity > ceiling;
                let quantity = if capped { ceiling } else { quantity };
                self.entries.push(CartEntry {
                    product: product.clone(),
                    quantity,
                });
                if capped {
                    CartNotice::LimitReached { available: ceiling }
                } else if quantity == 1 {
                    CartNotice::Added
                } else {
                    CartNotice::QuantityUpdated
                }
            }
        };

        self.persist();
        self.notifier.notify(&notice);
        notice
    }

    /// Remove the entry for `product_id`. Absent ids are ignored.
    #[instrument(skip(self))]
    pub fn remove(&mut self, product_id: &ProductId) -> CartNotice {
        let before = self.entries.len();
        self.entries.retain(|e| &e.product.id != product_id);
        if self.entries.len() == before {
            tracing::debug!("Product not in cart");
        }

        self.persist();
        let notice = CartNotice::Removed;
        self.notifier.notify(&notice);
        notice
    }

    /// Set the quantity for `product_id`.
    ///
    /// A quantity below 1 removes the entry. A missing id is a no-op; no
    /// entry is created. Under [`InventoryPolicy::Enforce`] the quantity is
    /// clamped to inventory and `LimitReached` is returned; an entry whose
    /// product has sold out is removed with `OutOfStock`.
    #[instrument(skip(self))]
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> Option<CartNotice> {
        if quantity < 1 {
            return Some(self.remove(product_id));
        }
        let requested = u32::try_from(quantity).unwrap_or(u32::MAX);
        let enforce = self.policy == InventoryPolicy::Enforce;

        let sold_out = enforce
            && self
                .entries
                .iter()
                .any(|e| &e.product.id == product_id && e.product.inventory == 0);

        let mut notice = None;
        if sold_out {
            self.entries.retain(|e| &e.product.id != product_id);
            notice = Some(CartNotice::OutOfStock);
        } else if let Some(entry) = self.entries.iter_mut().find(|e| &e.product.id == product_id) {
            let ceiling = entry.product.inventory;
            if enforce && requested > ceiling {
                entry.quantity = ceiling;
                notice = Some(CartNotice::LimitReached { available: ceiling });
            } else {
                entry.quantity = requested;
            }
        } else {
            tracing::debug!("Product not in cart");
        }

        self.persist();
        if let Some(notice) = &notice {
            self.notifier.notify(notice);
        }
        notice
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> CartNotice {
        self.entries.clear();
        self.persist();
        let notice = CartNotice::Cleared;
        self.notifier.notify(&notice);
        notice
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    #[must_use]
    pub fn entry(&self, product_id: &ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| &e.product.id == product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all entry quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.quantity)).sum()
    }

    /// Sum of price x quantity over all entries.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.entries
            .iter()
            .fold(Decimal::ZERO, |acc, e| acc.saturating_add(e.line_total().amount))
    }

    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary::from_entries(&self.entries)
    }

    fn persist(&self) {
        if let Err(e) = save_json(self.storage.as_ref(), keys::CART_ITEMS, &self.entries) {
            tracing::warn!(error = %e, "Failed to persist cart");
        }
    }
}

/// Drop zero-quantity entries and repeated product ids from stored data.
///
/// Under [`InventoryPolicy::Enforce`] quantities are also capped at the stored
/// product's inventory, and entries for sold-out products are dropped.
fn sanitize(entries: Vec<CartEntry>, policy: InventoryPolicy) -> Vec<CartEntry> {
    let enforce = policy == InventoryPolicy::Enforce;
    let mut seen = std::collections::HashSet::new();
    let total = entries.len();
    let mut clamped = 0_usize;

    let kept: Vec<CartEntry> = entries
        .into_iter()
        .filter_map(|mut e| {
            if enforce && e.quantity > e.product.inventory {
                e.quantity = e.product.inventory;
                clamped += 1;
            }
            (e.quantity > 0 && seen.insert(e.product.id.clone())).then_some(e)
        })
        .collect();

    if kept.len() != total {
        tracing::warn!(dropped = total - kept.len(), "Dropped invalid stored cart entries");
    }
    if clamped > 0 {
        tracing::warn!(clamped, "Capped stored cart quantities at inventory");
    }
    kept
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalog::Catalog;
    use crate::storage::{LocalStorage, MemoryStorage, StorageError};

    fn product(id: &str) -> Product {
        Catalog::sample()
            .product(&ProductId::new(id))
            .cloned()
            .unwrap()
    }

    fn store(policy: InventoryPolicy) -> (CartStore, Arc<MemoryStorage>, Arc<RecordingNotifier>) {
        let storage = Arc::new(MemoryStorage::new());
        let recorder = Arc::new(RecordingNotifier::new());
        let cart = CartStore::load(storage.clone(), policy).with_notifier(recorder.clone());
        (cart, storage, recorder)
    }

    fn stored_entries(storage: &MemoryStorage) -> Vec<CartEntry> {
        load_json(storage, keys::CART_ITEMS).unwrap().unwrap()
    }

    #[test]
    fn test_add_twice_yields_single_entry() {
        let (mut cart, _, recorder) = store(InventoryPolicy::Enforce);
        let headphones = product("1");

        cart.add(&headphones);
        cart.add(&headphones);

        assert_eq!(cart.entries().len(), 1);
        assert_eq!(cart.entry(&headphones.id).unwrap().quantity, 2);
        assert_eq!(
            recorder.drain(),
            vec![CartNotice::Added, CartNotice::QuantityUpdated]
        );
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let (mut cart, _, _) = store(InventoryPolicy::Enforce);
        for id in ["5", "1", "3", "1"] {
            cart.add(&product(id));
        }
        let ids: Vec<&str> = cart.entries().iter().map(|e| e.product.id.as_str()).collect();
        assert_eq!(ids, ["5", "1", "3"]);
    }

    #[test]
    fn test_totals_follow_mutations() {
        let (mut cart, _, _) = store(InventoryPolicy::Enforce);
        let mouse = product("8"); // 79.99
        let sneakers = product("5"); // 89.99

        cart.add_many(&mouse, 3);
        cart.add(&sneakers);
        assert_eq!(cart.item_count(), 4);
        assert_eq!(cart.total_price(), Decimal::new(32996, 2));

        cart.set_quantity(&mouse.id, 1);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total_price(), Decimal::new(16998, 2));

        cart.remove(&sneakers.id);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_price(), Decimal::new(7999, 2));
    }

    #[test]
    fn test_set_quantity_below_one_removes() {
        let (mut cart, _, _) = store(InventoryPolicy::Enforce);
        let chair = product("7");
        let camera = product("4");
        cart.add(&chair);
        cart.add(&camera);

        assert_eq!(cart.set_quantity(&chair.id, 0), Some(CartNotice::Removed));
        assert!(cart.entry(&chair.id).is_none());

        cart.set_quantity(&camera.id, -5);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_on_missing_id_creates_nothing() {
        let (mut cart, storage, recorder) = store(InventoryPolicy::Enforce);
        assert_eq!(cart.set_quantity(&ProductId::new("2"), 4), None);
        assert!(cart.is_empty());
        assert!(stored_entries(&storage).is_empty());
        assert!(recorder.drain().is_empty());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let (mut cart, _, _) = store(InventoryPolicy::Enforce);
        cart.add(&product("1"));
        cart.remove(&ProductId::new("404"));
        assert_eq!(cart.entries().len(), 1);
    }

    #[test]
    fn test_clear_empties_and_persists() {
        let (mut cart, storage, recorder) = store(InventoryPolicy::Enforce);
        cart.add_many(&product("2"), 2);
        recorder.drain();

        assert_eq!(cart.clear(), CartNotice::Cleared);
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total_price(), Decimal::ZERO);
        assert_eq!(storage.get(keys::CART_ITEMS).unwrap().as_deref(), Some("[]"));
        assert_eq!(recorder.drain(), vec![CartNotice::Cleared]);
    }

    #[test]
    fn test_every_mutation_persists_full_list() {
        let (mut cart, storage, _) = store(InventoryPolicy::Enforce);
        let watch = product("2");
        cart.add(&watch);
        cart.add(&product("3"));
        cart.set_quantity(&watch.id, 5);

        let stored = stored_entries(&storage);
        assert_eq!(stored, cart.entries());
        assert_eq!(stored[0].quantity, 5);

        let raw: serde_json::Value =
            serde_json::from_str(&storage.get(keys::CART_ITEMS).unwrap().unwrap()).unwrap();
        assert_eq!(raw[0]["title"], "Smart Watch Pro with Health Tracking");
        assert_eq!(raw[0]["quantity"], 5);
    }

    #[test]
    fn test_load_restores_previous_session() {
        let (mut cart, storage, _) = store(InventoryPolicy::Enforce);
        cart.add_many(&product("6"), 2);

        let restored = CartStore::load(storage, InventoryPolicy::Enforce);
        assert_eq!(restored.entries(), cart.entries());
        assert_eq!(restored.item_count(), 2);
    }

    #[test]
    fn test_load_corrupt_record_is_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(keys::CART_ITEMS, "[{\"id\": oops").unwrap();

        let cart = CartStore::load(storage, InventoryPolicy::Enforce);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_load_drops_invalid_entries() {
        let storage = Arc::new(MemoryStorage::new());
        let mouse = product("8");
        let entries = vec![
            CartEntry { product: mouse.clone(), quantity: 2 },
            CartEntry { product: product("1"), quantity: 0 },
            CartEntry { product: mouse, quantity: 9 },
        ];
        save_json(storage.as_ref(), keys::CART_ITEMS, &entries).unwrap();

        let cart = CartStore::load(storage, InventoryPolicy::Enforce);
        assert_eq!(cart.entries().len(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_load_caps_quantities_under_enforce() {
        let storage = Arc::new(MemoryStorage::new());
        let backpack = product("3"); // inventory 15
        let mut sold_out = product("4");
        sold_out.inventory = 0;
        let entries = vec![
            CartEntry { product: backpack.clone(), quantity: 40 },
            CartEntry { product: sold_out.clone(), quantity: 2 },
        ];
        save_json(storage.as_ref(), keys::CART_ITEMS, &entries).unwrap();

        let cart = CartStore::load(storage.clone(), InventoryPolicy::Enforce);
        assert_eq!(cart.entries().len(), 1);
        assert_eq!(cart.entry(&backpack.id).unwrap().quantity, 15);
        assert!(cart.entry(&sold_out.id).is_none());

        let cart = CartStore::load(storage, InventoryPolicy::Permissive);
        assert_eq!(cart.entry(&backpack.id).unwrap().quantity, 40);
        assert_eq!(cart.entry(&sold_out.id).unwrap().quantity, 2);
    }

    #[test]
    fn test_enforce_caps_add_at_inventory() {
        let (mut cart, _, _) = store(InventoryPolicy::Enforce);
        let mut scarce = product("3");
        scarce.inventory = 2;

        assert_eq!(cart.add_many(&scarce, 5), Some(CartNotice::LimitReached { available: 2 }));
        assert_eq!(cart.entry(&scarce.id).unwrap().quantity, 2);
        assert!(!cart.entry(&scarce.id).unwrap().can_increment());
    }

    #[test]
    fn test_enforce_refuses_out_of_stock() {
        let (mut cart, _, _) = store(InventoryPolicy::Enforce);
        let mut sold_out = product("3");
        sold_out.inventory = 0;

        assert_eq!(cart.add(&sold_out), CartNotice::OutOfStock);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_enforce_clamps_set_quantity() {
        let (mut cart, _, _) = store(InventoryPolicy::Enforce);
        let camera = product("4"); // inventory 12
        cart.add(&camera);

        assert_eq!(
            cart.set_quantity(&camera.id, 50),
            Some(CartNotice::LimitReached { available: 12 })
        );
        assert_eq!(cart.entry(&camera.id).unwrap().quantity, 12);
    }

    #[test]
    fn test_set_quantity_on_sold_out_entry_removes_it() {
        let (mut cart, storage, recorder) = store(InventoryPolicy::Enforce);
        let mut sold_out = product("3");
        sold_out.inventory = 0;
        cart.entries.push(CartEntry { product: sold_out.clone(), quantity: 2 });

        assert_eq!(cart.set_quantity(&sold_out.id, 3), Some(CartNotice::OutOfStock));
        assert!(cart.is_empty());
        assert!(stored_entries(&storage).is_empty());
        assert_eq!(recorder.drain(), vec![CartNotice::OutOfStock]);
    }

    #[test]
    fn test_add_many_acknowledges_once() {
        let (mut cart, storage, recorder) = store(InventoryPolicy::Enforce);
        let mouse = product("8"); // inventory 142

        assert_eq!(cart.add_many(&mouse, 3), Some(CartNotice::QuantityUpdated));
        assert_eq!(cart.add_many(&mouse, 1), Some(CartNotice::QuantityUpdated));
        assert_eq!(cart.add_many(&product("5"), 1), Some(CartNotice::Added));
        assert_eq!(
            recorder.drain(),
            vec![CartNotice::QuantityUpdated, CartNotice::QuantityUpdated, CartNotice::Added]
        );
        assert_eq!(stored_entries(&storage)[0].quantity, 4);

        assert_eq!(
            cart.add_many(&mouse, 200),
            Some(CartNotice::LimitReached { available: 142 })
        );
        assert_eq!(cart.entry(&mouse.id).unwrap().quantity, 142);
    }

    #[test]
    fn test_add_many_huge_quantity_is_applied_at_once() {
        let (mut cart, _, recorder) = store(InventoryPolicy::Permissive);
        let headphones = product("1");

        cart.add_many(&headphones, u32::MAX);
        cart.add(&headphones);
        assert_eq!(cart.entry(&headphones.id).unwrap().quantity, u32::MAX);
        assert_eq!(recorder.drain().len(), 2);
    }

    #[test]
    fn test_totals_saturate_instead_of_panicking() {
        let (mut cart, _, _) = store(InventoryPolicy::Permissive);
        let mut pricey = product("1");
        pricey.price = Decimal::from_i128_with_scale(10_i128.pow(20), 0);
        cart.add(&pricey);
        cart.set_quantity(&pricey.id, 4_000_000_000);
        cart.add(&product("8"));

        assert_eq!(cart.total_price(), Decimal::MAX);
        let summary = cart.summary();
        assert_eq!(summary.subtotal.amount, Decimal::MAX);
        assert_eq!(summary.total.amount, Decimal::MAX);
        assert!(summary.free_shipping);
    }

    #[test]
    fn test_permissive_allows_exceeding_inventory() {
        let (mut cart, _, _) = store(InventoryPolicy::Permissive);
        let mut scarce = product("3");
        scarce.inventory = 1;

        cart.add_many(&scarce, 3);
        assert_eq!(cart.entry(&scarce.id).unwrap().quantity, 3);

        assert_eq!(cart.set_quantity(&scarce.id, 40), None);
        assert_eq!(cart.entry(&scarce.id).unwrap().quantity, 40);
    }

    #[test]
    fn test_add_many_zero_is_noop() {
        let (mut cart, _, recorder) = store(InventoryPolicy::Enforce);
        assert_eq!(cart.add_many(&product("1"), 0), None);
        assert!(cart.is_empty());
        assert!(recorder.drain().is_empty());
    }

    #[test]
    fn test_summary_tax_and_shipping() {
        let (mut cart, _, _) = store(InventoryPolicy::Enforce);
        cart.add(&product("1")); // 299.99
        cart.add(&product("8")); // 79.99

        let summary = cart.summary();
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.subtotal.amount, Decimal::new(37998, 2));
        assert_eq!(summary.estimated_tax.rounded(), Decimal::new(3800, 2));
        assert_eq!(summary.total.rounded(), Decimal::new(41798, 2));
        assert_eq!(summary.total.to_string(), "$417.98");
        assert!(summary.free_shipping);

        cart.clear();
        let empty = cart.summary();
        assert_eq!(empty.subtotal.to_string(), "$0.00");
        assert!(!empty.free_shipping);
    }

    struct FailingStorage;

    impl LocalStorage for FailingStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }
    }

    #[test]
    fn test_storage_failure_is_not_surfaced() {
        let mut cart = CartStore::load(Arc::new(FailingStorage), InventoryPolicy::Enforce);
        assert_eq!(cart.add(&product("1")), CartNotice::Added);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_inventory_policy_parse() {
        assert_eq!("ENFORCE".parse(), Ok(InventoryPolicy::Enforce));
        assert_eq!("permissive".parse(), Ok(InventoryPolicy::Permissive));
        assert!("maybe".parse::<InventoryPolicy>().is_err());
    }
}
