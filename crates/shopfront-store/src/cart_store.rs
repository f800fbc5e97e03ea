//! # Cart Store
//!
//! The single owner of the cart and its durable snapshot.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          CartStore                                      │
//! │                                                                         │
//! │  open(storage, key)                                                    │
//! │       │ read snapshot                                                   │
//! │       ├── absent ─────────────► empty cart   LoadStatus::Missing        │
//! │       ├── parses ─────────────► merged lines LoadStatus::Loaded         │
//! │       └── unreadable/corrupt ─► empty cart   LoadStatus::Recovered      │
//! │                                                                         │
//! │  add_to_cart / remove_item / update_quantity / checkout / clear_cart   │
//! │       │                                                                 │
//! │       ├── 1. mutate the in-memory Cart                                  │
//! │       └── 2. encode + write the full snapshot ──► SaveStatus            │
//! │              (a failed write is logged; memory is not rolled back)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No cart operation returns an error. Storage problems are visible only
//! through [`CartStore::load_status`], [`CartStore::last_save`] and the log.

use serde::Serialize;
use tracing::{debug, info, warn};

use shopfront_core::{decremented, incremented, Cart, CartLine, Money, ProductId, Selection};

use crate::config::StoreConfig;
use crate::error::StorageResult;
use crate::snapshot;
use crate::storage::{FileStorage, KeyValueStorage};

// =============================================================================
// Status Types
// =============================================================================

/// What happened when the snapshot was read at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadStatus {
    /// No snapshot stored yet.
    Missing,

    /// Snapshot decoded into `lines` distinct lines.
    Loaded { lines: usize },

    /// Snapshot could not be read or decoded; started empty.
    Recovered { reason: String },
}

/// Outcome of the most recent snapshot write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SaveStatus {
    /// No mutation has happened since open.
    NotAttempted,

    Saved,

    /// The write failed; the in-memory cart is ahead of storage.
    Failed { reason: String },
}

impl SaveStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, SaveStatus::Failed { .. })
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// Cart state plus the storage slot it is mirrored to.
#[derive(Debug)]
pub struct CartStore<S: KeyValueStorage> {
    storage: S,
    key: String,
    cart: Cart,
    load_status: LoadStatus,
    last_save: SaveStatus,
}

impl CartStore<FileStorage> {
    /// Opens file storage from `config` and loads the cart from it.
    ///
    /// Fails only if the data directory can't be created; a bad snapshot
    /// still opens as an empty cart.
    pub fn open_file(config: &StoreConfig) -> StorageResult<Self> {
        let storage = config.open_storage()?;
        Ok(CartStore::open(storage, config.storage_key.clone()))
    }
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Loads the cart stored under `key`.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();

        let (cart, load_status) = match storage.read(&key) {
            Ok(None) => {
                debug!(key = %key, "No stored cart, starting empty");
                (Cart::new(), LoadStatus::Missing)
            }
            Ok(Some(text)) => match snapshot::decode(&text) {
                Ok(cart) => {
                    let lines = cart.line_count();
                    info!(key = %key, lines, "Cart loaded");
                    (cart, LoadStatus::Loaded { lines })
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "Stored cart is corrupt, starting empty");
                    (Cart::new(), LoadStatus::Recovered { reason: e.to_string() })
                }
            },
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read stored cart, starting empty");
                (Cart::new(), LoadStatus::Recovered { reason: e.to_string() })
            }
        };

        CartStore {
            storage,
            key,
            cart,
            load_status,
            last_save: SaveStatus::NotAttempted,
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a line, merging into an existing line with the same id.
    pub fn add_to_cart(&mut self, line: CartLine) -> &Cart {
        debug!(id = %line.id, quantity = line.quantity, "Adding to cart");
        self.cart.add(line);
        self.persist()
    }

    /// Removes the line with `id`, if any.
    pub fn remove_item(&mut self, id: ProductId) -> &Cart {
        let removed = self.cart.remove(id);
        debug!(id = %id, removed, "Removing from cart");
        self.persist()
    }

    /// Sets a line's quantity verbatim. Zero and negative values are stored
    /// as given.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) -> &Cart {
        let updated = self.cart.update_quantity(id, quantity);
        debug!(id = %id, quantity, updated, "Updating quantity");
        self.persist()
    }

    /// `quantity + 1` for the line with `id`. Absent ids are left alone and
    /// nothing is written.
    pub fn increment(&mut self, id: ProductId) -> &Cart {
        let Some(quantity) = self.cart.get(id).map(|line| incremented(line.quantity)) else {
            return &self.cart;
        };
        self.update_quantity(id, quantity)
    }

    /// `max(quantity - 1, 1)` for the line with `id`. Absent ids are left
    /// alone and nothing is written.
    pub fn decrement(&mut self, id: ProductId) -> &Cart {
        let Some(quantity) = self.cart.get(id).map(|line| decremented(line.quantity)) else {
            return &self.cart;
        };
        self.update_quantity(id, quantity)
    }

    /// Removes every selected line.
    pub fn checkout(&mut self, selected: &Selection) -> &Cart {
        let removed = self.cart.checkout(selected);
        info!(selected = selected.len(), removed, "Checkout");
        self.persist()
    }

    /// Empties the cart and stores the empty snapshot.
    pub fn clear_cart(&mut self) -> &Cart {
        debug!(lines = self.cart.line_count(), "Clearing cart");
        self.cart.clear();
        self.persist()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Read-only view of the cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn total_for_selection(&self, selected: &Selection) -> Money {
        self.cart.total_for_selection(selected)
    }

    pub fn line_count(&self) -> usize {
        self.cart.line_count()
    }

    pub fn total_quantity(&self) -> i64 {
        self.cart.total_quantity()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&CartLine> {
        self.cart.get(id)
    }

    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    pub fn last_save(&self) -> &SaveStatus {
        &self.last_save
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the store, returning its storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    fn persist(&mut self) -> &Cart {
        let result = snapshot::encode(&self.cart)
            .and_then(|text| self.storage.write(&self.key, &text));

        self.last_save = match result {
            Ok(()) => SaveStatus::Saved,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to save cart, keeping in-memory state");
                SaveStatus::Failed { reason: e.to_string() }
            }
        };

        &self.cart
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::MemoryStorage;
    use tempfile::TempDir;

    fn line(id: u32, price_major: i64, quantity: i64) -> CartLine {
        CartLine::new(
            ProductId::new(id),
            format!("Product {id}"),
            Money::from_major_minor(price_major, 0),
            quantity,
        )
    }

    fn empty_store() -> CartStore<MemoryStorage> {
        CartStore::open(MemoryStorage::new(), "cart")
    }

    fn ids(cart: &Cart) -> Vec<u32> {
        cart.lines().iter().map(|line| line.id.get()).collect()
    }

    /// Storage whose writes always fail.
    #[derive(Default)]
    struct FailingStorage {
        attempts: usize,
    }

    impl KeyValueStorage for FailingStorage {
        fn read(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }

        fn write(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
            self.attempts += 1;
            Err(StorageError::Unavailable("disk full".to_string()))
        }
    }

    /// Storage whose reads fail.
    struct UnreadableStorage;

    impl KeyValueStorage for UnreadableStorage {
        fn read(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Unavailable("locked".to_string()))
        }

        fn write(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_open_without_snapshot_is_empty() {
        let store = empty_store();
        assert!(store.is_empty());
        assert_eq!(store.load_status(), &LoadStatus::Missing);
        assert_eq!(store.last_save(), &SaveStatus::NotAttempted);
    }

    #[test]
    fn test_add_merges_and_persists() {
        let mut store = empty_store();
        store.add_to_cart(line(1, 10, 2));
        let cart = store.add_to_cart(line(1, 10, 3));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
        assert_eq!(store.last_save(), &SaveStatus::Saved);
        assert_eq!(
            store.storage().get("cart"),
            Some(r#"[{"id":1,"title":"Product 1","price":10,"quantity":5}]"#)
        );
    }

    #[test]
    fn test_snapshot_reloads_identical_cart() {
        let mut store = empty_store();
        store.add_to_cart(line(3, 4, 1));
        store.add_to_cart(line(1, 10, 2));
        store.update_quantity(ProductId::new(3), -2);
        let before = store.cart().clone();

        let reopened = CartStore::open(store.into_storage(), "cart");
        assert_eq!(reopened.cart(), &before);
        assert_eq!(reopened.load_status(), &LoadStatus::Loaded { lines: 2 });
    }

    #[test]
    fn test_cleared_cart_reloads_empty() {
        let mut store = empty_store();
        store.add_to_cart(line(1, 10, 1));
        store.clear_cart();
        assert_eq!(store.storage().get("cart"), Some("[]"));

        let reopened = CartStore::open(store.into_storage(), "cart");
        assert!(reopened.is_empty());
        assert_eq!(reopened.load_status(), &LoadStatus::Loaded { lines: 0 });
    }

    #[test]
    fn test_corrupt_snapshot_starts_empty() {
        let storage = MemoryStorage::new().with_value("cart", "{not json");
        let mut store = CartStore::open(storage, "cart");

        assert!(store.is_empty());
        assert!(matches!(store.load_status(), LoadStatus::Recovered { .. }));

        store.add_to_cart(line(2, 5, 1));
        assert_eq!(ids(store.cart()), vec![2]);
        assert_eq!(store.last_save(), &SaveStatus::Saved);
    }

    #[test]
    fn test_unreadable_storage_starts_empty() {
        let store = CartStore::open(UnreadableStorage, "cart");
        assert!(store.is_empty());
        assert_eq!(
            store.load_status(),
            &LoadStatus::Recovered {
                reason: "Storage unavailable: locked".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_ids_in_snapshot_are_merged() {
        let storage = MemoryStorage::new().with_value(
            "cart",
            r#"[{"id":1,"title":"A","price":2,"quantity":1},{"id":1,"title":"B","price":3,"quantity":4}]"#,
        );
        let store = CartStore::open(storage, "cart");

        assert_eq!(store.line_count(), 1);
        let merged = store.get(ProductId::new(1)).unwrap();
        assert_eq!(merged.title, "A");
        assert_eq!(merged.quantity, 5);
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let mut store = CartStore::open(FailingStorage::default(), "cart");
        store.add_to_cart(line(1, 10, 1));

        assert_eq!(ids(store.cart()), vec![1]);
        assert!(store.last_save().is_failed());
        assert_eq!(store.storage().attempts, 1);

        store.remove_item(ProductId::new(1));
        assert!(store.is_empty());
        assert_eq!(store.storage().attempts, 2);
    }

    #[test]
    fn test_checkout_removes_selected() {
        let mut store = empty_store();
        store.add_to_cart(line(1, 10, 1));
        store.add_to_cart(line(2, 5, 1));

        let cart = store.checkout(&Selection::from_ids([1]));
        assert_eq!(ids(cart), vec![2]);

        let reopened = CartStore::open(store.into_storage(), "cart");
        assert_eq!(ids(reopened.cart()), vec![2]);
    }

    #[test]
    fn test_checkout_absent_ids_leaves_cart() {
        let mut store = empty_store();
        store.add_to_cart(line(1, 10, 1));
        store.add_to_cart(line(2, 5, 1));
        let before = store.cart().clone();

        store.checkout(&Selection::from_ids([9, 10]));
        assert_eq!(store.cart(), &before);
    }

    #[test]
    fn test_update_quantity_is_verbatim() {
        let mut store = empty_store();
        store.add_to_cart(line(1, 10, 3));

        store.update_quantity(ProductId::new(1), 0);
        assert_eq!(store.get(ProductId::new(1)).unwrap().quantity, 0);

        store.update_quantity(ProductId::new(1), -4);
        assert_eq!(store.get(ProductId::new(1)).unwrap().quantity, -4);

        store.update_quantity(ProductId::new(42), 7);
        assert_eq!(store.line_count(), 1);
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut store = empty_store();
        store.add_to_cart(line(1, 10, 1));

        store.decrement(ProductId::new(1));
        assert_eq!(store.get(ProductId::new(1)).unwrap().quantity, 1);

        store.increment(ProductId::new(1));
        store.increment(ProductId::new(1));
        assert_eq!(store.get(ProductId::new(1)).unwrap().quantity, 3);

        store.decrement(ProductId::new(1));
        assert_eq!(store.get(ProductId::new(1)).unwrap().quantity, 2);
    }

    #[test]
    fn test_huge_quantities_saturate_and_reload() {
        let mut store = empty_store();
        store.add_to_cart(line(1, 10, 1));
        store.add_to_cart(line(2, 5, 1));

        store.update_quantity(ProductId::new(1), i64::MAX);
        store.increment(ProductId::new(1));
        assert_eq!(store.get(ProductId::new(1)).unwrap().quantity, i64::MAX);
        assert_eq!(store.total_quantity(), i64::MAX);
        assert_eq!(
            store.total_for_selection(&Selection::from_ids([1, 2])),
            Money::from_cents(i64::MAX)
        );

        let reopened = CartStore::open(store.into_storage(), "cart");
        assert_eq!(reopened.load_status(), &LoadStatus::Loaded { lines: 2 });
        assert_eq!(reopened.total_quantity(), i64::MAX);
    }

    #[test]
    fn test_snapshot_price_beyond_exact_range_is_recovered() {
        let storage = MemoryStorage::new().with_value(
            "cart",
            r#"[{"id":1,"title":"Yacht","price":100000000000000,"quantity":1}]"#,
        );
        let store = CartStore::open(storage, "cart");

        assert!(store.is_empty());
        assert!(matches!(store.load_status(), LoadStatus::Recovered { .. }));
    }

    #[test]
    fn test_increment_absent_id_does_not_write() {
        let mut store = CartStore::open(FailingStorage::default(), "cart");
        store.increment(ProductId::new(5));
        store.decrement(ProductId::new(5));

        assert_eq!(store.storage().attempts, 0);
        assert_eq!(store.last_save(), &SaveStatus::NotAttempted);
    }

    #[test]
    fn test_queries() {
        let mut store = empty_store();
        store.add_to_cart(line(1, 10, 2));
        store.add_to_cart(line(2, 5, 1));

        let both = Selection::from_ids([1, 2]);
        assert_eq!(store.total_for_selection(&both), Money::from_cents(2500));
        assert_eq!(store.total_for_selection(&Selection::new()), Money::zero());
        assert_eq!(store.line_count(), 2);
        assert_eq!(store.total_quantity(), 3);
        assert_eq!(store.lines().len(), 2);
    }

    #[test]
    fn test_open_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig::new(dir.path());

        let mut store = CartStore::open_file(&config).unwrap();
        assert_eq!(store.load_status(), &LoadStatus::Missing);
        store.add_to_cart(line(1, 10, 2));
        assert!(config.snapshot_path().is_file());

        let reopened = CartStore::open_file(&config).unwrap();
        assert_eq!(ids(reopened.cart()), vec![1]);
        assert_eq!(reopened.key(), "cart");
    }

    #[test]
    fn test_status_serializes_tagged() {
        let json = serde_json::to_string(&LoadStatus::Loaded { lines: 2 }).unwrap();
        assert_eq!(json, r#"{"status":"loaded","lines":2}"#);
    }
}
