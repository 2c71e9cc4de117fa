//! # Store
//!
//! Owns the three in-memory collections and the snapshot backend that
//! persists them.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Store Lifecycle                                  │
//! │                                                                         │
//! │  1. OPEN                                                               │
//! │     └── Store::open(backend) → load all four snapshots                 │
//! │         (absent snapshot = empty collection; corrupt = refuse)         │
//! │                                                                         │
//! │  2. MUTATE                                                             │
//! │     └── save_product / apply_sale / ... → mutate memory,               │
//! │         then persist the dirty collections                             │
//! │                                                                         │
//! │  3. SHUTDOWN                                                           │
//! │     └── flush() → rewrite all four snapshots                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Write Discipline
//! Every mutator validates and mutates in-memory state **first**, then
//! persists. In-memory collection operations cannot fail halfway, so a
//! reported error either happened before any mutation (validation) or after
//! memory is already consistent (backend I/O) - observable state never ends
//! up half-updated.

use serde::de::DeserializeOwned;
use serde::Serialize;
use stockbook_core::{Customer, Product, Transaction};
use tracing::{debug, info};

use crate::backend::{Backend, Collection};
use crate::catalog::Catalog;
use crate::customers::CustomerDirectory;
use crate::error::{StoreError, StoreResult};
use crate::ledger::Ledger;

/// The single shared store: catalog, customer directory, and ledger over one
/// snapshot backend. Exactly one writer role (the engine) per instance.
pub struct Store {
    catalog: Catalog,
    customers: CustomerDirectory,
    ledger: Ledger,
    backend: Box<dyn Backend>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("products", &self.catalog.len())
            .field("customers", &self.customers.len())
            .field("transactions", &self.ledger.len())
            .finish()
    }
}

impl Store {
    /// Opens a store over a backend, loading all four collection snapshots.
    ///
    /// An absent snapshot loads as an empty collection (first run). A
    /// snapshot that exists but does not parse fails with
    /// [`StoreError::Corrupt`] - refusing to open beats silently dropping
    /// history.
    pub fn open(backend: Box<dyn Backend>) -> StoreResult<Self> {
        let products: Vec<Product> = load(backend.as_ref(), Collection::Products)?;
        let customers: Vec<Customer> = load(backend.as_ref(), Collection::Customers)?;
        let transactions: Vec<Transaction> = load(backend.as_ref(), Collection::Transactions)?;
        let units: Vec<String> = load(backend.as_ref(), Collection::Units)?;

        info!(
            products = products.len(),
            customers = customers.len(),
            transactions = transactions.len(),
            units = units.len(),
            "Store opened"
        );

        Ok(Store {
            catalog: Catalog::new(products, units),
            customers: CustomerDirectory::new(customers),
            ledger: Ledger::new(transactions),
            backend,
        })
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    /// The product catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The customer directory.
    pub fn customers(&self) -> &CustomerDirectory {
        &self.customers
    }

    /// The transaction ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    // =========================================================================
    // Mutators (persist after mutation)
    // =========================================================================

    /// Upserts a product and persists the catalog.
    pub fn save_product(&mut self, product: Product) -> StoreResult<()> {
        self.catalog.upsert_product(product);
        self.persist(Collection::Products)
    }

    /// Deletes a product (idempotent) and persists the catalog if anything
    /// changed. The ledger is never touched.
    pub fn delete_product(&mut self, id: &str) -> StoreResult<bool> {
        let removed = self.catalog.delete_product(id);
        if removed {
            self.persist(Collection::Products)?;
        }
        Ok(removed)
    }

    /// Adds a unit label (set-like) and persists on change.
    pub fn save_unit(&mut self, label: &str) -> StoreResult<bool> {
        let added = self.catalog.upsert_unit(label);
        if added {
            self.persist(Collection::Units)?;
        }
        Ok(added)
    }

    /// Removes a unit label (no-op if absent) and persists on change.
    pub fn remove_unit(&mut self, label: &str) -> StoreResult<bool> {
        let removed = self.catalog.remove_unit(label);
        if removed {
            self.persist(Collection::Units)?;
        }
        Ok(removed)
    }

    /// Upserts a customer and persists the directory.
    pub fn save_customer(&mut self, customer: Customer) -> StoreResult<()> {
        self.customers.upsert(customer);
        self.persist(Collection::Customers)
    }

    /// Appends a transaction and persists the ledger.
    pub fn log_transaction(&mut self, transaction: Transaction) -> StoreResult<()> {
        self.ledger.append(transaction)?;
        self.persist(Collection::Transactions)
    }

    /// Commits a sale in one step: appends the transaction, replaces the
    /// decremented product records, records the customer if new, then
    /// persists every touched collection.
    ///
    /// The fallible ledger append runs before any catalog mutation, so a
    /// malformed transaction leaves memory untouched.
    pub fn apply_sale(
        &mut self,
        updated_products: Vec<Product>,
        new_customer: Option<Customer>,
        transaction: Transaction,
    ) -> StoreResult<()> {
        self.ledger.append(transaction)?;
        for product in updated_products {
            self.catalog.upsert_product(product);
        }
        let customer_changed = new_customer.is_some();
        if let Some(customer) = new_customer {
            self.customers.upsert(customer);
        }

        self.persist(Collection::Transactions)?;
        self.persist(Collection::Products)?;
        if customer_changed {
            self.persist(Collection::Customers)?;
        }
        Ok(())
    }

    /// Commits a restock in one step: appends the import transaction,
    /// replaces the incremented product record, persists both collections.
    pub fn apply_restock(
        &mut self,
        updated_product: Product,
        transaction: Transaction,
    ) -> StoreResult<()> {
        self.ledger.append(transaction)?;
        self.catalog.upsert_product(updated_product);

        self.persist(Collection::Transactions)?;
        self.persist(Collection::Products)
    }

    /// Rewrites all four snapshots. Called once at shutdown.
    pub fn flush(&mut self) -> StoreResult<()> {
        debug!("Flushing all collections");
        for collection in Collection::ALL {
            self.persist(collection)?;
        }
        Ok(())
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Serializes one collection and hands it to the backend.
    fn persist(&mut self, collection: Collection) -> StoreResult<()> {
        let json = match collection {
            Collection::Products => to_snapshot(self.catalog.products()),
            Collection::Customers => to_snapshot(self.customers.customers()),
            Collection::Transactions => to_snapshot(self.ledger.transactions()),
            Collection::Units => to_snapshot(self.catalog.units()),
        };
        self.backend.write(collection, &json)
    }
}

/// Serializes a collection slice to its snapshot document.
fn to_snapshot<T: Serialize>(items: &[T]) -> String {
    // Domain types only hold JSON-representable data; serialization cannot
    // fail for them, and an empty snapshot is the safe degenerate case.
    serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string())
}

/// Loads one collection snapshot, treating an absent snapshot as empty.
fn load<T: DeserializeOwned>(backend: &dyn Backend, collection: Collection) -> StoreResult<Vec<T>> {
    match backend.read(collection)? {
        Some(json) => {
            serde_json::from_str(&json).map_err(|err| StoreError::corrupt(collection.key(), err))
        }
        None => Ok(Vec::new()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use chrono::Utc;
    use stockbook_core::{TxItem, TxKind};

    fn test_product(id: &str, quantity: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            unit: "pack".to_string(),
            quantity,
            initial_quantity: Some(quantity),
            image: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_tx(id: &str, kind: TxKind, product_id: &str, qty: i64) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: Utc::now(),
            kind,
            customer_name: match kind {
                TxKind::Sale => Some("Alice".to_string()),
                TxKind::Import => None,
            },
            items: vec![TxItem {
                product_id: product_id.to_string(),
                product_name: "Buttons".to_string(),
                unit: "pack".to_string(),
                change_qty: qty,
            }],
        }
    }

    #[test]
    fn test_open_empty_backend() {
        let store = Store::open(Box::new(MemoryBackend::new())).unwrap();
        assert!(store.catalog().is_empty());
        assert!(store.customers().is_empty());
        assert!(store.ledger().is_empty());
    }

    #[test]
    fn test_mutations_survive_reopen() {
        let mut backend = MemoryBackend::new();
        {
            let mut store = Store::open(Box::new(backend.clone())).unwrap();
            store.save_product(test_product("1", 10)).unwrap();
            store.save_unit("pack").unwrap();
            store
                .save_customer(Customer {
                    id: "c1".to_string(),
                    name: "Alice".to_string(),
                })
                .unwrap();
            store
                .log_transaction(test_tx("t1", TxKind::Import, "1", 10))
                .unwrap();

            // MemoryBackend clones don't share state; copy the written
            // snapshots back out so reopening sees them.
            for collection in Collection::ALL {
                if let Some(json) = store.backend.read(collection).unwrap() {
                    backend.write(collection, &json).unwrap();
                }
            }
        }

        let store = Store::open(Box::new(backend)).unwrap();
        assert_eq!(store.catalog().len(), 1);
        assert_eq!(store.catalog().units(), ["pack"]);
        assert_eq!(store.customers().len(), 1);
        assert_eq!(store.ledger().len(), 1);
    }

    #[test]
    fn test_corrupt_snapshot_refuses_to_open() {
        let mut backend = MemoryBackend::new();
        backend.write(Collection::Products, "{ not json").unwrap();

        let err = Store::open(Box::new(backend)).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Corrupt {
                collection: "products",
                ..
            }
        ));
    }

    #[test]
    fn test_apply_sale_rejects_malformed_tx_without_mutating() {
        let mut store = Store::open(Box::new(MemoryBackend::new())).unwrap();
        store.save_product(test_product("1", 10)).unwrap();

        let mut bad = test_tx("t1", TxKind::Sale, "1", 5);
        bad.items.clear();

        let result = store.apply_sale(vec![test_product("1", 5)], None, bad);
        assert!(result.is_err());
        // Catalog untouched: the quantity replacement never ran.
        assert_eq!(store.catalog().get("1").unwrap().quantity, 10);
        assert!(store.ledger().is_empty());
    }

    #[test]
    fn test_delete_product_persists_only_on_change() {
        let mut store = Store::open(Box::new(MemoryBackend::new())).unwrap();
        store.save_product(test_product("1", 10)).unwrap();

        assert!(store.delete_product("1").unwrap());
        assert!(!store.delete_product("1").unwrap());
        assert!(store.catalog().is_empty());
    }
}
