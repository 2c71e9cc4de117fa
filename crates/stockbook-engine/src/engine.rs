//! # Inventory Engine
//!
//! The central state machine. Each product is implicitly **in-stock**
//! (`quantity > 0`) or **depleted** (`quantity == 0`); `quantity < 0` is a
//! forbidden state no validated operation can reach.
//!
//! ## Thread Safety
//! The store is wrapped in `Arc<Mutex<Store>>` because:
//! 1. Sell's check-then-decrement must never interleave with another write
//!    to the same product (the classic check-then-act race)
//! 2. Exactly one writer role exists per store instance; readers share the
//!    same lock and release it quickly
//!
//! ## Sell Commit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sell Commit Flow                                  │
//! │                                                                         │
//! │  sell(cart, "Alice")                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Validate: cart non-empty, customer name non-blank                     │
//! │       │                                                                 │
//! │       ▼ ──────────────── store lock acquired ─────────────────         │
//! │  CHECK every line against live quantity                                │
//! │       │         │                                                       │
//! │       │         └── any short? → InsufficientStock, nothing changed    │
//! │       ▼                                                                 │
//! │  COMMIT: decrement quantities + resolve customer + append Sale tx      │
//! │       │                                                                 │
//! │       ▼ ──────────────── store lock released ─────────────────         │
//! │  Ok(Transaction)                                                       │
//! │                                                                         │
//! │  All-or-nothing: a failure before COMMIT leaves catalog and ledger     │
//! │  exactly as they were.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use stockbook_core::validation::{
    validate_customer_name, validate_product_name, validate_quantity, validate_unit_label,
};
use stockbook_core::{
    stats, Cart, CoreError, Customer, Product, ProductStats, Transaction, TxItem, TxKind,
    ValidationError,
};
use stockbook_store::Store;

use crate::error::{EngineError, EngineResult};

// =============================================================================
// Input / Token Types
// =============================================================================

/// Caller input for create-or-update of a product.
///
/// An empty `id` means "create": the engine assigns a fresh UUID and records
/// the entered quantity as the initial snapshot. A non-empty `id` means
/// "edit": a full-record replace of the matching product.
#[derive(Debug, Clone, Default)]
pub struct ProductInput {
    /// Empty for create; an existing product id for edit.
    pub id: String,

    /// Display name. Required.
    pub name: String,

    /// Unit label. May be blank; non-blank labels are also upserted into
    /// the unit suggestion list as a side effect.
    pub unit: String,

    /// Entered quantity. `None` (left blank on the form) defaults to 0.
    pub quantity: Option<i64>,

    /// Optional display image reference.
    pub image: Option<String>,
}

/// A single-use token issued by [`InventoryEngine::request_delete`].
///
/// Destructive deletion is a two-step protocol: the collaborator shows its
/// confirmation UI while holding the token, then passes it back to
/// [`InventoryEngine::confirm_delete`]. The engine itself never blocks on
/// user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteToken {
    token: String,
    product_id: String,
}

impl DeleteToken {
    /// The product this token would delete.
    pub fn product_id(&self) -> &str {
        &self.product_id
    }
}

// =============================================================================
// Inventory Engine
// =============================================================================

/// Validates and applies stock-changing operations; the only writer to its
/// store. Cheap to clone - clones share the same store and pending-delete
/// table.
#[derive(Clone)]
pub struct InventoryEngine {
    store: Arc<Mutex<Store>>,
    pending_deletes: Arc<Mutex<HashMap<String, String>>>,
}

impl InventoryEngine {
    /// Creates an engine owning the given store.
    ///
    /// Lifecycle: construct once at session start, call [`flush`] at
    /// shutdown.
    ///
    /// [`flush`]: InventoryEngine::flush
    pub fn new(store: Store) -> Self {
        InventoryEngine {
            store: Arc::new(Mutex::new(store)),
            pending_deletes: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Executes a function with read access to the store.
    fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Store) -> R,
    {
        let store = self.store.lock().expect("store mutex poisoned");
        f(&store)
    }

    /// Executes a function with exclusive write access to the store.
    fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Store) -> R,
    {
        let mut store = self.store.lock().expect("store mutex poisoned");
        f(&mut store)
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Creates or edits a product.
    ///
    /// ## Create (empty `input.id`)
    /// Assigns a fresh UUID and sets `initial_quantity` to the entered
    /// quantity (blank defaults to 0 - a legitimate zero start, recorded
    /// as such).
    ///
    /// ## Edit (non-empty `input.id`)
    /// Full-record replace. A legacy record whose `initial_quantity` was
    /// never recorded is backfilled from the entered quantity; a recorded
    /// value - including zero - is preserved.
    ///
    /// ## Override Semantics
    /// Editing `quantity` here is an operator override, **not** a
    /// transaction: no ledger entry is produced. Sell and Restock are the
    /// only ledger-producing paths.
    pub fn save_product(&self, input: ProductInput) -> EngineResult<Product> {
        validate_product_name(&input.name)?;
        validate_unit_label(&input.unit)?;
        let quantity = input.quantity.unwrap_or(0);
        if quantity < 0 {
            return Err(ValidationError::Negative {
                field: "quantity".to_string(),
            }
            .into());
        }

        let name = input.name.trim().to_string();
        let unit = input.unit.trim().to_string();
        let now = Utc::now();

        let product = self.with_store_mut(|store| -> EngineResult<Product> {
            let product = if input.id.is_empty() {
                Product {
                    id: Uuid::new_v4().to_string(),
                    name,
                    unit: unit.clone(),
                    quantity,
                    initial_quantity: Some(quantity),
                    image: input.image,
                    created_at: now,
                    updated_at: now,
                }
            } else {
                let existing = store
                    .catalog()
                    .get(&input.id)
                    .ok_or_else(|| CoreError::ProductNotFound(input.id.clone()))?;
                Product {
                    id: existing.id.clone(),
                    name,
                    unit: unit.clone(),
                    quantity,
                    // Legacy repair: only a never-recorded snapshot is
                    // backfilled. Some(0) stays Some(0).
                    initial_quantity: existing.initial_quantity.or(Some(quantity)),
                    image: input.image,
                    created_at: existing.created_at,
                    updated_at: now,
                }
            };

            store.save_product(product.clone())?;
            if !unit.is_empty() {
                store.save_unit(&unit)?;
            }
            Ok(product)
        })?;

        info!(id = %product.id, name = %product.name, quantity = product.quantity, "Product saved");
        Ok(product)
    }

    /// First step of deletion: issues a single-use confirmation token.
    ///
    /// Issued unconditionally - deletion is idempotent, so requesting a
    /// delete for an id that is already gone just yields a token whose
    /// confirmation reports `false`.
    pub fn request_delete(&self, product_id: &str) -> DeleteToken {
        let token = DeleteToken {
            token: Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
        };
        debug!(product_id = %product_id, "Delete requested");
        self.pending_deletes
            .lock()
            .expect("pending-delete mutex poisoned")
            .insert(token.token.clone(), token.product_id.clone());
        token
    }

    /// Second step of deletion: consumes the token and removes the product.
    ///
    /// Returns whether a record was actually removed. The ledger is never
    /// touched - historical transactions keep their denormalized snapshots.
    /// Confirming a token twice (or a token this engine never issued) fails
    /// with [`EngineError::UnknownDeleteToken`].
    pub fn confirm_delete(&self, token: DeleteToken) -> EngineResult<bool> {
        let product_id = self
            .pending_deletes
            .lock()
            .expect("pending-delete mutex poisoned")
            .remove(&token.token)
            .ok_or(EngineError::UnknownDeleteToken)?;

        let removed = self.with_store_mut(|store| store.delete_product(&product_id))?;
        if removed {
            info!(product_id = %product_id, "Product deleted");
        }
        Ok(removed)
    }

    // =========================================================================
    // Sell
    // =========================================================================

    /// Commits a sale: the cart's lines against live stock, all-or-nothing.
    ///
    /// The sufficiency check and the decrement+append run as one atomic
    /// unit under the store lock; two concurrent sells can never jointly
    /// overdraw a product.
    ///
    /// ## Failures (store and ledger unchanged)
    /// - [`ValidationError::EmptyCart`] / blank customer name
    /// - [`CoreError::ProductNotFound`] for a stale cart line
    /// - [`CoreError::InsufficientStock`] naming the product and its
    ///   current quantity
    pub fn sell(&self, cart: Cart, customer_name: &str) -> EngineResult<Transaction> {
        validate_customer_name(customer_name)?;
        if cart.is_empty() {
            return Err(ValidationError::EmptyCart.into());
        }
        let customer_name = customer_name.trim().to_string();

        let transaction = self.with_store_mut(|store| -> EngineResult<Transaction> {
            let now = Utc::now();

            // CHECK phase: every line is validated and checked here; nothing
            // in the store is mutated until all lines have passed.
            //
            // `Cart::add` keeps lines positive and unique per product, but a
            // cart can also arrive deserialized from a collaborator, so none
            // of its invariants are trusted: each quantity is re-validated,
            // and repeated lines for one product are checked against the
            // running decremented quantity, not the original snapshot.
            let mut updated: Vec<Product> = Vec::with_capacity(cart.line_count());
            for line in cart.lines() {
                validate_quantity("quantity", line.qty)?;

                let idx = match updated.iter().position(|p| p.id == line.product_id) {
                    Some(idx) => idx,
                    None => {
                        let product = store
                            .catalog()
                            .get(&line.product_id)
                            .cloned()
                            .ok_or_else(|| CoreError::ProductNotFound(line.product_id.clone()))?;
                        updated.push(product);
                        updated.len() - 1
                    }
                };
                let product = &mut updated[idx];

                if line.qty > product.quantity {
                    return Err(CoreError::InsufficientStock {
                        product_id: product.id.clone(),
                        name: product.name.clone(),
                        available: product.quantity,
                        requested: line.qty,
                    }
                    .into());
                }
                product.quantity -= line.qty;
                product.updated_at = now;
            }

            let new_customer = match store.customers().find_by_name(&customer_name) {
                Some(existing) => {
                    debug!(customer_id = %existing.id, "Matched existing customer");
                    None
                }
                None => Some(Customer {
                    id: Uuid::new_v4().to_string(),
                    name: customer_name.clone(),
                }),
            };

            let transaction = Transaction {
                id: generate_transaction_id(now),
                date: now,
                kind: TxKind::Sale,
                customer_name: Some(customer_name.clone()),
                items: cart
                    .lines()
                    .iter()
                    .cloned()
                    .map(|line| line.into_tx_item())
                    .collect(),
            };

            store.apply_sale(updated, new_customer, transaction.clone())?;
            Ok(transaction)
        })?;

        info!(
            tx_id = %transaction.id,
            customer = %customer_name,
            lines = transaction.items.len(),
            total_qty = transaction.total_qty(),
            "Sale committed"
        );
        Ok(transaction)
    }

    // =========================================================================
    // Restock
    // =========================================================================

    /// Restocks a product and records the import in the ledger.
    ///
    /// `add_qty` must be strictly positive - zero and negative additions
    /// are rejected, not silently ignored. Restocking a deleted product
    /// fails [`CoreError::ProductNotFound`] and appends nothing. There is
    /// no upper bound on quantity.
    pub fn restock(&self, product_id: &str, add_qty: i64) -> EngineResult<Transaction> {
        validate_quantity("restock quantity", add_qty)?;

        let transaction = self.with_store_mut(|store| -> EngineResult<Transaction> {
            let mut product = store
                .catalog()
                .get(product_id)
                .cloned()
                .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

            let now = Utc::now();
            let transaction = Transaction {
                id: generate_transaction_id(now),
                date: now,
                kind: TxKind::Import,
                customer_name: None,
                items: vec![TxItem {
                    product_id: product.id.clone(),
                    product_name: product.name.clone(),
                    unit: product.unit.clone(),
                    change_qty: add_qty,
                }],
            };

            product.quantity += add_qty;
            product.updated_at = now;
            store.apply_restock(product, transaction.clone())?;
            Ok(transaction)
        })?;

        info!(tx_id = %transaction.id, product_id = %product_id, add_qty, "Restock committed");
        Ok(transaction)
    }

    // =========================================================================
    // Queries (read-only)
    // =========================================================================

    /// All products. No defined order; callers sort at presentation time.
    pub fn products(&self) -> Vec<Product> {
        self.with_store(|store| store.catalog().products().to_vec())
    }

    /// Looks up a single product by id.
    pub fn product(&self, id: &str) -> Option<Product> {
        self.with_store(|store| store.catalog().get(id).cloned())
    }

    /// Current unit suggestions.
    pub fn units(&self) -> Vec<String> {
        self.with_store(|store| store.catalog().units().to_vec())
    }

    /// All known customers.
    pub fn customers(&self) -> Vec<Customer> {
        self.with_store(|store| store.customers().customers().to_vec())
    }

    /// Full transaction history, newest first.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.with_store(|store| store.ledger().transactions().to_vec())
    }

    /// The `limit` most recent transactions.
    pub fn recent_transactions(&self, limit: usize) -> Vec<Transaction> {
        self.with_store(|store| store.ledger().recent(limit).to_vec())
    }

    /// Transactions that touched a product, sorted date-descending with
    /// stable ties.
    pub fn history_for(&self, product_id: &str) -> Vec<Transaction> {
        self.with_store(|store| {
            stats::history_for_product(store.ledger().transactions(), product_id)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    /// Sold/imported totals for a product, folded from its full history.
    pub fn stats_for(&self, product_id: &str) -> ProductStats {
        self.with_store(|store| {
            let history = stats::history_for_product(store.ledger().transactions(), product_id);
            stats::stats_for_product(product_id, &history)
        })
    }

    /// Final persistence flush; call once at shutdown.
    pub fn flush(&self) -> EngineResult<()> {
        self.with_store_mut(|store| store.flush())?;
        Ok(())
    }
}

// =============================================================================
// Transaction Ids
// =============================================================================

/// Generates a time-derived transaction id: `YYMMDD-HHMMSS-NNNN`.
///
/// Monotonic enough for newest-first display; the sub-second suffix keeps
/// same-second entries distinct in the common case. Ids are display
/// artifacts, not keys - the ledger tolerates collisions without losing
/// entries.
fn generate_transaction_id(now: DateTime<Utc>) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    format!("{}-{:04}", now.format("%y%m%d-%H%M%S"), nanos % 10000)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use stockbook_store::MemoryBackend;

    fn test_engine() -> InventoryEngine {
        let store = Store::open(Box::new(MemoryBackend::new())).unwrap();
        InventoryEngine::new(store)
    }

    fn create_product(engine: &InventoryEngine, name: &str, unit: &str, qty: i64) -> Product {
        engine
            .save_product(ProductInput {
                id: String::new(),
                name: name.to_string(),
                unit: unit.to_string(),
                quantity: Some(qty),
                image: None,
            })
            .unwrap()
    }

    #[test]
    fn test_create_assigns_id_and_initial_quantity() {
        let engine = test_engine();
        let product = create_product(&engine, "Button", "pack", 100);

        assert!(!product.id.is_empty());
        assert_eq!(product.quantity, 100);
        assert_eq!(product.initial_quantity, Some(100));
        // Non-empty unit was upserted as a suggestion.
        assert_eq!(engine.units(), ["pack"]);
    }

    #[test]
    fn test_create_with_blank_quantity_defaults_to_zero() {
        let engine = test_engine();
        let product = engine
            .save_product(ProductInput {
                name: "Zipper".to_string(),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(product.quantity, 0);
        assert_eq!(product.initial_quantity, Some(0));
        // Blank unit adds no suggestion.
        assert!(engine.units().is_empty());
    }

    #[test]
    fn test_save_rejects_blank_name_and_negative_quantity() {
        let engine = test_engine();

        let err = engine
            .save_product(ProductInput {
                name: "  ".to_string(),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, EngineError::Core(CoreError::Validation(_))));

        let err = engine
            .save_product(ProductInput {
                name: "Button".to_string(),
                quantity: Some(-1),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Core(CoreError::Validation(ValidationError::Negative { .. }))
        ));
    }

    #[test]
    fn test_edit_is_an_override_without_ledger_entry() {
        let engine = test_engine();
        let product = create_product(&engine, "Button", "pack", 100);

        let edited = engine
            .save_product(ProductInput {
                id: product.id.clone(),
                name: "Button (small)".to_string(),
                unit: "pack".to_string(),
                quantity: Some(42),
                image: None,
            })
            .unwrap();

        assert_eq!(edited.quantity, 42);
        assert_eq!(edited.initial_quantity, Some(100)); // Recorded value kept
        assert_eq!(edited.created_at, product.created_at);
        assert!(engine.transactions().is_empty()); // Override, not a transaction
    }

    #[test]
    fn test_edit_unknown_id_fails_not_found() {
        let engine = test_engine();
        let err = engine
            .save_product(ProductInput {
                id: "no-such-id".to_string(),
                name: "Ghost".to_string(),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Core(CoreError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_delete_token_is_single_use() {
        let engine = test_engine();
        let product = create_product(&engine, "Button", "pack", 10);

        let token = engine.request_delete(&product.id);
        assert!(engine.confirm_delete(token.clone()).unwrap());
        assert!(matches!(
            engine.confirm_delete(token),
            Err(EngineError::UnknownDeleteToken)
        ));

        // A fresh token for the now-absent id confirms as a no-op.
        let token = engine.request_delete(&product.id);
        assert!(!engine.confirm_delete(token).unwrap());
    }

    #[test]
    fn test_restock_unknown_product_appends_nothing() {
        let engine = test_engine();
        let err = engine.restock("no-such-id", 5).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Core(CoreError::ProductNotFound(_))
        ));
        assert!(engine.transactions().is_empty());
    }

    #[test]
    fn test_transaction_id_shape() {
        let id = generate_transaction_id(Utc::now());
        // YYMMDD-HHMMSS-NNNN
        assert_eq!(id.len(), 18);
        assert_eq!(id.matches('-').count(), 2);
    }
}
