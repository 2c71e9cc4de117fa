//! # Sale Cart
//!
//! The cart an operator builds up before committing a sale.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Operations                                   │
//! │                                                                         │
//! │  Operator Action            Cart Call              Cart State Change    │
//! │  ───────────────            ─────────              ─────────────────    │
//! │                                                                         │
//! │  Pick product + qty ───────► add() ──────────────► lines.push(line)    │
//! │                                                    (or accumulate qty)  │
//! │                                                                         │
//! │  Remove line ──────────────► remove() ───────────► lines.retain(..)    │
//! │                                                                         │
//! │  Abandon sale ─────────────► clear() ────────────► lines.clear()       │
//! │                                                                         │
//! │  Commit ───────────────────► engine.sell(cart) ──► (cart consumed)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Two Stock Checks
//! `add()` checks the requested quantity against the product snapshot it is
//! given. That check is a UX convenience so the operator hears "not enough
//! stock" immediately instead of at checkout. The **authoritative** check
//! happens inside the engine's `sell`, under the store lock, against live
//! quantities. The cart's answer is never trusted at commit time.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{Product, TxItem};
use crate::validation::validate_quantity;

/// A line in the sale cart.
///
/// ## Design Notes
/// - `product_id`: reference for the commit-time lookup
/// - `name`/`unit`: frozen copies taken when the line was added, so the cart
///   displays consistent data even if the product is edited mid-sale. The
///   same frozen values become the transaction's denormalized snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product ID (UUID).
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Unit label at time of adding (frozen).
    pub unit: String,

    /// Quantity to sell.
    pub qty: i64,
}

impl CartLine {
    /// Creates a new cart line from a product snapshot and quantity.
    pub fn from_product(product: &Product, qty: i64) -> Self {
        CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit: product.unit.clone(),
            qty,
        }
    }

    /// Converts this line into a transaction item snapshot.
    pub fn into_tx_item(self) -> TxItem {
        TxItem {
            product_id: self.product_id,
            product_name: self.name,
            unit: self.unit,
            change_qty: self.qty,
        }
    }
}

/// The sale cart.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product again
///   accumulates its quantity)
/// - Every line quantity is > 0
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds a product to the cart, or accumulates quantity if it is already
    /// present.
    ///
    /// ## Behavior
    /// - Rejects non-positive quantities
    /// - Rejects an add that would take the line past the product's current
    ///   stock (in-cart quantity plus the new quantity is compared against
    ///   the snapshot the caller passed in)
    pub fn add(&mut self, product: &Product, qty: i64) -> CoreResult<()> {
        validate_quantity("quantity", qty)?;

        let in_cart = self.qty_for(&product.id);
        let requested = in_cart + qty;
        if requested > product.quantity {
            return Err(CoreError::InsufficientStock {
                product_id: product.id.clone(),
                name: product.name.clone(),
                available: product.quantity,
                requested,
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.qty = requested;
            return Ok(());
        }

        self.lines.push(CartLine::from_product(product, qty));
        Ok(())
    }

    /// Removes a line by product ID. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != initial_len
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The quantity currently in the cart for a product (0 if absent).
    pub fn qty_for(&self, product_id: &str) -> i64 {
        self.lines
            .iter()
            .find(|l| l.product_id == product_id)
            .map(|l| l.qty)
            .unwrap_or(0)
    }

    /// Returns the ordered cart lines.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Consumes the cart, yielding its lines in order.
    pub fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }

    /// Returns the number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.qty).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
