//! # Domain Types
//!
//! Core domain types used throughout Stockbook.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   Transaction   │   │    Customer     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (time key)  │   │  id (UUID)      │       │
//! │  │  name           │   │  date           │   │  name           │       │
//! │  │  unit           │   │  kind           │   └─────────────────┘       │
//! │  │  quantity       │   │  customer_name  │                             │
//! │  │  initial_qty    │   │  items[]        │   ┌─────────────────┐       │
//! │  └─────────────────┘   └─────────────────┘   │     TxItem      │       │
//! │                                              │  ─────────────  │       │
//! │  ┌─────────────────┐                         │  product_id     │       │
//! │  │     TxKind      │                         │  product_name ◄─┼─ frozen
//! │  │  ─────────────  │                         │  unit         ◄─┼─ frozen
//! │  │  Sale           │                         │  change_qty     │       │
//! │  │  Import         │                         └─────────────────┘       │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Transaction items carry *frozen* copies of product name and unit taken at
//! transaction time. History stays readable after a product is renamed or
//! deleted; the live catalog record is never consulted for old entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Product
// =============================================================================

/// A stock-keeping item in the catalog.
///
/// ## Invariant
/// `quantity >= 0` in every state reachable through validated engine
/// operations. The engine is the only writer of this field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4). Immutable once assigned.
    pub id: String,

    /// Display name shown in the catalog and on history rows.
    pub name: String,

    /// Display label for the quantity unit (e.g., "piece", "box").
    pub unit: String,

    /// Current on-hand count.
    pub quantity: i64,

    /// Snapshot of `quantity` at creation time, used only for reporting.
    ///
    /// `None` marks a legacy record whose starting point was never recorded.
    /// `Some(0)` is a legitimate zero start and is never backfilled. Display
    /// layers fall back to `quantity + total_sold` when this is `None`
    /// (see [`crate::stats::initial_quantity_display`]).
    pub initial_quantity: Option<i64>,

    /// Optional opaque display reference (image data or URL).
    /// Irrelevant to consistency logic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last written by the engine.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether the product currently has stock to sell.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Checks whether `requested` units can be taken from current stock.
    pub fn can_sell(&self, requested: i64) -> bool {
        requested > 0 && requested <= self.quantity
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A known customer, recorded the first time a sale is made under their name.
///
/// Deduplicated by case-insensitive name match at sale time. Renaming a
/// customer later never merges or rewrites historical transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name, matched case-insensitively.
    pub name: String,
}

// =============================================================================
// Transaction
// =============================================================================

/// The direction of a stock-changing event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    /// Stock left the shop; quantities decreased.
    Sale,
    /// Stock arrived; quantities increased.
    Import,
}

/// One line of a transaction.
///
/// Uses the snapshot pattern: `product_name` and `unit` are frozen at
/// transaction time so the line stays readable after the product changes
/// or disappears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxItem {
    /// Product reference. May point at a deleted product; display layers
    /// must handle an unresolvable id gracefully.
    pub product_id: String,

    /// Product name at transaction time (frozen).
    pub product_name: String,

    /// Unit label at transaction time (frozen).
    pub unit: String,

    /// Always positive; the sign-meaning (added vs removed) is carried by
    /// the transaction [`TxKind`], not by this value.
    pub change_qty: i64,
}

/// An immutable entry in the ledger.
///
/// ## Immutability
/// A transaction is a historical fact. Once appended it is never edited,
/// reordered, or deleted - not even when the products it references are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Time-derived identifier, monotonic enough for newest-first views.
    /// Ids are display artifacts, not keys: two entries created in the same
    /// instant coexist in the ledger.
    pub id: String,

    /// When the transaction was committed. Immutable.
    pub date: DateTime<Utc>,

    /// Sale or import.
    pub kind: TxKind,

    /// Present for sales, absent for imports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,

    /// Ordered affected-product lines. Never empty for a well-formed entry.
    pub items: Vec<TxItem>,
}

impl Transaction {
    /// Total quantity moved by this transaction, across all lines.
    pub fn total_qty(&self) -> i64 {
        self.items.iter().map(|i| i.change_qty).sum()
    }

    /// Whether any line of this transaction is for the given product.
    pub fn touches(&self, product_id: &str) -> bool {
        self.items.iter().any(|i| i.product_id == product_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
