//! # stockbook-engine: The Inventory Engine
//!
//! The orchestrator that keeps on-hand quantity, transaction history, and
//! per-item aggregates mutually consistent. Every mutating operation in the
//! system goes through [`InventoryEngine`]; everything else only reads.
//!
//! ## Operation Surface
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Inventory Engine Surface                            │
//! │                                                                         │
//! │  Mutations (exclusive lock)         Queries (read-only)                │
//! │  ──────────────────────────         ───────────────────                │
//! │  save_product(input)                products / product(id)             │
//! │  request_delete / confirm_delete    units / customers                  │
//! │  sell(cart, customer)               transactions                       │
//! │  restock(id, qty)                   recent_transactions(limit)         │
//! │  flush()                            history_for / stats_for            │
//! │                                                                         │
//! │  Contract: "never sell more than is in stock" - the sufficiency        │
//! │  check and the decrement+append commit are one atomic unit under       │
//! │  the store lock.                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`engine`] - The engine itself plus [`ProductInput`] and [`DeleteToken`]
//! - [`error`] - [`EngineError`], the caller-facing error type

pub mod engine;
pub mod error;

pub use engine::{DeleteToken, InventoryEngine, ProductInput};
pub use error::{EngineError, EngineResult};
