//! # stockbook-store: Persistence Layer for Stockbook
//!
//! This crate provides storage for the four named collections Stockbook
//! needs: products, customers, transactions, and units. Each collection is
//! persisted as a whole-collection JSON snapshot through a key-value-shaped
//! backend.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Stockbook Data Flow                               │
//! │                                                                         │
//! │  Engine operation (sell, restock, save_product)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  stockbook-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐  │   │
//! │  │   │     Store     │    │  Collections   │   │   Backend    │  │   │
//! │  │   │  (store.rs)   │    │                │   │ (backend.rs) │  │   │
//! │  │   │               │    │ Catalog        │   │              │  │   │
//! │  │   │ load on open  │◄───│ CustomerDir    │──►│ JSON files   │  │   │
//! │  │   │ persist dirty │    │ Ledger         │   │ or memory    │  │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  data/products.json  data/customers.json                               │
//! │  data/transactions.json  data/units.json                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`backend`] - Snapshot backend trait plus file and memory impls
//! - [`catalog`] - Products and unit labels
//! - [`customers`] - Customer directory with case-insensitive lookup
//! - [`ledger`] - Append-only transaction log
//! - [`store`] - Loads collections at open, persists after each mutation
//! - [`seed`] - First-run demo data
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockbook_store::{JsonFileBackend, Store};
//!
//! let backend = JsonFileBackend::new("./data");
//! let mut store = Store::open(Box::new(backend))?;
//!
//! let products = store.catalog().products();
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod catalog;
pub mod customers;
pub mod error;
pub mod ledger;
pub mod seed;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{Backend, Collection, JsonFileBackend, MemoryBackend};
pub use catalog::Catalog;
pub use customers::CustomerDirectory;
pub use error::{StoreError, StoreResult};
pub use ledger::Ledger;
pub use store::Store;
