//! # stockbook-core: Pure Business Logic for Stockbook
//!
//! This crate is the **heart** of Stockbook. It contains the inventory
//! consistency rules as pure functions and types, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Stockbook Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                Presentation (external collaborator)             │   │
//! │  │    Product forms ──► Sales counter ──► History viewer          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   stockbook-engine                              │   │
//! │  │    save_product, sell, restock, confirm_delete, queries        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stockbook-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   cart    │  │   stats   │  │ validation│  │   │
//! │  │   │  Product  │  │   Cart    │  │  history  │  │   rules   │  │   │
//! │  │   │Transaction│  │ CartLine  │  │  totals   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILE SYSTEM • NO NETWORK • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    stockbook-store                              │   │
//! │  │         JSON snapshot backends, catalog, ledger, seeding        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Customer, Transaction)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//! - [`cart`] - Build-time sale cart with frozen line snapshots
//! - [`stats`] - Pure history and aggregate computations over the ledger
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: File system, network, database access is FORBIDDEN here
//! 3. **Integer Quantities**: On-hand counts are i64 and never go below zero
//! 4. **Explicit Errors**: All failures are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod stats;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use stockbook_core::Product` instead of
// `use stockbook_core::types::Product`

pub use cart::{Cart, CartLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use stats::ProductStats;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product display name.
///
/// ## Business Reason
/// Keeps names printable on labels and history rows. Anything longer is
/// almost certainly a paste mistake.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length of a unit label ("piece", "box", ...).
pub const MAX_UNIT_LENGTH: usize = 50;
