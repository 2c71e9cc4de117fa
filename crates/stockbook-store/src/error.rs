//! # Store Error Types
//!
//! Error types for persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds collection context                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  EngineError (stockbook-engine) ← What callers see                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A collection snapshot exists but does not parse.
    ///
    /// ## When This Occurs
    /// - Hand-edited data file
    /// - Truncated write from a crash
    ///
    /// The store refuses to open rather than silently dropping history.
    #[error("{collection} snapshot is corrupt: {source}")]
    Corrupt {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Backend read or write failed.
    ///
    /// ## When This Occurs
    /// - Data directory not writable
    /// - Disk full
    #[error("backend I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A transaction failed the ledger's structural checks.
    ///
    /// The only structural rule is "at least one item line"; a kind-less
    /// transaction is unrepresentable in the type system.
    #[error("malformed transaction: {0}")]
    MalformedTransaction(&'static str),
}

impl StoreError {
    /// Creates a Corrupt error for a collection.
    pub fn corrupt(collection: &'static str, source: serde_json::Error) -> Self {
        StoreError::Corrupt { collection, source }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
