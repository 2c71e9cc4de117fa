//! # Ledger
//!
//! The append-only log of stock-changing events.
//!
//! ## Storage Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Ledger Storage Order                               │
//! │                                                                         │
//! │   append(tx) ──► insert at head                                        │
//! │                                                                         │
//! │   index 0:  newest transaction      ◄── recent(n) windows from here    │
//! │   index 1:  ...                                                        │
//! │   index N:  oldest transaction                                         │
//! │                                                                         │
//! │   Newest-first is the conventional contract consumers rely on when     │
//! │   no explicit sort is applied. Entries are immutable once appended.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transaction ids are not keys here: the ledger is a sequence, so two
//! entries with colliding time-derived ids coexist and neither is lost.

use stockbook_core::Transaction;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Append-only transaction history, newest first.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Builds the ledger from loaded snapshot contents (already newest-first).
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Ledger { transactions }
    }

    /// Appends an immutable record at the head.
    ///
    /// Fails only on malformed input: a transaction with no item lines is
    /// not a stock-changing event and is rejected before it can pollute
    /// history.
    pub fn append(&mut self, transaction: Transaction) -> StoreResult<()> {
        if transaction.items.is_empty() {
            return Err(StoreError::MalformedTransaction(
                "transaction has no item lines",
            ));
        }

        debug!(
            id = %transaction.id,
            kind = ?transaction.kind,
            lines = transaction.items.len(),
            "Appending transaction"
        );
        self.transactions.insert(0, transaction);
        Ok(())
    }

    /// Full history, newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The first `limit` entries in natural (newest-first) order.
    /// A pure windowing operation.
    pub fn recent(&self, limit: usize) -> &[Transaction] {
        &self.transactions[..limit.min(self.transactions.len())]
    }

    /// Number of recorded transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether any transaction has been recorded.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
