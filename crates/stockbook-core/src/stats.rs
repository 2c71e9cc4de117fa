//! # Aggregation Functions
//!
//! Pure, read-only computations over the ledger: per-product history,
//! running totals, and the initial-quantity display fallback.
//!
//! Nothing here owns state. Every function is a fold or filter over slices
//! the caller already holds; the ledger and catalog are never mutated.

use serde::{Deserialize, Serialize};

use crate::types::{Product, Transaction, TxKind};

// =============================================================================
// Product Stats
// =============================================================================

/// Running totals for one product, folded from its transaction history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    /// Sum of `change_qty` across all sale lines for the product.
    pub total_sold: i64,

    /// Sum of `change_qty` across all import lines for the product.
    pub total_imported: i64,
}

// =============================================================================
// History
// =============================================================================

/// Returns the transactions that touched `product_id`, most recent first.
///
/// ## Ordering Contract
/// Sorted by `date` descending. The sort is stable, so entries with equal
/// timestamps keep their relative ledger order (ledger storage is already
/// newest-first).
pub fn history_for_product<'a>(
    transactions: &'a [Transaction],
    product_id: &str,
) -> Vec<&'a Transaction> {
    let mut history: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.touches(product_id))
        .collect();

    // Stable: equal dates preserve ledger order as the tiebreak.
    history.sort_by(|a, b| b.date.cmp(&a.date));
    history
}

/// Folds a product's history into totals.
///
/// Lines for other products within the same transaction are skipped. Every
/// line matching `product_id` counts, so a transaction carrying repeated
/// lines for one product still totals correctly.
pub fn stats_for_product(product_id: &str, history: &[&Transaction]) -> ProductStats {
    history.iter().fold(ProductStats::default(), |mut acc, t| {
        let qty: i64 = t
            .items
            .iter()
            .filter(|i| i.product_id == product_id)
            .map(|i| i.change_qty)
            .sum();
        match t.kind {
            TxKind::Sale => acc.total_sold += qty,
            TxKind::Import => acc.total_imported += qty,
        }
        acc
    })
}

/// The initial quantity to display for a product.
///
/// Uses the stored snapshot when present. For legacy records that never
/// recorded one, reconstructs the historical starting point as
/// `quantity + total_sold` - a display-time fallback, never a stored
/// correction.
pub fn initial_quantity_display(product: &Product, stats: &ProductStats) -> i64 {
    product
        .initial_quantity
        .unwrap_or(product.quantity + stats.total_sold)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TxItem;
    use chrono::{Duration, Utc};

    fn tx(id: &str, kind: TxKind, product_id: &str, qty: i64, offset_secs: i64) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: Utc::now() + Duration::seconds(offset_secs),
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
    fn test_history_filters_and_sorts_newest_first() {
        // Ledger stores newest-first; build it that way.
        let ledger = vec![
            tx("t3", TxKind::Sale, "p1", 5, 30),
            tx("t2", TxKind::Import, "p2", 9, 20),
            tx("t1", TxKind::Import, "p1", 10, 10),
        ];

        let history = history_for_product(&ledger, "p1");
        let ids: Vec<&str> = history.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t3", "t1"]);
    }

    #[test]
    fn test_history_equal_dates_keep_ledger_order() {
        let date = Utc::now();
        let mut a = tx("newer", TxKind::Sale, "p1", 1, 0);
        let mut b = tx("older", TxKind::Sale, "p1", 1, 0);
        a.date = date;
        b.date = date;

        let ledger = vec![a, b];
        let history = history_for_product(&ledger, "p1");
        let ids: Vec<&str> = history.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["newer", "older"]);
    }

    #[test]
    fn test_stats_fold_by_kind() {
        let ledger = vec![
            tx("t2", TxKind::Sale, "p1", 50, 20),
            tx("t1", TxKind::Import, "p1", 20, 10),
        ];

        let history = history_for_product(&ledger, "p1");
        let stats = stats_for_product("p1", &history);
        assert_eq!(stats.total_sold, 50);
        assert_eq!(stats.total_imported, 20);
    }

    #[test]
    fn test_stats_sum_repeated_lines_within_one_transaction() {
        let mut sale = tx("t1", TxKind::Sale, "p1", 4, 0);
        sale.items.push(TxItem {
            product_id: "p1".to_string(),
            product_name: "Buttons".to_string(),
            unit: "pack".to_string(),
            change_qty: 4,
        });

        let ledger = vec![sale];
        let history = history_for_product(&ledger, "p1");
        let stats = stats_for_product("p1", &history);
        assert_eq!(stats.total_sold, 8);
    }

    #[test]
    fn test_initial_quantity_display_prefers_stored_value() {
        let mut product = Product {
            id: "p1".to_string(),
            name: "Buttons".to_string(),
            unit: "pack".to_string(),
            quantity: 70,
            initial_quantity: Some(100),
            image: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let stats = ProductStats {
            total_sold: 50,
            total_imported: 20,
        };

        assert_eq!(initial_quantity_display(&product, &stats), 100);

        // Legacy record: reconstruct from current stock plus everything sold.
        product.initial_quantity = None;
        assert_eq!(initial_quantity_display(&product, &stats), 120);

        // An explicit zero start is respected, never treated as unset.
        product.initial_quantity = Some(0);
        assert_eq!(initial_quantity_display(&product, &stats), 0);
    }
}
