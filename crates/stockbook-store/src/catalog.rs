//! # Catalog
//!
//! The live set of products and the deduplicated unit-label list.
//!
//! The catalog owns product identity and current quantity. It performs no
//! stock validation of its own - that is the engine's job; methods here are
//! plain collection operations, idempotent where deletion and unit
//! deduplication need them to be.

use stockbook_core::Product;
use tracing::debug;

/// Products and unit labels, held in memory and persisted by the
/// [`Store`](crate::Store) after each mutation.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    units: Vec<String>,
}

impl Catalog {
    /// Builds a catalog from loaded snapshot contents.
    pub fn new(products: Vec<Product>, units: Vec<String>) -> Self {
        Catalog { products, units }
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Inserts a product, or replaces the full record matching its id.
    ///
    /// No partial-field merge: callers supply the complete desired record.
    pub fn upsert_product(&mut self, product: Product) {
        debug!(id = %product.id, name = %product.name, "Upserting product");
        match self.products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product,
            None => self.products.push(product),
        }
    }

    /// Removes a product by id. Returns whether a record was removed.
    ///
    /// Deleting an absent id is a no-op - deletion is idempotent. The ledger
    /// is never touched; historical lines keep their snapshots.
    pub fn delete_product(&mut self, id: &str) -> bool {
        let initial_len = self.products.len();
        self.products.retain(|p| p.id != id);
        let removed = self.products.len() != initial_len;
        if removed {
            debug!(id = %id, "Deleted product");
        }
        removed
    }

    /// Looks up a product by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// All products. No defined order; callers sort at presentation time.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    // =========================================================================
    // Units
    // =========================================================================

    /// Adds a unit label if it is non-blank and not already present.
    /// Returns whether the collection changed.
    ///
    /// Units are an autocompletion aid only; there is no referential
    /// integrity with `Product.unit`.
    pub fn upsert_unit(&mut self, label: &str) -> bool {
        let label = label.trim();
        if label.is_empty() || self.units.iter().any(|u| u == label) {
            return false;
        }
        self.units.push(label.to_string());
        true
    }

    /// Removes a unit label. Absent labels are a no-op. Existing products
    /// keep whatever unit string they already carry.
    pub fn remove_unit(&mut self, label: &str) -> bool {
        let initial_len = self.units.len();
        self.units.retain(|u| u != label);
        self.units.len() != initial_len
    }

    /// Current unit labels, in insertion order.
    pub fn units(&self) -> &[String] {
        &self.units
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
