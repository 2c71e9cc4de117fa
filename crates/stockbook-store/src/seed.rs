//! # First-Run Seeding
//!
//! Pre-populates an empty store with demo data so a fresh install has
//! something to sell. This is an external bootstrap step, not part of the
//! engine's contract: it runs once, only fills collections that are empty,
//! and is never consistency-relevant afterwards.

use chrono::Utc;
use stockbook_core::{Customer, Product};
use tracing::info;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::store::Store;

/// Unit labels suggested to a brand-new shop.
pub const DEFAULT_UNITS: &[&str] = &["piece", "pack", "box", "set", "kg", "meter"];

/// Demo products for a garment-accessories shop: (name, unit, quantity).
const DEMO_PRODUCTS: &[(&str, &str, i64)] = &[
    ("White shirt buttons (small)", "pack", 100),
    ("White shirt buttons (medium)", "pack", 50),
    ("Flathead nails 5mm", "box", 20),
];

/// Demo customers.
const DEMO_CUSTOMERS: &[&str] = &["Walk-in customer", "Riverside Tailor Shop"];

/// Seeds demo data into whichever collections are empty.
///
/// Returns whether anything was written. Collections that already hold data
/// are left exactly as they are, so calling this on every startup is safe.
pub fn seed_if_empty(store: &mut Store) -> StoreResult<bool> {
    let mut seeded = false;

    if store.catalog().is_empty() {
        let now = Utc::now();
        for (name, unit, quantity) in DEMO_PRODUCTS {
            store.save_product(Product {
                id: Uuid::new_v4().to_string(),
                name: (*name).to_string(),
                unit: (*unit).to_string(),
                quantity: *quantity,
                initial_quantity: Some(*quantity),
                image: None,
                created_at: now,
                updated_at: now,
            })?;
        }
        info!(count = DEMO_PRODUCTS.len(), "Seeded demo products");
        seeded = true;
    }

    if store.customers().is_empty() {
        for name in DEMO_CUSTOMERS {
            store.save_customer(Customer {
                id: Uuid::new_v4().to_string(),
                name: (*name).to_string(),
            })?;
        }
        info!(count = DEMO_CUSTOMERS.len(), "Seeded demo customers");
        seeded = true;
    }

    if store.catalog().units().is_empty() {
        for unit in DEFAULT_UNITS {
            store.save_unit(unit)?;
        }
        info!(count = DEFAULT_UNITS.len(), "Seeded default unit labels");
        seeded = true;
    }

    Ok(seeded)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    #[test]
    fn test_seed_fills_empty_store() {
        let mut store = Store::open(Box::new(MemoryBackend::new())).unwrap();

        assert!(seed_if_empty(&mut store).unwrap());
        assert_eq!(store.catalog().len(), DEMO_PRODUCTS.len());
        assert_eq!(store.customers().len(), DEMO_CUSTOMERS.len());
        assert_eq!(store.catalog().units().len(), DEFAULT_UNITS.len());
    }

    #[test]
    fn test_seed_is_a_noop_on_populated_store() {
        let mut store = Store::open(Box::new(MemoryBackend::new())).unwrap();
        seed_if_empty(&mut store).unwrap();

        let product_id = store.catalog().products()[0].id.clone();
        assert!(!seed_if_empty(&mut store).unwrap());
        // Existing records untouched, not duplicated.
        assert_eq!(store.catalog().len(), DEMO_PRODUCTS.len());
        assert!(store.catalog().get(&product_id).is_some());
    }
}
