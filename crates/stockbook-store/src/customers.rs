//! # Customer Directory
//!
//! Known customer names, deduplicated case-insensitively at sale time.
//!
//! The directory must never hold two entries whose names differ only by
//! case; the engine enforces that by always calling [`find_by_name`]
//! before inserting. Editing a name later does not merge historical
//! transactions - those carry their own denormalized customer name.
//!
//! [`find_by_name`]: CustomerDirectory::find_by_name

use stockbook_core::Customer;

/// The customer collection.
#[derive(Debug, Clone, Default)]
pub struct CustomerDirectory {
    customers: Vec<Customer>,
}

impl CustomerDirectory {
    /// Builds the directory from loaded snapshot contents.
    pub fn new(customers: Vec<Customer>) -> Self {
        CustomerDirectory { customers }
    }

    /// Case-insensitive exact-name lookup. Returns at most one match.
    pub fn find_by_name(&self, name: &str) -> Option<&Customer> {
        let needle = name.trim().to_lowercase();
        self.customers
            .iter()
            .find(|c| c.name.to_lowercase() == needle)
    }

    /// Inserts a customer, or replaces the record matching its id.
    /// Insert-only in practice; the replace arm exists for snapshot reloads.
    pub fn upsert(&mut self, customer: Customer) {
        match self.customers.iter_mut().find(|c| c.id == customer.id) {
            Some(existing) => *existing = customer,
            None => self.customers.push(customer),
        }
    }

    /// All known customers.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Number of known customers.
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(id: &str, name: &str) -> Customer {
        Customer {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_find_by_name_ignores_case_and_padding() {
        let mut dir = CustomerDirectory::default();
        dir.upsert(customer("1", "Alice"));

        assert_eq!(dir.find_by_name("alice").unwrap().id, "1");
        assert_eq!(dir.find_by_name("ALICE").unwrap().id, "1");
        assert_eq!(dir.find_by_name("  Alice ").unwrap().id, "1");
        assert!(dir.find_by_name("Alicia").is_none());
    }

    #[test]
    fn test_upsert_replaces_by_id() {
        let mut dir = CustomerDirectory::default();
        dir.upsert(customer("1", "Alice"));
        dir.upsert(customer("1", "Alice Nguyen"));

        assert_eq!(dir.len(), 1);
        assert_eq!(dir.customers()[0].name, "Alice Nguyen");
    }
}
