//! # Engine Error Types
//!
//! The caller-facing error type. Wraps the domain and persistence errors
//! from the lower crates so every engine operation returns one typed result.
//!
//! ## Taxonomy (what callers match on)
//! - `Core(Validation(..))` - malformed input; re-prompt locally
//! - `Core(InsufficientStock { .. })` - sale exceeds live stock; message
//!   names the product and its current quantity
//! - `Core(ProductNotFound(..))` - id no longer resolves; no-op-safe
//! - `Store(..)` - backend I/O or corrupt snapshot
//! - `UnknownDeleteToken` - stale or already-consumed confirmation token

use thiserror::Error;

use stockbook_core::{CoreError, ValidationError};
use stockbook_store::StoreError;

/// Errors returned by [`InventoryEngine`](crate::InventoryEngine) operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A delete confirmation token that was never issued or was already
    /// consumed. The two-step protocol hands out single-use tokens.
    #[error("unknown or already-consumed delete token")]
    UnknownDeleteToken,

    /// Business rule violation or input validation failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Persistence failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ValidationError> for EngineError {
    fn from(err: ValidationError) -> Self {
        EngineError::Core(CoreError::Validation(err))
    }
}

/// Convenience type alias for Results with EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_nests_into_core() {
        let err: EngineError = ValidationError::EmptyCart.into();
        assert!(matches!(
            err,
            EngineError::Core(CoreError::Validation(ValidationError::EmptyCart))
        ));
    }

    #[test]
    fn test_insufficient_stock_message_passes_through() {
        let err: EngineError = CoreError::InsufficientStock {
            product_id: "p1".to_string(),
            name: "Buttons".to_string(),
            available: 70,
            requested: 71,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Buttons: available 70, requested 71"
        );
    }
}
