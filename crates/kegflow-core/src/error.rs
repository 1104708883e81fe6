//! # Error Types
//!
//! Validation error types for kegflow-core.
//!
//! ## Where Errors Do (and Don't) Appear
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Stock constraint violations are NOT errors: a cart mutation that       │
//! │  would exceed available liters is a silent no-op, and the availability  │
//! │  flags are the caller's signal to disable the affordance.               │
//! │                                                                         │
//! │  ValidationError (this file)  - malformed operator input, rejected at   │
//! │                                 the boundary before any math runs       │
//! │  TerminalError (kegflow-terminal) - blocking settlement failures and    │
//! │                                 gateway failures                        │
//! │                                                                         │
//! │  Flow: ValidationError → TerminalError → presentation layer             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, limits)
//! 3. Errors are enum variants, never bare Strings

use thiserror::Error;

/// Input validation errors.
///
/// These occur when operator input doesn't meet requirements. Used for
/// early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::Required {
            field: "sku".to_string(),
        };
        assert_eq!(err.to_string(), "sku is required");

        let err = ValidationError::MustNotBeNegative {
            field: "tendered amount".to_string(),
        };
        assert_eq!(err.to_string(), "tendered amount must not be negative");

        let err = ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "sku has invalid format: must contain only letters, numbers, hyphens, and underscores"
        );
    }
}
