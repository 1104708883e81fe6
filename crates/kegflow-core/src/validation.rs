//! # Validation Module
//!
//! Input validation rules for KegFlow POS.
//!
//! These run at the boundary, before any business math: catalog fields when
//! an inventory snapshot is accepted, operator amounts when they are entered.
//! The stock/liters constraint is deliberately NOT validated here - that is
//! the cart's silent no-op territory (see [`crate::cart`]), and so are line
//! quantities (quantity 0 is a removal, excesses are no-ops).

use crate::error::{ValidationError, ValidationResult};
use crate::types::Discount;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: 50,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product or customer display name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit size in kegs.
///
/// ## Rules
/// - Must be positive; a zero-keg unit is meaningless and would make
///   availability math degenerate
pub fn validate_unit_size(unit_size_kegs: u32) -> ValidationResult<()> {
    if unit_size_kegs == 0 {
        return Err(ValidationError::MustBePositive {
            field: "unit size".to_string(),
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (zero allowed for promotional items)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a tendered amount in cents.
///
/// ## Rules
/// - Must be non-negative; zero is a legitimate value (credit sales, and
///   cash/transfer sales fully covered by account credit)
pub fn validate_tendered_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "tendered amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a discount.
///
/// ## Rules
/// - Flat discounts must be non-negative
/// - Percentage discounts carry no upper bound here: a discount larger
///   than the subtotal is allowed and only the total is clamped
pub fn validate_discount(discount: &Discount) -> ValidationResult<()> {
    if let Discount::Amount(cents) = *discount {
        if cents < 0 {
            return Err(ValidationError::MustNotBeNegative {
                field: "discount".to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
