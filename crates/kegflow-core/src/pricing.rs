//! # Pricing Module
//!
//! Computes the money breakdown of a cart: subtotal, discount amount, and
//! total. Pure function of cart contents + discount; no errors possible.
//!
//! The discount amount is intentionally not clamped to the subtotal. A
//! discount larger than the subtotal simply drives the total to its floor
//! of zero.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::money::Money;
use crate::types::Discount;

/// The money breakdown of a cart under a discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Discount applied to the subtotal (flat, or percentage of subtotal).
    pub discount_amount: Money,
    /// `max(0, subtotal − discount_amount)`. Never negative.
    pub total: Money,
}

impl PricingBreakdown {
    /// A breakdown with everything at zero (empty cart, no discount).
    pub const fn empty() -> Self {
        PricingBreakdown {
            subtotal: Money::zero(),
            discount_amount: Money::zero(),
            total: Money::zero(),
        }
    }
}

/// Prices a cart under the given discount.
pub fn price_cart(cart: &Cart, discount: &Discount) -> PricingBreakdown {
    let subtotal = cart.subtotal();
    let discount_amount = discount.amount_off(subtotal);
    let total = (subtotal - discount_amount).max_zero();

    PricingBreakdown {
        subtotal,
        discount_amount,
        total,
    }
}
