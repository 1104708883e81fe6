//! # Domain Types
//!
//! Core domain types used throughout KegFlow POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────────┐      │
//! │  │    Product      │   │ CustomerAccount  │   │    Discount     │      │
//! │  │  ─────────────  │   │  ──────────────  │   │  ─────────────  │      │
//! │  │  id (UUID)      │   │  id (UUID)       │   │  Amount(cents)  │      │
//! │  │  unit_size_kegs │   │  balance_cents   │   │  Percentage(bps)│      │
//! │  │  price_cents    │   │    (SIGNED)      │   └─────────────────┘      │
//! │  │  stock_units    │   │  credit_limit    │                            │
//! │  └─────────────────┘   └──────────────────┘                            │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ PaymentMethod   │   │  CustomerKind   │   │    SaleType     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Cash           │   │  Retail         │   │  Retail         │       │
//! │  │  Transfer       │   │  Wholesale      │   │  Wholesale      │       │
//! │  │  Credit         │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Signed Balance Convention
//! `balance > 0` ⇒ store owes customer (credit);
//! `balance < 0` ⇒ customer owes store (debt);
//! `balance = 0` ⇒ settled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::units::{liters_for, Liters};

// =============================================================================
// Product
// =============================================================================

/// A bulk-liquid product line available for sale.
///
/// Created and updated by the external inventory collaborator; read-only to
/// this core. The authoritative stock constraint is the shared pool of
/// liters, not `stock_units` - the per-line count is informational, except
/// that a line with zero units on hand cannot be added to a cart at all.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Display name shown to the operator and on the receipt.
    pub name: String,

    /// Number of kegs represented by one sellable unit
    /// (1 for a single keg, 9 for a drum).
    pub unit_size_kegs: u32,

    /// Price per sellable unit, in cents.
    pub price_cents: i64,

    /// Sellable units currently on hand for this product line.
    pub stock_units: i64,

    /// Whether the product is active (soft delete).
    pub is_active: bool,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Liters drawn from the shared pool by one unit of this product.
    #[inline]
    pub fn liters_per_unit(&self) -> Liters {
        liters_for(self.unit_size_kegs)
    }

    /// Checks whether the product line has any units on hand at all.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock_units > 0
    }
}

// =============================================================================
// Customer Account
// =============================================================================

/// Customer classification, used to pick the sale type when a customer is
/// selected at the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CustomerKind {
    Retail,
    Wholesale,
}

/// A customer account with a signed running balance.
///
/// Owned by the external customer-management collaborator; this core only
/// reads `balance_cents` and produces the new balance as an output value.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerAccount {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Retail or wholesale classification.
    pub kind: CustomerKind,

    /// Signed balance in cents. Positive = credit, negative = debt.
    pub balance_cents: i64,

    /// Informational cap on how far into debt the account may go.
    /// Never enforced by the reconciliation math itself.
    pub credit_limit_cents: i64,
}

impl CustomerAccount {
    /// Returns the signed balance as Money.
    #[inline]
    pub fn balance(&self) -> Money {
        Money::from_cents(self.balance_cents)
    }

    /// Outstanding debt: `max(0, -balance)`.
    #[inline]
    pub fn debt(&self) -> Money {
        (-self.balance()).max_zero()
    }

    /// Available credit: `max(0, balance)`.
    #[inline]
    pub fn credit(&self) -> Money {
        self.balance().max_zero()
    }
}

// =============================================================================
// Sale Type
// =============================================================================

/// Whether the current sale is rung up as retail or wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SaleType {
    Retail,
    Wholesale,
}

impl Default for SaleType {
    fn default() -> Self {
        SaleType::Retail
    }
}

impl From<CustomerKind> for SaleType {
    fn from(kind: CustomerKind) -> Self {
        match kind {
            CustomerKind::Retail => SaleType::Retail,
            CustomerKind::Wholesale => SaleType::Wholesale,
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Bank transfer recorded by the operator.
    Transfer,
    /// On-account sale: the purchase is booked against the customer's
    /// balance, no tender changes hands.
    Credit,
}

impl PaymentMethod {
    /// Whether this method settles with money changing hands now.
    ///
    /// Credit sales ignore the tendered amount entirely.
    #[inline]
    pub const fn requires_tender(&self) -> bool {
        !matches!(self, PaymentMethod::Credit)
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

// =============================================================================
// Discount
// =============================================================================

/// A sale-level discount, flat or percentage.
///
/// ## Representation
/// Percentage discounts are basis points (1000 = 10%) so all discount math
/// stays in integers. The discount amount is deliberately NOT clamped to the
/// subtotal - the total is clamped at zero instead (see `pricing`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Discount {
    /// Flat discount in cents.
    Amount(i64),
    /// Percentage discount in basis points (1000 = 10%).
    Percentage(u32),
}

impl Discount {
    /// No discount.
    #[inline]
    pub const fn none() -> Self {
        Discount::Amount(0)
    }

    /// The discount amount for a given subtotal.
    pub fn amount_off(&self, subtotal: Money) -> Money {
        match *self {
            Discount::Amount(cents) => Money::from_cents(cents),
            Discount::Percentage(bps) => subtotal.percent_bps(bps),
        }
    }
}

impl Default for Discount {
    fn default() -> Self {
        Discount::none()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
