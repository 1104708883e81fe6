//! # Account Reconciliation Engine
//!
//! Reconciles a sale total against the customer's signed account balance
//! and the tendered payment, producing the true amount due, change or
//! remaining debt, and the balance the account transitions to.
//!
//! ## The One Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  customer_debt   = max(0, −balance)                                     │
//! │  customer_credit = max(0,  balance)                                     │
//! │  amount_due      = total + customer_debt − customer_credit              │
//! │  needs_payment   = amount_due > 0                                       │
//! │                                                                         │
//! │  new_balance = balance − total + (method == credit ? 0 : tendered)     │
//! │                                                                         │
//! │  Every branch below reduces to that single identity. The branches       │
//! │  exist only to select which derived field (change vs remaining_debt)    │
//! │  is user-facing.                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This engine is invoked once per decision point. Call sites must never
//! recompute debt/credit/amount-due inline - divergent duplicate math is
//! exactly what this module exists to prevent.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::PaymentMethod;

// =============================================================================
// Reconciliation
// =============================================================================

/// The outcome of reconciling one sale against one account.
///
/// Derived, never stored; recompute from current inputs whenever a display
/// or decision needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    /// The sale total being settled.
    pub total: Money,
    /// Outstanding debt carried into this sale: `max(0, −balance)`.
    pub customer_debt: Money,
    /// Credit carried into this sale: `max(0, balance)`.
    pub customer_credit: Money,
    /// Signed: `total + debt − credit`. May be ≤ 0 when credit fully
    /// covers the purchase.
    pub amount_due_with_account: Money,
    /// Whether any tender is required to settle.
    pub needs_payment: bool,
    /// The tender that actually applies (zero for credit sales).
    pub tendered: Money,
    /// Cash handed back to the customer. Mutually exclusive with
    /// `remaining_debt`.
    pub change: Money,
    /// Shortfall recorded as new debt. Mutually exclusive with `change`.
    pub remaining_debt: Money,
    /// Signed balance the account transitions to.
    pub new_balance: Money,
}

/// Reconciles a sale total against a customer's signed balance.
///
/// ## Arguments
/// * `total` - the sale total (non-negative, already discount-clamped)
/// * `balance` - the customer's signed balance (positive = store owes
///   customer, negative = customer owes store)
/// * `method` - how the sale is settled; credit ignores `tendered`
/// * `tendered` - amount the operator recorded as received
///
/// ## Payment semantics
/// - **Credit**: no tender required; the purchase books against the
///   balance (`new_balance = balance − total`).
/// - **Cash/Transfer, nothing due**: tender is optional; anything tendered
///   is a voluntary additional payment that raises the customer's credit.
/// - **Cash/Transfer, amount due**: overpayment becomes `change`,
///   underpayment becomes `remaining_debt`. A zero tender here is blocked
///   upstream by the settlement validator; the math still reports the full
///   amount as remaining debt.
pub fn reconcile(
    total: Money,
    balance: Money,
    method: PaymentMethod,
    tendered: Money,
) -> Reconciliation {
    let customer_debt = (-balance).max_zero();
    let customer_credit = balance.max_zero();
    let amount_due_with_account = total + customer_debt - customer_credit;
    let needs_payment = amount_due_with_account.is_positive();

    let applied_tender = if method.requires_tender() {
        tendered
    } else {
        Money::zero()
    };

    let new_balance = balance - total + applied_tender;

    let (change, remaining_debt) = if method.requires_tender() && needs_payment {
        let delta = applied_tender - amount_due_with_account;
        (delta.max_zero(), (-delta).max_zero())
    } else {
        // Credit sales and fully-covered sales hand nothing back; a
        // voluntary extra tender raises the balance instead.
        (Money::zero(), Money::zero())
    };

    Reconciliation {
        total,
        customer_debt,
        customer_credit,
        amount_due_with_account,
        needs_payment,
        tendered: applied_tender,
        change,
        remaining_debt,
        new_balance,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
