//! # Cart Module
//!
//! The stock-constrained cart: ordered line items over a shared pool of
//! liquid stock.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operator Action            Cart Method              Constraint         │
//! │  ───────────────            ───────────              ──────────         │
//! │                                                                         │
//! │  Tap product ─────────────► add_unit() ────────────► liters + stock     │
//! │                                                                         │
//! │  Change quantity ─────────► set_quantity() ────────► liters (delta)     │
//! │                                                                         │
//! │  Set quantity to 0 ───────► set_quantity() ────────► line removed       │
//! │                                                                         │
//! │  Settle / cancel ─────────► clear() ───────────────► (none)             │
//! │                                                                         │
//! │  A rejected mutation is a SILENT NO-OP, never an error. The             │
//! │  availability flags are the presentation layer's signal to disable      │
//! │  the affordance; no recovery path exists at this boundary.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `product_id` (adding the same product increments)
//! - Line quantity is always ≥ 1; quantity 0 removes the line
//! - `Σ(line.quantity × liters_per_unit) ≤ total_available_liters` after
//!   every mutation - this module is the ONLY place cart liters can grow,
//!   so the invariant is guaranteed here and nowhere else

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::Product;
use crate::units::{check_availability, liters_for, Liters, StockAvailability};
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// A line item in the cart.
///
/// ## Snapshot Pattern
/// Product details (sku, name, price, unit size) are frozen at the moment
/// the line is created. If the catalog changes while the sale is open, the
/// cart keeps displaying and pricing what the operator agreed to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product ID (UUID) for catalog lookup.
    pub product_id: String,

    /// SKU at time of adding (frozen).
    pub sku: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Unit size in kegs at time of adding (frozen).
    pub unit_size_kegs: u32,

    /// Price per unit in cents at time of adding (frozen).
    pub unit_price_cents: i64,

    /// Units of this product in the cart. Always ≥ 1.
    pub quantity: i64,

    /// When this line was first added.
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a new cart line from a product with quantity 1.
    pub fn from_product(product: &Product) -> Self {
        CartLine {
            product_id: product.id.clone(),
            sku: product.sku.clone(),
            name: product.name.clone(),
            unit_size_kegs: product.unit_size_kegs,
            unit_price_cents: product.price_cents,
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// Line total in cents (unit price × quantity).
    #[inline]
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }

    /// Liters this line draws from the shared pool.
    #[inline]
    pub fn consumed_liters(&self) -> Liters {
        liters_for(self.unit_size_kegs) * self.quantity
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The stock-constrained cart.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in the cart, in insertion order.
    pub lines: Vec<CartLine>,

    /// When the cart was created/last cleared.
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Total liters the cart draws from the shared pool.
    pub fn consumed_liters(&self) -> Liters {
        self.lines
            .iter()
            .fold(Liters::zero(), |acc, line| acc + line.consumed_liters())
    }

    /// Runs the stock availability checker for a candidate unit size
    /// against the current cart contents.
    pub fn availability_for(
        &self,
        unit_size_kegs: u32,
        total_available_liters: Liters,
    ) -> StockAvailability {
        check_availability(unit_size_kegs, total_available_liters, self.consumed_liters())
    }

    /// Adds one unit of a product, or increments its existing line.
    ///
    /// ## Behavior
    /// Silent no-op (returns `false`, cart unchanged) when:
    /// - the product line has no units on hand (`stock_units == 0`)
    /// - one more unit would not fit in remaining liters
    /// - the cart already holds [`MAX_CART_LINES`] distinct lines
    /// - the line is already at [`MAX_LINE_QUANTITY`]
    ///
    /// Returns `true` when the unit was added.
    pub fn add_unit(&mut self, product: &Product, total_available_liters: Liters) -> bool {
        if !product.in_stock() {
            return false;
        }

        let availability = self.availability_for(product.unit_size_kegs, total_available_liters);
        if !availability.is_available {
            return false;
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            if line.quantity >= MAX_LINE_QUANTITY {
                return false;
            }
            line.quantity += 1;
            return true;
        }

        if self.lines.len() >= MAX_CART_LINES {
            return false;
        }

        self.lines.push(CartLine::from_product(product));
        true
    }

    /// Sets the quantity of an existing line.
    ///
    /// ## Behavior
    /// - `new_quantity == 0` removes the line (always permitted)
    /// - decreasing is always permitted
    /// - increasing re-runs the availability checker with the liters DELTA;
    ///   the whole change is a silent no-op if the delta exceeds what is
    ///   left in the pool
    /// - unknown product id or negative quantity: no-op
    ///
    /// Returns `true` when the cart changed.
    pub fn set_quantity(
        &mut self,
        product_id: &str,
        new_quantity: i64,
        total_available_liters: Liters,
    ) -> bool {
        if new_quantity < 0 || new_quantity > MAX_LINE_QUANTITY {
            return false;
        }

        if new_quantity == 0 {
            return self.remove_line(product_id);
        }

        let remaining = (total_available_liters - self.consumed_liters()).max_zero();

        let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) else {
            return false;
        };

        let delta = new_quantity - line.quantity;
        if delta > 0 {
            let delta_liters = liters_for(line.unit_size_kegs) * delta;
            if delta_liters > remaining {
                return false;
            }
        }

        line.quantity = new_quantity;
        true
    }

    /// Removes a line by product ID. Returns `true` if a line was removed.
    pub fn remove_line(&mut self, product_id: &str) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != initial_len
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    /// Returns the number of distinct lines in the cart.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Calculates the subtotal in cents.
    pub fn subtotal_cents(&self) -> i64 {
        self.lines.iter().map(|l| l.line_total_cents()).sum()
    }

    /// Calculates the subtotal as Money.
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents())
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart summary for presentation-layer responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub consumed_liters: Liters,
    pub subtotal_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            consumed_liters: cart.consumed_liters(),
            subtotal_cents: cart.subtotal_cents(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, unit_size_kegs: u32, price_cents: i64, stock_units: i64) -> Product {
        Product {
            id: id.to_string(),
            sku: format!("SKU-{}", id),
            name: format!("Product {}", id),
            unit_size_kegs,
            price_cents,
            stock_units,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn assert_liters_invariant(cart: &Cart, total: Liters) {
        assert!(cart.consumed_liters() <= total, "cart exceeds available liters");
    }

    #[test]
    fn test_add_unit_within_stock() {
        let mut cart = Cart::new();
        let keg = test_product("keg", 1, 45_000, 10);
        let pool = Liters::new(250);

        assert!(cart.add_unit(&keg, pool));
        assert!(cart.add_unit(&keg, pool));

        assert_eq!(cart.line_count(), 1); // same product increments
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.consumed_liters().liters(), 50);
        assert_eq!(cart.subtotal_cents(), 90_000);
        assert_liters_invariant(&cart, pool);
    }

    #[test]
    fn test_add_unit_rejected_when_pool_exhausted() {
        // 250 L pool, 9-keg drum (225 L per unit): only one fits.
        let mut cart = Cart::new();
        let drum = test_product("drum", 9, 405_000, 5);
        let pool = Liters::new(250);

        assert!(cart.add_unit(&drum, pool)); // 225 L consumed
        assert!(!cart.add_unit(&drum, pool)); // 25 L left < 225 L, no-op

        assert_eq!(cart.total_quantity(), 1);
        assert_eq!(cart.availability_for(9, pool).remaining_liters.liters(), 25);
        assert_liters_invariant(&cart, pool);
    }

    #[test]
    fn test_add_unit_rejected_when_line_out_of_stock() {
        let mut cart = Cart::new();
        let gone = test_product("gone", 1, 45_000, 0);

        assert!(!cart.add_unit(&gone, Liters::new(1000)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_increase_checked_against_delta() {
        let mut cart = Cart::new();
        let keg = test_product("keg", 1, 45_000, 50);
        let pool = Liters::new(100); // fits 4 kegs

        assert!(cart.add_unit(&keg, pool));
        assert!(cart.set_quantity("keg", 4, pool)); // delta 3 × 25 L = 75 L, fits
        assert!(!cart.set_quantity("keg", 5, pool)); // delta 25 L > 0 L left, no-op

        assert_eq!(cart.total_quantity(), 4);
        assert_liters_invariant(&cart, pool);
    }

    #[test]
    fn test_set_quantity_decrease_always_permitted() {
        let mut cart = Cart::new();
        let keg = test_product("keg", 1, 45_000, 50);
        let pool = Liters::new(100);

        assert!(cart.add_unit(&keg, pool));
        assert!(cart.set_quantity("keg", 4, pool));

        // Even if the pool shrank externally, decreasing must work.
        let shrunk = Liters::new(25);
        assert!(cart.set_quantity("keg", 2, shrunk));
        assert_eq!(cart.total_quantity(), 2);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        let keg = test_product("keg", 1, 45_000, 50);
        let pool = Liters::new(100);

        assert!(cart.add_unit(&keg, pool));
        assert!(cart.set_quantity("keg", 0, pool));

        assert!(cart.is_empty());
        assert!(!cart.lines.iter().any(|l| l.quantity == 0));
    }

    #[test]
    fn test_set_quantity_unknown_product_is_noop() {
        let mut cart = Cart::new();
        assert!(!cart.set_quantity("missing", 3, Liters::new(100)));
    }

    #[test]
    fn test_snapshot_freezes_price() {
        let mut cart = Cart::new();
        let mut keg = test_product("keg", 1, 45_000, 50);
        let pool = Liters::new(100);

        assert!(cart.add_unit(&keg, pool));

        // Catalog price changes after the line was created.
        keg.price_cents = 99_000;
        assert_eq!(cart.subtotal_cents(), 45_000);
    }

    #[test]
    fn test_cart_totals() {
        let mut cart = Cart::new();
        let keg = test_product("keg", 1, 45_000, 50);
        let drum = test_product("drum", 9, 405_000, 5);
        let pool = Liters::new(500);

        assert!(cart.add_unit(&keg, pool));
        assert!(cart.add_unit(&drum, pool));

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.total_quantity, 2);
        assert_eq!(totals.consumed_liters.liters(), 250);
        assert_eq!(totals.subtotal_cents, 450_000);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        let keg = test_product("keg", 1, 45_000, 50);

        assert!(cart.add_unit(&keg, Liters::new(100)));
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.consumed_liters().liters(), 0);
    }
}
