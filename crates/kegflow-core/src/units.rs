//! # Units Module
//!
//! Liquid volume accounting: the `Liters` type, the keg-to-liters unit
//! converter, and the stock availability checker.
//!
//! ## The Authoritative Constraint
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Stock is ONE shared pool of liquid, not per-product counts.            │
//! │                                                                         │
//! │  Product A: unit = 1 keg  =  25 L ──┐                                  │
//! │  Product B: unit = 9 kegs = 225 L ──┼──► consumed liters               │
//! │  Product C: unit = 1 keg  =  25 L ──┘         │                        │
//! │                                               ▼                         │
//! │  remaining = total_available − consumed                                 │
//! │  max_addable_units = floor(max(0, remaining) / liters_per_unit)        │
//! │  is_available      = max_addable_units ≥ 1                              │
//! │                                                                         │
//! │  The checker is pure and idempotent: it is re-run before EVERY cart     │
//! │  mutation to answer "can I add one more?".                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::KEG_CAPACITY_LITERS;

// =============================================================================
// Liters Type
// =============================================================================

/// A liquid volume in whole liters.
///
/// ## Design Decisions
/// - **i64 (signed)**: remaining stock can go transiently negative when the
///   pool shrinks externally; callers clamp with [`Liters::max_zero`]
/// - **Whole liters**: keg capacity and unit sizes are integers, so no
///   fractional volume ever arises
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Liters(i64);

impl Liters {
    /// Creates a volume from whole liters.
    #[inline]
    pub const fn new(liters: i64) -> Self {
        Liters(liters)
    }

    /// Returns the volume in liters.
    #[inline]
    pub const fn liters(&self) -> i64 {
        self.0
    }

    /// Zero volume.
    #[inline]
    pub const fn zero() -> Self {
        Liters(0)
    }

    /// Checks if the volume is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Clamps negative volumes to zero.
    ///
    /// Remaining stock may legitimately be negative only transiently, when
    /// the shared pool shrank externally after the cart was built. For all
    /// availability math a negative remainder means "nothing left".
    #[inline]
    pub fn max_zero(&self) -> Self {
        Liters(self.0.max(0))
    }
}

impl fmt::Display for Liters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} L", self.0)
    }
}

impl Default for Liters {
    fn default() -> Self {
        Liters::zero()
    }
}

impl Add for Liters {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Liters(self.0 + other.0)
    }
}

impl AddAssign for Liters {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Liters {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Liters(self.0 - other.0)
    }
}

/// Multiplication by quantity (units in a cart line).
impl Mul<i64> for Liters {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Liters(self.0 * qty)
    }
}

// =============================================================================
// Unit Converter
// =============================================================================

/// Converts a product's nominal unit size (in kegs) to liters.
///
/// Pure multiplication with the fixed keg capacity. A unit size of zero or a
/// negative input is a caller contract violation rejected at the boundary
/// (see `validation::validate_unit_size`), not here.
///
/// ## Example
/// ```rust
/// use kegflow_core::units::liters_for;
///
/// assert_eq!(liters_for(1).liters(), 25);  // single keg
/// assert_eq!(liters_for(9).liters(), 225); // drum
/// ```
#[inline]
pub const fn liters_for(unit_size_kegs: u32) -> Liters {
    Liters::new(unit_size_kegs as i64 * KEG_CAPACITY_LITERS)
}

// =============================================================================
// Stock Availability Checker
// =============================================================================

/// Result of a stock availability check for one candidate unit size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockAvailability {
    /// Whether at least one more unit of this size fits in remaining stock.
    pub is_available: bool,
    /// Liters left in the shared pool after current cart consumption.
    /// May be negative if the pool shrank externally.
    pub remaining_liters: Liters,
    /// How many whole units of this size still fit.
    pub max_addable_units: i64,
}

/// Checks whether units of `unit_size_kegs` can still be drawn from the pool.
///
/// ## Arguments
/// * `unit_size_kegs` - unit size of the candidate product
/// * `total_available_liters` - the global liquid stock
/// * `consumed_liters` - what the current cart already consumes
///
/// No side effects; callable repeatedly and idempotently before every cart
/// mutation.
///
/// ## Example
/// ```rust
/// use kegflow_core::units::{check_availability, Liters};
///
/// // 250 L pool, one 225 L drum already in the cart: 25 L left,
/// // a second drum no longer fits.
/// let avail = check_availability(9, Liters::new(250), Liters::new(225));
/// assert!(!avail.is_available);
/// assert_eq!(avail.remaining_liters.liters(), 25);
/// assert_eq!(avail.max_addable_units, 0);
/// ```
pub fn check_availability(
    unit_size_kegs: u32,
    total_available_liters: Liters,
    consumed_liters: Liters,
) -> StockAvailability {
    let remaining = total_available_liters - consumed_liters;
    let per_unit = liters_for(unit_size_kegs);

    // A zero-size unit can never be added; also guards the division below.
    let max_addable_units = if per_unit.liters() <= 0 {
        0
    } else {
        remaining.max_zero().liters() / per_unit.liters()
    };

    StockAvailability {
        is_available: max_addable_units >= 1,
        remaining_liters: remaining,
        max_addable_units,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
