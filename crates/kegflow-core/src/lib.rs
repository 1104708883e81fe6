//! # kegflow-core: Pure Business Logic for KegFlow POS
//!
//! This crate is the **heart** of KegFlow POS. It contains all business logic
//! for a bulk-liquid distributor as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       KegFlow POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Presentation Layer                          │   │
//! │  │    Product grid ──► Cart UI ──► Tender UI ──► Receipt UI        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ operator actions                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    kegflow-terminal                             │   │
//! │  │    SaleDraft session, settlement state machine, gateway         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kegflow-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   units   │  │   cart    │  │ reconcile │  │   │
//! │  │   │   Money   │  │  Liters   │  │   Cart    │  │  balance  │  │   │
//! │  │   │ Discount  │  │ Stock chk │  │ CartLine  │  │   math    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CustomerAccount, PaymentMethod, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`units`] - Liters, keg conversion, and the stock availability checker
//! - [`cart`] - Stock-constrained cart with snapshot lines
//! - [`pricing`] - Subtotal / discount / total breakdown
//! - [`reconcile`] - Account reconciliation against a signed balance
//! - [`error`] - Validation error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Math**: Money is cents (i64), liquid volume is whole liters (i64)
//! 4. **Silent Stock Rejection**: a cart mutation that would exceed available
//!    liters is a no-op, never an error - the availability flags are the
//!    caller's signal to disable the affordance
//!
//! ## Example Usage
//!
//! ```rust
//! use kegflow_core::units::{liters_for, check_availability, Liters};
//!
//! // A drum is 9 kegs; each keg holds 25 liters.
//! let per_unit = liters_for(9);
//! assert_eq!(per_unit.liters(), 225);
//!
//! // With 250 L on hand and nothing consumed, exactly one drum fits.
//! let avail = check_availability(9, Liters::new(250), Liters::zero());
//! assert!(avail.is_available);
//! assert_eq!(avail.max_addable_units, 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod reconcile;
pub mod types;
pub mod units;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kegflow_core::Money` instead of
// `use kegflow_core::money::Money`

pub use cart::{Cart, CartLine, CartTotals};
pub use error::ValidationError;
pub use money::Money;
pub use pricing::PricingBreakdown;
pub use reconcile::Reconciliation;
pub use types::*;
pub use units::{check_availability, liters_for, Liters, StockAvailability};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Fixed capacity of one keg, in liters.
///
/// ## Why a constant?
/// Every product's sellable unit is a whole number of kegs (1 for a single
/// keg, [`KEGS_PER_DRUM`] for a drum). All stock accounting is done in liters
/// derived from this capacity, so it lives in exactly one place.
pub const KEG_CAPACITY_LITERS: i64 = 25;

/// Number of kegs that make up one wholesale drum.
///
/// Informational: products carry their own `unit_size_kegs`, this is the
/// conventional drum size used when seeding catalogs.
pub const KEGS_PER_DRUM: u32 = 9;

/// Maximum distinct lines allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line in the cart
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
