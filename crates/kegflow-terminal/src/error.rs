//! # Terminal Error Types
//!
//! The error taxonomy at the settlement boundary:
//!
//! - **Validation failures** block `settle()` but preserve the draft so the
//!   operator can correct and retry.
//! - **Gateway failures** surface the persistence error verbatim; the draft
//!   is retained and nothing half-applied.
//!
//! Stock constraint violations never appear here - they are silent no-ops
//! in the cart (see `kegflow_core::cart`).

use thiserror::Error;

use kegflow_core::error::ValidationError;

use crate::settle::GatewayError;

/// Errors surfaced by the sale terminal.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// `settle()` was invoked with no customer selected.
    #[error("no customer selected")]
    NoCustomerSelected,

    /// `settle()` was invoked with an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Cash/transfer sale with an amount due and nothing tendered.
    #[error("payment of {amount_due_cents} cents is due and nothing was tendered")]
    PaymentRequired { amount_due_cents: i64 },

    /// Malformed operator input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The external persistence call failed; the draft is retained and the
    /// underlying message passed through verbatim.
    #[error(transparent)]
    Settlement(#[from] GatewayError),
}

/// Convenience type alias for Results with TerminalError.
pub type TerminalResult<T> = Result<T, TerminalError>;
