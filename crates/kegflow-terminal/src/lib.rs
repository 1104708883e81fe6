//! # kegflow-terminal: Operator Session & Settlement Boundary
//!
//! The in-process functional interface the presentation layer consumes:
//! one [`SaleDraft`] per interactive sale, the settlement state machine,
//! and the single async hand-off to external persistence.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     kegflow-terminal                                    │
//! │                                                                         │
//! │  Presentation layer dispatches operator actions:                        │
//! │    select_customer, add_unit, set_quantity, set_discount,               │
//! │    set_payment_method, set_tendered_amount, settle                      │
//! │                                                                         │
//! │  ... and reads derived values for display:                              │
//! │    availability_for (remaining liters), pricing, reconciliation         │
//! │    (amount due / change / remaining debt), state                        │
//! │                                                                         │
//! │  Collaborators:                                                         │
//! │    Inventory  ──► InventorySnapshot in, consumed-liters decrement out   │
//! │    Customer   ──► CustomerAccount in, new balance out                   │
//! │    both via ONE atomic SettlementGateway::commit                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Single Logical Actor
//! One operator builds one draft; nothing here suspends or blocks except
//! the final [`SaleTerminal::settle`] hand-off. Cancellation before
//! settlement is always safe - no external state has been touched.

pub mod draft;
pub mod error;
pub mod settle;

pub use draft::{InventorySnapshot, SaleDraft, SettlementState};
pub use error::{TerminalError, TerminalResult};
pub use settle::{
    GatewayError, SaleTerminal, SettlementCommit, SettlementGateway, SettlementLine,
    SettlementResult,
};
