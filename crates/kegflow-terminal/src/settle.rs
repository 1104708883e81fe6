//! # Settlement
//!
//! The terminal action that turns a ready draft into a committed sale:
//! validates the settlement state machine, reconciles the account, hands
//! the commit to external persistence, and only then clears the draft.
//!
//! ## All-or-Nothing Hand-off
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        settle() Flow                                    │
//! │                                                                         │
//! │  state() == ReadyToSettle? ──── no ───► TerminalError (draft intact)   │
//! │        │ yes                                                            │
//! │        ▼                                                                │
//! │  price cart ──► reconcile account ──► build SettlementCommit           │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  gateway.commit(...)  ← the ONLY asynchronous boundary                  │
//! │        │                                                                │
//! │   ┌────┴─────────┐                                                      │
//! │   ▼              ▼                                                      │
//! │  Ok: clear      Err: draft retained unchanged, error surfaced          │
//! │  cart/discount/      verbatim - no half-applied balance or stock       │
//! │  tender, emit        change is possible from this side                 │
//! │  SettlementResult                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The gateway carries both the consumed-liters decrement and the new
//! balance in ONE commit. Splitting it across two collaborator calls would
//! make the all-or-nothing guarantee impossible to keep from this side.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use kegflow_core::types::{PaymentMethod, SaleType};
use kegflow_core::units::Liters;

use crate::draft::{InventorySnapshot, SaleDraft, SettlementState};
use crate::error::{TerminalError, TerminalResult};

// =============================================================================
// Gateway
// =============================================================================

/// Failure reported by the persistence collaborator. The message is
/// surfaced to the operator verbatim.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct GatewayError(String);

impl GatewayError {
    pub fn new(message: impl Into<String>) -> Self {
        GatewayError(message.into())
    }
}

/// What external persistence must apply atomically on settlement: the
/// stock decrement for the inventory collaborator and the new balance for
/// the customer collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementCommit {
    /// Unique commit identifier (UUID v4).
    pub id: String,
    /// Receipt number of the settled sale.
    pub receipt_number: String,
    /// Customer whose balance transitions.
    pub customer_id: String,
    /// Balance before this sale, in cents (signed).
    pub previous_balance_cents: i64,
    /// Balance the account transitions to, in cents (signed).
    pub new_balance_cents: i64,
    /// Liters to decrement from the shared pool.
    pub consumed_liters: Liters,
    /// When the sale was settled.
    pub settled_at: DateTime<Utc>,
}

/// The single atomic external persistence boundary.
///
/// Implementations either apply the whole commit or fail without side
/// effects; the terminal retries nothing and retains the draft on failure.
pub trait SettlementGateway {
    /// Applies the commit. Must be all-or-nothing.
    fn commit(
        &self,
        commit: &SettlementCommit,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;
}

// =============================================================================
// Settlement Result
// =============================================================================

/// A frozen line on the settlement receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementLine {
    pub sku: String,
    pub name: String,
    pub quantity: i64,
    pub unit_size_kegs: u32,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

/// Everything the presentation layer renders after a successful
/// settlement. Derived, not stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementResult {
    pub receipt_number: String,
    pub settled_at: DateTime<Utc>,
    pub sale_type: SaleType,
    pub payment_method: PaymentMethod,
    pub customer_id: String,
    pub lines: Vec<SettlementLine>,
    pub consumed_liters: Liters,
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    /// Signed: total plus existing debt minus existing credit.
    pub amount_due_cents: i64,
    pub tendered_cents: i64,
    pub change_cents: i64,
    pub remaining_debt_cents: i64,
    pub previous_balance_cents: i64,
    pub new_balance_cents: i64,
}

// =============================================================================
// Sale Terminal
// =============================================================================

/// One operator terminal: a sale draft plus the settlement gateway.
#[derive(Debug)]
pub struct SaleTerminal<G: SettlementGateway> {
    draft: SaleDraft,
    gateway: G,
}

impl<G: SettlementGateway> SaleTerminal<G> {
    /// Opens a terminal session against an inventory snapshot.
    ///
    /// The catalog is validated up front; a snapshot with a malformed
    /// product is rejected before any session state exists.
    pub fn new(inventory: InventorySnapshot, gateway: G) -> TerminalResult<Self> {
        inventory.validate()?;
        Ok(SaleTerminal {
            draft: SaleDraft::new(inventory),
            gateway,
        })
    }

    /// The draft, for read views.
    pub fn draft(&self) -> &SaleDraft {
        &self.draft
    }

    /// The draft, for operator actions.
    pub fn draft_mut(&mut self) -> &mut SaleDraft {
        &mut self.draft
    }

    /// Finalizes the current draft.
    ///
    /// Only invocable from [`SettlementState::ReadyToSettle`]; any other
    /// state maps to a blocking validation failure and the draft is
    /// preserved so the operator can correct and retry. On gateway failure
    /// the draft is likewise retained and the error surfaced verbatim.
    ///
    /// On success the cart, discount, and tendered amount are cleared and
    /// the emitted [`SettlementResult`] describes the committed sale.
    pub async fn settle(&mut self) -> TerminalResult<SettlementResult> {
        debug!("settle requested");

        match self.draft.state() {
            SettlementState::NoCustomer => {
                warn!("settle blocked: no customer selected");
                return Err(TerminalError::NoCustomerSelected);
            }
            SettlementState::CustomerSelected => {
                warn!("settle blocked: cart is empty");
                return Err(TerminalError::EmptyCart);
            }
            SettlementState::PaymentPending => {
                let amount_due_cents = self
                    .draft
                    .reconciliation()
                    .map(|r| r.amount_due_with_account.cents())
                    .unwrap_or_default();
                warn!(amount_due_cents, "settle blocked: payment pending");
                return Err(TerminalError::PaymentRequired { amount_due_cents });
            }
            SettlementState::ReadyToSettle => {}
        }

        // ReadyToSettle guarantees a customer and a reconciliation.
        let Some(customer) = self.draft.customer().cloned() else {
            return Err(TerminalError::NoCustomerSelected);
        };
        let Some(reconciliation) = self.draft.reconciliation() else {
            return Err(TerminalError::NoCustomerSelected);
        };

        let pricing = self.draft.pricing();
        let consumed_liters = self.draft.cart().consumed_liters();
        let settled_at = Utc::now();
        let receipt_number = generate_receipt_number(settled_at);

        let commit = SettlementCommit {
            id: Uuid::new_v4().to_string(),
            receipt_number: receipt_number.clone(),
            customer_id: customer.id.clone(),
            previous_balance_cents: customer.balance_cents,
            new_balance_cents: reconciliation.new_balance.cents(),
            consumed_liters,
            settled_at,
        };

        // The only asynchronous boundary. On failure the draft stays as-is.
        self.gateway.commit(&commit).await?;

        let result = SettlementResult {
            receipt_number: receipt_number.clone(),
            settled_at,
            sale_type: self.draft.sale_type(),
            payment_method: self.draft.payment_method(),
            customer_id: customer.id,
            lines: self
                .draft
                .cart()
                .lines
                .iter()
                .map(|l| SettlementLine {
                    sku: l.sku.clone(),
                    name: l.name.clone(),
                    quantity: l.quantity,
                    unit_size_kegs: l.unit_size_kegs,
                    unit_price_cents: l.unit_price_cents,
                    line_total_cents: l.line_total_cents(),
                })
                .collect(),
            consumed_liters,
            subtotal_cents: pricing.subtotal.cents(),
            discount_cents: pricing.discount_amount.cents(),
            total_cents: pricing.total.cents(),
            amount_due_cents: reconciliation.amount_due_with_account.cents(),
            tendered_cents: reconciliation.tendered.cents(),
            change_cents: reconciliation.change.cents(),
            remaining_debt_cents: reconciliation.remaining_debt.cents(),
            previous_balance_cents: commit.previous_balance_cents,
            new_balance_cents: commit.new_balance_cents,
        };

        self.draft.clear_sale();

        info!(
            receipt_number = %receipt_number,
            total_cents = result.total_cents,
            change_cents = result.change_cents,
            remaining_debt_cents = result.remaining_debt_cents,
            new_balance_cents = result.new_balance_cents,
            consumed_liters = %result.consumed_liters,
            "sale settled"
        );

        Ok(result)
    }
}

/// Generates a receipt number in format: YYMMDD-HHMMSS-NNNN.
fn generate_receipt_number(settled_at: DateTime<Utc>) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    format!("{}-{:04}", settled_at.format("%y%m%d-%H%M%S"), nanos % 10000)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use kegflow_core::types::{CustomerAccount, CustomerKind, Discount, Product};

    /// Records every commit it receives; never fails.
    #[derive(Debug, Clone, Default)]
    struct RecordingGateway {
        commits: Arc<Mutex<Vec<SettlementCommit>>>,
    }

    impl RecordingGateway {
        fn commits(&self) -> Vec<SettlementCommit> {
            self.commits.lock().unwrap().clone()
        }
    }

    impl SettlementGateway for RecordingGateway {
        fn commit(
            &self,
            commit: &SettlementCommit,
        ) -> impl Future<Output = Result<(), GatewayError>> + Send {
            let commits = Arc::clone(&self.commits);
            let commit = commit.clone();
            async move {
                commits.lock().unwrap().push(commit);
                Ok(())
            }
        }
    }

    /// Always fails with a fixed message.
    #[derive(Debug)]
    struct FailingGateway;

    impl SettlementGateway for FailingGateway {
        fn commit(
            &self,
            _commit: &SettlementCommit,
        ) -> impl Future<Output = Result<(), GatewayError>> + Send {
            async { Err(GatewayError::new("ledger write timed out")) }
        }
    }

    fn test_product(id: &str, unit_size_kegs: u32, price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            sku: format!("SKU-{}", id),
            name: format!("Product {}", id),
            unit_size_kegs,
            price_cents,
            stock_units: 20,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_customer(balance_cents: i64) -> CustomerAccount {
        CustomerAccount {
            id: "c1".to_string(),
            name: "Harbor Beverages".to_string(),
            kind: CustomerKind::Retail,
            balance_cents,
            credit_limit_cents: 500_000,
        }
    }

    fn test_snapshot() -> InventorySnapshot {
        InventorySnapshot {
            total_available_liters: Liters::new(1000),
            products: vec![
                test_product("keg", 1, 1000),
                test_product("drum", 9, 5000),
            ],
        }
    }

    #[tokio::test]
    async fn test_settle_exact_cash_payment() {
        // Empty account, total 5000, tendered 5000.
        let gateway = RecordingGateway::default();
        let mut terminal = SaleTerminal::new(test_snapshot(), gateway.clone()).unwrap();

        terminal.draft_mut().select_customer(test_customer(0));
        assert!(terminal.draft_mut().add_unit("drum"));
        terminal.draft_mut().set_tendered_amount(5000).unwrap();

        let result = terminal.settle().await.unwrap();
        assert_eq!(result.amount_due_cents, 5000);
        assert_eq!(result.change_cents, 0);
        assert_eq!(result.remaining_debt_cents, 0);
        assert_eq!(result.new_balance_cents, 0);
        assert_eq!(result.consumed_liters.liters(), 225);
        assert_eq!(result.lines.len(), 1);

        // Draft cleared: cart, discount, tender gone; customer retained.
        assert!(terminal.draft().cart().is_empty());
        assert_eq!(terminal.draft().tendered().cents(), 0);
        assert!(terminal.draft().customer().is_some());

        let commits = gateway.commits();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].new_balance_cents, 0);
        assert_eq!(commits[0].consumed_liters.liters(), 225);
    }

    #[tokio::test]
    async fn test_settle_with_existing_debt() {
        // Debt 2000, total 3000, tendered 3000.
        let gateway = RecordingGateway::default();
        let mut terminal = SaleTerminal::new(test_snapshot(), gateway.clone()).unwrap();

        terminal.draft_mut().select_customer(test_customer(-2000));
        for _ in 0..3 {
            assert!(terminal.draft_mut().add_unit("keg"));
        }
        terminal.draft_mut().set_tendered_amount(3000).unwrap();

        let result = terminal.settle().await.unwrap();
        assert_eq!(result.amount_due_cents, 5000);
        assert_eq!(result.remaining_debt_cents, 2000);
        assert_eq!(result.change_cents, 0);
        assert_eq!(result.new_balance_cents, -2000);
    }

    #[tokio::test]
    async fn test_settle_on_account() {
        // Credit 6000, total 4000, booked on account.
        let gateway = RecordingGateway::default();
        let mut terminal = SaleTerminal::new(test_snapshot(), gateway.clone()).unwrap();

        terminal.draft_mut().select_customer(test_customer(6000));
        for _ in 0..4 {
            assert!(terminal.draft_mut().add_unit("keg"));
        }
        terminal
            .draft_mut()
            .set_payment_method(PaymentMethod::Credit);

        let result = terminal.settle().await.unwrap();
        assert_eq!(result.tendered_cents, 0);
        assert_eq!(result.new_balance_cents, 2000);
        assert_eq!(gateway.commits()[0].new_balance_cents, 2000);
    }

    #[tokio::test]
    async fn test_settle_zero_tender_covered_by_credit() {
        // Deliberate policy: credit 6000 covers the 4000 total, so no
        // payment is needed and a transfer sale with zero tender settles.
        // Zero tender only blocks while an amount is actually due.
        let gateway = RecordingGateway::default();
        let mut terminal = SaleTerminal::new(test_snapshot(), gateway.clone()).unwrap();

        terminal.draft_mut().select_customer(test_customer(6000));
        for _ in 0..4 {
            assert!(terminal.draft_mut().add_unit("keg"));
        }
        terminal
            .draft_mut()
            .set_payment_method(PaymentMethod::Transfer);

        let result = terminal.settle().await.unwrap();
        assert_eq!(result.tendered_cents, 0);
        assert_eq!(result.change_cents, 0);
        assert_eq!(result.remaining_debt_cents, 0);
        assert_eq!(result.new_balance_cents, 2000);
        assert_eq!(gateway.commits().len(), 1);
    }

    #[tokio::test]
    async fn test_settle_overpayment_gives_change() {
        // Total 1000, tendered 1500.
        let gateway = RecordingGateway::default();
        let mut terminal = SaleTerminal::new(test_snapshot(), gateway.clone()).unwrap();

        terminal.draft_mut().select_customer(test_customer(0));
        assert!(terminal.draft_mut().add_unit("keg"));
        terminal.draft_mut().set_tendered_amount(1500).unwrap();

        let result = terminal.settle().await.unwrap();
        assert_eq!(result.change_cents, 500);
        assert_eq!(result.remaining_debt_cents, 0);
        assert_eq!(result.new_balance_cents, 500);
    }

    #[tokio::test]
    async fn test_settle_blocked_when_payment_pending() {
        // Transfer sale with an amount due and zero tender is blocked,
        // draft retained.
        let gateway = RecordingGateway::default();
        let mut terminal = SaleTerminal::new(test_snapshot(), gateway.clone()).unwrap();

        terminal.draft_mut().select_customer(test_customer(0));
        assert!(terminal.draft_mut().add_unit("keg"));
        terminal
            .draft_mut()
            .set_payment_method(PaymentMethod::Transfer);

        let err = terminal.settle().await.unwrap_err();
        assert!(matches!(
            err,
            TerminalError::PaymentRequired {
                amount_due_cents: 1000
            }
        ));

        // Draft retained for correction, nothing committed.
        assert!(!terminal.draft().cart().is_empty());
        assert!(gateway.commits().is_empty());
    }

    #[tokio::test]
    async fn test_settle_blocked_without_customer_or_cart() {
        let mut terminal = SaleTerminal::new(test_snapshot(), RecordingGateway::default()).unwrap();

        let err = terminal.settle().await.unwrap_err();
        assert!(matches!(err, TerminalError::NoCustomerSelected));

        terminal.draft_mut().select_customer(test_customer(0));
        let err = terminal.settle().await.unwrap_err();
        assert!(matches!(err, TerminalError::EmptyCart));
    }

    #[tokio::test]
    async fn test_gateway_failure_retains_draft() {
        let mut terminal = SaleTerminal::new(test_snapshot(), FailingGateway).unwrap();

        terminal.draft_mut().select_customer(test_customer(0));
        assert!(terminal.draft_mut().add_unit("keg"));
        terminal.draft_mut().set_tendered_amount(1000).unwrap();

        let err = terminal.settle().await.unwrap_err();
        assert_eq!(err.to_string(), "ledger write timed out");

        // All-or-nothing: draft unchanged, ready to retry.
        assert_eq!(terminal.draft().cart().total_quantity(), 1);
        assert_eq!(terminal.draft().tendered().cents(), 1000);
        assert_eq!(terminal.draft().state(), SettlementState::ReadyToSettle);
    }

    #[tokio::test]
    async fn test_settle_with_discount() {
        let gateway = RecordingGateway::default();
        let mut terminal = SaleTerminal::new(test_snapshot(), gateway.clone()).unwrap();

        terminal.draft_mut().select_customer(test_customer(0));
        assert!(terminal.draft_mut().add_unit("drum")); // 5000
        terminal
            .draft_mut()
            .set_discount(Discount::Percentage(1000)) // 10%
            .unwrap();
        terminal.draft_mut().set_tendered_amount(4500).unwrap();

        let result = terminal.settle().await.unwrap();
        assert_eq!(result.subtotal_cents, 5000);
        assert_eq!(result.discount_cents, 500);
        assert_eq!(result.total_cents, 4500);
        assert_eq!(result.change_cents, 0);
    }

    #[test]
    fn test_terminal_rejects_malformed_catalog() {
        let mut snapshot = test_snapshot();
        snapshot.products[0].unit_size_kegs = 0;

        let err = SaleTerminal::new(snapshot, RecordingGateway::default()).unwrap_err();
        assert!(matches!(err, TerminalError::Validation(_)));
    }

    #[test]
    fn test_settlement_result_serializes_camel_case() {
        let result = SettlementResult {
            receipt_number: "260823-101500-0042".to_string(),
            settled_at: Utc::now(),
            sale_type: SaleType::Retail,
            payment_method: PaymentMethod::Cash,
            customer_id: "c1".to_string(),
            lines: vec![],
            consumed_liters: Liters::new(225),
            subtotal_cents: 5000,
            discount_cents: 0,
            total_cents: 5000,
            amount_due_cents: 5000,
            tendered_cents: 5000,
            change_cents: 0,
            remaining_debt_cents: 0,
            previous_balance_cents: 0,
            new_balance_cents: 0,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("receiptNumber").is_some());
        assert!(json.get("newBalanceCents").is_some());
        assert!(json.get("remainingDebtCents").is_some());
    }

    #[test]
    fn test_receipt_number_format() {
        let receipt = generate_receipt_number(Utc::now());
        // YYMMDD-HHMMSS-NNNN
        assert_eq!(receipt.len(), 18);
        assert_eq!(receipt.matches('-').count(), 2);
    }
}
