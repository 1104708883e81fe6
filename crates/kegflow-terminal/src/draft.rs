//! # Sale Draft
//!
//! The value object behind one interactive sale: the cart, the discount,
//! the payment method, the tendered amount, and the selected customer,
//! built against a snapshot of inventory supplied by the collaborator.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sale Draft Session                               │
//! │                                                                         │
//! │  Operator Action            Draft Method             Derived State      │
//! │  ───────────────            ────────────             ─────────────      │
//! │                                                                         │
//! │  Pick customer ───────────► select_customer() ─────► sale type switch  │
//! │  Tap product ─────────────► add_unit() ────────────► cart grows        │
//! │  Edit quantity ───────────► set_quantity() ────────► cart changes      │
//! │  Enter discount ──────────► set_discount()                             │
//! │  Pick method ─────────────► set_payment_method()                       │
//! │  Enter tender ────────────► set_tendered_amount()                      │
//! │                                                                         │
//! │  Read views: pricing(), reconciliation(), availability_for(),          │
//! │              totals(), state()                                         │
//! │                                                                         │
//! │  All computations are synchronous pure functions over the current      │
//! │  snapshot; nothing external is mutated until settle().                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use kegflow_core::cart::{Cart, CartTotals};
use kegflow_core::pricing::{price_cart, PricingBreakdown};
use kegflow_core::reconcile::{reconcile, Reconciliation};
use kegflow_core::types::{CustomerAccount, Discount, PaymentMethod, Product, SaleType};
use kegflow_core::units::{Liters, StockAvailability};
use kegflow_core::error::ValidationResult;
use kegflow_core::validation::{
    validate_discount, validate_name, validate_price_cents, validate_sku,
    validate_tendered_cents, validate_unit_size,
};
use kegflow_core::Money;

use crate::error::TerminalResult;

// =============================================================================
// Inventory Snapshot
// =============================================================================

/// What the inventory collaborator supplies when a sale session starts:
/// the global liquid pool and the product catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySnapshot {
    /// The shared pool of liquid stock, in liters.
    pub total_available_liters: Liters,

    /// Product catalog at session start.
    pub products: Vec<Product>,
}

impl InventorySnapshot {
    /// Looks up a product by id.
    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Validates the catalog the collaborator supplied. A snapshot with a
    /// malformed product (empty sku/name, zero-keg unit, negative price)
    /// must be rejected before a session starts - a zero-keg unit would
    /// make the availability math degenerate.
    pub fn validate(&self) -> ValidationResult<()> {
        for product in &self.products {
            validate_sku(&product.sku)?;
            validate_name(&product.name)?;
            validate_unit_size(product.unit_size_kegs)?;
            validate_price_cents(product.price_cents)?;
        }
        Ok(())
    }
}

// =============================================================================
// Settlement State
// =============================================================================

/// Where the draft stands on the road to settlement.
///
/// Derived from the draft on demand, never stored - there is no way for it
/// to drift out of sync with the fields it summarizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementState {
    /// No customer chosen yet.
    NoCustomer,
    /// Customer chosen, cart still empty.
    CustomerSelected,
    /// Cart non-empty, cash/transfer sale needs payment, nothing tendered.
    PaymentPending,
    /// `settle()` may be invoked.
    ReadyToSettle,
}

// =============================================================================
// Sale Draft
// =============================================================================

/// One interactive sale in progress.
///
/// Created when a new-sale session starts; cleared on successful settlement
/// or discarded on cancellation. Cancellation is always safe - nothing is
/// mutated externally before `settle()`.
#[derive(Debug, Clone)]
pub struct SaleDraft {
    inventory: InventorySnapshot,
    cart: Cart,
    discount: Discount,
    payment_method: PaymentMethod,
    tendered_cents: i64,
    customer: Option<CustomerAccount>,
    sale_type: SaleType,
    started_at: DateTime<Utc>,
}

impl SaleDraft {
    /// Starts a new draft against an inventory snapshot.
    pub fn new(inventory: InventorySnapshot) -> Self {
        debug!(
            total_available = %inventory.total_available_liters,
            products = inventory.products.len(),
            "starting sale draft"
        );
        SaleDraft {
            inventory,
            cart: Cart::new(),
            discount: Discount::none(),
            payment_method: PaymentMethod::default(),
            tendered_cents: 0,
            customer: None,
            sale_type: SaleType::default(),
            started_at: Utc::now(),
        }
    }

    // -------------------------------------------------------------------------
    // Operator actions
    // -------------------------------------------------------------------------

    /// Selects the customer for this sale. The sale type auto-switches to
    /// match the customer's classification.
    pub fn select_customer(&mut self, customer: CustomerAccount) {
        self.sale_type = SaleType::from(customer.kind);
        info!(
            customer_id = %customer.id,
            balance = %customer.balance(),
            sale_type = ?self.sale_type,
            "customer selected"
        );
        self.customer = Some(customer);
    }

    /// Adds one unit of a product to the cart.
    ///
    /// Silent no-op (returns `false`) for unknown or inactive products, for
    /// product lines with no units on hand, and when one more unit would
    /// not fit in remaining liters.
    pub fn add_unit(&mut self, product_id: &str) -> bool {
        let Some(product) = self.inventory.product(product_id) else {
            return false;
        };
        if !product.is_active {
            return false;
        }

        let product = product.clone();
        let added = self
            .cart
            .add_unit(&product, self.inventory.total_available_liters);
        debug!(product_id = %product_id, added, "add_unit");
        added
    }

    /// Sets the quantity of an existing cart line. Quantity 0 removes the
    /// line; increases are checked against remaining liters (see
    /// [`Cart::set_quantity`]).
    pub fn set_quantity(&mut self, product_id: &str, new_quantity: i64) -> bool {
        let changed =
            self.cart
                .set_quantity(product_id, new_quantity, self.inventory.total_available_liters);
        debug!(product_id = %product_id, new_quantity, changed, "set_quantity");
        changed
    }

    /// Sets the sale-level discount.
    pub fn set_discount(&mut self, discount: Discount) -> TerminalResult<()> {
        validate_discount(&discount)?;
        self.discount = discount;
        Ok(())
    }

    /// Sets the payment method. Switching to credit leaves any entered
    /// tender in place; reconciliation ignores it for credit sales.
    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        debug!(method = ?method, "payment method set");
        self.payment_method = method;
    }

    /// Records the amount the operator received.
    pub fn set_tendered_amount(&mut self, cents: i64) -> TerminalResult<()> {
        validate_tendered_cents(cents)?;
        self.tendered_cents = cents;
        Ok(())
    }

    /// Clears the sale portion of the draft: cart, discount, and tendered
    /// amount. The selected customer stays for the next sale. Called after
    /// successful settlement.
    pub fn clear_sale(&mut self) {
        self.cart.clear();
        self.discount = Discount::none();
        self.tendered_cents = 0;
    }

    /// Discards the whole draft, customer included. Cancellation path.
    pub fn reset(&mut self) {
        self.clear_sale();
        self.customer = None;
        self.sale_type = SaleType::default();
        self.started_at = Utc::now();
    }

    // -------------------------------------------------------------------------
    // Derived read views
    // -------------------------------------------------------------------------

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The inventory snapshot this draft was started against.
    pub fn inventory(&self) -> &InventorySnapshot {
        &self.inventory
    }

    /// The selected customer, if any.
    pub fn customer(&self) -> Option<&CustomerAccount> {
        self.customer.as_ref()
    }

    /// The current sale type.
    pub fn sale_type(&self) -> SaleType {
        self.sale_type
    }

    /// The current payment method.
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// The current discount.
    pub fn discount(&self) -> Discount {
        self.discount
    }

    /// The tendered amount as Money.
    pub fn tendered(&self) -> Money {
        Money::from_cents(self.tendered_cents)
    }

    /// When this draft was started.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Cart summary for display.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(&self.cart)
    }

    /// Availability of one more unit of a product, for disabling the UI
    /// affordance. `None` for unknown products.
    pub fn availability_for(&self, product_id: &str) -> Option<StockAvailability> {
        let product = self.inventory.product(product_id)?;
        Some(
            self.cart
                .availability_for(product.unit_size_kegs, self.inventory.total_available_liters),
        )
    }

    /// The money breakdown of the current cart under the current discount.
    pub fn pricing(&self) -> PricingBreakdown {
        price_cart(&self.cart, &self.discount)
    }

    /// Reconciliation of the current total against the selected customer's
    /// balance. `None` until a customer is selected.
    pub fn reconciliation(&self) -> Option<Reconciliation> {
        let customer = self.customer.as_ref()?;
        Some(reconcile(
            self.pricing().total,
            customer.balance(),
            self.payment_method,
            self.tendered(),
        ))
    }

    /// Where the draft stands on the road to settlement.
    pub fn state(&self) -> SettlementState {
        let Some(reconciliation) = self.reconciliation() else {
            return SettlementState::NoCustomer;
        };

        if self.cart.is_empty() {
            return SettlementState::CustomerSelected;
        }

        if self.payment_method.requires_tender()
            && reconciliation.needs_payment
            && self.tendered_cents == 0
        {
            return SettlementState::PaymentPending;
        }

        SettlementState::ReadyToSettle
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
