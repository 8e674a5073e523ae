//! One buyer's session: cart, checkout driving and the reconciliation log.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{error, info, warn};

use edutext_api::{
    ApiClient, ApiError, OrderCreationError, OrderLookupError, OrderPayload, OrderRecord,
    OrdersApi, OrdersClient, TextbookQuery, TextbooksApi, TextbooksClient,
};
use edutext_commerce::{
    CartStore, CartTotals, CheckoutAttempt, CheckoutDraft, CheckoutError, Money, OrderResult,
    Receipt, Reference, Textbook, TextbookId,
};
use edutext_payment::{
    ChargeMetadata, ChargeRequest, InlineCheckout, PaymentGateway, PaymentOutcome,
};

use crate::config::StorefrontConfig;
use crate::receipts;

/// Why a storefront call could not proceed.
#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("cart is empty")]
    EmptyCart,
    #[error("no checkout in progress")]
    NoActiveCheckout,
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// How a driven checkout ended.
#[derive(Debug)]
pub enum CheckoutOutcome {
    /// Paid and recorded; the cart has been cleared.
    Completed { order: OrderRecord },
    /// The buyer dismissed the widget. Cart and form are untouched and the
    /// attempt is back in draft under the same reference.
    Cancelled,
    /// Payment was captured but the order could not be recorded. The
    /// reference is the support handle; the cart is left intact on purpose.
    SubmissionFailed {
        reference: Reference,
        error: OrderCreationError,
    },
}

/// A captured payment the backend has no order for yet.
#[derive(Debug, Clone)]
pub struct UnreconciledPayment {
    pub reference: Reference,
    pub transaction: String,
    pub amount: Money,
    pub error: OrderCreationError,
    pub occurred_at: DateTime<Utc>,
}

/// A single buyer's storefront session.
///
/// Owns the cart and the active checkout attempt outright; callers receive
/// it by injection rather than reaching for a global. All checkout steps run
/// through `&mut self`, and the payment call is awaited in place, so there
/// is no window in which the cart can change under a pending payment.
pub struct Storefront {
    config: StorefrontConfig,
    cart: CartStore,
    attempt: Option<CheckoutAttempt>,
    textbooks: Arc<dyn TextbooksApi>,
    orders: Arc<dyn OrdersApi>,
    gateway: Arc<dyn PaymentGateway>,
    unreconciled: Vec<UnreconciledPayment>,
}

impl Storefront {
    pub fn new(
        config: StorefrontConfig,
        textbooks: Arc<dyn TextbooksApi>,
        orders: Arc<dyn OrdersApi>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            config,
            cart: CartStore::new(),
            attempt: None,
            textbooks,
            orders,
            gateway,
            unreconciled: Vec::new(),
        }
    }

    /// Builds a session against the live backend from `config`. The payment
    /// gateway still comes from the embedding shell.
    pub fn connect(config: StorefrontConfig, gateway: Arc<dyn PaymentGateway>) -> Self {
        let api = ApiClient::new(config.api_base_url.clone());
        Self::new(
            config,
            Arc::new(TextbooksClient::new(api.clone())),
            Arc::new(OrdersClient::new(api)),
            gateway,
        )
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Widget builder carrying this session's publishable key.
    pub fn inline_checkout(&self) -> InlineCheckout {
        InlineCheckout::new(self.config.paystack_public_key.clone())
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Mutable cart access, e.g. for registering change subscribers.
    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    pub fn cart_totals(&self) -> CartTotals {
        CartTotals::of(&self.cart)
    }

    pub async fn search_catalog(
        &self,
        query: &TextbookQuery,
    ) -> Result<Vec<Textbook>, StorefrontError> {
        Ok(self.textbooks.list(query).await?)
    }

    pub async fn fetch_textbook(&self, id: TextbookId) -> Result<Textbook, StorefrontError> {
        Ok(self.textbooks.fetch(id).await?)
    }

    pub fn add_to_cart(&mut self, textbook: &Textbook) {
        self.cart.add_item(textbook);
    }

    pub fn remove_from_cart(&mut self, id: TextbookId) -> bool {
        self.cart.remove_item(id)
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    pub fn active_checkout(&self) -> Option<&CheckoutAttempt> {
        self.attempt.as_ref()
    }

    /// Opens checkout over the current cart.
    ///
    /// An attempt already in draft is reused, reference and buyer details
    /// included, so a buyer returning from a cancelled payment lands back on
    /// a filled form. A fresh attempt only starts after a confirmation.
    pub fn begin_checkout(&mut self) -> Result<&CheckoutAttempt, StorefrontError> {
        if self.cart.is_empty() {
            return Err(StorefrontError::EmptyCart);
        }
        let fresh_needed = match &self.attempt {
            Some(attempt) => attempt.is_confirmed(),
            None => true,
        };
        if fresh_needed {
            let attempt = CheckoutAttempt::new();
            info!(reference = %attempt.reference(), "checkout opened");
            self.attempt = Some(attempt);
        }
        self.attempt.as_ref().ok_or(StorefrontError::NoActiveCheckout)
    }

    /// Drives one checkout attempt end to end.
    ///
    /// Validates the draft, freezes the amount, awaits the gateway and, on
    /// success, submits the order exactly once. The mutable borrow lives
    /// across the awaited payment, so nothing else in the session can touch
    /// the cart while the widget is open.
    pub async fn submit_checkout(
        &mut self,
        draft: CheckoutDraft,
    ) -> Result<CheckoutOutcome, StorefrontError> {
        let attempt = self
            .attempt
            .as_mut()
            .ok_or(StorefrontError::NoActiveCheckout)?;
        let due = attempt.submit(draft, &self.cart)?;
        let charge = ChargeRequest::new(due.reference.clone(), due.email, due.amount)
            .with_metadata(ChargeMetadata::for_student(
                attempt.buyer().student_name.clone(),
                attempt.buyer().matric_number.clone(),
            ));

        info!(reference = %charge.reference, amount_kobo = charge.amount.kobo(), "collecting payment");
        let gateway = Arc::clone(&self.gateway);
        let outcome = match self.config.payment_timeout {
            Some(limit) => match tokio::time::timeout(limit, gateway.collect(&charge)).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    warn!(reference = %charge.reference, "payment widget timed out");
                    PaymentOutcome::Cancelled
                }
            },
            None => gateway.collect(&charge).await,
        };

        match outcome {
            PaymentOutcome::Cancelled => {
                attempt.payment_cancelled()?;
                warn!(reference = %charge.reference, "payment cancelled");
                Ok(CheckoutOutcome::Cancelled)
            }
            PaymentOutcome::Success { transaction } => {
                let order = attempt.payment_succeeded(transaction)?;
                self.record_order(order).await
            }
        }
    }

    /// Submits one confirmed payment to the backend, once.
    async fn record_order(
        &mut self,
        order: OrderResult,
    ) -> Result<CheckoutOutcome, StorefrontError> {
        let payload = OrderPayload::from_result(&order);
        match self.orders.create(&payload).await {
            Ok(record) => {
                self.cart.clear();
                self.attempt = None;
                info!(reference = %record.reference, order_id = %record.id, "checkout completed");
                Ok(CheckoutOutcome::Completed { order: record })
            }
            Err(creation_error) => {
                let reference = order.reference().clone();
                error!(
                    reference = %reference,
                    %creation_error,
                    "payment captured but order not recorded"
                );
                self.unreconciled.push(UnreconciledPayment {
                    reference: reference.clone(),
                    transaction: order.transaction().to_string(),
                    amount: order.amount(),
                    error: creation_error.clone(),
                    occurred_at: Utc::now(),
                });
                self.attempt = None;
                Ok(CheckoutOutcome::SubmissionFailed {
                    reference,
                    error: creation_error,
                })
            }
        }
    }

    /// Captured payments still waiting for a backend order, oldest first.
    pub fn unreconciled(&self) -> &[UnreconciledPayment] {
        &self.unreconciled
    }

    /// Fetches the receipt for a payment reference. Surrounding whitespace
    /// in pasted references is tolerated.
    pub async fn lookup_receipt(&self, reference: &str) -> Result<Receipt, OrderLookupError> {
        let wanted = Reference::new(reference.trim());
        let record = self.orders.fetch_by_reference(&wanted).await?;
        Ok(receipts::receipt_from_record(record))
    }
}
