//! Gateway seam: an awaited call that resolves to a tagged outcome.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::charge::ChargeRequest;

/// How a payment attempt ended.
///
/// Cancellation is a first-class outcome, not an error: the buyer closing
/// the widget is a normal path and the checkout simply resumes editable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// The charge was captured; carries the gateway's transaction id.
    Success { transaction: String },
    /// The buyer dismissed the widget without completing payment.
    Cancelled,
}

/// Collects one charge and reports how it went.
///
/// The embedding shell implements this by driving the hosted widget and
/// resolving when the widget closes. There is no failure variant on purpose:
/// anything that stops a charge from being captured surfaces as `Cancelled`.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn collect(&self, charge: &ChargeRequest) -> PaymentOutcome;
}

/// Builds the parameter object for the hosted inline payment widget.
///
/// Pure payload construction; the widget itself runs in the embedding shell.
#[derive(Debug, Clone)]
pub struct InlineCheckout {
    public_key: String,
}

impl InlineCheckout {
    pub fn new(public_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
        }
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// The JSON object the inline widget's `setup` expects.
    pub fn widget_params(&self, charge: &ChargeRequest) -> Value {
        json!({
            "key": self.public_key,
            "reference": charge.reference.as_str(),
            "email": charge.email,
            "amount": charge.amount_minor_units(),
            "currency": charge.currency,
            "metadata": charge.metadata,
        })
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Scripted gateway for tests.
///
/// Pops one queued outcome per `collect` call and records every charge it
/// saw. With nothing queued it succeeds with a generated transaction id.
#[derive(Default)]
pub struct MockGateway {
    outcomes: Mutex<VecDeque<PaymentOutcome>>,
    charges: Mutex<Vec<ChargeRequest>>,
    counter: AtomicU64,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the outcome for an upcoming `collect` call.
    pub fn push_outcome(&self, outcome: PaymentOutcome) {
        lock(&self.outcomes).push_back(outcome);
    }

    /// Every charge `collect` has been called with, in order.
    pub fn charges(&self) -> Vec<ChargeRequest> {
        lock(&self.charges).clone()
    }

    pub fn collect_calls(&self) -> usize {
        lock(&self.charges).len()
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn collect(&self, charge: &ChargeRequest) -> PaymentOutcome {
        lock(&self.charges).push(charge.clone());
        match lock(&self.outcomes).pop_front() {
            Some(outcome) => outcome,
            None => {
                let counter = self.counter.fetch_add(1, Ordering::SeqCst);
                PaymentOutcome::Success {
                    transaction: format!("MOCK-TXN-{counter}"),
                }
            }
        }
    }
}
