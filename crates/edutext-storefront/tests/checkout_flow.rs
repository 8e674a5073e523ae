//! End-to-end checkout scenarios over mock backend and gateway.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use edutext_api::mock::{MockOrdersApi, MockTextbooksApi};
use edutext_api::{OrderCreationError, OrderLookupError, TextbookQuery};
use edutext_commerce::{CheckoutDraft, CheckoutError, Money, Textbook, TextbookId};
use edutext_payment::{ChargeRequest, MockGateway, PaymentGateway, PaymentOutcome};
use edutext_storefront::{CheckoutOutcome, Storefront, StorefrontConfig, StorefrontError};

struct Harness {
    shop: Storefront,
    textbooks: Arc<MockTextbooksApi>,
    orders: Arc<MockOrdersApi>,
    gateway: Arc<MockGateway>,
}

fn harness() -> Harness {
    let textbooks = Arc::new(MockTextbooksApi::with_textbooks(vec![
        Textbook::new(1, "Introduction to Business", Money::from_kobo(599900)).with_stock(10),
        Textbook::new(2, "Workshop Practice", Money::from_kobo(200000)).with_stock(4),
    ]));
    let orders = Arc::new(MockOrdersApi::new());
    let gateway = Arc::new(MockGateway::new());
    let shop = Storefront::new(
        StorefrontConfig::default().with_public_key("pk_test_123"),
        textbooks.clone(),
        orders.clone(),
        gateway.clone(),
    );
    Harness {
        shop,
        textbooks,
        orders,
        gateway,
    }
}

fn draft() -> CheckoutDraft {
    CheckoutDraft {
        student_name: "Adaeze Okafor".to_string(),
        email: "adaeze.okafor@student.yabatech.edu.ng".to_string(),
        phone: "08031234567".to_string(),
        matric_number: "F/ND/23/3210041".to_string(),
        department: "Business Administration".to_string(),
        level: "ND1".to_string(),
        program_type: "Full-Time".to_string(),
    }
}

#[tokio::test]
async fn test_paid_checkout_submits_exactly_one_order() {
    let mut h = harness();

    let listed = h
        .shop
        .search_catalog(&TextbookQuery::new().with_search("business"))
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(h.textbooks.list_queries().len(), 1);
    h.shop.add_to_cart(&listed[0]);

    let reference = h.shop.begin_checkout().unwrap().reference().clone();
    let outcome = h.shop.submit_checkout(draft()).await.unwrap();

    let order = match outcome {
        CheckoutOutcome::Completed { order } => order,
        other => panic!("expected completed checkout, got {other:?}"),
    };
    assert_eq!(order.reference, reference);

    // Exactly one submission, carrying the attempt's reference and the
    // exact cart subtotal.
    assert_eq!(h.orders.create_calls(), 1);
    let payload = &h.orders.created()[0];
    assert_eq!(payload.reference, reference.as_str());
    assert_eq!(payload.total_amount, "5999.00");
    assert_eq!(payload.items.len(), 1);
    assert_eq!(payload.items[0].textbook_id, 1);
    assert_eq!(payload.items[0].quantity, 1);

    // The gateway was asked for the subtotal in kobo.
    let charges = h.gateway.charges();
    assert_eq!(charges.len(), 1);
    assert_eq!(charges[0].amount_minor_units(), 599900);
    assert_eq!(charges[0].reference, reference);

    // Completion clears the cart and closes the attempt.
    assert!(h.shop.cart().is_empty());
    assert!(h.shop.active_checkout().is_none());
}

#[tokio::test]
async fn test_cancelled_payment_sends_nothing_and_keeps_cart() {
    let mut h = harness();
    let book = h.shop.fetch_textbook(TextbookId::new(1)).await.unwrap();
    h.shop.add_to_cart(&book);

    let reference = h.shop.begin_checkout().unwrap().reference().clone();
    h.gateway.push_outcome(PaymentOutcome::Cancelled);

    let outcome = h.shop.submit_checkout(draft()).await.unwrap();
    assert!(matches!(outcome, CheckoutOutcome::Cancelled));

    assert_eq!(h.orders.create_calls(), 0);
    assert_eq!(h.shop.cart().items().len(), 1);
    assert_eq!(h.shop.cart().subtotal(), Money::from_kobo(599900));

    // The attempt survives in draft under the same reference, form intact.
    let attempt = h.shop.active_checkout().unwrap();
    assert_eq!(attempt.reference(), &reference);
    assert_eq!(attempt.buyer().student_name, "Adaeze Okafor");
}

#[tokio::test]
async fn test_retry_after_cancel_reuses_reference() {
    let mut h = harness();
    let book = h.shop.fetch_textbook(TextbookId::new(1)).await.unwrap();
    h.shop.add_to_cart(&book);

    let reference = h.shop.begin_checkout().unwrap().reference().clone();
    h.gateway.push_outcome(PaymentOutcome::Cancelled);
    let first = h.shop.submit_checkout(draft()).await.unwrap();
    assert!(matches!(first, CheckoutOutcome::Cancelled));

    // Second attempt; nothing scripted, so the gateway approves.
    h.shop.begin_checkout().unwrap();
    let second = h.shop.submit_checkout(draft()).await.unwrap();
    assert!(matches!(second, CheckoutOutcome::Completed { .. }));

    let charges = h.gateway.charges();
    assert_eq!(charges.len(), 2);
    assert_eq!(charges[0].reference, reference);
    assert_eq!(charges[1].reference, reference);

    assert_eq!(h.orders.create_calls(), 1);
    assert_eq!(h.orders.created()[0].reference, reference.as_str());
}

#[tokio::test]
async fn test_submission_failure_keeps_cart_and_logs_payment() {
    let mut h = harness();
    let book = h.shop.fetch_textbook(TextbookId::new(2)).await.unwrap();
    h.shop.add_to_cart(&book);

    let reference = h.shop.begin_checkout().unwrap().reference().clone();
    h.orders.push_create_result(Err(OrderCreationError::Rejected {
        status: 500,
        message: "database unavailable".to_string(),
    }));

    let outcome = h.shop.submit_checkout(draft()).await.unwrap();
    match outcome {
        CheckoutOutcome::SubmissionFailed {
            reference: failed_reference,
            error,
        } => {
            assert_eq!(failed_reference, reference);
            assert!(matches!(
                error,
                OrderCreationError::Rejected { status: 500, .. }
            ));
        }
        other => panic!("expected submission failure, got {other:?}"),
    }

    // Payment went through, so the cart is deliberately not cleared and the
    // reconciliation log holds the captured charge.
    assert_eq!(h.shop.cart().items().len(), 1);
    let pending = h.shop.unreconciled();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].reference, reference);
    assert_eq!(pending[0].amount, Money::from_kobo(200000));
    assert!(pending[0].transaction.starts_with("MOCK-TXN-"));

    // The attempt is finished; reopening checkout mints a new reference.
    assert!(h.shop.active_checkout().is_none());
    let next_reference = h.shop.begin_checkout().unwrap().reference().clone();
    assert_ne!(next_reference, reference);
}

#[tokio::test]
async fn test_invalid_draft_never_reaches_the_gateway() {
    let mut h = harness();
    let book = h.shop.fetch_textbook(TextbookId::new(1)).await.unwrap();
    h.shop.add_to_cart(&book);
    h.shop.begin_checkout().unwrap();

    let incomplete = CheckoutDraft {
        email: String::new(),
        ..draft()
    };
    let result = h.shop.submit_checkout(incomplete).await;
    match result {
        Err(StorefrontError::Checkout(CheckoutError::Validation(validation))) => {
            assert_eq!(validation.issues[0].field, "email");
        }
        other => panic!("expected validation failure, got {other:?}"),
    }

    assert_eq!(h.gateway.collect_calls(), 0);
    assert_eq!(h.orders.create_calls(), 0);
    assert_eq!(h.shop.cart().items().len(), 1);
}

#[tokio::test]
async fn test_charge_metadata_names_the_student() {
    let mut h = harness();
    let book = h.shop.fetch_textbook(TextbookId::new(1)).await.unwrap();
    h.shop.add_to_cart(&book);
    h.shop.begin_checkout().unwrap();
    h.shop.submit_checkout(draft()).await.unwrap();

    let charges = h.gateway.charges();
    let fields = &charges[0].metadata.custom_fields;
    assert_eq!(fields[0].variable_name, "customer_name");
    assert_eq!(fields[0].value, "Adaeze Okafor");
    assert_eq!(fields[1].variable_name, "matric_number");
    assert_eq!(fields[1].value, "F/ND/23/3210041");
}

#[tokio::test]
async fn test_receipt_lookup_round_trip() {
    let mut h = harness();
    let book = h.shop.fetch_textbook(TextbookId::new(1)).await.unwrap();
    h.shop.add_to_cart(&book);
    let reference = h.shop.begin_checkout().unwrap().reference().clone();
    h.shop.submit_checkout(draft()).await.unwrap();

    // Pasted references tend to carry whitespace.
    let padded = format!("  {reference}  ");
    let receipt = h.shop.lookup_receipt(&padded).await.unwrap();

    assert_eq!(receipt.reference, reference);
    assert_eq!(receipt.student_name, "Adaeze Okafor");
    assert_eq!(receipt.total, Money::from_kobo(599900));
    assert_eq!(receipt.lines_total(), receipt.total);
    assert_eq!(h.orders.lookups(), vec![reference.to_string()]);
}

#[tokio::test]
async fn test_receipt_lookup_miss_is_typed_not_found() {
    let h = harness();
    let result = h.shop.lookup_receipt("ETX-unknown").await;
    match result {
        Err(OrderLookupError::NotFound { reference }) => {
            assert_eq!(reference, "ETX-unknown");
        }
        other => panic!("expected not-found, got {other:?}"),
    }
}

struct HangingGateway;

#[async_trait]
impl PaymentGateway for HangingGateway {
    async fn collect(&self, _charge: &ChargeRequest) -> PaymentOutcome {
        std::future::pending().await
    }
}

#[tokio::test]
async fn test_payment_timeout_counts_as_cancelled() {
    let textbooks = Arc::new(MockTextbooksApi::with_textbooks(vec![Textbook::new(
        1,
        "Introduction to Business",
        Money::from_kobo(599900),
    )]));
    let orders = Arc::new(MockOrdersApi::new());
    let mut shop = Storefront::new(
        StorefrontConfig::default().with_payment_timeout(Duration::from_millis(50)),
        textbooks,
        orders.clone(),
        Arc::new(HangingGateway),
    );

    let book = shop.fetch_textbook(TextbookId::new(1)).await.unwrap();
    shop.add_to_cart(&book);
    let reference = shop.begin_checkout().unwrap().reference().clone();

    let outcome = shop.submit_checkout(draft()).await.unwrap();
    assert!(matches!(outcome, CheckoutOutcome::Cancelled));

    assert_eq!(orders.create_calls(), 0);
    assert_eq!(shop.cart().items().len(), 1);
    let attempt = shop.active_checkout().unwrap();
    assert_eq!(attempt.reference(), &reference);
}

#[tokio::test]
async fn test_completed_checkout_then_new_attempt_gets_new_reference() {
    let mut h = harness();
    let book = h.shop.fetch_textbook(TextbookId::new(1)).await.unwrap();
    h.shop.add_to_cart(&book);
    let first = h.shop.begin_checkout().unwrap().reference().clone();
    h.shop.submit_checkout(draft()).await.unwrap();

    h.shop.add_to_cart(&book);
    let second = h.shop.begin_checkout().unwrap().reference().clone();
    assert_ne!(first, second);
}
