//! Order endpoints: creation after payment and lookup by reference.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use edutext_commerce::{Money, OrderId, OrderResult, Reference, TextbookId};

use crate::client::ApiClient;
use crate::error::{ApiError, OrderCreationError, OrderLookupError, SchemaError};
use crate::schema::{error_message, RawAmount};

/// One purchased line in the order creation body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayloadItem {
    pub textbook_id: i64,
    pub quantity: u32,
    pub price: String,
}

/// Wire body for `POST /orders/`.
///
/// Amounts travel as two-decimal naira strings. The payment reference is the
/// idempotency key: the backend deduplicates on it, and this client sends
/// exactly one request per confirmed checkout either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayload {
    pub student_name: String,
    pub email: String,
    pub phone: String,
    pub matric_number: String,
    pub department: String,
    pub level: String,
    pub program_type: String,
    pub reference: String,
    pub total_amount: String,
    pub items: Vec<OrderPayloadItem>,
}

impl OrderPayload {
    /// Maps a sealed checkout outcome onto the wire shape.
    pub fn from_result(order: &OrderResult) -> Self {
        let buyer = order.buyer();
        Self {
            student_name: buyer.student_name.clone(),
            email: buyer.email.clone(),
            phone: buyer.phone.clone(),
            matric_number: buyer.matric_number.clone(),
            department: buyer.department.clone(),
            level: buyer.level.clone(),
            program_type: buyer.program_type.clone(),
            reference: order.reference().to_string(),
            total_amount: order.amount().to_naira_string(),
            items: order
                .lines()
                .iter()
                .map(|line| OrderPayloadItem {
                    textbook_id: line.id.value(),
                    quantity: line.quantity,
                    price: line.price.to_naira_string(),
                })
                .collect(),
        }
    }
}

/// One line of a stored order as the receipt needs it.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecordItem {
    pub textbook_id: Option<TextbookId>,
    pub title: String,
    pub quantity: u32,
    pub unit_price: Money,
}

/// An order as the backend stores it, with amounts already parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub id: OrderId,
    pub reference: Reference,
    pub status: String,
    pub student_name: String,
    pub matric_number: String,
    pub department: String,
    pub level: String,
    pub total_amount: Money,
    /// RFC 3339 creation timestamp, as sent.
    pub created_at: String,
    pub items: Vec<OrderRecordItem>,
}

#[derive(Debug, Deserialize)]
struct RawOrderTextbook {
    #[serde(default)]
    id: Option<i64>,
    title: String,
}

#[derive(Debug, Deserialize)]
struct RawOrderItem {
    textbook: RawOrderTextbook,
    quantity: u32,
    price: RawAmount,
}

#[derive(Debug, Deserialize)]
struct RawOrder {
    id: i64,
    reference: String,
    #[serde(default)]
    status: Option<String>,
    student_name: String,
    matric_number: String,
    department: String,
    level: String,
    total_amount: RawAmount,
    created_at: String,
    items: Vec<RawOrderItem>,
}

impl OrderRecord {
    /// Validates a raw order body into typed form.
    pub fn parse(body: &str) -> Result<Self, SchemaError> {
        let raw: RawOrder = serde_json::from_str(body)
            .map_err(|error| SchemaError::new("order", error.to_string()))?;
        let total_amount = raw.total_amount.to_money("total_amount")?;
        let items = raw
            .items
            .into_iter()
            .map(|item| {
                Ok(OrderRecordItem {
                    textbook_id: item.textbook.id.map(TextbookId::new),
                    title: item.textbook.title,
                    quantity: item.quantity,
                    unit_price: item.price.to_money("items.price")?,
                })
            })
            .collect::<Result<Vec<_>, SchemaError>>()?;
        Ok(Self {
            id: OrderId::new(raw.id),
            reference: Reference::new(raw.reference),
            status: raw.status.unwrap_or_else(|| "pending".to_string()),
            student_name: raw.student_name,
            matric_number: raw.matric_number,
            department: raw.department,
            level: raw.level,
            total_amount,
            created_at: raw.created_at,
            items,
        })
    }
}

/// Order creation and lookup against the backend.
#[async_trait]
pub trait OrdersApi: Send + Sync {
    /// Records a paid order. Callers must call this at most once per
    /// confirmed checkout; the client itself never retries.
    async fn create(&self, payload: &OrderPayload) -> Result<OrderRecord, OrderCreationError>;

    /// Fetches a stored order by its payment reference.
    async fn fetch_by_reference(&self, reference: &Reference)
        -> Result<OrderRecord, OrderLookupError>;
}

/// Live orders client against the backend.
#[derive(Debug, Clone)]
pub struct OrdersClient {
    api: ApiClient,
}

impl OrdersClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl OrdersApi for OrdersClient {
    async fn create(&self, payload: &OrderPayload) -> Result<OrderRecord, OrderCreationError> {
        let response = self
            .api
            .post_raw("/orders/", payload)
            .await
            .map_err(OrderCreationError::from)?;
        if !response.is_success() {
            let rejection = OrderCreationError::Rejected {
                status: response.status,
                message: error_message(&response.body),
            };
            error!(reference = %payload.reference, %rejection, "order creation failed");
            return Err(rejection);
        }
        let record = OrderRecord::parse(&response.body)?;
        info!(reference = %record.reference, order_id = %record.id, "order created");
        Ok(record)
    }

    async fn fetch_by_reference(
        &self,
        reference: &Reference,
    ) -> Result<OrderRecord, OrderLookupError> {
        let response = self
            .api
            .get_raw(&format!("/orders/{}/", reference), &[])
            .await
            .map_err(OrderLookupError::from)?;
        if response.status == 404 {
            return Err(OrderLookupError::NotFound {
                reference: reference.to_string(),
            });
        }
        if !response.is_success() {
            return Err(OrderLookupError::Api(ApiError::Http {
                status: response.status,
                message: error_message(&response.body),
            }));
        }
        Ok(OrderRecord::parse(&response.body)?)
    }
}
