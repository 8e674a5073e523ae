//! In-memory API doubles for storefront tests.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use edutext_commerce::{Money, OrderId, Reference, Textbook, TextbookId};

use crate::error::{ApiError, OrderCreationError, OrderLookupError};
use crate::orders::{OrderPayload, OrderRecord, OrderRecordItem, OrdersApi};
use crate::textbooks::{TextbookQuery, TextbooksApi};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Scripted [`OrdersApi`] that records every call.
///
/// Unscripted `create` calls succeed and echo the payload back as a stored
/// order; push an error to script a failure for the next call.
#[derive(Default)]
pub struct MockOrdersApi {
    create_results: Mutex<VecDeque<Result<OrderRecord, OrderCreationError>>>,
    stored: Mutex<Vec<OrderRecord>>,
    created: Mutex<Vec<OrderPayload>>,
    lookups: Mutex<Vec<String>>,
}

impl MockOrdersApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the outcome of the next `create` call.
    pub fn push_create_result(&self, result: Result<OrderRecord, OrderCreationError>) {
        lock(&self.create_results).push_back(result);
    }

    /// Seeds a stored order for `fetch_by_reference`.
    pub fn insert_order(&self, record: OrderRecord) {
        lock(&self.stored).push(record);
    }

    /// Every payload `create` has been called with, in order.
    pub fn created(&self) -> Vec<OrderPayload> {
        lock(&self.created).clone()
    }

    pub fn create_calls(&self) -> usize {
        lock(&self.created).len()
    }

    /// Every reference `fetch_by_reference` has been called with.
    pub fn lookups(&self) -> Vec<String> {
        lock(&self.lookups).clone()
    }

    fn echo_record(&self, payload: &OrderPayload) -> OrderRecord {
        let id = lock(&self.stored).len() as i64 + lock(&self.created).len() as i64;
        OrderRecord {
            id: OrderId::new(id),
            reference: Reference::new(payload.reference.clone()),
            status: "paid".to_string(),
            student_name: payload.student_name.clone(),
            matric_number: payload.matric_number.clone(),
            department: payload.department.clone(),
            level: payload.level.clone(),
            total_amount: Money::parse_naira(&payload.total_amount).unwrap_or(Money::ZERO),
            created_at: "2026-01-01T00:00:00Z".to_string(),
            items: payload
                .items
                .iter()
                .map(|item| OrderRecordItem {
                    textbook_id: Some(TextbookId::new(item.textbook_id)),
                    title: String::new(),
                    quantity: item.quantity,
                    unit_price: Money::parse_naira(&item.price).unwrap_or(Money::ZERO),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl OrdersApi for MockOrdersApi {
    async fn create(&self, payload: &OrderPayload) -> Result<OrderRecord, OrderCreationError> {
        lock(&self.created).push(payload.clone());
        match lock(&self.create_results).pop_front() {
            Some(result) => result,
            None => {
                let record = self.echo_record(payload);
                lock(&self.stored).push(record.clone());
                Ok(record)
            }
        }
    }

    async fn fetch_by_reference(
        &self,
        reference: &Reference,
    ) -> Result<OrderRecord, OrderLookupError> {
        lock(&self.lookups).push(reference.to_string());
        lock(&self.stored)
            .iter()
            .find(|record| record.reference == *reference)
            .cloned()
            .ok_or_else(|| OrderLookupError::NotFound {
                reference: reference.to_string(),
            })
    }
}

/// Fixed catalog serving [`TextbooksApi`] from memory.
#[derive(Default)]
pub struct MockTextbooksApi {
    textbooks: Mutex<Vec<Textbook>>,
    list_queries: Mutex<Vec<TextbookQuery>>,
}

impl MockTextbooksApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_textbooks(textbooks: Vec<Textbook>) -> Self {
        Self {
            textbooks: Mutex::new(textbooks),
            list_queries: Mutex::new(Vec::new()),
        }
    }

    pub fn insert(&self, textbook: Textbook) {
        lock(&self.textbooks).push(textbook);
    }

    pub fn list_queries(&self) -> Vec<TextbookQuery> {
        lock(&self.list_queries).clone()
    }
}

fn matches_query(textbook: &Textbook, query: &TextbookQuery) -> bool {
    if let Some(department) = query.department() {
        let dept = &textbook.department;
        if !dept.code.eq_ignore_ascii_case(department) && !dept.name.eq_ignore_ascii_case(department)
        {
            return false;
        }
    }
    if let Some(level) = query.level() {
        if !textbook.level.eq_ignore_ascii_case(level) {
            return false;
        }
    }
    if let Some(search) = query.search() {
        let needle = search.to_ascii_lowercase();
        let haystack = format!(
            "{} {}",
            textbook.title.to_ascii_lowercase(),
            textbook.course_code.to_ascii_lowercase()
        );
        if !haystack.contains(&needle) {
            return false;
        }
    }
    true
}

#[async_trait]
impl TextbooksApi for MockTextbooksApi {
    async fn list(&self, query: &TextbookQuery) -> Result<Vec<Textbook>, ApiError> {
        lock(&self.list_queries).push(query.clone());
        Ok(lock(&self.textbooks)
            .iter()
            .filter(|textbook| matches_query(textbook, query))
            .cloned()
            .collect())
    }

    async fn fetch(&self, id: TextbookId) -> Result<Textbook, ApiError> {
        lock(&self.textbooks)
            .iter()
            .find(|textbook| textbook.id == id)
            .cloned()
            .ok_or_else(|| ApiError::Http {
                status: 404,
                message: format!("textbook {id} not found"),
            })
    }
}
