//! Catalog endpoints: listing and fetching textbooks.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use edutext_commerce::{Department, Textbook, TextbookId};

use crate::client::ApiClient;
use crate::error::{ApiError, SchemaError};
use crate::schema::{error_message, RawAmount};

/// Filters accepted by the textbook list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextbookQuery {
    department: Option<String>,
    level: Option<String>,
    search: Option<String>,
}

impl TextbookQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    pub fn level(&self) -> Option<&str> {
        self.level.as_deref()
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub(crate) fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(department) = &self.department {
            pairs.push(("department", department.clone()));
        }
        if let Some(level) = &self.level {
            pairs.push(("level", level.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

#[derive(Debug, Deserialize)]
struct RawDepartment {
    id: i64,
    name: String,
    code: String,
}

/// Textbook exactly as the backend serializes it. Only id, title and price
/// are load-bearing for checkout; the rest default when absent.
#[derive(Debug, Deserialize)]
struct RawTextbook {
    id: i64,
    title: String,
    price: RawAmount,
    #[serde(default)]
    course_code: Option<String>,
    #[serde(default)]
    department: Option<RawDepartment>,
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    stock: Option<u32>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    is_popular: Option<bool>,
    #[serde(default)]
    is_new: Option<bool>,
}

impl RawTextbook {
    fn into_domain(self) -> Result<Textbook, SchemaError> {
        let price = self.price.to_money("price")?;
        if price.is_negative() {
            return Err(SchemaError::new("price", "price must not be negative"));
        }
        let department = match self.department {
            Some(raw) => Department {
                id: raw.id,
                name: raw.name,
                code: raw.code,
            },
            None => Department {
                id: 0,
                name: String::new(),
                code: String::new(),
            },
        };
        Ok(Textbook {
            id: TextbookId::new(self.id),
            title: self.title,
            course_code: self.course_code.unwrap_or_default(),
            department,
            level: self.level.unwrap_or_default(),
            price,
            description: self.description.unwrap_or_default(),
            stock: self.stock.unwrap_or(0),
            image: self.image,
            is_popular: self.is_popular.unwrap_or(false),
            is_new: self.is_new.unwrap_or(false),
        })
    }
}

pub(crate) fn parse_textbook(body: &str) -> Result<Textbook, SchemaError> {
    let raw: RawTextbook = serde_json::from_str(body)
        .map_err(|error| SchemaError::new("textbook", error.to_string()))?;
    raw.into_domain()
}

pub(crate) fn parse_textbook_list(body: &str) -> Result<Vec<Textbook>, SchemaError> {
    let raw: Vec<RawTextbook> = serde_json::from_str(body)
        .map_err(|error| SchemaError::new("textbooks", error.to_string()))?;
    raw.into_iter().map(RawTextbook::into_domain).collect()
}

/// Read access to the textbook catalog.
#[async_trait]
pub trait TextbooksApi: Send + Sync {
    async fn list(&self, query: &TextbookQuery) -> Result<Vec<Textbook>, ApiError>;
    async fn fetch(&self, id: TextbookId) -> Result<Textbook, ApiError>;
}

/// Live catalog client against the backend.
#[derive(Debug, Clone)]
pub struct TextbooksClient {
    api: ApiClient,
}

impl TextbooksClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl TextbooksApi for TextbooksClient {
    async fn list(&self, query: &TextbookQuery) -> Result<Vec<Textbook>, ApiError> {
        let response = self
            .api
            .get_raw("/textbooks/", &query.to_query_pairs())
            .await?;
        if !response.is_success() {
            return Err(ApiError::Http {
                status: response.status,
                message: error_message(&response.body),
            });
        }
        let textbooks = parse_textbook_list(&response.body)?;
        debug!(count = textbooks.len(), "listed textbooks");
        Ok(textbooks)
    }

    async fn fetch(&self, id: TextbookId) -> Result<Textbook, ApiError> {
        let response = self
            .api
            .get_raw(&format!("/textbooks/{}/", id), &[])
            .await?;
        if !response.is_success() {
            return Err(ApiError::Http {
                status: response.status,
                message: error_message(&response.body),
            });
        }
        Ok(parse_textbook(&response.body)?)
    }
}
