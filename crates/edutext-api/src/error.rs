//! Typed failures for backend API calls.

use thiserror::Error;

/// A response that decoded as JSON but does not match the expected shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("schema error in {field}: {detail}")]
pub struct SchemaError {
    pub field: String,
    pub detail: String,
}

impl SchemaError {
    pub fn new(field: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            detail: detail.into(),
        }
    }
}

/// General failure talking to the backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a usable response.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The backend answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    /// The backend answered 2xx but the body failed validation.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Failure to record a paid order. The caller still holds a captured
/// payment when this comes back, so it is the most serious error in the
/// storefront and always travels with the payment reference.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderCreationError {
    /// The backend refused the order.
    #[error("order rejected (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },
    /// The request never reached the backend or the response was lost.
    #[error("order submission transport failure: {0}")]
    Transport(String),
    /// The order may have been created but the response was unreadable.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl From<ApiError> for OrderCreationError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Transport(message) => OrderCreationError::Transport(message),
            ApiError::Http { status, message } => OrderCreationError::Rejected { status, message },
            ApiError::Schema(schema) => OrderCreationError::Schema(schema),
        }
    }
}

/// Failure to fetch an order by its payment reference.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderLookupError {
    /// The backend knows no order under this reference.
    #[error("no order found for reference {reference}")]
    NotFound { reference: String },
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl From<SchemaError> for OrderLookupError {
    fn from(error: SchemaError) -> Self {
        OrderLookupError::Api(ApiError::Schema(error))
    }
}
