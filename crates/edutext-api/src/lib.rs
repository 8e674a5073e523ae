//! REST clients for the EduText Hub backend.
//!
//! Everything that crosses the wire is validated here, at the boundary: raw
//! bodies decode into explicit schema types, amounts parse through the exact
//! decimal path, and failures come back as typed errors. The rest of the
//! storefront only ever sees domain types.

pub mod client;
pub mod error;
pub mod mock;
pub mod orders;
pub mod schema;
pub mod textbooks;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::{ApiError, OrderCreationError, OrderLookupError, SchemaError};
pub use orders::{OrderPayload, OrderPayloadItem, OrderRecord, OrderRecordItem, OrdersApi, OrdersClient};
pub use schema::RawAmount;
pub use textbooks::{TextbookQuery, TextbooksApi, TextbooksClient};
