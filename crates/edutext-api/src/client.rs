//! Thin reqwest wrapper shared by the resource clients.

use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;

/// Where the campus backend lives unless configured otherwise.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Status and body of a completed request, before any schema handling.
pub(crate) struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Base HTTP client for the backend API.
///
/// Owns the connection pool and the base URL; the resource clients layer
/// endpoint paths and schema handling on top. Cloning shares the pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get_raw(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse, ApiError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|error| ApiError::Transport(error.to_string()))?;
        Self::read(response).await
    }

    pub(crate) async fn post_raw<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.url(path);
        debug!(%url, "POST");
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|error| ApiError::Transport(error.to_string()))?;
        Self::read(response).await
    }

    async fn read(response: reqwest::Response) -> Result<ApiResponse, ApiError> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|error| ApiError::Transport(error.to_string()))?;
        Ok(ApiResponse { status, body })
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
