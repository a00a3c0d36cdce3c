//! Authenticated calls to the remote API
//!
//! Every remote operation follows the same shape: `POST` to a path under the
//! configured API endpoint, optional query parameters, the access token in
//! the `Authentication` header, and an arbitrary JSON document back.

use crate::auth::AccessToken;
use crate::error::{Result, ToolboxError};
use reqwest::{StatusCode, Url};
use serde_json::Value;

/// Header carrying the access token on API calls.
///
/// The API expects `Authentication`, not the standard `Authorization`.
pub const API_AUTH_HEADER: &str = "Authentication";

/// Query parameter that asks the UUID operation to strip hyphens.
pub const NO_HYPHENS_PARAM: &str = "no-hyphens";

/// A single remote operation: path below the API endpoint plus query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiOperation {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl ApiOperation {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// UUID generation, optionally without hyphens.
    pub fn uuid(no_hyphens: bool) -> Self {
        let op = Self::new("programming/uuid");
        if no_hyphens {
            op.with_query(NO_HYPHENS_PARAM, "true")
        } else {
            op
        }
    }
}

/// Client for the remote API rooted at `api_endpoint`.
pub struct ApiClient {
    client: reqwest::Client,
    api_endpoint: String,
}

impl ApiClient {
    pub fn new(client: reqwest::Client, api_endpoint: impl Into<String>) -> Self {
        Self {
            client,
            api_endpoint: api_endpoint.into(),
        }
    }

    /// Full URL of `op`, including its query string.
    pub fn url_for(&self, op: &ApiOperation) -> Result<Url> {
        let raw = format!(
            "{}/{}",
            self.api_endpoint.trim_end_matches('/'),
            op.path.trim_start_matches('/')
        );
        let mut url = Url::parse(&raw).map_err(|e| {
            ToolboxError::request_build(format!("invalid API endpoint '{}': {e}", self.api_endpoint))
        })?;

        if !op.query.is_empty() {
            url.query_pairs_mut().extend_pairs(op.query.iter());
        }

        Ok(url)
    }

    /// Call `op` with `token` and return the decoded JSON response.
    pub async fn call(&self, op: &ApiOperation, token: &AccessToken) -> Result<Value> {
        let url = self.url_for(op)?;

        tracing::debug!(url = %url, "calling API");

        let response = self
            .client
            .post(url)
            .header(API_AUTH_HEADER, token.access_token.as_str())
            .send()
            .await
            .map_err(ToolboxError::from_transport)?;

        let status = response.status();
        let body = response.text().await.map_err(ToolboxError::from_transport)?;

        if status != StatusCode::OK {
            tracing::warn!(status = status.as_u16(), path = %op.path, "API call failed");
            return Err(ToolboxError::ApiServer {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| ToolboxError::response_decode(format!("parsing API response: {e}")))
    }
}

/// Pretty-print a JSON document with two-space indentation.
pub fn render_json(value: &Value) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ToolboxError::response_decode(format!("rendering API response: {e}")))
}
