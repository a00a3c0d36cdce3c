//! Shared HTTP client construction

use crate::config::HttpSettings;
use crate::error::{Result, ToolboxError};

/// Build the client used for both the token exchange and the API call.
pub fn build_client(settings: &HttpSettings) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("toolbox/", env!("CARGO_PKG_VERSION")))
        .timeout(settings.timeout)
        .build()
        .map_err(|e| ToolboxError::request_build(format!("failed to create HTTP client: {e}")))
}
