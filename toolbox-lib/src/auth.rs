//! OAuth2 client credentials exchange
//!
//! Every command that talks to the API fetches a fresh token here. There is
//! no cache: one command, one token request, one attempt.

use crate::config::Credentials;
use crate::error::{Result, ToolboxError};
use base64::{engine::general_purpose, Engine as _};
use reqwest::header::AUTHORIZATION;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};

/// Access token returned by the token endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default)]
    pub token_type: String,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// Performs the client credentials grant against a token endpoint.
pub struct TokenClient {
    client: reqwest::Client,
}

impl TokenClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Exchange the client id and secret for an access token.
    pub async fn fetch(&self, credentials: &Credentials) -> Result<AccessToken> {
        let endpoint = Url::parse(&credentials.token_endpoint).map_err(|e| {
            ToolboxError::request_build(format!(
                "invalid token endpoint '{}': {e}",
                credentials.token_endpoint
            ))
        })?;

        let basic = general_purpose::STANDARD.encode(format!(
            "{}:{}",
            credentials.client_id, credentials.client_secret
        ));

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("scope", ""),
        ];

        tracing::debug!(endpoint = %endpoint, "requesting access token");

        let response = self
            .client
            .post(endpoint)
            .header(AUTHORIZATION, format!("Basic {basic}"))
            .form(&form)
            .send()
            .await
            .map_err(ToolboxError::from_transport)?;

        let status = response.status();
        let body = response.text().await.map_err(ToolboxError::from_transport)?;

        if status != StatusCode::OK {
            tracing::warn!(status = status.as_u16(), "token endpoint rejected the request");
            return Err(ToolboxError::AuthServer {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| ToolboxError::response_decode(format!("invalid token response: {e}")))
    }
}
