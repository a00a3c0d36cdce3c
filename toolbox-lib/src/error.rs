//! Error types for the toolbox library
//!
//! Each variant names the stage of a command that failed so the CLI can
//! report it without guessing.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ToolboxError>;

#[derive(Debug, Error)]
pub enum ToolboxError {
    /// Required configuration keys are missing from the store.
    #[error("invalid CLI configuration: {0}")]
    Configuration(String),

    /// The outbound request could not be built (e.g. malformed endpoint URL).
    #[error("failed to build request: {0}")]
    RequestBuild(String),

    /// Transport failure, including timeouts.
    #[error("network error: {0}")]
    Network(String),

    /// The token endpoint answered with a non-200 status.
    #[error("token endpoint returned {status}: {body}")]
    AuthServer { status: u16, body: String },

    /// The API answered with a non-200 status.
    #[error("API returned {status}: {body}")]
    ApiServer { status: u16, body: String },

    /// A successful response carried a body that is not valid JSON.
    #[error("failed to decode response: {0}")]
    ResponseDecode(String),

    /// The configuration file exists but is not a valid YAML mapping.
    #[error("invalid configuration file: {0}")]
    ConfigFormat(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ToolboxError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn request_build(msg: impl Into<String>) -> Self {
        Self::RequestBuild(msg.into())
    }

    pub fn response_decode(msg: impl Into<String>) -> Self {
        Self::ResponseDecode(msg.into())
    }

    /// Map a transport error from reqwest.
    ///
    /// Builder errors mean the request never left the process, so they are
    /// reported as request construction failures rather than network ones.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::RequestBuild(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_server_error_carries_body() {
        let e = ToolboxError::AuthServer {
            status: 500,
            body: "{\"error\":\"boom\"}".into(),
        };
        assert_eq!(
            e.to_string(),
            "token endpoint returned 500: {\"error\":\"boom\"}"
        );
    }

    #[test]
    fn api_server_error_carries_body() {
        let e = ToolboxError::ApiServer {
            status: 400,
            body: "request is malformed".into(),
        };
        assert_eq!(e.to_string(), "API returned 400: request is malformed");
    }

    #[test]
    fn configuration_error_renders() {
        let e = ToolboxError::configuration("please run `toolbox configure`");
        assert_eq!(
            e.to_string(),
            "invalid CLI configuration: please run `toolbox configure`"
        );
    }
}
