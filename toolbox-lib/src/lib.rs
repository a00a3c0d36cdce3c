/// Toolbox - Shared Library
///
/// This library contains the configuration store, the OAuth2 client
/// credentials exchange and the authenticated API call pattern used by
/// the `toolbox` CLI.
pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod gate;
pub mod http;

pub use api::{render_json, ApiClient, ApiOperation};
pub use auth::{AccessToken, TokenClient};
pub use config::{ConfigStore, Credentials, HttpSettings};
pub use error::{Result, ToolboxError};
pub use gate::{check_configured, with_config_check};
