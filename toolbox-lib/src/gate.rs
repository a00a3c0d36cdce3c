//! Configuration precondition for API-calling commands
//!
//! Commands that call the API are wrapped with [`with_config_check`] when
//! they are dispatched. The wrapped body only runs once every required key
//! is present in the store, and receives the loaded credentials.

use crate::config::{ConfigStore, Credentials};
use crate::error::{Result, ToolboxError};
use std::future::Future;

/// Verify that all required keys are present and return the credentials.
pub fn check_configured(store: &ConfigStore) -> Result<Credentials> {
    let missing = store.missing_keys();
    if !missing.is_empty() {
        tracing::debug!(?missing, path = %store.path().display(), "configuration incomplete");
        return Err(ToolboxError::configuration(format!(
            "missing {}; please run `toolbox configure`",
            missing.join(", ")
        )));
    }

    store
        .credentials()
        .ok_or_else(|| ToolboxError::configuration("please run `toolbox configure`"))
}

/// Run `handler` only if the store passes [`check_configured`].
pub async fn with_config_check<F, Fut, T, E>(
    store: &ConfigStore,
    handler: F,
) -> std::result::Result<T, E>
where
    F: FnOnce(Credentials) -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    E: From<ToolboxError>,
{
    let credentials = check_configured(store)?;
    handler(credentials).await
}
