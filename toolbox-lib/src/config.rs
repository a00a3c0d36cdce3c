//! Configuration store backed by a YAML file in the user's home directory
//!
//! The store holds the client credentials and the two endpoints the CLI
//! talks to. Values are staged in memory with `set` and only reach disk
//! when `write` is called; the write goes through a temp file followed by
//! a rename so a crash never leaves a half-written file behind.

use crate::error::{Result, ToolboxError};
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CLIENT_ID_KEY: &str = "client-id";
pub const CLIENT_SECRET_KEY: &str = "client-secret";
pub const API_ENDPOINT_KEY: &str = "api-endpoint";
pub const TOKEN_ENDPOINT_KEY: &str = "token-endpoint";

/// Keys that must all be present before any API call is made.
pub const REQUIRED_KEYS: [&str; 4] = [
    CLIENT_ID_KEY,
    CLIENT_SECRET_KEY,
    API_ENDPOINT_KEY,
    TOKEN_ENDPOINT_KEY,
];

/// File name of the configuration file inside the home directory.
pub const CONFIG_FILE_NAME: &str = ".toolbox.yaml";

/// Connection credentials for the API and its token endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub api_endpoint: String,
    pub token_endpoint: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("api_endpoint", &self.api_endpoint)
            .field("token_endpoint", &self.token_endpoint)
            .finish()
    }
}

/// Settings for the outbound HTTP client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpSettings {
    pub timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

/// Default location of the configuration file: `~/.toolbox.yaml`.
pub fn default_config_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_FILE_NAME))
        .ok_or_else(|| ToolboxError::configuration("unable to determine home directory"))
}

/// Key-value store persisted as a YAML mapping.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    values: Mapping,
}

impl ConfigStore {
    /// Open the store at `path`, creating an empty file if none exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "creating configuration file");
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(&path, b"")?;
            restrict_permissions(&path)?;
        }

        let content = std::fs::read_to_string(&path)?;
        let values = parse_mapping(&content)?;

        Ok(Self { path, values })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a value as a string. Scalars other than strings are rendered.
    pub fn get(&self, key: &str) -> Option<String> {
        match self.values.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null => Some(String::new()),
            _ => None,
        }
    }

    /// Stage a value. Nothing is persisted until `write` is called.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values
            .insert(Value::String(key.to_string()), Value::String(value.into()));
    }

    /// Whether `key` is present, regardless of its value.
    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Persist every staged value to the backing file.
    pub fn write(&self) -> Result<()> {
        let yaml = serde_yaml::to_string(&self.values)
            .map_err(|e| ToolboxError::ConfigFormat(e.to_string()))?;

        // Write to temp file first, then rename (atomic on Unix)
        let temp_path = self.path.with_extension("yaml.tmp");
        std::fs::write(&temp_path, yaml)?;
        restrict_permissions(&temp_path)?;
        std::fs::rename(&temp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), "configuration written");
        Ok(())
    }

    /// Stage all four credential fields.
    pub fn set_credentials(&mut self, credentials: &Credentials) {
        self.set(CLIENT_ID_KEY, credentials.client_id.as_str());
        self.set(CLIENT_SECRET_KEY, credentials.client_secret.as_str());
        self.set(API_ENDPOINT_KEY, credentials.api_endpoint.as_str());
        self.set(TOKEN_ENDPOINT_KEY, credentials.token_endpoint.as_str());
    }

    /// Read all four credential fields, or `None` if any is missing.
    pub fn credentials(&self) -> Option<Credentials> {
        Some(Credentials {
            client_id: self.get(CLIENT_ID_KEY)?,
            client_secret: self.get(CLIENT_SECRET_KEY)?,
            api_endpoint: self.get(API_ENDPOINT_KEY)?,
            token_endpoint: self.get(TOKEN_ENDPOINT_KEY)?,
        })
    }

    /// Required keys not present in the store, in declaration order.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| !self.has(key))
            .collect()
    }

    /// Whether every required key is present.
    pub fn is_configured(&self) -> bool {
        self.missing_keys().is_empty()
    }
}

fn parse_mapping(content: &str) -> Result<Mapping> {
    if content.trim().is_empty() {
        return Ok(Mapping::new());
    }

    match serde_yaml::from_str::<Value>(content) {
        Ok(Value::Mapping(map)) => Ok(map),
        Ok(Value::Null) => Ok(Mapping::new()),
        Ok(_) => Err(ToolboxError::ConfigFormat(
            "expected a mapping of keys to values".to_string(),
        )),
        Err(e) => Err(ToolboxError::ConfigFormat(e.to_string())),
    }
}

fn restrict_permissions(path: &Path) -> Result<()> {
    // The file holds the client secret
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, perms)?;
    }
    #[cfg(not(unix))]
    let _ = path;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_credentials() -> Credentials {
        Credentials {
            client_id: "fake_client_id".to_string(),
            client_secret: "fake_client_secret".to_string(),
            api_endpoint: "https://api.example.com".to_string(),
            token_endpoint: "https://auth.example.com/oauth2/token".to_string(),
        }
    }

    #[test]
    fn test_open_creates_missing_file() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        assert!(!path.exists());

        let store = ConfigStore::open(&path).expect("open store");

        assert!(path.exists());
        assert!(!store.is_configured());
        assert_eq!(store.missing_keys(), REQUIRED_KEYS.to_vec());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_permissions_are_restricted() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::tempdir().expect("create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        let mut store = ConfigStore::open(&path).expect("open store");
        store.set_credentials(&sample_credentials());
        store.write().expect("write store");

        let mode = std::fs::metadata(&path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_credentials_round_trip() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE_NAME);

        let mut store = ConfigStore::open(&path).expect("open store");
        store.set_credentials(&sample_credentials());
        store.write().expect("write store");

        let reopened = ConfigStore::open(&path).expect("reopen store");
        assert_eq!(
            reopened.get(CLIENT_ID_KEY).as_deref(),
            Some("fake_client_id")
        );
        assert_eq!(
            reopened.get(CLIENT_SECRET_KEY).as_deref(),
            Some("fake_client_secret")
        );
        assert_eq!(
            reopened.get(API_ENDPOINT_KEY).as_deref(),
            Some("https://api.example.com")
        );
        assert_eq!(
            reopened.get(TOKEN_ENDPOINT_KEY).as_deref(),
            Some("https://auth.example.com/oauth2/token")
        );
        assert_eq!(reopened.credentials(), Some(sample_credentials()));
    }

    #[test]
    fn test_set_is_not_persisted_without_write() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE_NAME);

        let mut store = ConfigStore::open(&path).expect("open store");
        store.set(CLIENT_ID_KEY, "staged");
        assert!(store.has(CLIENT_ID_KEY));

        let reopened = ConfigStore::open(&path).expect("reopen store");
        assert!(!reopened.has(CLIENT_ID_KEY));
    }

    #[test]
    fn test_unknown_keys_survive_write() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "output: json\nretries: 3\n").expect("seed file");

        let mut store = ConfigStore::open(&path).expect("open store");
        store.set_credentials(&sample_credentials());
        store.write().expect("write store");

        let reopened = ConfigStore::open(&path).expect("reopen store");
        assert_eq!(reopened.get("output").as_deref(), Some("json"));
        assert_eq!(reopened.get("retries").as_deref(), Some("3"));
        assert!(reopened.is_configured());
    }

    #[test]
    fn test_empty_value_counts_as_present() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "client-id: \"\"\n").expect("seed file");

        let store = ConfigStore::open(&path).expect("open store");
        assert!(store.has(CLIENT_ID_KEY));
        assert_eq!(store.get(CLIENT_ID_KEY).as_deref(), Some(""));
    }

    #[test]
    fn test_non_mapping_file_is_rejected() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "- just\n- a list\n").expect("seed file");

        let err = ConfigStore::open(&path).unwrap_err();
        assert!(matches!(err, ToolboxError::ConfigFormat(_)));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", sample_credentials());
        assert!(!rendered.contains("fake_client_secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
