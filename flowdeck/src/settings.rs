//! Connection settings persistence
//!
//! A single JSON file holds the endpoint/credential pair. Missing,
//! incomplete, or corrupt content falls back to environment-derived
//! defaults rather than a hard error, so the dashboard always starts.
//! The credential default is an injection point: it is empty unless
//! the environment supplies one.

use std::path::PathBuf;

use parking_lot::RwLock;
use shared::ConnectionSettings;
use thiserror::Error;

/// Environment variable supplying the default API endpoint.
pub const ENV_API_URL: &str = "FLOWDECK_API_URL";
/// Environment variable supplying the default API key.
pub const ENV_API_KEY: &str = "FLOWDECK_API_KEY";

const DEFAULT_API_URL: &str = "http://localhost:5678/api/v1";

/// Settings persistence error
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to write settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Persisted connection settings with an in-memory working copy.
#[derive(Debug)]
pub struct SettingsStore {
    path: Option<PathBuf>,
    current: RwLock<ConnectionSettings>,
}

impl SettingsStore {
    /// Load settings from `path`, falling back to defaults when the
    /// file is absent, incomplete, or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<ConnectionSettings>(&content) {
                Ok(settings) if settings.is_valid() => settings,
                Ok(_) => {
                    tracing::warn!("stored settings incomplete, using defaults");
                    Self::defaults()
                }
                Err(e) => {
                    tracing::warn!("stored settings unreadable ({e}), using defaults");
                    Self::defaults()
                }
            },
            Err(_) => Self::defaults(),
        };

        Self {
            path: Some(path),
            current: RwLock::new(current),
        }
    }

    /// In-memory store that is never persisted.
    pub fn in_memory(settings: ConnectionSettings) -> Self {
        Self {
            path: None,
            current: RwLock::new(settings),
        }
    }

    /// Default pair, injected from the environment.
    fn defaults() -> ConnectionSettings {
        ConnectionSettings {
            api_url: std::env::var(ENV_API_URL).unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            api_key: std::env::var(ENV_API_KEY).unwrap_or_default(),
        }
    }

    /// Snapshot of the current settings.
    pub fn current(&self) -> ConnectionSettings {
        self.current.read().clone()
    }

    /// Whether both endpoint and credential are present.
    pub fn is_configured(&self) -> bool {
        self.current.read().is_valid()
    }

    /// Persist and adopt new settings.
    pub fn save(&self, settings: ConnectionSettings) -> Result<(), SettingsError> {
        if let Some(path) = &self.path {
            let content = serde_json::to_string_pretty(&settings)?;
            std::fs::write(path, content)?;
        }
        *self.current.write() = settings;
        Ok(())
    }
}
