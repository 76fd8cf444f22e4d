//! Connection Settings Model

use serde::{Deserialize, Serialize};

/// Remote workflow API connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSettings {
    /// Base URL of the workflow API (e.g. "http://localhost:5678/api/v1")
    pub api_url: String,
    /// API key attached to every request
    pub api_key: String,
}

impl ConnectionSettings {
    /// A connection is usable only when both fields are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.api_url.is_empty() && !self.api_key.is_empty()
    }
}
