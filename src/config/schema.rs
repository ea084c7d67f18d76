//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Configuration for applications embedding the client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Default request deadline in milliseconds.
    pub timeout_ms: u64,

    /// User agent reported by the built-in transport.
    pub user_agent: String,

    /// Backing file for the persistent storage kind, if used.
    pub storage_path: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            user_agent: concat!("resilient-fetch/", env!("CARGO_PKG_VERSION")).to_string(),
            storage_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_allow_empty_config() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config.timeout_ms, 30_000);
        assert!(config.storage_path.is_none());
        assert!(!config.user_agent.is_empty());
    }

    #[test]
    fn partial_config_overrides() {
        let config: ClientConfig = toml::from_str("timeout_ms = 5000").unwrap();
        assert_eq!(config.timeout_ms, 5000);
        assert!(!config.user_agent.is_empty());
    }
}
