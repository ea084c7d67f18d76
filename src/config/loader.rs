//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ClientConfig;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ClientConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Semantic checks; serde handles the syntactic ones. Returns all
/// violations, not just the first.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.timeout_ms == 0 {
        errors.push("timeout_ms must be greater than zero".to_string());
    }
    if config.user_agent.trim().is_empty() {
        errors.push("user_agent must not be empty".to_string());
    }
    if let Some(path) = &config.storage_path {
        if path.trim().is_empty() {
            errors.push("storage_path must not be empty when set".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_minimal_file() {
        let path = "test_client_config_minimal.toml";
        fs::write(path, "timeout_ms = 40000\n").unwrap();

        let config = load_config(Path::new(path)).unwrap();
        assert_eq!(config.timeout_ms, 40000);

        fs::remove_file(path).unwrap_or_default();
    }

    #[test]
    fn rejects_bad_toml() {
        let path = "test_client_config_bad.toml";
        fs::write(path, "timeout_ms = [not toml").unwrap();

        let err = load_config(Path::new(path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        fs::remove_file(path).unwrap_or_default();
    }

    #[test]
    fn collects_all_validation_errors() {
        let config = ClientConfig {
            timeout_ms: 0,
            user_agent: "  ".to_string(),
            storage_path: None,
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("does_not_exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
