//! core::config::schema
//!
//! Configuration file schema.
//!
//! # Example
//!
//! ```toml
//! data_dir = "/var/lib/framedef"
//! default_index = "main"
//! ```
//!
//! # Validation
//!
//! Values are validated after parsing: `default_index` must be a valid
//! name and `data_dir` must not be empty.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::naming::validate_name;

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Root directory for definitions (`<data_dir>/<index>/<name>`)
    pub data_dir: Option<PathBuf>,

    /// Index used when `--index` is not given
    pub default_index: Option<String>,
}

impl ConfigFile {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(dir) = &self.data_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue("data_dir cannot be empty".into()));
            }
        }

        if let Some(index) = &self.default_index {
            validate_name(index)
                .map_err(|e| ConfigError::InvalidValue(format!("default_index: {e}")))?;
        }

        Ok(())
    }

    /// Set a value by key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for unknown keys or invalid values.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "data_dir" => self.data_dir = Some(PathBuf::from(value)),
            "default_index" => self.default_index = Some(value.to_string()),
            other => {
                return Err(ConfigError::InvalidValue(format!(
                    "unknown configuration key '{other}'"
                )))
            }
        }
        self.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full() {
        let config: ConfigFile = toml::from_str(
            r#"
            data_dir = "/srv/defs"
            default_index = "main"
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/defs")));
        assert_eq!(config.default_index.as_deref(), Some("main"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_keys_rejected() {
        let result: Result<ConfigFile, _> = toml::from_str("colour = \"blue\"");
        assert!(result.is_err());
    }

    #[test]
    fn invalid_index_rejected() {
        let config = ConfigFile {
            default_index: Some("Not Valid".into()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn set_known_and_unknown_keys() {
        let mut config = ConfigFile::default();
        config.set("default_index", "events").unwrap();
        config.set("data_dir", "/tmp/defs").unwrap();
        assert_eq!(config.default_index.as_deref(), Some("events"));

        assert!(config.set("nope", "x").is_err());
        assert!(config.set("default_index", "BAD").is_err());
    }
}
