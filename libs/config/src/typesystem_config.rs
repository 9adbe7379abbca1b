//! Typesystem Configuration Module
//!
//! Loads typesystem settings from a TOML file, an optional
//! environment-specific override file, and `DOB_`-prefixed environment
//! variables (nested keys separated by `__`, e.g.
//! `DOB_IDENTIFIERS__VERIFY_ALIAS_HASHES=true`). Every setting has a default,
//! so a missing file section is not an error.

use anyhow::{Context, Result};
use config_crate::{Config, Environment, File, FileFormat, Map};
use dob_types::{IdentifierPolicy, TypesystemError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Main typesystem configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TypesystemConfig {
    pub logging: LoggingConfig,
    pub identifiers: IdentifierConfig,
    pub limits: LimitsConfig,
}

/// Log output settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `"info"` or `"dob_types=debug,warn"`
    pub level: String,
    pub json: bool,
}

/// Identifier construction settings
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct IdentifierConfig {
    /// Warn when a decoded alias does not hash to the raw value it came with
    pub verify_alias_hashes: bool,
}

/// Size limits the codec enforces on decoded members
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_sequence_len: Option<usize>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl TypesystemConfig {
    /// Load configuration from files with environment overrides
    ///
    /// Without `base_path` only defaults and environment variables apply. With
    /// an `environment`, `<base dir>/environments/<environment>.toml` is layered
    /// on top of the base file when it exists.
    pub fn load(base_path: Option<&Path>, environment: Option<&str>) -> Result<Self> {
        Self::load_with_env(base_path, environment, None)
    }

    /// Parse configuration from a TOML string, without environment overrides
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    fn load_with_env(
        base_path: Option<&Path>,
        environment: Option<&str>,
        env_vars: Option<Map<String, String>>,
    ) -> Result<Self> {
        let mut builder = Config::builder();

        match base_path {
            Some(base) => {
                debug!("Loading typesystem config: {:?}", base);
                builder = builder.add_source(File::from(base).required(true));

                // Add environment-specific overrides if specified
                if let Some(env) = environment {
                    let env_file = base
                        .parent()
                        .map(Path::to_path_buf)
                        .unwrap_or_default()
                        .join("environments")
                        .join(format!("{}.toml", env));

                    if env_file.exists() {
                        info!("Loading environment config: {:?}", env_file);
                        builder = builder.add_source(File::from(env_file));
                    } else {
                        warn!("Environment config not found: {:?}", env_file);
                    }
                }
            }
            None => debug!("No typesystem config file given, using defaults"),
        }

        // Override with environment variables (DOB_ prefix)
        builder = builder.add_source(
            Environment::with_prefix("DOB")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env_vars),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Identifier policy derived from the `[identifiers]` section
    pub fn identifier_policy(&self) -> IdentifierPolicy {
        IdentifierPolicy {
            verify_alias_hashes: self.identifiers.verify_alias_hashes,
        }
    }

    /// Check a decoded sequence length against `limits.max_sequence_len`
    pub fn check_sequence_len(&self, len: usize) -> std::result::Result<(), TypesystemError> {
        match self.limits.max_sequence_len {
            Some(max) if len > max => Err(TypesystemError::InvalidArgument {
                reason: format!("sequence length {} exceeds configured maximum {}", len, max),
            }),
            _ => Ok(()),
        }
    }
}

/// Convenience function to load configuration from an optional path
pub fn load_config(path: Option<PathBuf>) -> Result<TypesystemConfig> {
    TypesystemConfig::load(path.as_deref(), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dob_types::ErrorKind;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_file() {
        let config = TypesystemConfig::load_with_env(None, None, Some(Map::new())).unwrap();
        assert_eq!(config, TypesystemConfig::default());
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert!(!config.identifiers.verify_alias_hashes);
        assert_eq!(config.limits.max_sequence_len, None);
    }

    #[test]
    fn test_load_base_config() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("typesystem.toml");

        let config_content = r#"
[logging]
level = "debug"
json = true

[identifiers]
verify_alias_hashes = true

[limits]
max_sequence_len = 16
"#;

        fs::write(&config_path, config_content).unwrap();

        let config =
            TypesystemConfig::load_with_env(Some(&config_path), None, Some(Map::new())).unwrap();

        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert!(config.identifier_policy().verify_alias_hashes);
        assert_eq!(config.limits.max_sequence_len, Some(16));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = TypesystemConfig::from_toml_str("[limits]\nmax_sequence_len = 2\n").unwrap();
        assert_eq!(config.logging, LoggingConfig::default());
        assert_eq!(config.limits.max_sequence_len, Some(2));
    }

    #[test]
    fn test_environment_file_override() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("typesystem.toml");
        fs::write(&config_path, "[logging]\nlevel = \"warn\"\n").unwrap();

        fs::create_dir(dir.path().join("environments")).unwrap();
        fs::write(
            dir.path().join("environments").join("test.toml"),
            "[logging]\nlevel = \"trace\"\n",
        )
        .unwrap();

        let config =
            TypesystemConfig::load_with_env(Some(&config_path), Some("test"), Some(Map::new()))
                .unwrap();
        assert_eq!(config.logging.level, "trace");

        // Unknown environments fall back to the base file
        let config =
            TypesystemConfig::load_with_env(Some(&config_path), Some("prod"), Some(Map::new()))
                .unwrap();
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_environment_variable_override() {
        let mut vars = Map::new();
        vars.insert(
            "DOB_IDENTIFIERS__VERIFY_ALIAS_HASHES".to_string(),
            "true".to_string(),
        );
        vars.insert("DOB_LOGGING__LEVEL".to_string(), "error".to_string());

        let config = TypesystemConfig::load_with_env(None, None, Some(vars)).unwrap();
        assert!(config.identifiers.verify_alias_hashes);
        assert_eq!(config.logging.level, "error");
    }

    #[test]
    fn test_missing_base_file_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(TypesystemConfig::load_with_env(Some(&missing), None, Some(Map::new())).is_err());
    }

    #[test]
    fn test_shipped_config_parses() {
        let config =
            TypesystemConfig::from_toml_str(include_str!("../../../config/typesystem.toml"))
                .unwrap();
        assert_eq!(config, TypesystemConfig::default());

        let dev = TypesystemConfig::from_toml_str(include_str!(
            "../../../config/environments/development.toml"
        ))
        .unwrap();
        assert!(dev.identifiers.verify_alias_hashes);
        assert_eq!(dev.logging.level, "dob_types=debug,info");
    }

    #[test]
    fn test_check_sequence_len() {
        let mut config = TypesystemConfig::default();
        assert!(config.check_sequence_len(usize::MAX).is_ok());

        config.limits.max_sequence_len = Some(3);
        assert!(config.check_sequence_len(3).is_ok());
        assert_eq!(
            config.check_sequence_len(4).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }
}
