//! Configuration management for the HLS manifest tool
//!
//! Settings come from, in increasing precedence: built-in defaults, the
//! schema version's defaults, an optional TOML file, and command-line flags.
//! The file is optional; the tool runs with zero configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use tracing::level_filters::LevelFilter;

use crate::app::{ChecksumAlgorithm, SchemaVersion, UriTemplate};
use crate::constants::{config as files, logging, workers};
use crate::errors::{ConfigError, ConfigResult};

/// Application configuration as stored in TOML
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Manifest generation defaults
    pub manifest: ManifestConfigToml,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// TOML-friendly manifest defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ManifestConfigToml {
    /// Schema version used when `--schema-version` is absent (e.g., "1.5")
    pub schema_version: Option<String>,
    /// URI template overriding the schema default
    pub uri_template: Option<String>,
    /// Checksum algorithm overriding the schema default
    pub checksum: Option<String>,
    /// Maximum concurrent digests
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level when no verbosity flag is given
    pub level: String,
}

impl LoggingConfig {
    /// Check the level is one `tracing` understands (e.g., "warn", "debug", "off")
    pub fn validate(&self) -> ConfigResult<()> {
        self.level
            .parse::<LevelFilter>()
            .map(|_| ())
            .map_err(|_| ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                value: self.level.clone(),
                reason: "Expected one of off, error, warn, info, debug, trace".to_string(),
            })
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Validated manifest defaults from the configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestDefaults {
    pub schema_version: Option<SchemaVersion>,
    pub uri_template: Option<UriTemplate>,
    pub checksum: Option<ChecksumAlgorithm>,
    pub workers: Option<usize>,
}

impl ManifestConfigToml {
    /// Validate the raw TOML values
    pub fn to_defaults(&self) -> ConfigResult<ManifestDefaults> {
        let invalid = |field: &str, value: &str, reason: String| ConfigError::InvalidValue {
            field: format!("manifest.{}", field),
            value: value.to_string(),
            reason,
        };

        let schema_version = self
            .schema_version
            .as_deref()
            .map(|v| SchemaVersion::parse(v).map_err(|e| invalid("schema_version", v, e.to_string())))
            .transpose()?;

        let uri_template = self
            .uri_template
            .as_deref()
            .map(|v| v.parse::<UriTemplate>().map_err(|e| invalid("uri_template", v, e)))
            .transpose()?;

        let checksum = self
            .checksum
            .as_deref()
            .map(|v| v.parse::<ChecksumAlgorithm>().map_err(|e| invalid("checksum", v, e)))
            .transpose()?;

        if let Some(count) = self.workers {
            if !(workers::MIN_WORKER_COUNT..=workers::MAX_WORKER_COUNT).contains(&count) {
                return Err(invalid(
                    "workers",
                    &count.to_string(),
                    format!(
                        "Must be between {} and {}",
                        workers::MIN_WORKER_COUNT,
                        workers::MAX_WORKER_COUNT
                    ),
                ));
            }
        }

        Ok(ManifestDefaults {
            schema_version,
            uri_template,
            checksum,
            workers: self.workers,
        })
    }
}

impl AppConfig {
    /// Load configuration
    ///
    /// An explicit path must exist. Without one, the first existing file of
    /// `./manifest-tool.toml` and `<config_dir>/hls-manifest/config.toml` is
    /// used, or the defaults if neither exists.
    pub async fn load(config_file_override: Option<&Path>) -> ConfigResult<Self> {
        let path = match config_file_override {
            Some(path) => {
                if !tokio::fs::try_exists(path).await.unwrap_or(false) {
                    return Err(ConfigError::NotFound {
                        path: path.to_path_buf(),
                    });
                }
                Some(path.to_path_buf())
            }
            None => Self::find_config_file().await,
        };

        match path {
            Some(path) => Self::load_from_file(&path).await,
            None => {
                debug!("No config file found in standard locations");
                Ok(Self::default())
            }
        }
    }

    /// Find configuration file in standard locations
    async fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(files::LOCAL_CONFIG_FILE)];
        if let Some(path) = Self::default_config_path() {
            search_paths.push(path);
        }

        for path in search_paths {
            if tokio::fs::try_exists(&path).await.unwrap_or(false) {
                debug!("Found config file: {}", path.display());
                return Some(path);
            }
        }
        None
    }

    /// Default config file path for the current user
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(files::APP_CONFIG_DIR).join(files::USER_CONFIG_FILE))
    }

    /// Load configuration from a TOML file
    async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config = Self::from_toml(&content)?;
        debug!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.manifest.to_defaults()?;
        config.logging.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(
            config.manifest.to_defaults().unwrap(),
            ManifestDefaults::default()
        );
    }

    #[test]
    fn test_full_file() {
        let config = AppConfig::from_toml(
            r#"
[manifest]
schema_version = "1.4"
uri_template = "flat"
checksum = "sha512"
workers = 2

[logging]
level = "debug"
"#,
        )
        .unwrap();

        let defaults = config.manifest.to_defaults().unwrap();
        assert_eq!(defaults.schema_version, Some(SchemaVersion::V1_4));
        assert_eq!(defaults.uri_template, Some(UriTemplate::Flat));
        assert_eq!(defaults.checksum, Some(ChecksumAlgorithm::Sha512));
        assert_eq!(defaults.workers, Some(2));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = AppConfig::from_toml("[manifest]\nschema_version = \"1.3\"\n").unwrap();
        assert_eq!(config.logging, LoggingConfig::default());
        assert_eq!(config.manifest.workers, None);
    }

    #[test]
    fn test_invalid_values() {
        let err = AppConfig::from_toml("[manifest]\nschema_version = \"3.0\"\n").unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "manifest.schema_version")
        );

        let err = AppConfig::from_toml("[manifest]\nworkers = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let err = AppConfig::from_toml("[manifest]\nchecksum = \"crc32\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let err = AppConfig::from_toml("[logging]\nlevel = \"loud\"\n").unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "logging.level")
        );

        let err = AppConfig::from_toml("manifest = 3").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFormat(_)));
    }

    #[tokio::test]
    async fn test_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[manifest]\nuri_template = \"data-prefixed-metadata\"\n").unwrap();

        let config = AppConfig::load(Some(&path)).await.unwrap();
        assert_eq!(
            config.manifest.uri_template.as_deref(),
            Some("data-prefixed-metadata")
        );

        let missing = dir.path().join("missing.toml");
        let err = AppConfig::load(Some(&missing)).await.unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }
}
