//! Error types for the HLS manifest tool
//!
//! This module defines the error taxonomy for manifest generation and the
//! collaborator tools. Errors carry the path or value that caused them so that
//! a failed run can be diagnosed from its single line of output.

use std::path::PathBuf;
use thiserror::Error;

/// Manifest construction, encoding and writing errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Input directory missing or not a directory
    #[error("Input directory not found: {path}")]
    InputNotFound { path: PathBuf },

    /// File vanished or became unreadable while it was being described
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output could not be written or moved into place
    #[error("Failed to write manifest to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bucket base address is not a usable URL
    #[error("Invalid bucket address '{url}': {reason}")]
    InvalidBucket { url: String, reason: String },

    /// Schema version string has no documented variant
    #[error("Unknown schema version: {version}. Supported versions: 1.3, 1.4, 1.5")]
    UnknownSchemaVersion { version: String },

    /// No product name given and no data file to derive one from
    #[error("No product name supplied and no data file found in {path}")]
    ProductNameUnresolved { path: PathBuf },

    /// Checksum text does not match its algorithm
    #[error("Invalid checksum: {hash}")]
    InvalidHash { hash: String },

    /// Encoded manifest does not follow its declared schema
    #[error("Invalid manifest format: {reason}")]
    InvalidFormat { reason: String },

    /// JSON encoding or decoding failure
    #[error("JSON error in manifest")]
    JsonParse(#[from] serde_json::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Explicitly requested configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file could not be read
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Errors from the collaborator tools (day-of-year, granule lookup, solar zenith)
#[derive(Error, Debug)]
pub enum ToolError {
    /// Year, month and day do not form a calendar date
    #[error("Invalid date: {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    /// Metadata document is not well-formed XML
    #[error("Failed to parse XML in {path}: {reason}")]
    Xml { path: PathBuf, reason: String },

    /// Required element absent from a metadata document
    #[error("No {element} element in {path}")]
    MissingElement { path: PathBuf, element: String },

    /// Element text is not a number
    #[error("Invalid angle '{value}' in {path}")]
    InvalidAngle { path: PathBuf, value: String },

    /// I/O error while reading a product file or directory
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest error
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Tool error
    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl AppError {
    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Manifest(ManifestError::InputNotFound { .. }) => "input",
            AppError::Manifest(ManifestError::Read { .. }) => "read",
            AppError::Manifest(ManifestError::Write { .. }) => "write",
            AppError::Manifest(_) => "manifest",
            AppError::Config(_) => "config",
            AppError::Tool(_) => "tool",
        }
    }

    /// Process exit code for this error
    ///
    /// Argument errors never reach here: clap reports them and exits with 2.
    /// Everything that fails after parsing is a runtime failure.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Manifest result type alias
pub type ManifestResult<T> = std::result::Result<T, ManifestError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Tool result type alias
pub type ToolResult<T> = std::result::Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let err = AppError::from(ManifestError::InputNotFound {
            path: PathBuf::from("/missing"),
        });
        assert_eq!(err.category(), "input");
        assert_eq!(err.exit_code(), 1);

        let err = AppError::from(ManifestError::ProductNameUnresolved {
            path: PathBuf::from("/out"),
        });
        assert_eq!(err.category(), "manifest");

        let err = AppError::from(ConfigError::NotFound {
            path: PathBuf::from("custom.toml"),
        });
        assert_eq!(err.category(), "config");
        assert_eq!(err.to_string(), "Configuration file not found: custom.toml");
    }

    #[test]
    fn test_read_error_keeps_source() {
        use std::error::Error as _;

        let err = ManifestError::Read {
            path: PathBuf::from("a.tif"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("a.tif"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_invalid_date_display() {
        let err = ToolError::InvalidDate {
            year: 2019,
            month: 2,
            day: 30,
        };
        assert_eq!(err.to_string(), "Invalid date: 2019-02-30");
    }
}
