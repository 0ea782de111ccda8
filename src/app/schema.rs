//! Versioned manifest schemas
//!
//! Each manifest generation run is pinned to one [`SchemaVersion`]. The
//! version decides every axis on which historical manifests disagree: which
//! extensions are recognized, which digest is recorded, whether the file list
//! is nested under `product`, what the identifier key is called, and the
//! default URI template.
//!
//! | Version | Extensions | Checksum | Layout | Id key | URI template |
//! |---|---|---|---|---|---|
//! | 1.3 | `.hdf` `.xml` `.png` | MD5 | flat | `id` | metadata under `data/` |
//! | 1.4 | `.tif` `.jpg` `.xml` | MD5 | nested | `id` | metadata under `data/` |
//! | 1.5 | `.tif` `.jpg` `.xml` | SHA-512 | nested | `identifier` | flat |

use std::fmt;
use std::str::FromStr;

use crate::app::hash::ChecksumAlgorithm;
use crate::app::models::FileType;
use crate::errors::{ManifestError, ManifestResult};

/// One row of an extension table: a case-sensitive suffix and its file type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionRule {
    pub suffix: &'static str,
    pub file_type: FileType,
}

const fn rule(suffix: &'static str, file_type: FileType) -> ExtensionRule {
    ExtensionRule { suffix, file_type }
}

/// HDF-era products: one container file plus metadata and a PNG browse image
const LEGACY_RULES: &[ExtensionRule] = &[
    rule(".hdf", FileType::Data),
    rule(".xml", FileType::Metadata),
    rule(".png", FileType::Browse),
];

/// COG-era products: one GeoTIFF per band, JPEG browse image
const CURRENT_RULES: &[ExtensionRule] = &[
    rule(".tif", FileType::Data),
    rule(".jpg", FileType::Browse),
    rule(".xml", FileType::Metadata),
];

/// Placement of the file list in the encoded manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestLayout {
    /// `productName` and `files` at the top level
    Flat,
    /// `product: { name, files }`
    Nested,
}

/// How a file's URI is built from the bucket base
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UriTemplate {
    /// `base/filename` for every type
    Flat,
    /// `base/data/filename` for metadata, `base/filename` otherwise
    DataPrefixedMetadata,
}

impl UriTemplate {
    /// Path segments inserted between the bucket base and the file name
    pub fn prefix_for(&self, file_type: FileType) -> &'static [&'static str] {
        match (self, file_type) {
            (Self::DataPrefixedMetadata, FileType::Metadata) => &["data"],
            _ => &[],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::DataPrefixedMetadata => "data-prefixed-metadata",
        }
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UriTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flat" => Ok(Self::Flat),
            "data-prefixed-metadata" => Ok(Self::DataPrefixedMetadata),
            other => Err(format!(
                "unknown URI template '{}', expected 'flat' or 'data-prefixed-metadata'",
                other
            )),
        }
    }
}

/// Documented manifest schema versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SchemaVersion {
    /// HDF-era manifests
    V1_3,
    /// First COG-era manifests, still MD5
    V1_4,
    /// Current manifests
    #[default]
    V1_5,
}

impl SchemaVersion {
    /// All supported versions, oldest first
    pub const ALL: [SchemaVersion; 3] = [Self::V1_3, Self::V1_4, Self::V1_5];

    /// Parse a version string (e.g., "1.5")
    pub fn parse(version: &str) -> ManifestResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == version)
            .ok_or_else(|| ManifestError::UnknownSchemaVersion {
                version: version.to_string(),
            })
    }

    /// The `version` value written into the manifest
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V1_3 => "1.3",
            Self::V1_4 => "1.4",
            Self::V1_5 => "1.5",
        }
    }

    /// Ordered extension table; the first matching rule wins
    pub fn extension_rules(&self) -> &'static [ExtensionRule] {
        match self {
            Self::V1_3 => LEGACY_RULES,
            Self::V1_4 | Self::V1_5 => CURRENT_RULES,
        }
    }

    /// Digest recorded when the run does not override it
    pub fn default_checksum_algorithm(&self) -> ChecksumAlgorithm {
        match self {
            Self::V1_3 | Self::V1_4 => ChecksumAlgorithm::Md5,
            Self::V1_5 => ChecksumAlgorithm::Sha512,
        }
    }

    /// URI template used when the run does not override it
    pub fn default_uri_template(&self) -> UriTemplate {
        match self {
            Self::V1_3 | Self::V1_4 => UriTemplate::DataPrefixedMetadata,
            Self::V1_5 => UriTemplate::Flat,
        }
    }

    pub fn layout(&self) -> ManifestLayout {
        match self {
            Self::V1_3 => ManifestLayout::Flat,
            Self::V1_4 | Self::V1_5 => ManifestLayout::Nested,
        }
    }

    /// Top-level key holding the product identifier
    pub fn identifier_key(&self) -> &'static str {
        match self {
            Self::V1_3 | Self::V1_4 => "id",
            Self::V1_5 => "identifier",
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaVersion {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
