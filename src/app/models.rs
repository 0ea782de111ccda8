//! Core data models for output manifests
//!
//! This module defines the manifest document and its file records. The
//! document is assembled once per run from a snapshot of the output directory
//! and is never mutated after it is written.

use serde::{Deserialize, Serialize};

use crate::app::hash::ChecksumAlgorithm;
use crate::app::schema::SchemaVersion;

/// Semantic role of an output file, derived from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Raster imagery (band GeoTIFFs or HDF containers)
    Data,
    /// XML metadata
    Metadata,
    /// Browse image
    Browse,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Metadata => "metadata",
            Self::Browse => "browse",
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One output file as it appears in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Base name of the file (e.g., "HLS.S30.T52SCG.2019253.v1.5.B01.tif")
    pub name: String,
    /// Exact byte length at read time
    #[serde(rename = "size")]
    pub size_bytes: u64,
    /// Lowercase hex digest over the full file content
    pub checksum: String,
    /// Digest used for `checksum`
    #[serde(rename = "checksumType")]
    pub checksum_algorithm: ChecksumAlgorithm,
    /// Externally addressable location of the file
    pub uri: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
}

/// Product section: the product name and its files in listing order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub name: String,
    pub files: Vec<FileRecord>,
}

/// Complete manifest for one processing job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestDocument {
    /// Processing collection (e.g., "HLSS30")
    pub collection_id: String,
    /// Job id supplied by the caller, or a generated UUID
    pub product_identifier: String,
    pub schema_version: SchemaVersion,
    pub product: Product,
}

impl ManifestDocument {
    /// Number of files of the given type
    pub fn count_of(&self, file_type: FileType) -> usize {
        self.product
            .files
            .iter()
            .filter(|f| f.file_type == file_type)
            .count()
    }

    /// Total bytes described by the manifest
    pub fn total_size(&self) -> u64 {
        self.product.files.iter().map(|f| f.size_bytes).sum()
    }
}
