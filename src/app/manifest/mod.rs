//! Manifest construction, encoding and output
//!
//! This module turns a directory of job output files into a versioned
//! manifest document and writes it for downstream archival systems.
//!
//! # Module Organization
//!
//! - [`builder`] - Directory snapshot, classification, digests and URIs
//! - [`codec`] - Versioned JSON encoding and validated decoding
//! - [`writer`] - Atomic write of the encoded document
//! - [`tests`] - Integration tests for the full pipeline
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::path::Path;
//! use hls_manifest::app::manifest::{build_manifest, write_manifest, BuildConfig};
//! use hls_manifest::app::{BucketBase, SchemaVersion};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let bucket = BucketBase::parse("s3://hls-output/HLSS30")?;
//! let config = BuildConfig::new("./output", bucket, "HLSS30", SchemaVersion::V1_5)
//!     .with_job_id("job-42");
//!
//! let manifest = build_manifest(config).await?;
//! write_manifest(&manifest, Path::new("./manifest.json")).await?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod codec;
pub mod writer;

#[cfg(test)]
pub mod tests;

pub use builder::{build_manifest, BuildConfig, ManifestBuilder};
pub use codec::{decode, encode, read_manifest};
pub use writer::{write_manifest, ManifestWriter};
