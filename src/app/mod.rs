//! Core application logic for the HLS manifest tool
//!
//! This module contains the manifest data model, the per-version schema
//! tables, and the components that classify, digest and address output
//! files before a manifest is assembled and written.
//!
//! # Examples
//!
//! ```rust,no_run
//! use hls_manifest::app::{BucketBase, FileClassifier, FileType, SchemaVersion, UriTemplate};
//!
//! let classifier = FileClassifier::new(SchemaVersion::V1_5);
//! let bucket = BucketBase::parse("https://example.com/b/").unwrap();
//!
//! if let Some(file_type) = classifier.classify("scene.tif").file_type {
//!     assert_eq!(file_type, FileType::Data);
//!     let uri = bucket.uri_for("scene.tif", file_type, UriTemplate::Flat);
//!     assert_eq!(uri, "https://example.com/b/scene.tif");
//! }
//! ```

pub mod classify;
pub mod hash;
pub mod manifest;
pub mod models;
pub mod schema;
pub mod uri;

// Re-export main public API
pub use classify::{Classification, FileClassifier};
pub use hash::{digest_file, Checksum, ChecksumAlgorithm, FileDigest, StreamingHasher};
pub use manifest::{
    build_manifest, decode, encode, read_manifest, write_manifest, BuildConfig, ManifestBuilder,
    ManifestWriter,
};
pub use models::{FileRecord, FileType, ManifestDocument, Product};
pub use schema::{ExtensionRule, ManifestLayout, SchemaVersion, UriTemplate};
pub use uri::{build_uri, BucketBase};
