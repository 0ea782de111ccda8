//! HLS Manifest Library
//!
//! Builds archival manifests for the output of Harmonized Landsat Sentinel-2
//! processing jobs: each output file is classified by extension, checksummed,
//! given a URI under the destination bucket, and recorded in a versioned JSON
//! document. Also hosts the small helper tools the processing scripts call.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod tools;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
