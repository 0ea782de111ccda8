//! Manifest assembly
//!
//! [`ManifestBuilder`] takes one snapshot of an output directory and turns it
//! into a [`ManifestDocument`]: list and sort the entries, classify each name,
//! digest the recognized files, derive their URIs, then fill in the product
//! name and identifier. At most `workers` files are digested at once
//! but results are collected in listing order, so concurrency never changes
//! the output. The first failure aborts the whole build.

use std::path::{Path, PathBuf};

use futures::{StreamExt, TryStreamExt};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::app::classify::{stem, FileClassifier};
use crate::app::hash::{digest_file, ChecksumAlgorithm};
use crate::app::models::{FileRecord, FileType, ManifestDocument, Product};
use crate::app::schema::{SchemaVersion, UriTemplate};
use crate::app::uri::BucketBase;
use crate::constants::{default_worker_count, workers};
use crate::errors::{ManifestError, ManifestResult};

/// Everything one manifest build needs, passed in explicitly
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory holding the job's output files
    pub input_dir: PathBuf,
    pub bucket: BucketBase,
    pub collection_id: String,
    /// Explicit product name; derived from the first data file if absent
    pub product_name: Option<String>,
    /// Job id used verbatim as the product identifier; a UUID if absent
    pub job_id: Option<String>,
    pub schema_version: SchemaVersion,
    pub checksum_algorithm: ChecksumAlgorithm,
    pub uri_template: UriTemplate,
    /// Maximum concurrent digests
    pub workers: usize,
}

impl BuildConfig {
    /// Create a configuration using the schema's defaults for digest and URI template
    pub fn new(
        input_dir: impl Into<PathBuf>,
        bucket: BucketBase,
        collection_id: impl Into<String>,
        schema_version: SchemaVersion,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            bucket,
            collection_id: collection_id.into(),
            product_name: None,
            job_id: None,
            schema_version,
            checksum_algorithm: schema_version.default_checksum_algorithm(),
            uri_template: schema_version.default_uri_template(),
            workers: default_worker_count(),
        }
    }

    pub fn with_product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    pub fn with_job_id(mut self, job_id: impl Into<String>) -> Self {
        self.job_id = Some(job_id.into());
        self
    }

    pub fn with_checksum_algorithm(mut self, algorithm: ChecksumAlgorithm) -> Self {
        self.checksum_algorithm = algorithm;
        self
    }

    pub fn with_uri_template(mut self, template: UriTemplate) -> Self {
        self.uri_template = template;
        self
    }

    pub fn with_workers(mut self, count: usize) -> Self {
        self.workers = count.clamp(workers::MIN_WORKER_COUNT, workers::MAX_WORKER_COUNT);
        self
    }
}

/// A directory entry that matched the extension table
#[derive(Debug, Clone)]
struct Candidate {
    name: String,
    path: PathBuf,
    file_type: FileType,
    suffix: &'static str,
}

/// Builds manifest documents from output directories
#[derive(Debug, Clone)]
pub struct ManifestBuilder {
    config: BuildConfig,
    classifier: FileClassifier,
}

impl ManifestBuilder {
    pub fn new(config: BuildConfig) -> Self {
        let classifier = FileClassifier::new(config.schema_version);
        Self { config, classifier }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Build the manifest for the configured directory
    ///
    /// # Errors
    ///
    /// - `ManifestError::InputNotFound` if the input is missing or not a directory
    /// - `ManifestError::Read` if any recognized file cannot be read in full
    /// - `ManifestError::ProductNameUnresolved` if no name was given and there
    ///   is no data file to derive one from
    pub async fn build(&self) -> ManifestResult<ManifestDocument> {
        let config = &self.config;
        let names = list_sorted(&config.input_dir).await?;
        let listed = names.len();
        let candidates = self.select_candidates(names).await?;

        let product_name = match &config.product_name {
            Some(name) => name.clone(),
            None => derive_product_name(&candidates).ok_or_else(|| {
                ManifestError::ProductNameUnresolved {
                    path: config.input_dir.clone(),
                }
            })?,
        };

        // `buffered` yields in input order regardless of completion order
        let files: Vec<FileRecord> = futures::stream::iter(candidates)
            .map(|candidate| self.describe(candidate))
            .buffered(config.workers.max(workers::MIN_WORKER_COUNT))
            .try_collect()
            .await?;

        let product_identifier = match &config.job_id {
            Some(job_id) => job_id.clone(),
            None => Uuid::new_v4().to_string(),
        };

        info!(
            "Described {} of {} entries in {} (schema {}, {})",
            files.len(),
            listed,
            config.input_dir.display(),
            config.schema_version,
            config.checksum_algorithm
        );

        Ok(ManifestDocument {
            collection_id: config.collection_id.clone(),
            product_identifier,
            schema_version: config.schema_version,
            product: Product {
                name: product_name,
                files,
            },
        })
    }

    /// Classify listed names, then keep the matches that are regular files
    ///
    /// Only matched entries are stat'ed, so an unrecognized name (even a
    /// dangling symlink) can never fail the build.
    async fn select_candidates(
        &self,
        names: Vec<(String, PathBuf)>,
    ) -> ManifestResult<Vec<Candidate>> {
        let mut candidates = Vec::new();

        for (name, path) in names {
            let classification = self.classifier.classify(&name);
            let (file_type, suffix) = match (classification.file_type, classification.suffix) {
                (Some(file_type), Some(suffix)) => (file_type, suffix),
                _ => {
                    debug!("Skipping unrecognized file {}", name);
                    continue;
                }
            };

            // Follows symlinks
            let meta = tokio::fs::metadata(&path)
                .await
                .map_err(|source| ManifestError::Read {
                    path: path.clone(),
                    source,
                })?;
            if !meta.is_file() {
                debug!("Skipping {} (not a regular file)", name);
                continue;
            }

            candidates.push(Candidate {
                name,
                path,
                file_type,
                suffix,
            });
        }

        Ok(candidates)
    }

    /// Digest one candidate and build its record
    async fn describe(&self, candidate: Candidate) -> ManifestResult<FileRecord> {
        let digest = digest_file(&candidate.path, self.config.checksum_algorithm).await?;
        let uri = self.config.bucket.uri_for(
            &candidate.name,
            candidate.file_type,
            self.config.uri_template,
        );

        debug!("{} -> {} ({})", candidate.name, uri, candidate.file_type);

        Ok(FileRecord {
            name: candidate.name,
            size_bytes: digest.size_bytes,
            checksum: digest.checksum.to_hex(),
            checksum_algorithm: digest.checksum.algorithm(),
            uri,
            file_type: candidate.file_type,
        })
    }
}

/// Build a manifest with the given configuration
pub async fn build_manifest(config: BuildConfig) -> ManifestResult<ManifestDocument> {
    ManifestBuilder::new(config).build().await
}

/// Entry names in `dir`, sorted
///
/// Names that are not valid UTF-8 are skipped.
async fn list_sorted(dir: &Path) -> ManifestResult<Vec<(String, PathBuf)>> {
    let not_found = || ManifestError::InputNotFound {
        path: dir.to_path_buf(),
    };

    match tokio::fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => {}
        _ => return Err(not_found()),
    }

    let read_error = |source: std::io::Error| ManifestError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(read_error)?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(read_error)? {
        let path = entry.path();
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                warn!("Skipping non UTF-8 file name {:?}", raw);
                continue;
            }
        };

        files.push((name, path));
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

/// Stem of the first data file in listing order
fn derive_product_name(candidates: &[Candidate]) -> Option<String> {
    candidates
        .iter()
        .find(|c| c.file_type == FileType::Data)
        .map(|c| stem(&c.name, c.suffix).to_string())
}
