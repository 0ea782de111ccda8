//! Command handler for the manifest tool
//!
//! Resolves the effective run settings from flags and configuration, then
//! builds and writes the manifest.

use std::time::Instant;

use tracing::info;

use crate::app::{build_manifest, write_manifest, BuildConfig, ManifestDocument};
use crate::cli::ManifestArgs;
use crate::config::ManifestDefaults;
use crate::errors::Result;

/// Merge flags over configuration defaults
///
/// Flag > config file > schema default > built-in default.
pub fn resolve_build_config(args: &ManifestArgs, defaults: &ManifestDefaults) -> BuildConfig {
    let schema_version = args
        .schema_version
        .or(defaults.schema_version)
        .unwrap_or_default();

    let mut config = BuildConfig::new(
        &args.input_dir,
        args.bucket.clone(),
        &args.collection,
        schema_version,
    );

    if let Some(algorithm) = args.checksum.or(defaults.checksum) {
        config = config.with_checksum_algorithm(algorithm);
    }
    if let Some(template) = args.uri_template.or(defaults.uri_template) {
        config = config.with_uri_template(template);
    }
    if let Some(workers) = args.workers.map(usize::from).or(defaults.workers) {
        config = config.with_workers(workers);
    }
    if let Some(product) = &args.product {
        config = config.with_product_name(product);
    }
    if let Some(job_id) = &args.job_id {
        config = config.with_job_id(job_id);
    }

    config
}

/// Handle a manifest run
///
/// Nothing is written unless the whole build succeeds.
pub async fn handle_generate(
    args: ManifestArgs,
    defaults: &ManifestDefaults,
) -> Result<ManifestDocument> {
    let start_time = Instant::now();
    let config = resolve_build_config(&args, defaults);

    info!(
        "Building schema {} manifest for {} (bucket {}, {}, {} URIs, {} workers)",
        config.schema_version,
        config.input_dir.display(),
        config.bucket,
        config.checksum_algorithm,
        config.uri_template,
        config.workers
    );

    let manifest = build_manifest(config).await?;
    write_manifest(&manifest, &args.output_file).await?;

    info!(
        "Manifest {} for product {} ({} files, {} bytes) written in {:?}",
        manifest.product_identifier,
        manifest.product.name,
        manifest.product.files.len(),
        manifest.total_size(),
        start_time.elapsed()
    );

    Ok(manifest)
}
