//! Command-line argument parsing for the HLS manifest tool
//!
//! This module defines the CLI structure using clap derive macros. Parsing
//! failures (missing required flags, malformed bucket addresses, unknown
//! schema versions) are reported by clap with usage text and exit code 2
//! before any file is touched.

use std::path::PathBuf;

use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Parser};

use crate::app::{BucketBase, ChecksumAlgorithm, SchemaVersion, UriTemplate};

/// HLS manifest tool - describe a processing job's output files
#[derive(Parser, Debug)]
#[command(
    name = "manifest-tool",
    version,
    about = "Generate an archival manifest for a directory of HLS output files",
    long_about = "Classifies each output file by extension, computes its checksum, derives its URI
under the bucket address, and writes a versioned JSON manifest atomically."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Manifest options
    #[command(flatten)]
    pub manifest: ManifestArgs,
}

/// Logging and configuration options
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long)]
    pub very_verbose: bool,

    /// Quiet mode - errors only
    #[arg(short, long)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments describing one manifest run
#[derive(Args, Debug, Clone)]
pub struct ManifestArgs {
    /// Directory containing the job's output files
    #[arg(short = 'i', long = "inputdir", value_name = "DIR")]
    pub input_dir: PathBuf,

    /// Manifest file to write
    #[arg(short = 'o', long = "outputfile", value_name = "FILE")]
    pub output_file: PathBuf,

    /// Bucket base address (e.g., s3://hls-output/HLSS30)
    #[arg(short = 'b', long, value_name = "URL", value_parser = parse_bucket)]
    pub bucket: BucketBase,

    /// Collection name (e.g., HLSS30)
    #[arg(short = 'c', long, value_parser = NonEmptyStringValueParser::new())]
    pub collection: String,

    /// Product name; derived from the first data file when omitted
    #[arg(short = 'p', long, value_parser = NonEmptyStringValueParser::new())]
    pub product: Option<String>,

    /// Job id used as the product identifier; a UUID is generated when omitted
    #[arg(short = 'j', long = "jobid", value_parser = NonEmptyStringValueParser::new())]
    pub job_id: Option<String>,

    /// Manifest schema version (1.3, 1.4, 1.5)
    #[arg(long, value_name = "VERSION", value_parser = parse_schema_version)]
    pub schema_version: Option<SchemaVersion>,

    /// URI template: flat or data-prefixed-metadata (defaults per schema)
    #[arg(long, value_name = "TEMPLATE", value_parser = parse_uri_template)]
    pub uri_template: Option<UriTemplate>,

    /// Checksum algorithm: md5 or sha512 (defaults per schema)
    #[arg(long, value_name = "ALGORITHM", value_parser = parse_checksum)]
    pub checksum: Option<ChecksumAlgorithm>,

    /// Number of files digested concurrently
    #[arg(short = 'w', long, value_parser = clap::value_parser!(u16).range(1..=16))]
    pub workers: Option<u16>,
}

fn parse_bucket(s: &str) -> Result<BucketBase, String> {
    BucketBase::parse(s).map_err(|e| e.to_string())
}

fn parse_schema_version(s: &str) -> Result<SchemaVersion, String> {
    SchemaVersion::parse(s).map_err(|e| e.to_string())
}

fn parse_uri_template(s: &str) -> Result<UriTemplate, String> {
    s.parse()
}

fn parse_checksum(s: &str) -> Result<ChecksumAlgorithm, String> {
    s.parse()
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl GlobalArgs {
    /// Log level from the verbosity flags, falling back to the configured level
    pub fn log_level(&self, configured: &str) -> String {
        if self.quiet {
            "error".to_string()
        } else if self.very_verbose {
            "debug".to_string()
        } else if self.verbose {
            "info".to_string()
        } else {
            configured.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    const REQUIRED: [&str; 9] = [
        "manifest-tool",
        "-i",
        "/data/out",
        "-o",
        "/data/manifest.json",
        "-b",
        "s3://hls-output/HLSS30/",
        "-c",
        "HLSS30",
    ];

    fn parse(extra: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(REQUIRED.iter().chain(extra.iter()))
    }

    #[test]
    fn test_required_only() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.manifest.input_dir, PathBuf::from("/data/out"));
        assert_eq!(cli.manifest.bucket.as_str(), "s3://hls-output/HLSS30");
        assert_eq!(cli.manifest.collection, "HLSS30");
        assert!(cli.manifest.product.is_none());
        assert!(cli.manifest.job_id.is_none());
        assert!(cli.manifest.schema_version.is_none());
    }

    #[test]
    fn test_all_options() {
        let cli = parse(&[
            "-p",
            "T52SCG",
            "-j",
            "job-42",
            "--schema-version",
            "1.3",
            "--uri-template",
            "flat",
            "--checksum",
            "sha512",
            "-w",
            "2",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.manifest.product.as_deref(), Some("T52SCG"));
        assert_eq!(cli.manifest.job_id.as_deref(), Some("job-42"));
        assert_eq!(cli.manifest.schema_version, Some(SchemaVersion::V1_3));
        assert_eq!(cli.manifest.uri_template, Some(UriTemplate::Flat));
        assert_eq!(cli.manifest.checksum, Some(ChecksumAlgorithm::Sha512));
        assert_eq!(cli.manifest.workers, Some(2));
        assert!(cli.global.verbose);
    }

    #[test]
    fn test_long_flag_names() {
        let cli = Cli::try_parse_from([
            "manifest-tool",
            "--inputdir",
            "in",
            "--outputfile",
            "out.json",
            "--bucket",
            "http://store/col",
            "--collection",
            "HLSL30",
            "--jobid",
            "j",
        ])
        .unwrap();
        assert_eq!(cli.manifest.job_id.as_deref(), Some("j"));
    }

    #[test]
    fn test_missing_required_argument() {
        let err = Cli::try_parse_from(["manifest-tool", "-i", "in", "-o", "out.json"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_invalid_values_rejected() {
        for extra in [
            &["--schema-version", "2.0"][..],
            &["--uri-template", "nested"][..],
            &["--checksum", "crc32"][..],
            &["-w", "0"][..],
            &["-p", ""][..],
        ] {
            let err = parse(extra).unwrap_err();
            assert_eq!(err.exit_code(), 2, "should reject {:?}", extra);
        }

        let mut bad_bucket = REQUIRED;
        bad_bucket[6] = "not a url";
        let err = Cli::try_parse_from(bad_bucket).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_log_level() {
        let quiet = GlobalArgs {
            quiet: true,
            ..Default::default()
        };
        let verbose = GlobalArgs {
            verbose: true,
            ..Default::default()
        };

        assert_eq!(quiet.log_level("warn"), "error");
        assert_eq!(verbose.log_level("warn"), "info");
        assert_eq!(GlobalArgs::default().log_level("trace"), "trace");
    }
}
