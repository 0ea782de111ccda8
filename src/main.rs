//! HLS manifest tool CLI application
//!
//! Describes the output files of an HLS processing job in a versioned
//! manifest for archival and cataloging.

use std::process;

use tracing::{debug, info};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::{fmt, EnvFilter};

use hls_manifest::cli::{handle_generate, Cli, GlobalArgs};
use hls_manifest::config::AppConfig;
use hls_manifest::constants::logging::LOG_TARGET;
use hls_manifest::errors::{AppError, Result};

#[tokio::main]
async fn main() {
    // Usage errors exit here with code 2
    let cli = Cli::parse_args();

    if let Err(e) = run(cli).await {
        debug!("Run failed ({} error)", e.category());
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<()> {
    let config = match AppConfig::load(cli.global.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            init_logging(&cli.global, &AppConfig::default().logging.level);
            return Err(AppError::Config(e));
        }
    };
    init_logging(&cli.global, &config.logging.level);

    info!("HLS manifest tool v{} starting", env!("CARGO_PKG_VERSION"));

    let defaults = config.manifest.to_defaults()?;
    let manifest = handle_generate(cli.manifest, &defaults).await?;
    debug!("Generated manifest {}", manifest.product_identifier);

    Ok(())
}

/// Initialize logging based on CLI verbosity settings and the configured level
fn init_logging(global: &GlobalArgs, configured_level: &str) {
    let level = global.log_level(configured_level);

    // Create environment filter; fall back to the default level on a bad value
    let directive = format!("{}={}", LOG_TARGET, level)
        .parse()
        .unwrap_or_else(|_| Directive::from(LevelFilter::WARN));
    let filter = EnvFilter::from_default_env().add_directive(directive);

    // Logs go to stderr; stdout stays clean for callers
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_level(global.very_verbose)
        .init();

    if global.very_verbose {
        info!("Very verbose logging enabled");
    } else if global.verbose {
        info!("Verbose logging enabled");
    }
}
