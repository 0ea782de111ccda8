//! Application constants for the HLS manifest tool
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain.

/// File operation constants
pub mod files {
    /// Temporary file suffix for atomic writes
    pub const TEMP_FILE_SUFFIX: &str = ".tmp";

    /// Read chunk size for streaming digests (8KB)
    pub const DIGEST_CHUNK_SIZE: usize = 8 * 1024;
}

/// Worker and concurrency configuration
pub mod workers {
    /// Lower bound on concurrent digest workers
    pub const MIN_WORKER_COUNT: usize = 1;

    /// Maximum concurrent digest workers
    pub const MAX_WORKER_COUNT: usize = 16;

    /// Worker count used when available parallelism cannot be determined
    pub const FALLBACK_WORKER_COUNT: usize = 4;
}

/// Configuration file locations
pub mod config {
    /// Project-local configuration file
    pub const LOCAL_CONFIG_FILE: &str = "manifest-tool.toml";

    /// Directory under the user config dir
    pub const APP_CONFIG_DIR: &str = "hls-manifest";

    /// File name inside the user config dir
    pub const USER_CONFIG_FILE: &str = "config.toml";
}

/// Logging constants
pub mod logging {
    /// Default log level when neither flags nor config choose one
    pub const DEFAULT_LOG_LEVEL: &str = "warn";

    /// Crate target used for filter directives
    pub const LOG_TARGET: &str = "hls_manifest";
}

/// Sentinel-2 SAFE product layout
pub mod sentinel {
    /// Directory holding the granule subdirectories
    pub const GRANULE_DIR: &str = "GRANULE";

    /// Product metadata file present only in the current SAFE format
    pub const PRODUCT_METADATA_FILE: &str = "MTD_MSIL1C.xml";

    /// Granule directory marker in the old SAFE format
    pub const OLD_GRANULE_MARKER: &str = "OPER_MSI_L1C_TL";

    /// Granule directory marker in the current SAFE format
    pub const NEW_GRANULE_MARKER: &str = "L1C_";
}

/// Sentinel-2 tile metadata (MTD_TL.xml)
pub mod solar {
    /// Parent element of the scene-mean sun angles
    pub const MEAN_SUN_ANGLE_ELEMENT: &str = "Mean_Sun_Angle";

    /// Mean solar zenith angle, in degrees
    pub const ZENITH_ANGLE_ELEMENT: &str = "ZENITH_ANGLE";

    /// Scenes with a mean zenith above this many degrees are not processed
    pub const MAX_ZENITH_DEGREES: f64 = 76.0;
}

// Re-export commonly used constants for convenience
pub use files::{DIGEST_CHUNK_SIZE, TEMP_FILE_SUFFIX};
pub use workers::MAX_WORKER_COUNT;

/// Default digest concurrency: available parallelism clamped to the worker bounds
pub fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(workers::FALLBACK_WORKER_COUNT)
        .clamp(workers::MIN_WORKER_COUNT, workers::MAX_WORKER_COUNT)
}
