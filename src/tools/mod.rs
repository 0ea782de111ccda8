//! Helper tools called by the processing scripts
//!
//! Small single-purpose utilities that share nothing with the manifest
//! pipeline beyond error types. Each has a thin binary in `src/bin/` that
//! prints its answer to stdout without a trailing newline so shell scripts
//! can capture it directly.

pub mod doy;
pub mod granule;
pub mod solar_zenith;

pub use doy::day_of_year;
pub use granule::locate_granule_dir;
pub use solar_zenith::{check_solar_zenith, ZenithValidity};
