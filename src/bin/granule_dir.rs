//! Print the granule directory name of a Sentinel-2 L1C SAFE product
//!
//! Prints nothing when the product has no recognisable granule.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use hls_manifest::tools::locate_granule_dir;

#[derive(Parser, Debug)]
#[command(
    name = "granule-dir",
    version,
    about = "Print the granule directory name of a Sentinel-2 L1C product"
)]
struct Args {
    /// Root directory of the unpacked SAFE product
    #[arg(short = 'i', long = "inputdir", value_name = "DIR")]
    input_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let name = locate_granule_dir(&args.input_dir)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(name.as_bytes()).context("Failed to write granule name")?;
    stdout.flush().context("Failed to write granule name")?;
    Ok(())
}
