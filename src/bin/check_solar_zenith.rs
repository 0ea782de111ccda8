//! Print `valid` or `invalid` for a Sentinel-2 tile's mean solar zenith
//!
//! Run with: `check-solar-zenith -i GRANULE/<id>/MTD_TL.xml`

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use hls_manifest::tools::check_solar_zenith;

#[derive(Parser, Debug)]
#[command(
    name = "check-solar-zenith",
    version,
    about = "Check a Sentinel-2 tile's mean solar zenith angle against the processing limit"
)]
struct Args {
    /// Tile metadata document (MTD_TL.xml)
    #[arg(short = 'i', long = "input_file", value_name = "FILE")]
    input_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let validity = check_solar_zenith(&args.input_file)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(validity.as_str().as_bytes())
        .context("Failed to write zenith validity")?;
    stdout.flush().context("Failed to write zenith validity")?;
    Ok(())
}
