//! Print the zero-padded day of year for a date
//!
//! Run with: `get-doy -y 2019 -m 9 -d 10` (prints `253`)

use std::io::Write;

use anyhow::Context;
use clap::Parser;

use hls_manifest::tools::day_of_year;

#[derive(Parser, Debug)]
#[command(name = "get-doy", version, about = "Print the three-digit day of year for a date")]
struct Args {
    /// Four-digit year
    #[arg(short, long)]
    year: i32,

    /// Month (1-12)
    #[arg(short, long)]
    month: u32,

    /// Day of month
    #[arg(short, long)]
    day: u32,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let doy = day_of_year(args.year, args.month, args.day)?;

    // No trailing newline; callers capture this with $(...)
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(doy.as_bytes()).context("Failed to write day of year")?;
    stdout.flush().context("Failed to write day of year")?;
    Ok(())
}
