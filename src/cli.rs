use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Helios heatwave and temperature-exceedance analysis.
#[derive(Parser)]
#[command(
    name = "helios",
    version,
    about = "Heatwave-day detection and regional aggregation for gridded temperature data"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Compute annual regional heatwave-day series.
    Heatwave(HeatwaveArgs),
    /// Compute binned fixed-threshold exceedance-day totals.
    Exceedance(ExceedanceArgs),
}

/// Arguments for the `heatwave` subcommand.
#[derive(clap::Args)]
pub struct HeatwaveArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "helios.toml")]
    pub config: PathBuf,

    /// Override input NetCDF path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override output Parquet path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Region set to analyse (us or nh).
    #[arg(short, long)]
    pub region: Option<String>,

    /// Override minimum heatwave run length from config.
    #[arg(long = "min-run")]
    pub min_run: Option<usize>,

    /// Reduce the input per the [subset] config table before analysing.
    #[arg(long)]
    pub quick: bool,

    /// Restrict the quick subset to a year range, e.g. 1990-2020.
    /// Implies --quick.
    #[arg(long = "quick-years", value_parser = parse_year_range)]
    pub quick_years: Option<(i32, i32)>,

    /// Keep every K-th lat/lon index in the quick subset. Implies --quick.
    #[arg(long = "quick-step")]
    pub quick_step: Option<usize>,
}

/// Arguments for the `exceedance` subcommand.
#[derive(clap::Args)]
pub struct ExceedanceArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "helios.toml")]
    pub config: PathBuf,

    /// Override input NetCDF path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override output Parquet path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Region set to analyse (us or nh).
    #[arg(short, long)]
    pub region: Option<String>,

    /// Override the exceedance threshold, in degrees Fahrenheit.
    #[arg(long = "threshold-f")]
    pub threshold_f: Option<f64>,
}

/// Parses a "Y0-Y1" year range.
fn parse_year_range(s: &str) -> Result<(i32, i32), String> {
    let (start, end) = s
        .split_once('-')
        .ok_or_else(|| format!("expected Y0-Y1, got '{s}'"))?;
    let start: i32 = start
        .trim()
        .parse()
        .map_err(|_| format!("invalid start year '{start}'"))?;
    let end: i32 = end
        .trim()
        .parse()
        .map_err(|_| format!("invalid end year '{end}'"))?;
    if end < start {
        return Err(format!("year range end {end} precedes start {start}"));
    }
    Ok((start, end))
}
