use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use helios_heatwave::run_heatwave_analysis;
use helios_io::{GriddedTemperature, read_netcdf, write_heatwave_parquet};

use crate::cli::HeatwaveArgs;
use crate::config::{HeliosConfig, SubsetToml};
use crate::convert;

/// Run the annual heatwave-day analysis.
pub fn run(args: HeatwaveArgs) -> Result<()> {
    let config = load_config(&args.config)?;

    let input = resolve_path(args.input, config.io.input.clone(), "input")?;
    let output = resolve_path(args.output, config.io.output.clone(), "output")?;

    let region = convert::parse_region(&config.io, args.region.as_deref())?;
    let reader_cfg = convert::build_reader_config(&config.io);
    let writer_cfg = convert::build_writer_config(&config.io)?;
    let heatwave_cfg = convert::build_heatwave_config(&config.heatwave, args.min_run);

    info!(path = %input.display(), "reading temperature record");
    let record = read_netcdf(&input, &reader_cfg)
        .with_context(|| format!("failed to read NetCDF: {}", input.display()))?;
    let record = apply_subset(
        record,
        &config.subset,
        args.quick || args.quick_years.is_some() || args.quick_step.is_some(),
        args.quick_years,
        args.quick_step,
    )?;

    let masks = convert::build_masks(region, &record)?;
    let field = convert::gridded_to_field(&record)?;

    info!(region = %region, n_cells = field.n_cells(), "running heatwave analysis");
    let result = run_heatwave_analysis(&field, &masks, &heatwave_cfg)
        .context("heatwave analysis failed")?;

    write_heatwave_parquet(
        &output,
        result.years(),
        result.annual(),
        result.smoothed(),
        &writer_cfg,
    )
    .with_context(|| format!("failed to write Parquet: {}", output.display()))?;
    info!(path = %output.display(), "heatwave series written");

    Ok(())
}

/// Parse the TOML configuration file, tolerating a missing file by falling
/// back to defaults (every table has them).
pub fn load_config(path: &std::path::Path) -> Result<HeliosConfig> {
    if !path.exists() {
        info!(path = %path.display(), "no config file, using defaults");
        return Ok(HeliosConfig::default());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("failed to parse config: {}", path.display()))
}

/// Resolve a path from CLI override or config, failing with a pointer to
/// both sources when neither is set.
pub fn resolve_path(
    cli: Option<PathBuf>,
    config: Option<PathBuf>,
    what: &str,
) -> Result<PathBuf> {
    cli.or(config).ok_or_else(|| {
        anyhow::anyhow!("no {what} path: set [io].{what} in config or use --{what}")
    })
}

/// Apply the quick-subset reduction when requested.
pub fn apply_subset(
    record: GriddedTemperature,
    subset: &SubsetToml,
    quick: bool,
    quick_years: Option<(i32, i32)>,
    quick_step: Option<usize>,
) -> Result<GriddedTemperature> {
    if !quick {
        return Ok(record);
    }
    let (start, end) = match quick_years {
        Some((s, e)) => (Some(s), Some(e)),
        None => (subset.start_year, subset.end_year),
    };
    let step = quick_step.unwrap_or(subset.spatial_step);
    let reduced = record
        .subset(start, end, step)
        .context("quick subset failed")?;
    info!(
        nt = reduced.n_time(),
        ny = reduced.ny(),
        nx = reduced.nx(),
        "applied quick subset"
    );
    Ok(reduced)
}
