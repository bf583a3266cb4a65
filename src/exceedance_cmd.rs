use anyhow::{Context, Result};
use tracing::info;

use helios_exceedance::compute_binned_exceedance;
use helios_io::{read_netcdf, write_exceedance_parquet};

use crate::cli::ExceedanceArgs;
use crate::convert;
use crate::heatwave_cmd::{load_config, resolve_path};

/// Run the binned fixed-threshold exceedance analysis.
pub fn run(args: ExceedanceArgs) -> Result<()> {
    let config = load_config(&args.config)?;

    let input = resolve_path(args.input, config.io.input.clone(), "input")?;
    let output = resolve_path(args.output, config.io.output.clone(), "output")?;

    let region = convert::parse_region(&config.io, args.region.as_deref())?;
    let reader_cfg = convert::build_reader_config(&config.io);
    let writer_cfg = convert::build_writer_config(&config.io)?;
    let exceedance_cfg = convert::build_exceedance_config(&config.exceedance, args.threshold_f);

    info!(path = %input.display(), "reading temperature record");
    let record = read_netcdf(&input, &reader_cfg)
        .with_context(|| format!("failed to read NetCDF: {}", input.display()))?;

    let masks = convert::build_masks(region, &record)?;
    let field = convert::gridded_to_field(&record)?;

    info!(
        region = %region,
        threshold_c = exceedance_cfg.threshold_c(),
        "running exceedance analysis"
    );
    let result = compute_binned_exceedance(&field, &masks, &exceedance_cfg)
        .context("exceedance analysis failed")?;

    write_exceedance_parquet(&output, result.bin_starts(), result.series(), &writer_cfg)
        .with_context(|| format!("failed to write Parquet: {}", output.display()))?;
    info!(path = %output.display(), "exceedance series written");

    Ok(())
}
