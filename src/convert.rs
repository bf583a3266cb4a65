//! Pure conversion functions: TOML/CLI settings -> crate API types.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use chrono::Datelike;

use helios_calendar::Doy;
use helios_exceedance::{ExceedanceConfig, fahrenheit_to_celsius};
use helios_heatwave::{DailyField, HeatwaveConfig};
use helios_io::{Compression, GriddedTemperature, ReaderConfig, WriterConfig};
use helios_regions::{Region, build_region_masks};

use crate::config::{ExceedanceToml, HeatwaveToml, IoToml};

/// Parses a compression algorithm name string into the corresponding enum variant.
pub fn parse_compression(s: &str) -> Result<Compression> {
    match s.to_lowercase().as_str() {
        "none" => Ok(Compression::None),
        "snappy" => Ok(Compression::Snappy),
        "zstd" => Ok(Compression::Zstd),
        other => bail!("unknown compression: {other:?}"),
    }
}

/// Parses a region identifier, preferring the CLI value over the TOML one.
pub fn parse_region(io: &IoToml, cli_region: Option<&str>) -> Result<Region> {
    let name = cli_region.unwrap_or(&io.region);
    name.parse()
        .with_context(|| format!("invalid region '{name}'"))
}

/// Builds a [`ReaderConfig`] from the TOML I/O configuration.
pub fn build_reader_config(io: &IoToml) -> ReaderConfig {
    ReaderConfig::default()
        .with_temperature_var(&io.temperature_var)
        .with_land_mask_var(&io.land_mask_var)
        .with_time_var(&io.time_var)
}

/// Builds a [`WriterConfig`] from the TOML I/O configuration.
pub fn build_writer_config(io: &IoToml) -> Result<WriterConfig> {
    let compression = parse_compression(&io.compression)?;
    Ok(WriterConfig::default()
        .with_compression(compression)
        .with_row_group_size(io.row_group_size))
}

/// Builds a [`HeatwaveConfig`] from the TOML heatwave configuration and an
/// optional CLI run-length override.
pub fn build_heatwave_config(
    heatwave: &HeatwaveToml,
    min_run_override: Option<usize>,
) -> HeatwaveConfig {
    HeatwaveConfig::new()
        .with_min_run_length(min_run_override.unwrap_or(heatwave.min_run_length))
        .with_percentile(heatwave.percentile)
        .with_smoothing_window(heatwave.smoothing_window)
}

/// Builds an [`ExceedanceConfig`] from the TOML exceedance configuration
/// and an optional CLI threshold override (degrees Fahrenheit).
pub fn build_exceedance_config(
    exceedance: &ExceedanceToml,
    threshold_f_override: Option<f64>,
) -> ExceedanceConfig {
    let threshold_f = threshold_f_override.unwrap_or(exceedance.threshold_f);
    ExceedanceConfig::new()
        .with_threshold_c(fahrenheit_to_celsius(threshold_f))
        .with_bin_years(exceedance.bin_years)
        .with_anchor_end_year(exceedance.anchor_end_year)
}

/// Bridges a loaded [`GriddedTemperature`] record into the analysis
/// [`DailyField`], deriving per-timestep calendar metadata from its dates.
///
/// Feb 29 folds into the Feb 28 day-of-year bucket, so every Gregorian
/// date maps to a valid no-leap day-of-year.
pub fn gridded_to_field(record: &GriddedTemperature) -> Result<DailyField> {
    let years: Vec<i32> = record.dates().iter().map(|d| d.year()).collect();
    let months: Vec<u8> = record.dates().iter().map(|d| d.month() as u8).collect();
    let doys: Vec<u16> = record
        .dates()
        .iter()
        .map(|&d| Doy::from_date(d).get())
        .collect();

    DailyField::new(
        record.data().to_vec(),
        (record.n_time(), record.ny(), record.nx()),
        years,
        months,
        doys,
    )
    .context("assembling daily temperature field")
}

/// Builds the per-region cell masks for a loaded record.
pub fn build_masks(
    region: Region,
    record: &GriddedTemperature,
) -> Result<BTreeMap<String, Vec<bool>>> {
    build_region_masks(
        region,
        record.lons(),
        record.land(),
        record.ny(),
        record.nx(),
    )
    .context("building region masks")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn compression_names() {
        assert_eq!(parse_compression("none").unwrap(), Compression::None);
        assert_eq!(parse_compression("Snappy").unwrap(), Compression::Snappy);
        assert_eq!(parse_compression("ZSTD").unwrap(), Compression::Zstd);
        assert!(parse_compression("lz4").is_err());
    }

    #[test]
    fn cli_region_wins_over_toml() {
        let io = IoToml::default();
        assert_eq!(parse_region(&io, None).unwrap(), Region::Us);
        assert_eq!(parse_region(&io, Some("nh")).unwrap(), Region::Nh);
        assert!(parse_region(&io, Some("europe")).is_err());
    }

    #[test]
    fn heatwave_config_override() {
        let toml = HeatwaveToml::default();
        let cfg = build_heatwave_config(&toml, Some(4));
        assert_eq!(cfg.min_run_length(), 4);
        let cfg = build_heatwave_config(&toml, None);
        assert_eq!(cfg.min_run_length(), 6);
    }

    #[test]
    fn exceedance_config_converts_fahrenheit() {
        let toml = ExceedanceToml::default();
        let cfg = build_exceedance_config(&toml, None);
        assert!((cfg.threshold_c() - 35.0).abs() < 1e-12);
        let cfg = build_exceedance_config(&toml, Some(32.0));
        assert!(cfg.threshold_c().abs() < 1e-12);
    }

    #[test]
    fn gridded_bridge_derives_calendar() {
        let dates = vec![
            NaiveDate::from_ymd_opt(2020, 2, 28).unwrap(),
            NaiveDate::from_ymd_opt(2020, 2, 29).unwrap(),
            NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
        ];
        let record = GriddedTemperature::new(
            dates,
            vec![40.0],
            vec![-100.0],
            vec![true],
            vec![1.0, 2.0, 3.0],
        )
        .unwrap();

        let field = gridded_to_field(&record).unwrap();
        assert_eq!(field.years(), &[2020, 2020, 2020]);
        assert_eq!(field.months(), &[2, 2, 3]);
        assert_eq!(field.doys(), &[59, 59, 60]);
    }
}
