use std::path::PathBuf;

use serde::Deserialize;

/// Top-level Helios configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeliosConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,

    /// Heatwave analysis settings.
    #[serde(default)]
    pub heatwave: HeatwaveToml,

    /// Exceedance binning settings.
    #[serde(default)]
    pub exceedance: ExceedanceToml,

    /// Quick-subset settings, applied only with `--quick`.
    #[serde(default)]
    pub subset: SubsetToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_temperature_var")]
    pub temperature_var: String,
    #[serde(default = "default_land_mask_var")]
    pub land_mask_var: String,
    #[serde(default = "default_time_var")]
    pub time_var: String,
    #[serde(default = "default_compression")]
    pub compression: String,
    #[serde(default = "default_row_group_size")]
    pub row_group_size: usize,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            region: default_region(),
            temperature_var: default_temperature_var(),
            land_mask_var: default_land_mask_var(),
            time_var: default_time_var(),
            compression: default_compression(),
            row_group_size: default_row_group_size(),
        }
    }
}

fn default_region() -> String {
    "us".to_string()
}
fn default_temperature_var() -> String {
    "temperature".to_string()
}
fn default_land_mask_var() -> String {
    "land_mask".to_string()
}
fn default_time_var() -> String {
    "time".to_string()
}
fn default_compression() -> String {
    "snappy".to_string()
}
fn default_row_group_size() -> usize {
    1_000_000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeatwaveToml {
    #[serde(default = "default_min_run_length")]
    pub min_run_length: usize,
    #[serde(default = "default_percentile")]
    pub percentile: f64,
    #[serde(default = "default_smoothing_window")]
    pub smoothing_window: usize,
}

impl Default for HeatwaveToml {
    fn default() -> Self {
        Self {
            min_run_length: default_min_run_length(),
            percentile: default_percentile(),
            smoothing_window: default_smoothing_window(),
        }
    }
}

fn default_min_run_length() -> usize {
    6
}
fn default_percentile() -> f64 {
    0.9
}
fn default_smoothing_window() -> usize {
    15
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExceedanceToml {
    /// Threshold in degrees Fahrenheit, as quoted in assessment reports.
    #[serde(default = "default_threshold_f")]
    pub threshold_f: f64,
    #[serde(default = "default_bin_years")]
    pub bin_years: usize,
    #[serde(default = "default_anchor_end_year")]
    pub anchor_end_year: i32,
}

impl Default for ExceedanceToml {
    fn default() -> Self {
        Self {
            threshold_f: default_threshold_f(),
            bin_years: default_bin_years(),
            anchor_end_year: default_anchor_end_year(),
        }
    }
}

fn default_threshold_f() -> f64 {
    95.0
}
fn default_bin_years() -> usize {
    6
}
fn default_anchor_end_year() -> i32 {
    2024
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubsetToml {
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    #[serde(default = "default_spatial_step")]
    pub spatial_step: usize,
}

impl Default for SubsetToml {
    fn default() -> Self {
        Self {
            start_year: None,
            end_year: None,
            spatial_step: default_spatial_step(),
        }
    }
}

fn default_spatial_step() -> usize {
    1
}
