//! High-level NetCDF reader configuration and orchestration.

use std::path::Path;

use tracing::{debug, info};

use crate::error::IoError;
use crate::gridded::GriddedTemperature;
use crate::netcdf_read;

// ---------------------------------------------------------------------------
// ReaderConfig
// ---------------------------------------------------------------------------

/// Configuration for reading a gridded daily temperature record from a
/// NetCDF file.
///
/// Use the builder methods (`with_*`) to customise variable names and
/// coordinate aliases. The [`Default`] implementation matches the layout
/// of the observational datasets the pipeline was built against.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// NetCDF variable name for the daily temperature field.
    temperature_var: String,
    /// NetCDF variable name for the land mask.
    land_mask_var: String,
    /// Aliases to try when looking up longitude coordinates.
    lon_aliases: Vec<String>,
    /// Aliases to try when looking up latitude coordinates.
    lat_aliases: Vec<String>,
    /// NetCDF variable name for the time axis.
    time_var: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            temperature_var: "temperature".into(),
            land_mask_var: "land_mask".into(),
            lon_aliases: vec!["lon".into(), "longitude".into(), "x".into()],
            lat_aliases: vec!["lat".into(), "latitude".into(), "y".into()],
            time_var: "time".into(),
        }
    }
}

impl ReaderConfig {
    /// Set the temperature variable name.
    pub fn with_temperature_var(mut self, name: impl Into<String>) -> Self {
        self.temperature_var = name.into();
        self
    }

    /// Set the land mask variable name.
    pub fn with_land_mask_var(mut self, name: impl Into<String>) -> Self {
        self.land_mask_var = name.into();
        self
    }

    /// Set the time variable name.
    pub fn with_time_var(mut self, name: impl Into<String>) -> Self {
        self.time_var = name.into();
        self
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if a variable name is empty.
    pub fn validate(&self) -> Result<(), IoError> {
        for (name, value) in [
            ("temperature_var", &self.temperature_var),
            ("land_mask_var", &self.land_mask_var),
            ("time_var", &self.time_var),
        ] {
            if value.is_empty() {
                return Err(IoError::Validation {
                    count: 1,
                    details: format!("{name} must not be empty"),
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// read_netcdf
// ---------------------------------------------------------------------------

/// Read a gridded daily temperature record from a NetCDF file.
///
/// The file must contain a 3-D temperature variable (`time x lat x lon`),
/// a land mask, coordinate arrays, and a CF-convention time axis. Ocean
/// cells are set to NaN at every timestep in the returned record, so the
/// analysis only ever sees land data.
///
/// # Errors
///
/// Returns [`IoError`] on missing variables, dimension mismatches, time
/// decoding failures, or an all-ocean mask.
pub fn read_netcdf(path: &Path, config: &ReaderConfig) -> Result<GriddedTemperature, IoError> {
    config.validate()?;

    let file = netcdf_read::open_file(path)?;

    // -- Coordinates --------------------------------------------------------

    let lon_alias_refs: Vec<&str> = config.lon_aliases.iter().map(String::as_str).collect();
    let lat_alias_refs: Vec<&str> = config.lat_aliases.iter().map(String::as_str).collect();

    let lons = netcdf_read::read_1d_f64(&file, &lon_alias_refs, path)?;
    let lats = netcdf_read::read_1d_f64(&file, &lat_alias_refs, path)?;

    // -- Time ---------------------------------------------------------------

    let time_offsets = netcdf_read::read_1d_f64(&file, &[&config.time_var], path)?;
    let (calendar, base_date) = netcdf_read::read_time_units(&file, &config.time_var, path)?;
    let dates = netcdf_read::time_offsets_to_dates(base_date, &time_offsets, &calendar)?;
    debug!(calendar, %base_date, nt = dates.len(), "decoded time axis");

    // -- Temperature and land mask ------------------------------------------

    let (mut data, [nt, ny, nx]) =
        netcdf_read::read_3d_f64(&file, &config.temperature_var, path)?;
    if nt != dates.len() || ny != lats.len() || nx != lons.len() {
        return Err(IoError::DimensionMismatch {
            name: config.temperature_var.clone(),
            expected: dates.len() * lats.len() * lons.len(),
            got: nt * ny * nx,
        });
    }

    let (land, [mask_ny, mask_nx]) =
        netcdf_read::read_land_mask(&file, &config.land_mask_var, path)?;
    if mask_ny != ny || mask_nx != nx {
        return Err(IoError::DimensionMismatch {
            name: config.land_mask_var.clone(),
            expected: ny * nx,
            got: mask_ny * mask_nx,
        });
    }

    let n_land = land.iter().filter(|&&l| l).count();
    if n_land == 0 {
        return Err(IoError::Validation {
            count: 1,
            details: "land mask selects no cells".to_string(),
        });
    }

    // -- Land restriction ----------------------------------------------------

    let n_cells = ny * nx;
    for t in 0..nt {
        let base = t * n_cells;
        for (cell, &is_land) in land.iter().enumerate() {
            if !is_land {
                data[base + cell] = f64::NAN;
            }
        }
    }

    info!(
        nt,
        ny,
        nx,
        n_land,
        n_ocean = n_cells - n_land,
        "loaded gridded temperature record"
    );

    GriddedTemperature::new(dates, lats, lons, land, data)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
