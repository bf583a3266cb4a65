//! High-level Parquet writer configuration and orchestration.

use std::collections::BTreeMap;
use std::path::Path;

use parquet::file::properties::WriterProperties;
use tracing::info;

use crate::error::IoError;
use crate::parquet_write;

/// Compression algorithm for Parquet output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// No compression.
    None,
    /// Snappy compression (fast, moderate ratio).
    #[default]
    Snappy,
    /// Zstd compression (slower, better ratio).
    Zstd,
}

impl Compression {
    /// Converts to the corresponding `parquet::basic::Compression` variant.
    fn to_parquet(self) -> Result<parquet::basic::Compression, IoError> {
        Ok(match self {
            Self::None => parquet::basic::Compression::UNCOMPRESSED,
            Self::Snappy => parquet::basic::Compression::SNAPPY,
            Self::Zstd => {
                let level =
                    parquet::basic::ZstdLevel::try_new(3).map_err(|e| IoError::Parquet {
                        reason: e.to_string(),
                    })?;
                parquet::basic::Compression::ZSTD(level)
            }
        })
    }
}

/// Configuration for writing analysis output to Parquet.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Compression algorithm to use.
    compression: Compression,
    /// Maximum number of rows per row group.
    row_group_size: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression: Compression::default(),
            row_group_size: 1_000_000,
        }
    }
}

impl WriterConfig {
    /// Sets the compression algorithm.
    pub fn with_compression(mut self, comp: Compression) -> Self {
        self.compression = comp;
        self
    }

    /// Sets the maximum number of rows per row group.
    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if `row_group_size` is zero.
    fn validate(&self) -> Result<(), IoError> {
        if self.row_group_size == 0 {
            return Err(IoError::Validation {
                count: 1,
                details: "row_group_size must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    fn properties(&self) -> Result<WriterProperties, IoError> {
        Ok(WriterProperties::builder()
            .set_compression(self.compression.to_parquet()?)
            .set_max_row_group_size(self.row_group_size)
            .build())
    }
}

/// Write annual heatwave-day series to a Parquet file.
///
/// Emits one row per `(region, year)` pair with the raw annual count and
/// its smoothed value. Regions appear in sorted order, one record batch
/// per region.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if the configuration is invalid or a
/// series length disagrees with `years`, and [`IoError::Parquet`] on
/// conversion or file I/O failures.
pub fn write_heatwave_parquet(
    path: &Path,
    years: &[i32],
    annual: &BTreeMap<String, Vec<f64>>,
    smoothed: &BTreeMap<String, Vec<f64>>,
    config: &WriterConfig,
) -> Result<(), IoError> {
    config.validate()?;

    let schema = parquet_write::heatwave_schema();
    let mut batches = Vec::with_capacity(annual.len());
    for (region, series) in annual {
        let smooth = smoothed
            .get(region)
            .ok_or_else(|| IoError::Validation {
                count: 1,
                details: format!("region '{region}' has no smoothed series"),
            })?;
        if series.len() != years.len() || smooth.len() != years.len() {
            return Err(IoError::Validation {
                count: 1,
                details: format!(
                    "region '{region}' series length {} does not match {} years",
                    series.len(),
                    years.len()
                ),
            });
        }
        batches.push(parquet_write::heatwave_record_batch(
            region, years, series, smooth, &schema,
        )?);
    }

    parquet_write::write_batches(path, &batches, &schema, config.properties()?)?;
    info!(path = %path.display(), n_regions = annual.len(), "wrote heatwave series");
    Ok(())
}

/// Write binned exceedance-day series to a Parquet file.
///
/// Emits one row per `(region, bin_start)` pair, one record batch per
/// region in sorted order.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if the configuration is invalid or a
/// series length disagrees with `bin_starts`, and [`IoError::Parquet`] on
/// conversion or file I/O failures.
pub fn write_exceedance_parquet(
    path: &Path,
    bin_starts: &[i32],
    series: &BTreeMap<String, Vec<f64>>,
    config: &WriterConfig,
) -> Result<(), IoError> {
    config.validate()?;

    let schema = parquet_write::exceedance_schema();
    let mut batches = Vec::with_capacity(series.len());
    for (region, days) in series {
        if days.len() != bin_starts.len() {
            return Err(IoError::Validation {
                count: 1,
                details: format!(
                    "region '{region}' series length {} does not match {} bins",
                    days.len(),
                    bin_starts.len()
                ),
            });
        }
        batches.push(parquet_write::exceedance_record_batch(
            region, bin_starts, days, &schema,
        )?);
    }

    parquet_write::write_batches(path, &batches, &schema, config.properties()?)?;
    info!(path = %path.display(), n_regions = series.len(), "wrote exceedance series");
    Ok(())
}
