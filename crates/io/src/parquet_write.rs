//! Low-level Parquet column building.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int32Array, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::error::IoError;

/// Builds the Arrow schema for annual heatwave-day series output.
///
/// One row per `(region, year)` pair, carrying both the raw annual count
/// and its trailing-mean smoothed value.
pub(crate) fn heatwave_schema() -> Schema {
    Schema::new(vec![
        Field::new("region", DataType::Utf8, false),
        Field::new("year", DataType::Int32, false),
        Field::new("heatwave_days", DataType::Float64, false),
        Field::new("smoothed", DataType::Float64, false),
    ])
}

/// Builds the Arrow schema for binned exceedance-day output.
///
/// One row per `(region, bin_start)` pair.
pub(crate) fn exceedance_schema() -> Schema {
    Schema::new(vec![
        Field::new("region", DataType::Utf8, false),
        Field::new("bin_start", DataType::Int32, false),
        Field::new("days", DataType::Float64, false),
    ])
}

/// Converts one region's annual and smoothed series into a [`RecordBatch`]
/// matching [`heatwave_schema`].
pub(crate) fn heatwave_record_batch(
    region: &str,
    years: &[i32],
    annual: &[f64],
    smoothed: &[f64],
    schema: &Schema,
) -> Result<RecordBatch, IoError> {
    let n = years.len();
    let region_col: ArrayRef = Arc::new(StringArray::from(vec![region; n]));
    let year_col: ArrayRef = Arc::new(Int32Array::from(years.to_vec()));
    let annual_col: ArrayRef = Arc::new(Float64Array::from(annual.to_vec()));
    let smoothed_col: ArrayRef = Arc::new(Float64Array::from(smoothed.to_vec()));

    RecordBatch::try_new(
        Arc::new(schema.clone()),
        vec![region_col, year_col, annual_col, smoothed_col],
    )
    .map_err(|e| IoError::Parquet {
        reason: e.to_string(),
    })
}

/// Converts one region's binned series into a [`RecordBatch`] matching
/// [`exceedance_schema`].
pub(crate) fn exceedance_record_batch(
    region: &str,
    bin_starts: &[i32],
    days: &[f64],
    schema: &Schema,
) -> Result<RecordBatch, IoError> {
    let n = bin_starts.len();
    let region_col: ArrayRef = Arc::new(StringArray::from(vec![region; n]));
    let bin_col: ArrayRef = Arc::new(Int32Array::from(bin_starts.to_vec()));
    let days_col: ArrayRef = Arc::new(Float64Array::from(days.to_vec()));

    RecordBatch::try_new(
        Arc::new(schema.clone()),
        vec![region_col, bin_col, days_col],
    )
    .map_err(|e| IoError::Parquet {
        reason: e.to_string(),
    })
}

/// Writes a sequence of [`RecordBatch`]es to a Parquet file at `path`.
///
/// # Errors
///
/// Returns [`IoError::Parquet`] if file creation, batch writing, or file
/// finalisation fails.
pub(crate) fn write_batches(
    path: &Path,
    batches: &[RecordBatch],
    schema: &Schema,
    props: WriterProperties,
) -> Result<(), IoError> {
    let file = std::fs::File::create(path).map_err(|e| IoError::Parquet {
        reason: e.to_string(),
    })?;
    let mut writer = ArrowWriter::try_new(file, Arc::new(schema.clone()), Some(props))?;

    for batch in batches {
        writer.write(batch)?;
    }

    writer.close()?;
    Ok(())
}
