//! # helios-io
//!
//! Read gridded daily temperature records from NetCDF files and write
//! analysis output to Parquet. Bridges external file formats into Helios's
//! internal slice-based APIs.

mod error;
mod gridded;
mod netcdf_read;
mod parquet_write;
mod reader;
mod writer;

pub use error::IoError;
pub use gridded::GriddedTemperature;
pub use reader::{ReaderConfig, read_netcdf};
pub use writer::{Compression, WriterConfig, write_exceedance_parquet, write_heatwave_parquet};
