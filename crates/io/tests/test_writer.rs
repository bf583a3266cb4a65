//! Integration tests: write analysis output to Parquet and read it back.

use std::collections::BTreeMap;
use std::fs::File;

use arrow::array::{Float64Array, Int32Array, RecordBatch, StringArray};
use helios_io::{
    Compression, WriterConfig, write_exceedance_parquet, write_heatwave_parquet,
};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

fn read_all_batches(path: &std::path::Path) -> Vec<RecordBatch> {
    let file = File::open(path).expect("open parquet file");
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .expect("parquet reader")
        .build()
        .expect("build reader");
    reader.map(|b| b.expect("read batch")).collect()
}

fn column_str(batch: &RecordBatch, idx: usize) -> &StringArray {
    batch
        .column(idx)
        .as_any()
        .downcast_ref::<StringArray>()
        .expect("string column")
}

fn column_i32(batch: &RecordBatch, idx: usize) -> &Int32Array {
    batch
        .column(idx)
        .as_any()
        .downcast_ref::<Int32Array>()
        .expect("int32 column")
}

fn column_f64(batch: &RecordBatch, idx: usize) -> &Float64Array {
    batch
        .column(idx)
        .as_any()
        .downcast_ref::<Float64Array>()
        .expect("float64 column")
}

#[test]
fn heatwave_round_trip() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("heatwave.parquet");

    let years = vec![2000, 2001, 2002];
    let annual = BTreeMap::from([
        ("US48".to_string(), vec![3.0, 0.0, 12.0]),
        ("West".to_string(), vec![1.0, 2.0, 4.0]),
    ]);
    let smoothed = BTreeMap::from([
        ("US48".to_string(), vec![3.0, 1.5, 5.0]),
        ("West".to_string(), vec![1.0, 1.5, 7.0 / 3.0]),
    ]);

    write_heatwave_parquet(&path, &years, &annual, &smoothed, &WriterConfig::default())
        .expect("write succeeds");

    let batches = read_all_batches(&path);
    let total_rows: usize = batches.iter().map(|b| b.num_rows()).sum();
    assert_eq!(total_rows, 6);

    // Regions are written in sorted order, so US48 rows come first.
    let first = &batches[0];
    assert_eq!(column_str(first, 0).value(0), "US48");
    assert_eq!(column_i32(first, 1).value(0), 2000);
    assert_eq!(column_f64(first, 2).value(2), 12.0);
    assert_eq!(column_f64(first, 3).value(1), 1.5);
}

#[test]
fn heatwave_nan_survives_round_trip() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("heatwave_nan.parquet");

    let years = vec![2000];
    let annual = BTreeMap::from([("NH".to_string(), vec![f64::NAN])]);
    let smoothed = BTreeMap::from([("NH".to_string(), vec![f64::NAN])]);

    write_heatwave_parquet(&path, &years, &annual, &smoothed, &WriterConfig::default())
        .expect("write succeeds");

    let batches = read_all_batches(&path);
    assert!(column_f64(&batches[0], 2).value(0).is_nan());
}

#[test]
fn exceedance_round_trip() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("exceedance.parquet");

    let bin_starts = vec![2013, 2019];
    let series = BTreeMap::from([("Central-East".to_string(), vec![24.0, 30.0])]);

    write_exceedance_parquet(&path, &bin_starts, &series, &WriterConfig::default())
        .expect("write succeeds");

    let batches = read_all_batches(&path);
    let batch = &batches[0];
    assert_eq!(batch.num_rows(), 2);
    assert_eq!(column_str(batch, 0).value(0), "Central-East");
    assert_eq!(column_i32(batch, 1).value(1), 2019);
    assert_eq!(column_f64(batch, 2).value(1), 30.0);
}

#[test]
fn compression_variants_write_readable_files() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let years = vec![2000, 2001];
    let annual = BTreeMap::from([("US48".to_string(), vec![1.0, 2.0])]);
    let smoothed = annual.clone();

    for (name, compression) in [
        ("none.parquet", Compression::None),
        ("snappy.parquet", Compression::Snappy),
        ("zstd.parquet", Compression::Zstd),
    ] {
        let path = dir.path().join(name);
        let config = WriterConfig::default().with_compression(compression);
        write_heatwave_parquet(&path, &years, &annual, &smoothed, &config)
            .expect("write succeeds");

        let batches = read_all_batches(&path);
        let total_rows: usize = batches.iter().map(|b| b.num_rows()).sum();
        assert_eq!(total_rows, 2, "{name}");
    }
}
