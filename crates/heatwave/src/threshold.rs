//! Day-of-year percentile thresholds from the full seasonal record.

use tracing::debug;

use helios_stats::{quantile_type7, sorted_finite};

use crate::field::DailyField;

/// Per (day-of-year, cell) climatological threshold field.
///
/// Holds one value per cell for exactly the day-of-year keys present in
/// the seasonal record it was computed from. Buckets with no valid
/// observation carry NaN. Computed once, never mutated.
#[derive(Debug, Clone)]
pub struct ThresholdField {
    /// Flat values, length `doys.len() * n_cells`, `[doy, cell]` order.
    values: Vec<f64>,
    /// Sorted day-of-year keys with a threshold row.
    doys: Vec<u16>,
    /// Row index per day-of-year value (1..=365), `None` when absent.
    rows: Vec<Option<usize>>,
    n_cells: usize,
}

impl ThresholdField {
    /// Sorted day-of-year keys covered by this field.
    pub fn doys(&self) -> &[u16] {
        &self.doys
    }

    /// Number of grid cells per row.
    pub fn n_cells(&self) -> usize {
        self.n_cells
    }

    /// Threshold for `doy` at `cell`, or `None` when `doy` has no row.
    ///
    /// The value itself may be NaN when the (doy, cell) bucket had no
    /// valid observation.
    pub fn value(&self, doy: u16, cell: usize) -> Option<f64> {
        if !(1..=365).contains(&doy) {
            return None;
        }
        self.rows[doy as usize - 1].map(|row| self.values[row * self.n_cells + cell])
    }

    /// All-cell threshold row for `doy`, or `None` when `doy` has no row.
    pub fn row(&self, doy: u16) -> Option<&[f64]> {
        if !(1..=365).contains(&doy) {
            return None;
        }
        self.rows[doy as usize - 1]
            .map(|row| &self.values[row * self.n_cells..(row + 1) * self.n_cells])
    }
}

/// Computes the per (day-of-year, cell) quantile threshold from `field`.
///
/// Observations are grouped by day-of-year across all years of the
/// record; per cell, non-finite values are excluded from the rank
/// computation and the type-7 linear-interpolation quantile at
/// probability `percentile` is taken. Day-of-year keys absent from the
/// record get no row at all.
pub fn compute_thresholds(field: &DailyField, percentile: f64) -> ThresholdField {
    let n_cells = field.n_cells();

    // Bucket timestep indices by day-of-year.
    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); 365];
    for (t, &doy) in field.doys().iter().enumerate() {
        buckets[doy as usize - 1].push(t);
    }

    let doys: Vec<u16> = (1..=365u16)
        .filter(|&d| !buckets[d as usize - 1].is_empty())
        .collect();
    let mut rows = vec![None; 365];
    for (row, &d) in doys.iter().enumerate() {
        rows[d as usize - 1] = Some(row);
    }

    let mut values = vec![f64::NAN; doys.len() * n_cells];
    let mut samples = Vec::new();
    for (row, &d) in doys.iter().enumerate() {
        let times = &buckets[d as usize - 1];
        for cell in 0..n_cells {
            samples.clear();
            samples.extend(times.iter().map(|&t| field.value(t, cell)));
            let sorted = sorted_finite(&samples);
            if !sorted.is_empty() {
                values[row * n_cells + cell] = quantile_type7(&sorted, percentile);
            }
        }
    }

    debug!(
        n_doys = doys.len(),
        n_cells, percentile, "computed day-of-year thresholds"
    );

    ThresholdField {
        values,
        doys,
        rows,
        n_cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One cell, a single day-of-year repeated over `values.len()` years.
    fn field_one_doy(values: &[f64]) -> DailyField {
        let nt = values.len();
        DailyField::new(
            values.to_vec(),
            (nt, 1, 1),
            (0..nt).map(|y| 2000 + y as i32).collect(),
            vec![6; nt],
            vec![160; nt],
        )
        .unwrap()
    }

    #[test]
    fn groups_across_years() {
        // 10 years of doy 160: 90th percentile of 1..=10 is 9.1.
        let field = field_one_doy(&(1..=10).map(|x| x as f64).collect::<Vec<_>>());
        let thr = compute_thresholds(&field, 0.9);
        assert_eq!(thr.doys(), &[160]);
        assert!((thr.value(160, 0).unwrap() - 9.1).abs() < 1e-12);
    }

    #[test]
    fn missing_values_excluded_from_rank() {
        // NaN must not count as zero: quantile over {1, 2, 3} only.
        let field = field_one_doy(&[1.0, f64::NAN, 2.0, 3.0]);
        let thr = compute_thresholds(&field, 0.5);
        assert_eq!(thr.value(160, 0).unwrap(), 2.0);
    }

    #[test]
    fn all_missing_bucket_is_nan() {
        let field = field_one_doy(&[f64::NAN, f64::NAN]);
        let thr = compute_thresholds(&field, 0.9);
        assert!(thr.value(160, 0).unwrap().is_nan());
    }

    #[test]
    fn absent_doy_has_no_row() {
        let field = field_one_doy(&[1.0, 2.0]);
        let thr = compute_thresholds(&field, 0.9);
        assert_eq!(thr.value(121, 0), None);
        assert_eq!(thr.value(0, 0), None);
        assert_eq!(thr.value(366, 0), None);
    }

    #[test]
    fn per_cell_independence() {
        // Two cells with different records on the same doy.
        let field = DailyField::new(
            vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0],
            (3, 1, 2),
            vec![2000, 2001, 2002],
            vec![7; 3],
            vec![200; 3],
        )
        .unwrap();
        let thr = compute_thresholds(&field, 0.5);
        assert_eq!(thr.value(200, 0).unwrap(), 2.0);
        assert_eq!(thr.value(200, 1).unwrap(), 20.0);
    }
}
