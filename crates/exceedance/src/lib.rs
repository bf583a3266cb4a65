//! Fixed-threshold exceedance-day totals over multi-year bins.
//!
//! Where the heatwave pipeline asks "how unusual was this day for this
//! place and date", this crate asks the simpler absolute question: on how
//! many days did the temperature reach a fixed level (95 °F by default)?
//! Counts are totalled per grid cell over non-overlapping multi-year bins
//! anchored so the final bin ends at a chosen year, then averaged over
//! region masks with NaN-skipping semantics.
//!
//! The full record is used, not just the warm season; a 95 °F day in April
//! counts the same as one in July.

mod config;
mod error;

pub use config::{ExceedanceConfig, fahrenheit_to_celsius};
pub use error::ExceedanceError;

use std::collections::BTreeMap;

use helios_heatwave::DailyField;
use helios_stats::nan_mean;
use tracing::{debug, info};

/// Per-region exceedance-day totals over multi-year bins.
#[derive(Debug, Clone)]
pub struct BinnedExceedance {
    bin_starts: Vec<i32>,
    bin_years: usize,
    series: BTreeMap<String, Vec<f64>>,
}

impl BinnedExceedance {
    /// First year of each bin, ascending.
    pub fn bin_starts(&self) -> &[i32] {
        &self.bin_starts
    }

    /// Number of years per bin.
    pub fn bin_years(&self) -> usize {
        self.bin_years
    }

    /// Regional series, one value per bin, aligned with
    /// [`bin_starts`](Self::bin_starts).
    pub fn series(&self) -> &BTreeMap<String, Vec<f64>> {
        &self.series
    }

    /// Iterator over region names in sorted order.
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }
}

/// Counts days at or above a fixed temperature per cell and bin, then
/// averages over each region mask.
///
/// A cell-bin with no finite observation contributes NaN and is skipped by
/// the regional mean; a region whose every cell is missing in a bin yields
/// NaN for that bin.
///
/// # Errors
///
/// Returns [`ExceedanceError::InvalidConfig`] for an invalid configuration
/// and [`ExceedanceError::MaskMismatch`] when a mask length disagrees with
/// the grid.
pub fn compute_binned_exceedance(
    field: &DailyField,
    masks: &BTreeMap<String, Vec<bool>>,
    config: &ExceedanceConfig,
) -> Result<BinnedExceedance, ExceedanceError> {
    config.validate()?;
    let n_cells = field.n_cells();
    for (name, mask) in masks {
        if mask.len() != n_cells {
            return Err(ExceedanceError::MaskMismatch {
                name: name.clone(),
                expected: n_cells,
                got: mask.len(),
            });
        }
    }

    let mut bin_starts: Vec<i32> = field
        .distinct_years()
        .iter()
        .map(|&y| config.bin_start(y))
        .collect();
    bin_starts.dedup();
    let bin_index: BTreeMap<i32, usize> = bin_starts
        .iter()
        .enumerate()
        .map(|(i, &b)| (b, i))
        .collect();
    let n_bins = bin_starts.len();
    info!(
        bins = n_bins,
        bin_years = config.bin_years(),
        threshold_c = config.threshold_c(),
        "counting exceedance days"
    );

    // Per cell and bin: exceedance-day count and valid-day count.
    let mut counts = vec![0u32; n_bins * n_cells];
    let mut valid = vec![0u32; n_bins * n_cells];
    let threshold = config.threshold_c();
    for t in 0..field.n_time() {
        let bin = bin_index[&config.bin_start(field.years()[t])];
        let row = bin * n_cells;
        for cell in 0..n_cells {
            let v = field.value(t, cell);
            if v.is_finite() {
                valid[row + cell] += 1;
                if v >= threshold {
                    counts[row + cell] += 1;
                }
            }
        }
    }

    let mut series = BTreeMap::new();
    for (name, mask) in masks {
        let mut values = Vec::with_capacity(n_bins);
        let mut cell_values = Vec::new();
        for bin in 0..n_bins {
            let row = bin * n_cells;
            cell_values.clear();
            for cell in 0..n_cells {
                if !mask[cell] {
                    continue;
                }
                let v = if valid[row + cell] == 0 {
                    f64::NAN
                } else {
                    counts[row + cell] as f64
                };
                cell_values.push(v);
            }
            values.push(nan_mean(&cell_values));
        }
        debug!(region = %name, "binned exceedance series complete");
        series.insert(name.clone(), values);
    }

    Ok(BinnedExceedance {
        bin_starts,
        bin_years: config.bin_years(),
        series,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_cell_field(years_temps: &[(i32, f64)]) -> DailyField {
        let data: Vec<f64> = years_temps.iter().map(|&(_, t)| t).collect();
        let years: Vec<i32> = years_temps.iter().map(|&(y, _)| y).collect();
        let nt = years.len();
        DailyField::new(data, (nt, 1, 1), years, vec![7; nt], vec![200; nt]).unwrap()
    }

    fn one_cell_mask(name: &str) -> BTreeMap<String, Vec<bool>> {
        BTreeMap::from([(name.to_string(), vec![true])])
    }

    #[test]
    fn counts_days_at_or_above_threshold() {
        // Three days in one bin: two at/above 35, one below.
        let field = single_cell_field(&[(2020, 35.0), (2021, 36.0), (2022, 34.9)]);
        let cfg = ExceedanceConfig::new();
        let result = compute_binned_exceedance(&field, &one_cell_mask("US48"), &cfg).unwrap();
        assert_eq!(result.bin_starts(), &[2019]);
        assert_eq!(result.series()["US48"], vec![2.0]);
    }

    #[test]
    fn splits_years_across_bins() {
        // 2018 falls in the 2013-2018 bin, 2019 starts the next.
        let field = single_cell_field(&[(2018, 40.0), (2019, 40.0), (2024, 40.0)]);
        let cfg = ExceedanceConfig::new();
        let result = compute_binned_exceedance(&field, &one_cell_mask("US48"), &cfg).unwrap();
        assert_eq!(result.bin_starts(), &[2013, 2019]);
        assert_eq!(result.series()["US48"], vec![1.0, 2.0]);
    }

    #[test]
    fn missing_cell_bin_is_nan() {
        let field = single_cell_field(&[(2020, f64::NAN)]);
        let cfg = ExceedanceConfig::new();
        let result = compute_binned_exceedance(&field, &one_cell_mask("US48"), &cfg).unwrap();
        assert!(result.series()["US48"][0].is_nan());
    }

    #[test]
    fn regional_mean_skips_missing_cells() {
        // 1x2 grid, one day: cell 0 exceeds, cell 1 is missing.
        let field = DailyField::new(
            vec![40.0, f64::NAN],
            (1, 1, 2),
            vec![2020],
            vec![7],
            vec![200],
        )
        .unwrap();
        let masks = BTreeMap::from([("Both".to_string(), vec![true, true])]);
        let cfg = ExceedanceConfig::new();
        let result = compute_binned_exceedance(&field, &masks, &cfg).unwrap();
        assert_eq!(result.series()["Both"], vec![1.0]);
    }

    #[test]
    fn rejects_mask_length_mismatch() {
        let field = single_cell_field(&[(2020, 30.0)]);
        let masks = BTreeMap::from([("US48".to_string(), vec![true, false])]);
        let err =
            compute_binned_exceedance(&field, &masks, &ExceedanceConfig::new()).unwrap_err();
        assert!(matches!(err, ExceedanceError::MaskMismatch { .. }));
    }

    #[test]
    fn rejects_invalid_config() {
        let field = single_cell_field(&[(2020, 30.0)]);
        let err = compute_binned_exceedance(
            &field,
            &one_cell_mask("US48"),
            &ExceedanceConfig::new().with_bin_years(0),
        )
        .unwrap_err();
        assert!(matches!(err, ExceedanceError::InvalidConfig { .. }));
    }
}
