//! Annual heatwave-day counts and regional averaging.

use std::collections::BTreeMap;

use tracing::debug;

use helios_stats::nan_mean;

use crate::error::HeatwaveError;
use crate::field::DailyField;

/// Per (year, cell) heatwave-day counts.
///
/// Counts are f64 so "no data" can be carried as NaN: a cell-year with no
/// valid seasonal observation at all gets NaN rather than a misleading
/// zero, and is skipped by the regional averaging.
#[derive(Debug, Clone)]
pub struct AnnualCounts {
    /// Sorted distinct calendar years.
    years: Vec<i32>,
    /// Flat counts, length `years.len() * n_cells`, `[year, cell]` order.
    counts: Vec<f64>,
    n_cells: usize,
}

impl AnnualCounts {
    /// Sorted distinct calendar years.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Number of grid cells per year row.
    pub fn n_cells(&self) -> usize {
        self.n_cells
    }

    /// All-cell count row for the year at `year_idx`.
    pub fn row(&self, year_idx: usize) -> &[f64] {
        &self.counts[year_idx * self.n_cells..(year_idx + 1) * self.n_cells]
    }
}

/// Sums heatwave flags per calendar year per cell.
///
/// `heatwave` must be the flag array produced by
/// [`detect_heatwave_days`](crate::detect_heatwave_days) for the same
/// seasonal `field`. Grouping is by the field's year metadata only, so
/// the result is invariant under any reordering of timesteps that
/// preserves the (year, flag, validity) triples.
///
/// # Errors
///
/// Returns [`HeatwaveError::LengthMismatch`] when `heatwave` does not
/// match the field's shape.
pub fn annual_counts(field: &DailyField, heatwave: &[bool]) -> Result<AnnualCounts, HeatwaveError> {
    let n_cells = field.n_cells();
    let expected = field.n_time() * n_cells;
    if heatwave.len() != expected {
        return Err(HeatwaveError::LengthMismatch {
            expected,
            got: heatwave.len(),
            field: "heatwave flags".to_string(),
        });
    }

    let years = field.distinct_years();
    let year_index: BTreeMap<i32, usize> =
        years.iter().enumerate().map(|(i, &y)| (y, i)).collect();

    let mut counts = vec![0.0f64; years.len() * n_cells];
    let mut valid_days = vec![0u32; years.len() * n_cells];
    for t in 0..field.n_time() {
        let yi = year_index[&field.years()[t]];
        let flags = &heatwave[t * n_cells..(t + 1) * n_cells];
        for cell in 0..n_cells {
            let idx = yi * n_cells + cell;
            if field.value(t, cell).is_finite() {
                valid_days[idx] += 1;
            }
            if flags[cell] {
                counts[idx] += 1.0;
            }
        }
    }

    // A cell-year with no valid observation is "no data", not zero.
    for (count, &valid) in counts.iter_mut().zip(valid_days.iter()) {
        if valid == 0 {
            *count = f64::NAN;
        }
    }

    debug!(n_years = years.len(), n_cells, "aggregated annual counts");
    Ok(AnnualCounts {
        years,
        counts,
        n_cells,
    })
}

/// Averages annual counts across each region's cells.
///
/// For every region the result holds one value per year: the NaN-skipping
/// mean of the counts over the region's mask. Years where no masked cell
/// has data yield NaN, which downstream consumers must treat as a gap
/// rather than a zero.
///
/// # Errors
///
/// Returns [`HeatwaveError::LengthMismatch`] when a mask length does not
/// match the grid.
pub fn regional_means(
    counts: &AnnualCounts,
    masks: &BTreeMap<String, Vec<bool>>,
) -> Result<BTreeMap<String, Vec<f64>>, HeatwaveError> {
    let n_cells = counts.n_cells();
    let mut regional = BTreeMap::new();
    let mut gathered = Vec::new();

    for (name, mask) in masks {
        if mask.len() != n_cells {
            return Err(HeatwaveError::LengthMismatch {
                expected: n_cells,
                got: mask.len(),
                field: format!("mask '{name}'"),
            });
        }
        let mut series = Vec::with_capacity(counts.years().len());
        for yi in 0..counts.years().len() {
            let row = counts.row(yi);
            gathered.clear();
            for cell in 0..n_cells {
                if mask[cell] {
                    gathered.push(row[cell]);
                }
            }
            series.push(nan_mean(&gathered));
        }
        regional.insert(name.clone(), series);
    }
    Ok(regional)
}
