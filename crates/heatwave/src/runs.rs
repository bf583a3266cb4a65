//! Consecutive-run heatwave-day detection.
//!
//! A day is a heatwave day when it belongs to a run of at least N
//! consecutive exceedance days. Detection is two linear passes per cell:
//! a forward pass counts consecutive exceedances to find run ends, and a
//! backward pass propagates membership N-1 steps back from each run end.
//! This is the loop equivalent of the vectorized rolling-window/shift-OR
//! formulation and produces identical flags.

use tracing::debug;

use crate::error::HeatwaveError;
use crate::field::DailyField;
use crate::threshold::ThresholdField;

/// Flags each (timestep, cell) whose temperature reaches its day-of-year
/// threshold.
///
/// The comparison is `temperature >= threshold`, cell-local and
/// day-of-year-local; NaN on either side compares false, so missing
/// observations and empty-bucket thresholds never exceed.
///
/// # Errors
///
/// Returns [`HeatwaveError::LengthMismatch`] when `thresholds` was
/// computed for a different grid, and [`HeatwaveError::MissingThreshold`]
/// when a timestep's day-of-year has no threshold row (the seasonal field
/// and the threshold field must come from the same record).
pub fn exceedance_flags(
    field: &DailyField,
    thresholds: &ThresholdField,
) -> Result<Vec<bool>, HeatwaveError> {
    let n_cells = field.n_cells();
    if thresholds.n_cells() != n_cells {
        return Err(HeatwaveError::LengthMismatch {
            expected: n_cells,
            got: thresholds.n_cells(),
            field: "thresholds".to_string(),
        });
    }

    let nt = field.n_time();
    let mut exceed = vec![false; nt * n_cells];
    for t in 0..nt {
        let doy = field.doys()[t];
        let row = thresholds
            .row(doy)
            .ok_or(HeatwaveError::MissingThreshold { doy })?;
        let out = &mut exceed[t * n_cells..(t + 1) * n_cells];
        for (cell, flag) in out.iter_mut().enumerate() {
            *flag = field.value(t, cell) >= row[cell];
        }
    }
    Ok(exceed)
}

/// Flags each (timestep, cell) that is part of a run of at least
/// `min_run_length` consecutive exceedance days.
///
/// Runs are confined to calendar-contiguous stretches of the time axis:
/// the consecutive counter resets at every year change or day-of-year
/// discontinuity, so each year's May-September block is an independent
/// sequence and a run can never span the winter gap. The first
/// `min_run_length - 1` days of each block therefore can never complete
/// a run; this season-start under-counting matches the reference figures
/// and must not be "fixed".
///
/// # Errors
///
/// Propagates the errors of [`exceedance_flags`].
pub fn detect_heatwave_days(
    field: &DailyField,
    thresholds: &ThresholdField,
    min_run_length: usize,
) -> Result<Vec<bool>, HeatwaveError> {
    let exceed = exceedance_flags(field, thresholds)?;
    let nt = field.n_time();
    let n_cells = field.n_cells();
    let n = min_run_length;

    // A timestep starts a new contiguous segment when the calendar breaks.
    let mut segment_start = vec![false; nt];
    for t in 0..nt {
        segment_start[t] = t == 0
            || field.years()[t] != field.years()[t - 1]
            || field.doys()[t] != field.doys()[t - 1] + 1;
    }

    // Forward pass: run_end[t, cell] is true when the window of the n most
    // recent days ending at t is all exceedances. Incomplete windows at a
    // segment start cannot qualify.
    let mut run_end = vec![false; nt * n_cells];
    let mut streak = vec![0usize; n_cells];
    for t in 0..nt {
        if segment_start[t] {
            streak.fill(0);
        }
        let row = &exceed[t * n_cells..(t + 1) * n_cells];
        let ends = &mut run_end[t * n_cells..(t + 1) * n_cells];
        for cell in 0..n_cells {
            if row[cell] {
                streak[cell] += 1;
                ends[cell] = streak[cell] >= n;
            } else {
                streak[cell] = 0;
            }
        }
    }

    // Backward pass: a day is covered when some position up to n-1 steps
    // ahead in the same segment is a run end. `carry` counts how many more
    // days below the current position are covered by a run end above.
    let mut heatwave = vec![false; nt * n_cells];
    let mut carry = vec![0usize; n_cells];
    for t in (0..nt).rev() {
        let ends = &run_end[t * n_cells..(t + 1) * n_cells];
        let out = &mut heatwave[t * n_cells..(t + 1) * n_cells];
        for cell in 0..n_cells {
            if ends[cell] {
                out[cell] = true;
                carry[cell] = carry[cell].max(n - 1);
            } else if carry[cell] > 0 {
                out[cell] = true;
                carry[cell] -= 1;
            }
        }
        if segment_start[t] {
            // Hard cut: coverage never leaks into the previous season.
            carry.fill(0);
        }
    }

    let flagged = heatwave.iter().filter(|&&b| b).count();
    debug!(
        n_time = nt,
        n_cells,
        min_run_length = n,
        flagged,
        "detected heatwave days"
    );
    Ok(heatwave)
}
