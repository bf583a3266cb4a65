//! # helios-heatwave
//!
//! Heatwave-day detection and regional aggregation over gridded daily
//! temperature fields.
//!
//! # Pipeline Order
//!
//! 1. **Season**: restrict the time axis to May-September
//! 2. **Thresholds**: per (day-of-year, cell) percentile climatology
//! 3. **Runs**: flag days inside runs of at least N consecutive exceedances
//! 4. **Annual**: per-cell yearly counts, regional skip-missing means
//! 5. **Smooth**: trailing average over years
//!
//! Every stage is a pure function from its inputs; nothing is mutated
//! after construction, so the whole pipeline is deterministic and safe to
//! share read-only across threads.

mod annual;
mod config;
mod error;
mod field;
mod result;
mod runs;
mod season;
mod smooth;
mod threshold;

pub use annual::{AnnualCounts, annual_counts, regional_means};
pub use config::HeatwaveConfig;
pub use error::HeatwaveError;
pub use field::DailyField;
pub use result::HeatwaveResult;
pub use runs::{detect_heatwave_days, exceedance_flags};
pub use season::{SEASON_END_MONTH, SEASON_START_MONTH, in_season, select_season};
pub use smooth::trailing_mean;
pub use threshold::{ThresholdField, compute_thresholds};

use std::collections::BTreeMap;

use tracing::info;

/// Runs the full heatwave analysis pipeline on a daily field.
///
/// `field` is the full (not yet season-filtered) land-restricted daily
/// record; `masks` maps region names to land-subset spatial masks. The
/// result carries, per region, the annual mean heatwave-day series and
/// its trailing average.
///
/// # Errors
///
/// Returns [`HeatwaveError`] on invalid configuration, an empty seasonal
/// record, or mask/grid shape mismatches.
pub fn run_heatwave_analysis(
    field: &DailyField,
    masks: &BTreeMap<String, Vec<bool>>,
    config: &HeatwaveConfig,
) -> Result<HeatwaveResult, HeatwaveError> {
    config.validate()?;

    let season = select_season(field);
    if season.n_time() == 0 {
        return Err(HeatwaveError::EmptyData);
    }
    info!(
        n_season_days = season.n_time(),
        n_cells = season.n_cells(),
        "seasonal subset selected"
    );

    let thresholds = compute_thresholds(&season, config.percentile());
    info!(n_doys = thresholds.doys().len(), "thresholds computed");

    let heatwave = detect_heatwave_days(&season, &thresholds, config.min_run_length())?;

    let counts = annual_counts(&season, &heatwave)?;
    let annual = regional_means(&counts, masks)?;
    info!(
        n_years = counts.years().len(),
        n_regions = annual.len(),
        "annual regional series aggregated"
    );

    let smoothed: BTreeMap<String, Vec<f64>> = annual
        .iter()
        .map(|(name, series)| {
            (
                name.clone(),
                trailing_mean(series, config.smoothing_window()),
            )
        })
        .collect();

    Ok(HeatwaveResult::new(counts.years().to_vec(), annual, smoothed))
}
