//! Configuration for the heatwave analysis pipeline.

use crate::error::HeatwaveError;

/// Configuration for [`run_heatwave_analysis`](crate::run_heatwave_analysis).
///
/// The defaults reproduce the reference figure: 90th-percentile
/// day-of-year thresholds, runs of at least 6 consecutive exceedance
/// days, and a 15-year trailing average.
#[derive(Debug, Clone)]
pub struct HeatwaveConfig {
    /// Minimum number of consecutive exceedance days for a run to qualify.
    min_run_length: usize,
    /// Probability for the day-of-year threshold quantile (0 < p < 1).
    percentile: f64,
    /// Trailing-average window in years.
    smoothing_window: usize,
}

impl Default for HeatwaveConfig {
    fn default() -> Self {
        Self {
            min_run_length: 6,
            percentile: 0.9,
            smoothing_window: 15,
        }
    }
}

impl HeatwaveConfig {
    /// Creates a configuration with the reference defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum run length (days).
    pub fn with_min_run_length(mut self, n: usize) -> Self {
        self.min_run_length = n;
        self
    }

    /// Sets the threshold quantile probability.
    pub fn with_percentile(mut self, p: f64) -> Self {
        self.percentile = p;
        self
    }

    /// Sets the trailing-average window in years.
    pub fn with_smoothing_window(mut self, w: usize) -> Self {
        self.smoothing_window = w;
        self
    }

    /// Returns the minimum run length.
    pub fn min_run_length(&self) -> usize {
        self.min_run_length
    }

    /// Returns the threshold quantile probability.
    pub fn percentile(&self) -> f64 {
        self.percentile
    }

    /// Returns the trailing-average window.
    pub fn smoothing_window(&self) -> usize {
        self.smoothing_window
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HeatwaveError::InvalidConfig`] when a parameter is out
    /// of range.
    pub fn validate(&self) -> Result<(), HeatwaveError> {
        if self.min_run_length < 1 {
            return Err(HeatwaveError::InvalidConfig {
                reason: "min_run_length must be >= 1".to_string(),
            });
        }
        if !(self.percentile > 0.0 && self.percentile < 1.0) {
            return Err(HeatwaveError::InvalidConfig {
                reason: format!(
                    "percentile must be in (0, 1), got {}",
                    self.percentile
                ),
            });
        }
        if self.smoothing_window < 1 {
            return Err(HeatwaveError::InvalidConfig {
                reason: "smoothing_window must be >= 1".to_string(),
            });
        }
        Ok(())
    }
}
