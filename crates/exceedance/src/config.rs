//! Configuration for binned exceedance-day totals.

use crate::error::ExceedanceError;

/// Converts a Fahrenheit temperature to Celsius.
///
/// Report thresholds are quoted in °F (95, 97.5, ...); the datasets are
/// in °C.
pub fn fahrenheit_to_celsius(temp_f: f64) -> f64 {
    (temp_f - 32.0) * (5.0 / 9.0)
}

/// Configuration for
/// [`compute_binned_exceedance`](crate::compute_binned_exceedance).
///
/// The defaults reproduce the reference figure: days at or above
/// 35 °C (95 °F) totalled over non-overlapping 6-year periods whose last
/// bin ends at 2024.
#[derive(Debug, Clone)]
pub struct ExceedanceConfig {
    /// Absolute exceedance threshold in °C.
    threshold_c: f64,
    /// Number of years per non-overlapping bin.
    bin_years: usize,
    /// Calendar year the final bin ends at (inclusive).
    anchor_end_year: i32,
}

impl Default for ExceedanceConfig {
    fn default() -> Self {
        Self {
            threshold_c: fahrenheit_to_celsius(95.0),
            bin_years: 6,
            anchor_end_year: 2024,
        }
    }
}

impl ExceedanceConfig {
    /// Creates a configuration with the reference defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the exceedance threshold in °C.
    pub fn with_threshold_c(mut self, t: f64) -> Self {
        self.threshold_c = t;
        self
    }

    /// Sets the number of years per bin.
    pub fn with_bin_years(mut self, n: usize) -> Self {
        self.bin_years = n;
        self
    }

    /// Sets the year the final bin ends at.
    pub fn with_anchor_end_year(mut self, year: i32) -> Self {
        self.anchor_end_year = year;
        self
    }

    /// Returns the exceedance threshold in °C.
    pub fn threshold_c(&self) -> f64 {
        self.threshold_c
    }

    /// Returns the number of years per bin.
    pub fn bin_years(&self) -> usize {
        self.bin_years
    }

    /// Returns the year the final bin ends at.
    pub fn anchor_end_year(&self) -> i32 {
        self.anchor_end_year
    }

    /// First year of the bin containing `year`, with bins anchored so the
    /// final bin ends at `anchor_end_year`.
    pub fn bin_start(&self, year: i32) -> i32 {
        let anchor_start = self.anchor_end_year - (self.bin_years as i32 - 1);
        (year - anchor_start).div_euclid(self.bin_years as i32) * self.bin_years as i32
            + anchor_start
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ExceedanceError::InvalidConfig`] when a parameter is out
    /// of range.
    pub fn validate(&self) -> Result<(), ExceedanceError> {
        if !self.threshold_c.is_finite() {
            return Err(ExceedanceError::InvalidConfig {
                reason: format!("threshold_c must be finite, got {}", self.threshold_c),
            });
        }
        if self.bin_years < 1 {
            return Err(ExceedanceError::InvalidConfig {
                reason: "bin_years must be >= 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fahrenheit_conversion() {
        assert!((fahrenheit_to_celsius(95.0) - 35.0).abs() < 1e-12);
        assert!((fahrenheit_to_celsius(32.0)).abs() < 1e-12);
    }

    #[test]
    fn defaults() {
        let cfg = ExceedanceConfig::new();
        assert!((cfg.threshold_c() - 35.0).abs() < 1e-12);
        assert_eq!(cfg.bin_years(), 6);
        assert_eq!(cfg.anchor_end_year(), 2024);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn bins_anchor_to_final_year() {
        // anchor_end_year 2024, 6-year bins: final bin is 2019-2024.
        let cfg = ExceedanceConfig::new();
        assert_eq!(cfg.bin_start(2024), 2019);
        assert_eq!(cfg.bin_start(2019), 2019);
        assert_eq!(cfg.bin_start(2018), 2013);
        assert_eq!(cfg.bin_start(1931), 1927);
        assert_eq!(cfg.bin_start(1933), 1933);
    }

    #[test]
    fn rejects_zero_bin_years() {
        let err = ExceedanceConfig::new().with_bin_years(0).validate().unwrap_err();
        assert!(matches!(err, ExceedanceError::InvalidConfig { .. }));
    }

    #[test]
    fn rejects_nan_threshold() {
        let err = ExceedanceConfig::new()
            .with_threshold_c(f64::NAN)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ExceedanceError::InvalidConfig { .. }));
    }
}
