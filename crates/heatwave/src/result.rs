//! Result types for the heatwave analysis pipeline.

use std::collections::BTreeMap;

/// Per-region annual heatwave-day series with trailing-average smoothing.
///
/// `years` indexes both the raw and the smoothed series of every region;
/// NaN entries are "no data" gaps that plotting layers must render as
/// such, never as zero.
#[derive(Debug, Clone)]
pub struct HeatwaveResult {
    years: Vec<i32>,
    annual: BTreeMap<String, Vec<f64>>,
    smoothed: BTreeMap<String, Vec<f64>>,
}

impl HeatwaveResult {
    pub(crate) fn new(
        years: Vec<i32>,
        annual: BTreeMap<String, Vec<f64>>,
        smoothed: BTreeMap<String, Vec<f64>>,
    ) -> Self {
        Self {
            years,
            annual,
            smoothed,
        }
    }

    /// Sorted calendar years covered by every series.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Raw annual series (mean heatwave days per cell) per region.
    pub fn annual(&self) -> &BTreeMap<String, Vec<f64>> {
        &self.annual
    }

    /// Trailing-average smoothed series per region.
    pub fn smoothed(&self) -> &BTreeMap<String, Vec<f64>> {
        &self.smoothed
    }

    /// Region names in iteration order.
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.annual.keys().map(String::as_str)
    }
}
