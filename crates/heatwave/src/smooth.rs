//! Trailing moving average over annual series.

use helios_stats::nan_mean;

/// Trailing mean of `values` with the given window length.
///
/// Element `i` is the NaN-skipping mean of `values[i]` and the preceding
/// `window - 1` entries; at the start of the record the partial window of
/// whatever is available is used. Windows with no finite sample yield
/// NaN. Output length equals input length, aligned by year.
///
/// # Panics
///
/// Panics if `window` is zero (configurations are validated upstream).
pub fn trailing_mean(values: &[f64], window: usize) -> Vec<f64> {
    assert!(window >= 1, "trailing_mean: window must be >= 1");
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            nan_mean(&values[start..=i])
        })
        .collect()
}
