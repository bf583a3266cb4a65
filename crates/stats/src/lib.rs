//! Statistical primitives for the Helios analysis pipeline.
//!
//! Missing observations are carried as NaN throughout the pipeline, so the
//! averaging helpers here come in a NaN-skipping flavour that mirrors
//! `skipna=True` semantics: non-finite samples are excluded from the rank
//! and mean computations rather than treated as zero.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// NaN-skipping arithmetic mean.
///
/// Averages only the finite entries of `data`. Returns NaN when no finite
/// entry exists, which is the pipeline's "no data" value.
pub fn nan_mean(data: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for &x in data {
        if x.is_finite() {
            sum += x;
            count += 1;
        }
    }
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Linear-interpolation quantile (R type=7, the numpy default).
///
/// **Expects pre-sorted input** (caller's responsibility). The estimate at
/// probability `p` interpolates between the order statistics bracketing
/// rank `(n - 1) * p`.
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn quantile_type7(sorted: &[f64], p: f64) -> f64 {
    assert!(
        !sorted.is_empty(),
        "quantile_type7: input must not be empty"
    );
    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}

/// Sorts the finite entries of `data` into a fresh vector.
///
/// Non-finite entries (NaN, infinities used as sentinels) are dropped, so
/// the result is directly usable with [`quantile_type7`].
pub fn sorted_finite(data: &[f64]) -> Vec<f64> {
    let mut out: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
    out.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    out
}
