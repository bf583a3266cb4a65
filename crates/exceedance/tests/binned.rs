//! End-to-end tests for binned exceedance totals on a synthetic
//! multi-year record.

use std::collections::BTreeMap;

use helios_exceedance::{ExceedanceConfig, compute_binned_exceedance, fahrenheit_to_celsius};
use helios_heatwave::DailyField;

/// Twelve years (2013-2024), 30 July days per year, 1x2 grid.
///
/// Cell 0 reaches 36 °C on `hot_days_per_year` days each year and sits at
/// 30 °C otherwise. Cell 1 is ocean (NaN throughout).
fn synthetic_record(hot_days_per_year: usize) -> DailyField {
    let mut data = Vec::new();
    let mut years = Vec::new();
    let mut months = Vec::new();
    let mut doys = Vec::new();
    for year in 2013..=2024 {
        for d in 0..30u16 {
            let v0 = if (d as usize) < hot_days_per_year { 36.0 } else { 30.0 };
            data.push(v0);
            data.push(f64::NAN);
            years.push(year);
            months.push(7);
            doys.push(182 + d);
        }
    }
    let nt = years.len();
    DailyField::new(data, (nt, 1, 2), years, months, doys).unwrap()
}

fn masks() -> BTreeMap<String, Vec<bool>> {
    BTreeMap::from([
        ("Land".to_string(), vec![true, false]),
        ("All".to_string(), vec![true, true]),
    ])
}

#[test]
fn twelve_year_record_yields_two_bins() {
    let field = synthetic_record(4);
    let cfg = ExceedanceConfig::new();
    let result = compute_binned_exceedance(&field, &masks(), &cfg).unwrap();

    assert_eq!(result.bin_starts(), &[2013, 2019]);
    assert_eq!(result.bin_years(), 6);
    // 4 hot days per year over 6 years per bin.
    assert_eq!(result.series()["Land"], vec![24.0, 24.0]);
}

#[test]
fn ocean_cell_never_contributes() {
    // NaN-skipping regional mean: "All" equals the land-only series.
    let field = synthetic_record(4);
    let result = compute_binned_exceedance(&field, &masks(), &ExceedanceConfig::new()).unwrap();
    assert_eq!(result.series()["All"], result.series()["Land"]);
}

#[test]
fn threshold_boundary_is_inclusive() {
    // 35 °C exactly counts; raising the threshold past it does not.
    let mut data = Vec::new();
    let mut years = Vec::new();
    for year in 2019..=2024 {
        data.push(35.0);
        years.push(year);
    }
    let nt = years.len();
    let field = DailyField::new(data, (nt, 1, 1), years, vec![7; nt], vec![200; nt]).unwrap();
    let masks = BTreeMap::from([("US48".to_string(), vec![true])]);

    let at = compute_binned_exceedance(&field, &masks, &ExceedanceConfig::new()).unwrap();
    assert_eq!(at.series()["US48"], vec![6.0]);

    let above = compute_binned_exceedance(
        &field,
        &masks,
        &ExceedanceConfig::new().with_threshold_c(fahrenheit_to_celsius(97.5)),
    )
    .unwrap();
    assert_eq!(above.series()["US48"], vec![0.0]);
}

#[test]
fn custom_bin_width_rebins() {
    let field = synthetic_record(1);
    let cfg = ExceedanceConfig::new().with_bin_years(3);
    let result = compute_binned_exceedance(&field, &masks(), &cfg).unwrap();
    assert_eq!(result.bin_starts(), &[2013, 2016, 2019, 2022]);
    assert_eq!(result.series()["Land"], vec![3.0; 4]);
}
