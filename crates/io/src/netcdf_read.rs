//! Low-level NetCDF extraction helpers.

use std::path::Path;

use chrono::{Datelike, NaiveDate};
use helios_calendar::Doy;
use netcdf::AttributeValue;

use crate::error::IoError;

/// Open a NetCDF file at `path`, returning [`IoError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Read a 1-D `f64` variable, trying each alias in order.
///
/// Returns the data from the first alias that matches. If none match,
/// returns [`IoError::MissingVariable`] with the first alias as the name.
pub(crate) fn read_1d_f64(
    file: &netcdf::File,
    aliases: &[&str],
    path: &Path,
) -> Result<Vec<f64>, IoError> {
    for &alias in aliases {
        if let Some(var) = file.variable(alias) {
            return Ok(var.get_values::<f64, _>(..)?);
        }
    }

    let name = aliases.first().copied().unwrap_or("unknown");
    Err(IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Read a 3-D `f64` variable and return the flattened data together with
/// the shape `[nt, ny, nx]` derived from the variable's dimensions.
///
/// Values equal to the variable's `_FillValue` attribute (if present) are
/// replaced with NaN, the pipeline's missing-value convention.
pub(crate) fn read_3d_f64(
    file: &netcdf::File,
    var_name: &str,
    path: &Path,
) -> Result<(Vec<f64>, [usize; 3]), IoError> {
    let var = file
        .variable(var_name)
        .ok_or_else(|| IoError::MissingVariable {
            name: var_name.to_string(),
            path: path.to_path_buf(),
        })?;

    let dims = var.dimensions();
    if dims.len() != 3 {
        return Err(IoError::DimensionMismatch {
            name: format!("{var_name} dimensions"),
            expected: 3,
            got: dims.len(),
        });
    }

    let nt = dims[0].len();
    let ny = dims[1].len();
    let nx = dims[2].len();

    let mut data = var.get_values::<f64, _>(..)?;
    if let Some(fill) = fill_value(&var) {
        for v in &mut data {
            if *v == fill {
                *v = f64::NAN;
            }
        }
    }
    Ok((data, [nt, ny, nx]))
}

/// Read a land mask variable as per-cell booleans (value > 0 means land).
///
/// Accepts a 2-D `[lat, lon]` mask or a 3-D `[time, lat, lon]` variable,
/// in which case only the first timestep is consulted. Returns the flat
/// mask together with its `[ny, nx]` shape.
pub(crate) fn read_land_mask(
    file: &netcdf::File,
    var_name: &str,
    path: &Path,
) -> Result<(Vec<bool>, [usize; 2]), IoError> {
    let var = file
        .variable(var_name)
        .ok_or_else(|| IoError::MissingVariable {
            name: var_name.to_string(),
            path: path.to_path_buf(),
        })?;

    let dims = var.dimensions();
    let (values, ny, nx) = match dims.len() {
        2 => {
            let ny = dims[0].len();
            let nx = dims[1].len();
            (var.get_values::<f64, _>(..)?, ny, nx)
        }
        3 => {
            let ny = dims[1].len();
            let nx = dims[2].len();
            let values = var.get_values::<f64, _>((0..1, .., ..))?;
            (values, ny, nx)
        }
        other => {
            return Err(IoError::DimensionMismatch {
                name: format!("{var_name} dimensions"),
                expected: 2,
                got: other,
            });
        }
    };

    let mask = values.iter().map(|&v| v > 0.0).collect();
    Ok((mask, [ny, nx]))
}

fn fill_value(var: &netcdf::Variable<'_>) -> Option<f64> {
    var.attribute_value("_FillValue")
        .and_then(|res| res.ok())
        .and_then(|av| match av {
            AttributeValue::Double(v) => Some(v),
            AttributeValue::Float(v) => Some(v as f64),
            _ => None,
        })
}

/// Read the `units` and optional `calendar` attributes from a time variable.
///
/// Parses CF-convention strings like `"days since YYYY-MM-DD"` or
/// `"days since YYYY-MM-DD HH:MM:SS"` and returns the calendar name
/// (defaulting to `"standard"`) together with the parsed base date.
pub(crate) fn read_time_units(
    file: &netcdf::File,
    time_var: &str,
    path: &Path,
) -> Result<(String, NaiveDate), IoError> {
    let var = file
        .variable(time_var)
        .ok_or_else(|| IoError::MissingVariable {
            name: time_var.to_string(),
            path: path.to_path_buf(),
        })?;

    // Read the "units" attribute.
    let units_str: String = var
        .attribute_value("units")
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("time variable '{time_var}' has no 'units' attribute"),
        })?
        .map_err(|e| IoError::InvalidTime {
            reason: format!("failed to read 'units' attribute: {e}"),
        })?
        .try_into()
        .map_err(|e: netcdf::Error| IoError::InvalidTime {
            reason: format!("'units' attribute is not a string: {e}"),
        })?;

    // Expected format: "days since YYYY-MM-DD" or "days since YYYY-MM-DD HH:MM:SS"
    let parts: Vec<&str> = units_str.splitn(3, ' ').collect();
    if parts.len() < 3 || parts[1] != "since" {
        return Err(IoError::InvalidTime {
            reason: format!("unexpected time units format: '{units_str}'"),
        });
    }

    // Take only the date portion (first 10 characters of parts[2]).
    let date_str = if parts[2].len() >= 10 {
        &parts[2][..10]
    } else {
        parts[2]
    };

    let base_date =
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| IoError::InvalidTime {
            reason: format!("failed to parse base date '{date_str}': {e}"),
        })?;

    // Read the optional "calendar" attribute, defaulting to "standard".
    let calendar = var
        .attribute_value("calendar")
        .and_then(|res| res.ok())
        .and_then(|av| match av {
            AttributeValue::Str(s) => Some(s),
            _ => None,
        })
        .unwrap_or_else(|| "standard".to_string());

    Ok((calendar, base_date))
}

/// Convert floating-point day offsets from a base date into calendar dates.
///
/// Gregorian-family calendars (`standard`, `gregorian`,
/// `proleptic_gregorian`) use chrono date arithmetic, so leap days appear
/// in the result and are folded later at the day-of-year conversion.
/// No-leap calendars (`noleap`, `365_day`) step through the fixed 365-day
/// year instead. Fractional offsets are truncated to whole days.
pub(crate) fn time_offsets_to_dates(
    base_date: NaiveDate,
    offsets: &[f64],
    calendar: &str,
) -> Result<Vec<NaiveDate>, IoError> {
    match calendar {
        "standard" | "gregorian" | "proleptic_gregorian" => offsets
            .iter()
            .map(|&offset| {
                let days = offset as i64;
                base_date
                    .checked_add_signed(chrono::TimeDelta::days(days))
                    .ok_or_else(|| IoError::InvalidTime {
                        reason: format!("date overflow adding {days} days to {base_date}"),
                    })
            })
            .collect(),
        "noleap" | "365_day" => {
            let base_doy0 = Doy::from_date(base_date).index() as i64;
            offsets
                .iter()
                .map(|&offset| {
                    let total = base_doy0 + offset as i64;
                    let year = base_date.year() + total.div_euclid(365) as i32;
                    let doy = Doy::new(total.rem_euclid(365) as u16 + 1)?;
                    let (month, day) = doy.month_day();
                    NaiveDate::from_ymd_opt(year, month.into(), day.into()).ok_or_else(|| {
                        IoError::InvalidTime {
                            reason: format!("invalid date {year}-{month:02}-{day:02}"),
                        }
                    })
                })
                .collect()
        }
        other => Err(IoError::InvalidTime {
            reason: format!("unsupported calendar '{other}'"),
        }),
    }
}
