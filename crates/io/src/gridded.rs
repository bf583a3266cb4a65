//! In-memory representation of a gridded daily temperature record.

use chrono::{Datelike, NaiveDate};

use crate::error::IoError;

/// A land-restricted gridded daily temperature record.
///
/// Data is stored flat in `[time, lat, lon]` order. Ocean cells (land mask
/// false) carry NaN at every timestep, so downstream consumers only ever
/// see the missing-value convention and never need the mask to interpret a
/// value. The mask itself is kept for region construction.
#[derive(Debug, Clone)]
pub struct GriddedTemperature {
    dates: Vec<NaiveDate>,
    lats: Vec<f64>,
    lons: Vec<f64>,
    /// Per-cell land flag, length `ny * nx`.
    land: Vec<bool>,
    /// Flat temperature data, length `nt * ny * nx`.
    data: Vec<f64>,
}

impl GriddedTemperature {
    /// Assembles a record after validating the array shapes against each
    /// other.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DimensionMismatch`] when the land mask or data
    /// length disagrees with the coordinate axes, and
    /// [`IoError::Validation`] for an empty time axis.
    pub fn new(
        dates: Vec<NaiveDate>,
        lats: Vec<f64>,
        lons: Vec<f64>,
        land: Vec<bool>,
        data: Vec<f64>,
    ) -> Result<Self, IoError> {
        let nt = dates.len();
        let n_cells = lats.len() * lons.len();
        if nt == 0 {
            return Err(IoError::Validation {
                count: 1,
                details: "time axis is empty".to_string(),
            });
        }
        if land.len() != n_cells {
            return Err(IoError::DimensionMismatch {
                name: "land mask".to_string(),
                expected: n_cells,
                got: land.len(),
            });
        }
        if data.len() != nt * n_cells {
            return Err(IoError::DimensionMismatch {
                name: "temperature data".to_string(),
                expected: nt * n_cells,
                got: data.len(),
            });
        }
        Ok(Self {
            dates,
            lats,
            lons,
            land,
            data,
        })
    }

    /// Number of timesteps.
    pub fn n_time(&self) -> usize {
        self.dates.len()
    }

    /// Number of latitude rows.
    pub fn ny(&self) -> usize {
        self.lats.len()
    }

    /// Number of longitude columns.
    pub fn nx(&self) -> usize {
        self.lons.len()
    }

    /// Number of grid cells.
    pub fn n_cells(&self) -> usize {
        self.ny() * self.nx()
    }

    /// Calendar date per timestep.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Latitude axis in degrees north.
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// Longitude axis in degrees east.
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// Per-cell land flag.
    pub fn land(&self) -> &[bool] {
        &self.land
    }

    /// Flat temperature data in `[time, lat, lon]` order.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Temperature at timestep `t` and flat cell index `cell`.
    pub fn value(&self, t: usize, cell: usize) -> f64 {
        self.data[t * self.n_cells() + cell]
    }

    /// Returns a reduced copy restricted to a year range and a coarser
    /// spatial sampling.
    ///
    /// Keeps timesteps whose year lies in `start_year..=end_year` (either
    /// bound may be `None` for unbounded) and every `spatial_step`-th row
    /// and column of the grid. `spatial_step` of 1 keeps the full grid.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] when `spatial_step` is zero or the
    /// year range leaves no timesteps.
    pub fn subset(
        &self,
        start_year: Option<i32>,
        end_year: Option<i32>,
        spatial_step: usize,
    ) -> Result<Self, IoError> {
        if spatial_step == 0 {
            return Err(IoError::Validation {
                count: 1,
                details: "spatial_step must be >= 1".to_string(),
            });
        }

        let keep_time: Vec<usize> = (0..self.n_time())
            .filter(|&t| {
                let y = self.dates[t].year();
                start_year.is_none_or(|s| y >= s) && end_year.is_none_or(|e| y <= e)
            })
            .collect();
        if keep_time.is_empty() {
            return Err(IoError::Validation {
                count: 1,
                details: format!(
                    "no timesteps in year range {start_year:?}..={end_year:?}"
                ),
            });
        }

        let keep_y: Vec<usize> = (0..self.ny()).step_by(spatial_step).collect();
        let keep_x: Vec<usize> = (0..self.nx()).step_by(spatial_step).collect();

        let dates: Vec<NaiveDate> = keep_time.iter().map(|&t| self.dates[t]).collect();
        let lats: Vec<f64> = keep_y.iter().map(|&y| self.lats[y]).collect();
        let lons: Vec<f64> = keep_x.iter().map(|&x| self.lons[x]).collect();

        let mut land = Vec::with_capacity(keep_y.len() * keep_x.len());
        for &y in &keep_y {
            for &x in &keep_x {
                land.push(self.land[y * self.nx() + x]);
            }
        }

        let mut data = Vec::with_capacity(dates.len() * land.len());
        for &t in &keep_time {
            let base = t * self.n_cells();
            for &y in &keep_y {
                for &x in &keep_x {
                    data.push(self.data[base + y * self.nx() + x]);
                }
            }
        }

        Self::new(dates, lats, lons, land, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn small_record() -> GriddedTemperature {
        // 4 timesteps over 2 years, 2x2 grid, cell values t*10 + cell.
        let dates = vec![
            date(2000, 7, 1),
            date(2000, 7, 2),
            date(2001, 7, 1),
            date(2001, 7, 2),
        ];
        let data: Vec<f64> = (0..16).map(|i| (i / 4 * 10 + i % 4) as f64).collect();
        GriddedTemperature::new(
            dates,
            vec![40.0, 41.0],
            vec![-100.0, -99.0],
            vec![true, true, true, false],
            data,
        )
        .unwrap()
    }

    #[test]
    fn value_is_time_major() {
        let g = small_record();
        assert_eq!(g.value(0, 0), 0.0);
        assert_eq!(g.value(1, 3), 13.0);
        assert_eq!(g.value(3, 2), 32.0);
    }

    #[test]
    fn rejects_empty_time_axis() {
        let err =
            GriddedTemperature::new(vec![], vec![40.0], vec![-100.0], vec![true], vec![])
                .unwrap_err();
        assert!(matches!(err, IoError::Validation { .. }));
    }

    #[test]
    fn rejects_land_mask_mismatch() {
        let err = GriddedTemperature::new(
            vec![date(2000, 7, 1)],
            vec![40.0, 41.0],
            vec![-100.0],
            vec![true],
            vec![1.0, 2.0],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            IoError::DimensionMismatch { expected: 2, got: 1, .. }
        ));
    }

    #[test]
    fn subset_by_year() {
        let g = small_record();
        let s = g.subset(Some(2001), Some(2001), 1).unwrap();
        assert_eq!(s.n_time(), 2);
        assert_eq!(s.dates()[0], date(2001, 7, 1));
        assert_eq!(s.value(0, 0), 20.0);
    }

    #[test]
    fn subset_spatial_step() {
        let g = small_record();
        let s = g.subset(None, None, 2).unwrap();
        // Step 2 on a 2x2 grid keeps only the (0, 0) cell.
        assert_eq!(s.ny(), 1);
        assert_eq!(s.nx(), 1);
        assert_eq!(s.land(), &[true]);
        assert_eq!(s.value(2, 0), 20.0);
    }

    #[test]
    fn subset_empty_year_range_errors() {
        let g = small_record();
        let err = g.subset(Some(2050), None, 1).unwrap_err();
        assert!(matches!(err, IoError::Validation { .. }));
    }

    #[test]
    fn subset_zero_step_errors() {
        let g = small_record();
        let err = g.subset(None, None, 0).unwrap_err();
        assert!(matches!(err, IoError::Validation { .. }));
    }
}
