//! Gridded daily temperature field with per-timestep calendar metadata.

use crate::error::HeatwaveError;

/// A daily temperature field over a fixed lat/lon grid.
///
/// Values are stored flat in `[time, lat, lon]` order with NaN as the
/// missing-value convention (ocean cells, invalid observations). Each
/// timestep carries its calendar year, month, and no-leap day-of-year in
/// parallel arrays. The field is never mutated after construction; every
/// pipeline stage derives a new value from it.
#[derive(Debug, Clone)]
pub struct DailyField {
    /// Flat data, length `nt * ny * nx`.
    data: Vec<f64>,
    nt: usize,
    ny: usize,
    nx: usize,
    /// Calendar year per timestep.
    years: Vec<i32>,
    /// Calendar month (1..=12) per timestep.
    months: Vec<u8>,
    /// No-leap day-of-year (1..=365) per timestep.
    doys: Vec<u16>,
}

impl DailyField {
    /// Creates a new field after validating shapes and calendar ranges.
    ///
    /// # Errors
    ///
    /// Returns [`HeatwaveError::EmptyData`] for a zero-timestep field,
    /// [`HeatwaveError::LengthMismatch`] when an array length disagrees
    /// with the `(nt, ny, nx)` shape, and [`HeatwaveError::InvalidMonth`]
    /// or [`HeatwaveError::InvalidDoy`] for out-of-range calendar values.
    pub fn new(
        data: Vec<f64>,
        shape: (usize, usize, usize),
        years: Vec<i32>,
        months: Vec<u8>,
        doys: Vec<u16>,
    ) -> Result<Self, HeatwaveError> {
        let (nt, ny, nx) = shape;
        if nt == 0 {
            return Err(HeatwaveError::EmptyData);
        }
        if data.len() != nt * ny * nx {
            return Err(HeatwaveError::LengthMismatch {
                expected: nt * ny * nx,
                got: data.len(),
                field: "data".to_string(),
            });
        }
        for (len, name) in [
            (years.len(), "years"),
            (months.len(), "months"),
            (doys.len(), "doys"),
        ] {
            if len != nt {
                return Err(HeatwaveError::LengthMismatch {
                    expected: nt,
                    got: len,
                    field: name.to_string(),
                });
            }
        }
        for &m in &months {
            if !(1..=12).contains(&m) {
                return Err(HeatwaveError::InvalidMonth { month: m });
            }
        }
        for &d in &doys {
            if !(1..=365).contains(&d) {
                return Err(HeatwaveError::InvalidDoy { doy: d });
            }
        }

        Ok(Self {
            data,
            nt,
            ny,
            nx,
            years,
            months,
            doys,
        })
    }

    /// Builds a field from rows already validated by this crate.
    pub(crate) fn from_validated_parts(
        data: Vec<f64>,
        shape: (usize, usize, usize),
        years: Vec<i32>,
        months: Vec<u8>,
        doys: Vec<u16>,
    ) -> Self {
        let (nt, ny, nx) = shape;
        debug_assert_eq!(data.len(), nt * ny * nx);
        Self {
            data,
            nt,
            ny,
            nx,
            years,
            months,
            doys,
        }
    }

    /// Number of timesteps.
    pub fn n_time(&self) -> usize {
        self.nt
    }

    /// Number of latitude rows.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Number of longitude columns.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of grid cells (`ny * nx`).
    pub fn n_cells(&self) -> usize {
        self.ny * self.nx
    }

    /// Temperature at timestep `t` and flat cell index `cell`.
    pub fn value(&self, t: usize, cell: usize) -> f64 {
        self.data[t * self.n_cells() + cell]
    }

    /// The flat data slice in `[time, lat, lon]` order.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Calendar year per timestep.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Calendar month per timestep.
    pub fn months(&self) -> &[u8] {
        &self.months
    }

    /// No-leap day-of-year per timestep.
    pub fn doys(&self) -> &[u16] {
        &self.doys
    }

    /// Sorted distinct calendar years present in the field.
    pub fn distinct_years(&self) -> Vec<i32> {
        let mut years = self.years.clone();
        years.sort_unstable();
        years.dedup();
        years
    }
}
