//! Seasonal restriction of the daily field to May-September.

use tracing::debug;

use crate::field::DailyField;

/// First month of the analysis season (May).
pub const SEASON_START_MONTH: u8 = 5;

/// Last month of the analysis season (September, inclusive).
pub const SEASON_END_MONTH: u8 = 9;

/// Returns true when `month` lies in the May-September season.
pub fn in_season(month: u8) -> bool {
    (SEASON_START_MONTH..=SEASON_END_MONTH).contains(&month)
}

/// Restricts `field` to timesteps whose month is in May-September.
///
/// Pure filter over the time axis; the spatial grid is unchanged. All
/// downstream threshold and run computations operate on the returned
/// field only, so days outside the season can never be flagged and runs
/// can never span the winter gap.
pub fn select_season(field: &DailyField) -> DailyField {
    let n_cells = field.n_cells();
    let keep: Vec<usize> = field
        .months()
        .iter()
        .enumerate()
        .filter(|(_, &m)| in_season(m))
        .map(|(t, _)| t)
        .collect();

    let mut data = Vec::with_capacity(keep.len() * n_cells);
    let mut years = Vec::with_capacity(keep.len());
    let mut months = Vec::with_capacity(keep.len());
    let mut doys = Vec::with_capacity(keep.len());
    for &t in &keep {
        data.extend_from_slice(&field.data()[t * n_cells..(t + 1) * n_cells]);
        years.push(field.years()[t]);
        months.push(field.months()[t]);
        doys.push(field.doys()[t]);
    }

    debug!(
        n_in = field.n_time(),
        n_season = keep.len(),
        "selected May-September timesteps"
    );

    DailyField::from_validated_parts(
        data,
        (keep.len(), field.ny(), field.nx()),
        years,
        months,
        doys,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_months() {
        assert!(!in_season(4));
        assert!(in_season(5));
        assert!(in_season(9));
        assert!(!in_season(10));
    }

    #[test]
    fn filters_out_winter() {
        // Apr 30, May 1, Sep 30, Oct 1 on a single cell.
        let field = DailyField::new(
            vec![1.0, 2.0, 3.0, 4.0],
            (4, 1, 1),
            vec![2000; 4],
            vec![4, 5, 9, 10],
            vec![120, 121, 273, 274],
        )
        .unwrap();

        let season = select_season(&field);
        assert_eq!(season.n_time(), 2);
        assert_eq!(season.data(), &[2.0, 3.0]);
        assert_eq!(season.months(), &[5, 9]);
        assert_eq!(season.doys(), &[121, 273]);
    }

    #[test]
    fn preserves_grid_shape() {
        let field = DailyField::new(
            vec![0.0; 6],
            (3, 1, 2),
            vec![2000; 3],
            vec![1, 6, 12],
            vec![1, 160, 365],
        )
        .unwrap();
        let season = select_season(&field);
        assert_eq!((season.ny(), season.nx()), (1, 2));
        assert_eq!(season.n_time(), 1);
    }
}
