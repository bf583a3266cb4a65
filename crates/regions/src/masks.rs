//! Region mask construction from longitudes and the land mask.

use std::collections::BTreeMap;

use tracing::debug;

use crate::Region;
use crate::error::RegionError;

/// Longitude (degrees east) splitting the western from the central-eastern
/// contiguous US. Cells strictly west of the split are `West`; cells at or
/// east of it are `Central-East`.
pub const LON_SPLIT_DEG: f64 = -105.0;

/// Builds boolean masks for each named region of `region`.
///
/// `lons` is the static longitude axis (length `nx`), `land` the flattened
/// `[lat, lon]` land mask (length `ny * nx`). Every returned mask is ANDed
/// with `land`, so region masks only ever include land cells.
///
/// For [`Region::Us`] the map holds `West`, `Central-East`, and `US48`
/// (all land, the union of the other two). For [`Region::Nh`] it holds a
/// single `NH` mask equal to the land mask, the input dataset being
/// assumed pre-restricted to the hemisphere latitude band.
///
/// # Errors
///
/// Returns [`RegionError::LonMismatch`] or [`RegionError::LandMaskMismatch`]
/// when array lengths disagree with the `(ny, nx)` shape.
pub fn build_region_masks(
    region: Region,
    lons: &[f64],
    land: &[bool],
    ny: usize,
    nx: usize,
) -> Result<BTreeMap<String, Vec<bool>>, RegionError> {
    if lons.len() != nx {
        return Err(RegionError::LonMismatch {
            expected: nx,
            got: lons.len(),
        });
    }
    let n_cells = ny * nx;
    if land.len() != n_cells {
        return Err(RegionError::LandMaskMismatch {
            expected: n_cells,
            got: land.len(),
        });
    }

    let mut masks = BTreeMap::new();
    match region {
        Region::Us => {
            let mut west = vec![false; n_cells];
            let mut central_east = vec![false; n_cells];
            let mut us48 = vec![false; n_cells];
            for y in 0..ny {
                for x in 0..nx {
                    let cell = y * nx + x;
                    if !land[cell] {
                        continue;
                    }
                    us48[cell] = true;
                    if lons[x] < LON_SPLIT_DEG {
                        west[cell] = true;
                    } else {
                        central_east[cell] = true;
                    }
                }
            }
            debug!(
                west = count(&west),
                central_east = count(&central_east),
                us48 = count(&us48),
                "built US region masks"
            );
            masks.insert("West".to_string(), west);
            masks.insert("Central-East".to_string(), central_east);
            masks.insert("US48".to_string(), us48);
        }
        Region::Nh => {
            let nh = land.to_vec();
            debug!(nh = count(&nh), "built NH region mask");
            masks.insert("NH".to_string(), nh);
        }
    }
    Ok(masks)
}

fn count(mask: &[bool]) -> usize {
    mask.iter().filter(|&&b| b).count()
}
