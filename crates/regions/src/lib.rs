//! # helios-regions
//!
//! Named spatial region masks over the analysis grid.
//!
//! A region mask is a boolean per grid cell (flattened `[lat, lon]` order)
//! that is always a subset of the land mask. Masks are a pure function of
//! the static longitude axis and the land mask; they never depend on time.

mod error;
mod masks;

pub use error::RegionError;
pub use masks::{LON_SPLIT_DEG, build_region_masks};

use std::str::FromStr;

/// Geographic region selection for an analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Contiguous United States, split into West / Central-East / US48.
    Us,
    /// Northern Hemisphere latitude band (single mask over all land).
    Nh,
}

impl Region {
    /// Canonical lowercase identifier, as accepted on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Region::Us => "us",
            Region::Nh => "nh",
        }
    }
}

impl FromStr for Region {
    type Err = RegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "us" => Ok(Region::Us),
            "nh" => Ok(Region::Nh),
            other => Err(RegionError::UnknownRegion {
                name: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_regions() {
        assert_eq!("us".parse::<Region>().unwrap(), Region::Us);
        assert_eq!("nh".parse::<Region>().unwrap(), Region::Nh);
        assert_eq!("US".parse::<Region>().unwrap(), Region::Us);
    }

    #[test]
    fn parse_unknown_region_fails() {
        let err = "europe".parse::<Region>().unwrap_err();
        assert_eq!(
            err,
            RegionError::UnknownRegion {
                name: "europe".to_string(),
            }
        );
    }

    #[test]
    fn display_roundtrip() {
        assert_eq!(Region::Us.to_string(), "us");
        assert_eq!(Region::Nh.to_string(), "nh");
    }
}
