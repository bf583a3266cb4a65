//! Error types for the helios-regions crate.

/// Error type for all fallible operations in the helios-regions crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegionError {
    /// Returned when a region identifier is not one of the known names.
    #[error("unknown region: {name:?} (use 'us' or 'nh')")]
    UnknownRegion {
        /// The identifier that failed to parse.
        name: String,
    },

    /// Returned when the land mask length does not match the grid shape.
    #[error("land mask length mismatch: expected {expected} (ny*nx), got {got}")]
    LandMaskMismatch {
        /// Expected number of cells.
        expected: usize,
        /// Actual mask length.
        got: usize,
    },

    /// Returned when the longitude array length does not match the grid width.
    #[error("longitude length mismatch: expected {expected} (nx), got {got}")]
    LonMismatch {
        /// Expected number of longitudes.
        expected: usize,
        /// Actual array length.
        got: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_region() {
        let err = RegionError::UnknownRegion {
            name: "eu".to_string(),
        };
        assert_eq!(err.to_string(), "unknown region: \"eu\" (use 'us' or 'nh')");
    }

    #[test]
    fn display_land_mask_mismatch() {
        let err = RegionError::LandMaskMismatch {
            expected: 12,
            got: 10,
        };
        assert_eq!(
            err.to_string(),
            "land mask length mismatch: expected 12 (ny*nx), got 10"
        );
    }

    #[test]
    fn display_lon_mismatch() {
        let err = RegionError::LonMismatch {
            expected: 4,
            got: 3,
        };
        assert_eq!(
            err.to_string(),
            "longitude length mismatch: expected 4 (nx), got 3"
        );
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<RegionError>();
    }
}
