//! Error types for the helios-heatwave crate.

/// Error type for all fallible operations in the helios-heatwave crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HeatwaveError {
    /// Returned when the input field holds no timesteps.
    #[error("input field is empty")]
    EmptyData,

    /// Returned when array lengths do not match.
    #[error("length mismatch: expected {expected}, got {got} for {field}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
        /// Name of the mismatched field.
        field: String,
    },

    /// Returned when a month value is outside 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month value.
        month: u8,
    },

    /// Returned when a day-of-year value is outside 1..=365.
    #[error("invalid day of year: {doy} (must be 1..=365)")]
    InvalidDoy {
        /// The invalid day-of-year value.
        doy: u16,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a day-of-year key has no threshold entry.
    ///
    /// Thresholds exist only for day-of-year keys present in the seasonal
    /// record; querying any other key is a caller error.
    #[error("no threshold for day of year {doy}")]
    MissingThreshold {
        /// The day-of-year key with no threshold.
        doy: u16,
    },
}
