//! Error types for the helios-exceedance crate.

/// Error type for all fallible operations in the helios-exceedance crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExceedanceError {
    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a region mask length does not match the grid.
    #[error("mask '{name}' length mismatch: expected {expected}, got {got}")]
    MaskMismatch {
        /// Name of the offending mask.
        name: String,
        /// Expected number of cells.
        expected: usize,
        /// Actual mask length.
        got: usize,
    },
}
