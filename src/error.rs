//! Mapper Error Types
//!
//! Error handling for the cursor mapper. Most runtime conditions in this crate
//! are deliberately *not* errors: configuration inconsistencies are logged and
//! leave state at its last valid value, missing device capabilities silently
//! disable the dependent feature, and unsupported raw samples are ignored.
//! The types here cover the remaining structural failures: invalid device
//! capability descriptions and invalid configuration data handed in by the
//! embedding layer.

use thiserror::Error;

/// Result type for mapper operations
pub type Result<T> = std::result::Result<T, MapperError>;

/// Cursor mapper error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapperError {
    /// Absolute axis reported with an empty or inverted range
    #[error("invalid {axis} range: min {min} must be less than max {max}")]
    InvalidAxisRange {
        /// Axis name (for example "ABS_X")
        axis: &'static str,
        /// Reported minimum raw value
        min: i32,
        /// Reported maximum raw value
        max: i32,
    },

    /// Velocity control parameters that cannot be applied
    #[error("invalid velocity control parameters: {0}")]
    InvalidVelocityParameters(String),

    /// Display viewport with a degenerate physical extent
    #[error("invalid viewport for display {display_id}: {reason}")]
    InvalidViewport {
        /// Display the viewport describes
        display_id: u32,
        /// Why the viewport was rejected
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MapperError::InvalidAxisRange {
            axis: "ABS_X",
            min: 100,
            max: 100,
        };
        assert_eq!(
            err.to_string(),
            "invalid ABS_X range: min 100 must be less than max 100"
        );

        let err = MapperError::InvalidViewport {
            display_id: 3,
            reason: "zero physical width".to_string(),
        };
        assert!(err.to_string().contains("display 3"));
    }
}
