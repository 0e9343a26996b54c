//! Validation errors returned by the checked constructors.

use thiserror::Error;

/// Structurally invalid input to one of the `try_new` constructors.
///
/// Insertion itself never produces an error, out of bounds points are rejected with `false`.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    #[error("point coordinates must be finite, got ({x}, {y})")]
    NonFiniteCoordinate { x: f64, y: f64 },

    #[error("region must be finite, got origin ({x}, {y}) size {width}x{height}")]
    NonFiniteRegion {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },

    #[error("region size must not be negative, got {width}x{height}")]
    NegativeSize { width: f64, height: f64 },

    #[error("node capacity must be at least 1")]
    ZeroCapacity,
}

pub type Result<T> = std::result::Result<T, Error>;
