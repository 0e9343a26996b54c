//! Point Quadtree.
//!
//! A spatial index over 2D points: every node owns a region and a bucket of up to `capacity`
//! points, and splits into four quadrants the first time the bucket overflows.
//!
//! # Contracts:
//! - Regions are boundary inclusive on all four sides.
//! - Insertion never fails loudly, points outside the root region are rejected with `false`.
//! - Coordinates and sizes are expected to be finite, use the `try_new` constructors to check.
//!
pub mod error;
pub mod quadtree;
pub mod region;

pub use error::{Error, Result};
pub use quadtree::{Children, Config, Nodes, Quadtree, DEFAULT_MAX_DEPTH};
pub use region::Region;

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Same as `new` but rejects NaN and infinite coordinates.
    pub fn try_new(x: f64, y: f64) -> Result<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(Error::NonFiniteCoordinate { x, y });
        }
        Ok(Self { x, y })
    }

    pub fn distance_to(&self, rhs: &Self) -> f64 {
        let x = self.x - rhs.x;
        let y = self.y - rhs.y;
        (x * x + y * y).sqrt()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
