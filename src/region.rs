use crate::{Error, Point, Result};

/// Axis aligned rectangle `[x, x + width] x [y, y + height]`.
///
/// Both predicates treat all four edges as part of the region.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Region {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Region {
    /// Negative or non-finite sizes are not checked, see `try_new`.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn try_new(x: f64, y: f64, width: f64, height: f64) -> Result<Self> {
        if !(x.is_finite() && y.is_finite() && width.is_finite() && height.is_finite()) {
            return Err(Error::NonFiniteRegion {
                x,
                y,
                width,
                height,
            });
        }
        if width < 0. || height < 0. {
            return Err(Error::NegativeSize { width, height });
        }
        Ok(Self::new(x, y, width, height))
    }

    /// The smallest region containing every point of `points`.
    ///
    /// Returns an empty region at the origin if there are no points.
    pub fn bounding<'a, It>(points: It) -> Self
    where
        It: IntoIterator<Item = &'a Point>,
    {
        let mut min = [std::f64::INFINITY; 2];
        let mut max = [std::f64::NEG_INFINITY; 2];
        for p in points {
            min[0] = min[0].min(p.x);
            min[1] = min[1].min(p.y);
            max[0] = max[0].max(p.x);
            max[1] = max[1].max(p.y);
        }
        if min[0] > max[0] || min[1] > max[1] {
            return Self::default();
        }
        Self::new(
            min[0],
            min[1],
            span(min[0], max[0]),
            span(min[1], max[1]),
        )
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2., self.y + self.height / 2.)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.x <= point.x && point.x <= self.right() && self.y <= point.y && point.y <= self.bottom()
    }

    /// Touching edges count as intersecting.
    pub fn intersects(&self, other: &Region) -> bool {
        !(other.x > self.right()
            || other.right() < self.x
            || other.y > self.bottom()
            || other.bottom() < self.y)
    }

    /// Split into four equal quadrants by halving the width and height.
    ///
    /// Order: northeast, northwest, southeast, southwest. North is the smaller `y`.
    ///
    /// The eastern and southern quadrants always reach this region's right and bottom edge, so
    /// every point of the region is inside at least one quadrant.
    pub fn quadrants(&self) -> [Region; 4] {
        let w = self.width / 2.;
        let h = self.height / 2.;
        let Self { x, y, .. } = *self;
        let east = span(x + w, self.right());
        let south = span(y + h, self.bottom());
        [
            Self::new(x + w, y, east, h),
            Self::new(x, y, w, h),
            Self::new(x + w, y + h, east, south),
            Self::new(x, y + h, w, south),
        ]
    }

    /// Mirror the region inside a frame of the given height: `[y, y + h]` maps to
    /// `[height - y - h, height - y]`.
    pub fn reflect_y(&self, height: f64) -> Self {
        Self::new(self.x, height - self.bottom(), self.width, self.height)
    }
}

/// Width of `[min, max]` such that `min + width >= max` still holds after rounding.
fn span(min: f64, max: f64) -> f64 {
    let mut width = max - min;
    while min + width < max {
        width += width.abs().max(std::f64::MIN_POSITIVE) * std::f64::EPSILON;
    }
    width
}
