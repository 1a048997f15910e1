//! Axis-aligned bounding envelopes in projected coordinates.

use serde::{Deserialize, Serialize};

use super::Point;
use crate::error::{AtlasError, Result};

/// An axis-aligned bounding box in projected metres.
///
/// Invariant: `min_x <= max_x` and `min_y <= max_y`, and the envelope is
/// never empty (both extents strictly positive). Constructors enforce this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Envelope {
    /// Creates an envelope from min/max corners.
    ///
    /// Fails with `AtlasError::Layout` when the corners are inverted,
    /// degenerate or not finite.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self> {
        if ![min_x, min_y, max_x, max_y].iter().all(|v| v.is_finite()) {
            return Err(AtlasError::Layout(format!(
                "non-finite envelope corner ({min_x}, {min_y}, {max_x}, {max_y})"
            )));
        }
        if min_x >= max_x || min_y >= max_y {
            return Err(AtlasError::Layout(format!(
                "degenerate envelope ({min_x}, {min_y}) - ({max_x}, {max_y})"
            )));
        }
        Ok(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Smallest envelope containing every point of the iterator.
    ///
    /// Returns `AmbiguousGeometry` when the points span no area.
    pub fn of_points<I>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        if min_x >= max_x || min_y >= max_y {
            return Err(AtlasError::AmbiguousGeometry(
                "point set spans no area".to_string(),
            ));
        }
        Self::new(min_x, min_y, max_x, max_y)
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns true if the point lies inside or on the boundary.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Returns true if the two envelopes share any point, boundaries
    /// included. Geometry exactly on a shared seam therefore intersects
    /// the cells on both sides of it.
    pub fn intersects(&self, other: &Envelope) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    /// Returns true if the segment from `a` to `b` passes through the
    /// envelope, boundaries included. Liang-Barsky clipping; a
    /// zero-length segment degenerates to a point-containment test.
    pub fn intersects_segment(&self, a: Point, b: Point) -> bool {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let mut t0 = 0.0_f64;
        let mut t1 = 1.0_f64;
        for (p, q) in [
            (-dx, a.x - self.min_x),
            (dx, self.max_x - a.x),
            (-dy, a.y - self.min_y),
            (dy, self.max_y - a.y),
        ] {
            if p == 0.0 {
                // parallel to this edge: outside stays outside
                if q < 0.0 {
                    return false;
                }
            } else {
                let r = q / p;
                if p < 0.0 {
                    if r > t1 {
                        return false;
                    }
                    if r > t0 {
                        t0 = r;
                    }
                } else {
                    if r < t0 {
                        return false;
                    }
                    if r < t1 {
                        t1 = r;
                    }
                }
            }
        }
        true
    }

    /// Returns the envelope grown by `amount` metres on every side.
    /// A negative amount shrinks it; shrinking past degeneracy is an error.
    pub fn expanded(&self, amount: f64) -> Result<Self> {
        Self::new(
            self.min_x - amount,
            self.min_y - amount,
            self.max_x + amount,
            self.max_y + amount,
        )
    }

    /// Grows individual sides. Used for seam overlap, which only applies
    /// toward interior neighbours.
    pub fn extended(&self, left: f64, bottom: f64, right: f64, top: f64) -> Result<Self> {
        Self::new(
            self.min_x - left,
            self.min_y - bottom,
            self.max_x + right,
            self.max_y + top,
        )
    }
}
