//! Boundary polygons: closed rings in projected coordinates.

use super::{Envelope, Point};
use crate::error::{AtlasError, Result};

/// A closed sequence of projected points.
///
/// Rings are stored without a repeated closing vertex; closure is implicit
/// between the last and the first point.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    points: Vec<Point>,
}

impl Ring {
    /// Builds a ring, dropping a repeated closing vertex if present.
    ///
    /// A ring needs at least three distinct vertices to enclose area.
    pub fn new(mut points: Vec<Point>) -> Result<Self> {
        if points.len() >= 2 {
            let first = points[0];
            let last = points[points.len() - 1];
            if first.x == last.x && first.y == last.y {
                points.pop();
            }
        }
        if points.len() < 3 {
            return Err(AtlasError::AmbiguousGeometry(format!(
                "ring with {} vertices encloses no area",
                points.len()
            )));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Signed area by the shoelace formula. Positive for counter-clockwise
    /// winding.
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        let mut acc = 0.0;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            acc += a.x * b.y - b.x * a.y;
        }
        acc / 2.0
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }
}

/// A resolved administrative boundary: one or more exterior rings (islands,
/// enclaves) and zero or more holes, all in projected metres.
///
/// Immutable once resolved; downstream components only read it.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryPolygon {
    exteriors: Vec<Ring>,
    holes: Vec<Ring>,
}

impl BoundaryPolygon {
    /// Assembles a polygon from its rings.
    ///
    /// Fails with `AmbiguousGeometry` when the enclosed area is zero: a
    /// degenerate boundary cannot drive any layout.
    pub fn new(exteriors: Vec<Ring>, holes: Vec<Ring>) -> Result<Self> {
        if exteriors.is_empty() {
            return Err(AtlasError::AmbiguousGeometry(
                "polygon without exterior rings".to_string(),
            ));
        }
        let poly = Self { exteriors, holes };
        if poly.area() <= super::EPSILON {
            return Err(AtlasError::AmbiguousGeometry(
                "polygon encloses zero area".to_string(),
            ));
        }
        Ok(poly)
    }

    pub fn exteriors(&self) -> &[Ring] {
        &self.exteriors
    }

    pub fn holes(&self) -> &[Ring] {
        &self.holes
    }

    /// Net enclosed area: exterior rings minus holes.
    pub fn area(&self) -> f64 {
        let ext: f64 = self.exteriors.iter().map(Ring::area).sum();
        let holes: f64 = self.holes.iter().map(Ring::area).sum();
        (ext - holes).max(0.0)
    }

    /// Bounding envelope over all exterior rings.
    pub fn envelope(&self) -> Result<Envelope> {
        Envelope::of_points(
            self.exteriors
                .iter()
                .flat_map(|r| r.points().iter().copied()),
        )
    }
}
