//! Geometric primitives for atlas planning.
//!
//! This module contains:
//! - Projected planar types (Point, Envelope)
//! - Boundary polygons with exterior and hole rings
//! - The spherical Mercator projection used as the working coordinate system
//!
//! All planning downstream of the area resolver happens in projected metres;
//! geographic (lon/lat) coordinates only enter through [`projection`].

pub mod envelope;
pub mod polygon;
pub mod projection;

pub use envelope::Envelope;
pub use polygon::{BoundaryPolygon, Ring};
pub use projection::{GeoBBox, GeoPoint, MAX_LATITUDE_DEG, project, unproject};

/// A 2D point in projected metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Small epsilon for floating-point comparisons on projected coordinates.
pub const EPSILON: f64 = 1e-9;

/// Compares two floats for approximate equality.
#[inline]
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}
