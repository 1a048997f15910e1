//! Spherical Mercator projection (EPSG:3857 style).
//!
//! The working projection for all planning: metric near city scale, axis
//! aligned with screen/paper conventions, and cheap to invert. Latitudes
//! beyond the Mercator domain cannot be projected and surface as
//! `AtlasError::Projection`.

use serde::{Deserialize, Serialize};

use super::Point;
use crate::error::{AtlasError, Result};

/// Mean Earth radius used by the spherical Mercator projection, in metres.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Largest latitude representable in spherical Mercator.
pub const MAX_LATITUDE_DEG: f64 = 85.051_128_779_806_59;

/// A geographic coordinate in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// A geographic bounding box in WGS84 degrees, used for explicit area
/// selections before projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl GeoBBox {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Corner ring of the box, counter-clockwise, closed.
    pub fn corners(&self) -> [GeoPoint; 5] {
        [
            GeoPoint::new(self.west, self.south),
            GeoPoint::new(self.east, self.south),
            GeoPoint::new(self.east, self.north),
            GeoPoint::new(self.west, self.north),
            GeoPoint::new(self.west, self.south),
        ]
    }
}

/// Projects a geographic coordinate into Mercator metres.
pub fn project(p: GeoPoint) -> Result<Point> {
    if !p.lon.is_finite() || !p.lat.is_finite() {
        return Err(AtlasError::Projection(format!(
            "non-finite coordinate ({}, {})",
            p.lon, p.lat
        )));
    }
    if p.lon < -180.0 || p.lon > 180.0 {
        return Err(AtlasError::Projection(format!(
            "longitude {} outside [-180, 180]",
            p.lon
        )));
    }
    if p.lat.abs() > MAX_LATITUDE_DEG {
        return Err(AtlasError::Projection(format!(
            "latitude {} outside the Mercator domain (+/-{MAX_LATITUDE_DEG})",
            p.lat
        )));
    }
    let x = EARTH_RADIUS_M * p.lon.to_radians();
    let lat_rad = p.lat.to_radians();
    let y = EARTH_RADIUS_M * (std::f64::consts::FRAC_PI_4 + lat_rad / 2.0).tan().ln();
    Ok(Point::new(x, y))
}

/// Inverse projection, back to WGS84 degrees.
pub fn unproject(p: Point) -> GeoPoint {
    let lon = (p.x / EARTH_RADIUS_M).to_degrees();
    let lat = (2.0 * (p.y / EARTH_RADIUS_M).exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees();
    GeoPoint::new(lon, lat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::approx_eq;

    #[test]
    fn equator_prime_meridian_is_origin() {
        let p = project(GeoPoint::new(0.0, 0.0)).unwrap();
        assert!(approx_eq(p.x, 0.0, 1e-6));
        assert!(approx_eq(p.y, 0.0, 1e-6));
    }

    #[test]
    fn round_trips_city_coordinates() {
        let orig = GeoPoint::new(2.3522, 48.8566);
        let back = unproject(project(orig).unwrap());
        assert!(approx_eq(back.lon, orig.lon, 1e-9));
        assert!(approx_eq(back.lat, orig.lat, 1e-9));
    }

    #[test]
    fn rejects_polar_latitudes() {
        assert!(project(GeoPoint::new(0.0, 89.0)).is_err());
        assert!(project(GeoPoint::new(0.0, f64::NAN)).is_err());
        assert!(project(GeoPoint::new(181.0, 0.0)).is_err());
    }
}
