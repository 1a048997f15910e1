//! Geometry provider abstraction.
//!
//! The planning engine never talks to a spatial database directly; it goes
//! through the [`GeometryProvider`] trait, passed explicitly into every
//! request. This keeps database state out of the core and lets tests run
//! against the in-memory [`MemoryProvider`].
//!
//! Coordinate conventions follow the usual osm2pgsql setup: stored
//! geometry and spatial queries are in projected (Mercator) metres, while
//! resolved boundaries come back as geographic rings that the area
//! resolver projects itself.

pub mod memory;

pub use memory::MemoryProvider;

use crate::error::Result;
use crate::geometry::{Envelope, GeoPoint, Point};

/// Kind of named geometry to query for the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    /// Named highways.
    Street,
    /// Points of interest (schools, townhalls, places of worship...).
    Amenity,
    /// Settlements and named quarters.
    Place,
}

/// A named geometry returned by a spatial query: a display name and a
/// polyline path in projected metres.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedGeometry {
    pub name: String,
    pub kind: GeometryKind,
    pub path: Vec<Point>,
}

impl NamedGeometry {
    pub fn new(name: impl Into<String>, kind: GeometryKind, path: Vec<Point>) -> Self {
        Self {
            name: name.into(),
            kind,
            path,
        }
    }
}

/// A boundary as stored by the provider: exterior rings and holes, in
/// geographic (WGS84) coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawBoundary {
    pub exteriors: Vec<Vec<GeoPoint>>,
    pub holes: Vec<Vec<GeoPoint>>,
}

/// Read access to the spatial dataset backing one planning request.
///
/// `Sync` because grid cells are queried from a worker pool.
pub trait GeometryProvider: Sync {
    /// Resolves an administrative boundary by OSM id. Negative ids denote
    /// relation-derived polygons, positive ids simple ways or nodes.
    ///
    /// Fails with `AtlasError::NotFound` when the id has no geometry.
    fn resolve_boundary(&self, osm_id: i64) -> Result<RawBoundary>;

    /// All named geometries of `kind` intersecting `envelope` grown by
    /// `buffer_m` metres on every side. Intersection, not containment:
    /// geometry crossing the envelope edge is included.
    fn query_geometries(
        &self,
        envelope: &Envelope,
        buffer_m: f64,
        kind: GeometryKind,
    ) -> Result<Vec<NamedGeometry>>;
}
