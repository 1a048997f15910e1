//! Area resolution: from an OSM id or explicit bounding box to a
//! projected boundary polygon and its envelope.

use tracing::debug;

use crate::error::{AtlasError, Result};
use crate::geometry::{BoundaryPolygon, Envelope, GeoBBox, GeoPoint, Point, Ring, project};
use crate::provider::GeometryProvider;

/// What the caller wants an atlas of.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AreaSelection {
    /// An administrative boundary by OSM id. Negative ids denote
    /// relation-derived polygons, positive ids simple ways or nodes.
    OsmId(i64),
    /// An explicit geographic bounding box.
    BoundingBox(GeoBBox),
}

/// The canonical area for one request: the boundary polygon and its
/// bounding envelope, both in the working projection. Immutable once
/// resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedArea {
    polygon: BoundaryPolygon,
    envelope: Envelope,
}

impl ResolvedArea {
    pub fn polygon(&self) -> &BoundaryPolygon {
        &self.polygon
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }
}

/// Resolves a selection into a projected polygon and envelope.
///
/// The only side effect is a read against the provider. Fails with
/// `NotFound` for unknown ids, `Projection` when coordinates cannot be
/// projected, and `AmbiguousGeometry` when the resolved polygon encloses
/// no area.
pub fn resolve(provider: &dyn GeometryProvider, selection: &AreaSelection) -> Result<ResolvedArea> {
    let polygon = match selection {
        AreaSelection::OsmId(osm_id) => {
            debug!(osm_id, "resolving administrative boundary");
            let raw = provider.resolve_boundary(*osm_id)?;
            let exteriors = project_rings(&raw.exteriors)?;
            let holes = project_rings(&raw.holes)?;
            BoundaryPolygon::new(exteriors, holes)?
        }
        AreaSelection::BoundingBox(bbox) => {
            debug!(?bbox, "resolving explicit bounding box");
            bbox_polygon(bbox)?
        }
    };

    let envelope = polygon.envelope()?;
    debug!(
        width_m = envelope.width(),
        height_m = envelope.height(),
        "resolved area"
    );
    Ok(ResolvedArea { polygon, envelope })
}

fn project_rings(rings: &[Vec<GeoPoint>]) -> Result<Vec<Ring>> {
    rings
        .iter()
        .map(|ring| {
            let points: Vec<Point> = ring
                .iter()
                .map(|p| project(*p))
                .collect::<Result<Vec<Point>>>()?;
            Ring::new(points)
        })
        .collect()
}

/// An explicit bbox becomes a one-ring rectangle so everything downstream
/// handles a single polygon shape.
fn bbox_polygon(bbox: &GeoBBox) -> Result<BoundaryPolygon> {
    if bbox.west >= bbox.east || bbox.south >= bbox.north {
        return Err(AtlasError::AmbiguousGeometry(format!(
            "bounding box ({}, {}) - ({}, {}) spans no area",
            bbox.west, bbox.south, bbox.east, bbox.north
        )));
    }
    let corners: Vec<Point> = bbox
        .corners()
        .iter()
        .map(|p| project(*p))
        .collect::<Result<Vec<Point>>>()?;
    BoundaryPolygon::new(vec![Ring::new(corners)?], vec![])
}
