//! In-memory geometry provider backed by an R-tree.
//!
//! Serves two purposes: the test double for the planning pipeline, and a
//! small-dataset provider for callers that already hold their geometry in
//! memory. Spatial lookups go through `rstar` so query behavior matches a
//! real spatial index, including seam cases where a geometry touches
//! several cell envelopes.

use std::collections::HashMap;

use rstar::{AABB, RTree, RTreeObject};

use super::{GeometryKind, GeometryProvider, NamedGeometry, RawBoundary};
use crate::error::{AtlasError, Result};
use crate::geometry::{Envelope, Point};

#[derive(Debug, Clone)]
struct StoredGeometry {
    seq: usize,
    item: NamedGeometry,
    bounds: AABB<[f64; 2]>,
}

impl RTreeObject for StoredGeometry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.bounds
    }
}

/// Exact intersection of a polyline with a query rectangle. The R-tree
/// only pre-filters by bounding box; without this, a diagonal street
/// would be reported for every cell its bounding box overlaps instead of
/// just the cells it passes through.
fn path_intersects(envelope: &Envelope, path: &[Point]) -> bool {
    match path {
        [] => false,
        [p] => envelope.contains(*p),
        _ => path
            .windows(2)
            .any(|seg| envelope.intersects_segment(seg[0], seg[1])),
    }
}

fn path_bounds(path: &[Point]) -> Option<AABB<[f64; 2]>> {
    let first = path.first()?;
    let mut min = [first.x, first.y];
    let mut max = [first.x, first.y];
    for p in path {
        min[0] = min[0].min(p.x);
        min[1] = min[1].min(p.y);
        max[0] = max[0].max(p.x);
        max[1] = max[1].max(p.y);
    }
    Some(AABB::from_corners(min, max))
}

/// A [`GeometryProvider`] over geometry held in memory.
#[derive(Debug, Default)]
pub struct MemoryProvider {
    boundaries: HashMap<i64, RawBoundary>,
    tree: RTree<StoredGeometry>,
    inserted: usize,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a boundary under an OSM id.
    pub fn add_boundary(&mut self, osm_id: i64, boundary: RawBoundary) {
        self.boundaries.insert(osm_id, boundary);
    }

    /// Adds a named geometry to the spatial index. Zero-point paths are
    /// ignored, they can never intersect anything.
    pub fn add_geometry(&mut self, geometry: NamedGeometry) {
        if let Some(bounds) = path_bounds(&geometry.path) {
            let seq = self.inserted;
            self.inserted += 1;
            self.tree.insert(StoredGeometry {
                seq,
                item: geometry,
                bounds,
            });
        }
    }

    /// Convenience for street polylines.
    pub fn add_street(&mut self, name: &str, path: Vec<Point>) {
        self.add_geometry(NamedGeometry::new(name, GeometryKind::Street, path));
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl GeometryProvider for MemoryProvider {
    fn resolve_boundary(&self, osm_id: i64) -> Result<RawBoundary> {
        self.boundaries
            .get(&osm_id)
            .cloned()
            .ok_or(AtlasError::NotFound(osm_id))
    }

    fn query_geometries(
        &self,
        envelope: &Envelope,
        buffer_m: f64,
        kind: GeometryKind,
    ) -> Result<Vec<NamedGeometry>> {
        let buffered = envelope.expanded(buffer_m)?;
        let query = AABB::from_corners(
            [buffered.min_x(), buffered.min_y()],
            [buffered.max_x(), buffered.max_y()],
        );
        let mut hits: Vec<&StoredGeometry> = self
            .tree
            .locate_in_envelope_intersecting(&query)
            .filter(|s| s.item.kind == kind && path_intersects(&buffered, &s.item.path))
            .collect();
        // R-tree iteration order is unspecified; return insertion order so
        // identical inputs always produce identical query results.
        hits.sort_by_key(|s| s.seq);
        Ok(hits.into_iter().map(|s| s.item.clone()).collect())
    }
}
