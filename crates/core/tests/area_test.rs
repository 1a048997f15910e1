//! Tests for area resolution: OSM id lookup, explicit bounding boxes and
//! degenerate geometry.

use atlas_core::area::{AreaSelection, resolve};
use atlas_core::error::AtlasError;
use atlas_core::geometry::{GeoBBox, GeoPoint, approx_eq, project};
use atlas_core::provider::{MemoryProvider, RawBoundary};

fn ring(coords: &[(f64, f64)]) -> Vec<GeoPoint> {
    coords.iter().map(|(lon, lat)| GeoPoint::new(*lon, *lat)).collect()
}

#[test]
fn boundary_id_resolves_to_projected_polygon() {
    let mut provider = MemoryProvider::new();
    provider.add_boundary(
        -10407,
        RawBoundary {
            exteriors: vec![ring(&[
                (2.30, 48.84),
                (2.39, 48.84),
                (2.39, 48.89),
                (2.30, 48.89),
            ])],
            holes: vec![],
        },
    );

    let area = resolve(&provider, &AreaSelection::OsmId(-10407)).unwrap();
    let envelope = area.envelope();
    let sw = project(GeoPoint::new(2.30, 48.84)).unwrap();
    let ne = project(GeoPoint::new(2.39, 48.89)).unwrap();
    assert!(approx_eq(envelope.min_x(), sw.x, 1e-6));
    assert!(approx_eq(envelope.max_y(), ne.y, 1e-6));
    assert!(area.polygon().area() > 0.0);
}

#[test]
fn multi_ring_boundaries_keep_enclaves_and_holes() {
    let mut provider = MemoryProvider::new();
    provider.add_boundary(
        -7444,
        RawBoundary {
            exteriors: vec![
                ring(&[(0.0, 0.0), (0.1, 0.0), (0.1, 0.1), (0.0, 0.1)]),
                // a detached island east of the main area
                ring(&[(0.2, 0.0), (0.25, 0.0), (0.25, 0.05), (0.2, 0.05)]),
            ],
            holes: vec![ring(&[(0.02, 0.02), (0.04, 0.02), (0.04, 0.04), (0.02, 0.04)])],
        },
    );

    let area = resolve(&provider, &AreaSelection::OsmId(-7444)).unwrap();
    assert_eq!(area.polygon().exteriors().len(), 2);
    assert_eq!(area.polygon().holes().len(), 1);
    // the envelope spans out to the island
    let east = project(GeoPoint::new(0.25, 0.0)).unwrap();
    assert!(approx_eq(area.envelope().max_x(), east.x, 1e-6));
}

#[test]
fn unknown_id_is_not_found() {
    let provider = MemoryProvider::new();
    let r = resolve(&provider, &AreaSelection::OsmId(123456));
    assert!(matches!(r, Err(AtlasError::NotFound(123456))));
}

#[test]
fn zero_area_boundary_is_ambiguous() {
    let mut provider = MemoryProvider::new();
    // three collinear points along the equator
    provider.add_boundary(
        77,
        RawBoundary {
            exteriors: vec![ring(&[(0.0, 0.0), (0.05, 0.0), (0.1, 0.0)])],
            holes: vec![],
        },
    );

    let r = resolve(&provider, &AreaSelection::OsmId(77));
    assert!(matches!(r, Err(AtlasError::AmbiguousGeometry(_))));
}

#[test]
fn bbox_selection_projects_all_corners() {
    let provider = MemoryProvider::new();
    let area = resolve(
        &provider,
        &AreaSelection::BoundingBox(GeoBBox::new(-1.0901, 44.4778, -1.0637, 44.4883)),
    )
    .unwrap();
    assert!(area.envelope().width() > 0.0);
    assert!(area.envelope().height() > 0.0);
}
