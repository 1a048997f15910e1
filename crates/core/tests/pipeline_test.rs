//! End-to-end tests: selection through page assembly.

use atlas_core::area::AreaSelection;
use atlas_core::cancel::CancelToken;
use atlas_core::config::RenderConfig;
use atlas_core::error::AtlasError;
use atlas_core::geometry::{GeoBBox, Point};
use atlas_core::grid::CellId;
use atlas_core::index::NaturalCollator;
use atlas_core::layout::{PageDescriptor, PageKind, PaperFormat};
use atlas_core::provider::{GeometryKind, MemoryProvider, NamedGeometry};
use atlas_core::{AtlasBuilder, plan_atlas};

/// One page covers exactly 6000x6000 ground metres.
fn test_config() -> RenderConfig {
    RenderConfig {
        paper: PaperFormat {
            name: "test square".to_string(),
            width_mm: 190.0,
            height_mm: 190.0,
            margin_mm: 10.0,
        },
        scale_denominator: 40_000.0,
        overlap_mm: 0.0,
        grid_label_margin_mm: 10.0,
        threads: Some(2),
        ..RenderConfig::default()
    }
}

/// Roughly 10x10km at the equator, projecting to an envelope with its
/// south-west corner at the origin.
fn ten_km_selection() -> AreaSelection {
    AreaSelection::BoundingBox(GeoBBox::new(0.0, 0.0, 0.09, 0.09))
}

fn city_provider() -> MemoryProvider {
    let mut provider = MemoryProvider::new();
    provider.add_street("Harbour Street", vec![Point::new(500.0, 9000.0), Point::new(2000.0, 9000.0)]);
    provider.add_street("Mill Road", vec![Point::new(7000.0, 9000.0), Point::new(8000.0, 8000.0)]);
    provider.add_street("Quay Lane", vec![Point::new(8000.0, 1000.0), Point::new(8500.0, 1500.0)]);
    provider
}

#[test]
fn atlas_pages_are_numbered_maps_then_overview_then_index() {
    let provider = city_provider();
    let plan = plan_atlas(
        &provider,
        &ten_km_selection(),
        &test_config(),
        &[GeometryKind::Street],
        &NaturalCollator,
        &CancelToken::new(),
    )
    .unwrap();

    assert_eq!((plan.grid.rows(), plan.grid.cols()), (2, 2));
    assert_eq!(plan.page_count(), 6);

    let numbers: Vec<usize> = plan.pages.iter().map(|p| p.number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);

    // detail pages in grid order
    for (page, expected) in plan.pages[..4].iter().zip(["A1", "B1", "A2", "B2"]) {
        match &page.kind {
            PageKind::Map { label, .. } => assert_eq!(label, expected),
            other => panic!("expected a map page, got {other:?}"),
        }
    }
    assert!(plan.pages[4].is_overview());
    assert!(plan.pages[5].is_index());

    // the overview runs at a coarser scale than the detail pages
    if let PageKind::Overview {
        scale_denominator,
        labels,
        ..
    } = &plan.pages[4].kind
    {
        assert!(*scale_denominator > 40_000.0);
        assert_eq!(labels.columns, vec!["A", "B"]);
        assert_eq!(labels.rows, vec!["1", "2"]);
    }
}

#[test]
fn index_entries_reference_the_grid_cells_of_their_pages() {
    let provider = city_provider();
    let plan = plan_atlas(
        &provider,
        &ten_km_selection(),
        &test_config(),
        &[GeometryKind::Street],
        &NaturalCollator,
        &CancelToken::new(),
    )
    .unwrap();

    let names: Vec<&str> = plan.index.entries.iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["Harbour Street", "Mill Road", "Quay Lane"]);

    let harbour = &plan.index.entries[0];
    assert_eq!(harbour.squares_label(), "A1");
    // every referenced cell has a matching detail page
    for entry in &plan.index.entries {
        for cell in entry.cells() {
            assert!(plan.grid.cell(*cell).is_some());
        }
    }
}

#[test]
fn single_page_areas_have_no_overview() {
    let provider = {
        let mut p = MemoryProvider::new();
        p.add_street("Only Street", vec![Point::new(100.0, 100.0), Point::new(400.0, 400.0)]);
        p
    };
    // ~4.5km square fits one 6km page
    let selection = AreaSelection::BoundingBox(GeoBBox::new(0.0, 0.0, 0.04, 0.04));
    let plan = plan_atlas(
        &provider,
        &selection,
        &test_config(),
        &[GeometryKind::Street],
        &NaturalCollator,
        &CancelToken::new(),
    )
    .unwrap();

    assert!(plan.grid.is_single_page());
    assert!(plan.pages.iter().all(|p| !p.is_overview()));
    assert_eq!(plan.pages[0].number, 1);
    assert!(plan.pages[0].is_map());
    assert!(plan.pages[1].is_index());
}

#[test]
fn overlap_expands_viewports_toward_interior_neighbours_only() {
    let provider = city_provider();
    let mut config = test_config();
    config.overlap_mm = 10.0; // 400m at 1:40000
    let plan = plan_atlas(
        &provider,
        &ten_km_selection(),
        &config,
        &[GeometryKind::Street],
        &NaturalCollator,
        &CancelToken::new(),
    )
    .unwrap();

    let cell = plan.grid.cell(CellId::new(0, 0)).unwrap();
    let tile = *cell.envelope();
    let PageKind::Map { viewport, .. } = &plan.pages[0].kind else {
        panic!("first page must be a map page");
    };
    // outer edges unchanged, interior edges grown by half the overlap
    assert_eq!(viewport.min_x(), tile.min_x());
    assert_eq!(viewport.max_y(), tile.max_y());
    assert_eq!(viewport.max_x(), tile.max_x() + 200.0);
    assert_eq!(viewport.min_y(), tile.min_y() - 200.0);
}

#[test]
fn builder_runs_the_pipeline_and_honours_cancellation() {
    let provider = city_provider();
    let plan = AtlasBuilder::new(ten_km_selection())
        .config(test_config())
        .entries_per_page(2)
        .plan(&provider)
        .unwrap();
    assert_eq!(plan.index.pages.len(), 2);

    let token = CancelToken::new();
    token.cancel();
    let r = AtlasBuilder::new(ten_km_selection())
        .config(test_config())
        .cancel_token(token)
        .plan(&provider);
    assert!(matches!(r, Err(AtlasError::Cancelled)));
}

#[test]
fn amenities_and_places_join_the_index_when_requested() {
    let mut provider = city_provider();
    provider.add_geometry(NamedGeometry::new(
        "Town Hall",
        GeometryKind::Amenity,
        vec![Point::new(1000.0, 1000.0)],
    ));
    provider.add_geometry(NamedGeometry::new(
        "Old Quarter",
        GeometryKind::Place,
        vec![Point::new(2000.0, 2000.0)],
    ));

    let plan = AtlasBuilder::new(ten_km_selection())
        .config(test_config())
        .with_amenities_and_places()
        .plan(&provider)
        .unwrap();
    let names: Vec<&str> = plan.index.entries.iter().map(|e| e.name()).collect();
    assert_eq!(
        names,
        vec!["Harbour Street", "Mill Road", "Old Quarter", "Quay Lane", "Town Hall"]
    );
}

#[test]
fn page_descriptors_serialize_for_external_renderers() {
    let provider = city_provider();
    let plan = AtlasBuilder::new(ten_km_selection())
        .config(test_config())
        .plan(&provider)
        .unwrap();

    let json = serde_json::to_string(&plan.pages).unwrap();
    let back: Vec<PageDescriptor> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, plan.pages);
}
