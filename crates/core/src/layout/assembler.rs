//! Final page assembly.
//!
//! A pure transformation: grid cells and index pages in, the ordered
//! sequence of page descriptors out. Nothing here rasterizes; descriptors
//! are handed to an external renderer.

use tracing::debug;

use super::pages::{LabelStrips, PageDescriptor, PageKind};
use crate::config::RenderConfig;
use crate::error::Result;
use crate::geometry::Envelope;
use crate::grid::{GridCell, GridPlan, column_label};
use crate::index::IndexPage;

/// Assembles the final ordered page sequence.
///
/// Numbering is stable and deterministic: detail pages first in grid
/// order (starting at 1), then the overview page (omitted when the whole
/// area fits one page), then index pages.
pub fn assemble(
    grid: &GridPlan,
    index_pages: &[IndexPage],
    config: &RenderConfig,
) -> Result<Vec<PageDescriptor>> {
    let mut pages = Vec::with_capacity(grid.cells().len() + 1 + index_pages.len());
    let mut number = 1;

    for cell in grid.cells() {
        pages.push(PageDescriptor {
            number,
            kind: PageKind::Map {
                cell: cell.id(),
                label: cell.label(),
                viewport: map_viewport(grid, cell)?,
            },
            paper: config.paper.clone(),
            margin_mm: config.paper.margin_mm,
            grid_label_margin_mm: config.grid_label_margin_mm,
            scale_denominator: config.scale_denominator,
        });
        number += 1;
    }

    if !grid.is_single_page() {
        pages.push(PageDescriptor {
            number,
            kind: PageKind::Overview {
                viewport: overview_viewport(grid, config)?,
                labels: label_strips(grid),
                scale_denominator: overview_scale(grid, config),
            },
            paper: config.paper.clone(),
            margin_mm: config.paper.margin_mm,
            grid_label_margin_mm: config.grid_label_margin_mm,
            scale_denominator: overview_scale(grid, config),
        });
        number += 1;
    }

    for sequence in 0..index_pages.len() {
        pages.push(PageDescriptor {
            number,
            kind: PageKind::Index { sequence },
            paper: config.paper.clone(),
            margin_mm: config.paper.margin_mm,
            grid_label_margin_mm: 0.0,
            scale_denominator: config.scale_denominator,
        });
        number += 1;
    }

    debug!(pages = pages.len(), "assembled page sequence");
    Ok(pages)
}

/// The printed viewport of a detail page: its tile grown by half the
/// seam overlap toward each interior neighbour, so adjacent pages repeat
/// the seam strip and nothing on a seam is silently dropped.
fn map_viewport(grid: &GridPlan, cell: &GridCell) -> Result<Envelope> {
    let half = grid.overlap_m() / 2.0;
    let id = cell.id();
    let left = if id.col > 0 { half } else { 0.0 };
    let right = if (id.col as usize) < grid.cols() - 1 { half } else { 0.0 };
    let top = if id.row > 0 { half } else { 0.0 };
    let bottom = if (id.row as usize) < grid.rows() - 1 { half } else { 0.0 };
    cell.envelope().extended(left, bottom, right, top)
}

/// Overview viewport: the full envelope with a slight fractional
/// expansion so boundary strokes are not clipped.
fn overview_viewport(grid: &GridPlan, config: &RenderConfig) -> Result<Envelope> {
    let envelope = grid.envelope();
    let amount = config.overview_expansion * envelope.width().max(envelope.height());
    envelope.expanded(amount)
}

/// Reduced scale fitting the whole envelope into one page's map area.
fn overview_scale(grid: &GridPlan, config: &RenderConfig) -> f64 {
    let (page_w, page_h) = config.page_ground_span_m();
    let envelope = grid.envelope();
    let needed = (envelope.width() / page_w).max(envelope.height() / page_h);
    config.scale_denominator * needed.max(1.0)
}

fn label_strips(grid: &GridPlan) -> LabelStrips {
    LabelStrips {
        columns: (0..grid.cols()).map(column_label).collect(),
        rows: (1..=grid.rows()).map(|r| r.to_string()).collect(),
    }
}
