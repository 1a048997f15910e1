//! Grid planning: partitioning an envelope into page-sized tiles.
//!
//! This module contains:
//! - CellId and GridCell, one tile per physical detail page
//! - GridPlan, the ordered row-major tiling of the full envelope
//! - Square label generation (column letters, row numbers) for
//!   cross-referencing index entries
//!
//! Tiles are disjoint and cover the envelope exactly; the seam overlap is
//! applied later, when the layout assembler derives page viewports.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RenderConfig;
use crate::error::{AtlasError, Result};
use crate::geometry::{Envelope, Point};

/// Identifier of one grid cell, row-major ordered, row 0 at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellId {
    pub row: u16,
    pub col: u16,
}

impl CellId {
    pub fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_label(self.col as usize), self.row + 1)
    }
}

/// One tile of the paginated map, backing one detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    id: CellId,
    envelope: Envelope,
}

impl GridCell {
    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Human-readable square label, e.g. "C4".
    pub fn label(&self) -> String {
        self.id.to_string()
    }
}

/// The tiling of the full envelope: a rows x cols grid of disjoint cells
/// in row-major order (top row first, left to right).
#[derive(Debug, Clone, PartialEq)]
pub struct GridPlan {
    envelope: Envelope,
    rows: usize,
    cols: usize,
    cells: Vec<GridCell>,
    overlap_m: f64,
    scale_denominator: f64,
    // column boundaries west to east, row boundaries north to south
    x_edges: Vec<f64>,
    y_edges: Vec<f64>,
}

impl GridPlan {
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cells in page order.
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn cell(&self, id: CellId) -> Option<&GridCell> {
        let idx = id.row as usize * self.cols + id.col as usize;
        let cell = self.cells.get(idx)?;
        (cell.id == id).then_some(cell)
    }

    /// Seam overlap between adjacent detail pages, in ground metres.
    pub fn overlap_m(&self) -> f64 {
        self.overlap_m
    }

    pub fn scale_denominator(&self) -> f64 {
        self.scale_denominator
    }

    /// True when the whole envelope fits one page and paging was skipped.
    pub fn is_single_page(&self) -> bool {
        self.cells.len() == 1
    }

    /// The cell containing a projected point, or `None` outside the
    /// envelope. Points exactly on an interior seam resolve to the cell
    /// right of / below the seam.
    pub fn locate(&self, p: Point) -> Option<&GridCell> {
        if !self.envelope.contains(p) {
            return None;
        }
        let col = match self.x_edges[1..self.x_edges.len() - 1]
            .iter()
            .position(|&edge| p.x < edge)
        {
            Some(i) => i,
            None => self.cols - 1,
        };
        let row = match self.y_edges[1..self.y_edges.len() - 1]
            .iter()
            .position(|&edge| p.y > edge)
        {
            Some(i) => i,
            None => self.rows - 1,
        };
        self.cell(CellId::new(row as u16, col as u16))
    }
}

/// Generates the alphabetic column label for a zero-based column index:
/// 0 -> A, 25 -> Z, 26 -> AA, 27 -> AB, ...
pub fn column_label(col: usize) -> String {
    let mut label = String::new();
    let mut x = col as i64;
    while x != -1 {
        label.insert(0, (b'A' + (x % 26) as u8) as char);
        x = x / 26 - 1;
    }
    label
}

/// Splits one axis extent into tile sizes.
///
/// Tiles are page-sized with the remainder as the trailing tile, unless
/// that remainder would be a sliver below `min_fraction` of the usable
/// span; then the whole axis switches to evenly distributed tiles so no
/// near-empty page is produced.
fn tile_axis(extent: f64, usable: f64, min_fraction: f64) -> Vec<f64> {
    if extent <= usable {
        return vec![extent];
    }
    let n = (extent / usable).ceil() as usize;
    let remainder = extent - (n - 1) as f64 * usable;
    if remainder < min_fraction * usable {
        return vec![extent / n as f64; n];
    }
    let mut sizes = vec![usable; n - 1];
    sizes.push(remainder);
    sizes
}

/// Cumulative boundary positions for tile sizes starting at `origin`,
/// moving by `direction` (+1 east, -1 south). The final edge is pinned to
/// the exact envelope bound so coverage reconstructs it without
/// floating-point drift.
fn edges(origin: f64, sizes: &[f64], direction: f64, end: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(sizes.len() + 1);
    let mut pos = origin;
    out.push(pos);
    for size in &sizes[..sizes.len() - 1] {
        pos += direction * size;
        out.push(pos);
    }
    out.push(end);
    out
}

/// Plans the page grid for an envelope under the given configuration.
///
/// Cells are ordered row-major, top-to-bottom then left-to-right, which
/// fixes page numbering. Fails with `AtlasError::Layout` on non-positive
/// paper or scale, overlap swallowing the page, or a grid too fine to
/// index.
pub fn plan(envelope: &Envelope, config: &RenderConfig) -> Result<GridPlan> {
    if config.scale_denominator <= 0.0 || !config.scale_denominator.is_finite() {
        return Err(AtlasError::Layout(format!(
            "scale denominator must be positive, got {}",
            config.scale_denominator
        )));
    }
    let (page_w, page_h) = config.page_ground_span_m();
    if page_w <= 0.0 || page_h <= 0.0 {
        return Err(AtlasError::Layout(format!(
            "paper {} leaves no printable map area at the configured margins",
            config.paper.name
        )));
    }
    let overlap = config.overlap_ground_m();
    if overlap < 0.0 {
        return Err(AtlasError::Layout("negative page overlap".to_string()));
    }
    let usable_w = page_w - overlap;
    let usable_h = page_h - overlap;
    if usable_w <= 0.0 || usable_h <= 0.0 {
        return Err(AtlasError::Layout(format!(
            "overlap of {}mm swallows the whole page",
            config.overlap_mm
        )));
    }

    let col_sizes = tile_axis(envelope.width(), usable_w, config.min_tile_fraction);
    let row_sizes = tile_axis(envelope.height(), usable_h, config.min_tile_fraction);
    let (rows, cols) = (row_sizes.len(), col_sizes.len());
    // CellId stores u16 coordinates; reject axes that would not fit
    if rows > u16::MAX as usize || cols > u16::MAX as usize {
        return Err(AtlasError::Layout(format!(
            "{rows}x{cols} grid has an axis beyond {} cells",
            u16::MAX
        )));
    }
    if rows * cols > config.max_cells {
        return Err(AtlasError::Layout(format!(
            "{rows}x{cols} grid exceeds the {} cell limit; the scale is too fine for a usable index",
            config.max_cells
        )));
    }

    let x_edges = edges(envelope.min_x(), &col_sizes, 1.0, envelope.max_x());
    let y_edges = edges(envelope.max_y(), &row_sizes, -1.0, envelope.min_y());

    let mut cells = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            cells.push(GridCell {
                id: CellId::new(row as u16, col as u16),
                envelope: Envelope::new(
                    x_edges[col],
                    y_edges[row + 1],
                    x_edges[col + 1],
                    y_edges[row],
                )?,
            });
        }
    }

    debug!(
        rows,
        cols,
        width_m = envelope.width(),
        height_m = envelope.height(),
        "planned page grid"
    );

    Ok(GridPlan {
        envelope: *envelope,
        rows,
        cols,
        cells,
        overlap_m: overlap,
        scale_denominator: config.scale_denominator,
        x_edges,
        y_edges,
    })
}
