//! Renderer-facing page descriptors.

use serde::{Deserialize, Serialize};

use super::paper::PaperFormat;
use crate::geometry::Envelope;
use crate::grid::CellId;

/// Grid reference labels drawn along the map border: column letters along
/// the top and bottom strips, row numbers along the sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelStrips {
    pub columns: Vec<String>,
    pub rows: Vec<String>,
}

/// What one physical page shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PageKind {
    /// One detail page for one grid cell. The viewport is the cell tile
    /// grown by half the seam overlap toward interior neighbours.
    Map {
        cell: CellId,
        label: String,
        viewport: Envelope,
    },
    /// The reduced-scale overview of the full area with the reference
    /// grid overlaid.
    Overview {
        viewport: Envelope,
        labels: LabelStrips,
        scale_denominator: f64,
    },
    /// One page of the street index; `sequence` is the zero-based
    /// position into the plan's index pages.
    Index { sequence: usize },
}

/// One physical output page, ready to hand to an external renderer.
///
/// Page numbers are 1-based and stable: detail pages in grid order, then
/// the overview, then index pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDescriptor {
    pub number: usize,
    pub kind: PageKind,
    pub paper: PaperFormat,
    /// Printer margin on every side, in millimetres.
    pub margin_mm: f64,
    /// Strip reserved inside the margins for grid reference labels, in
    /// millimetres. Zero on index pages.
    pub grid_label_margin_mm: f64,
    pub scale_denominator: f64,
}

impl PageDescriptor {
    pub fn is_map(&self) -> bool {
        matches!(self.kind, PageKind::Map { .. })
    }

    pub fn is_overview(&self) -> bool {
        matches!(self.kind, PageKind::Overview { .. })
    }

    pub fn is_index(&self) -> bool {
        matches!(self.kind, PageKind::Index { .. })
    }
}
