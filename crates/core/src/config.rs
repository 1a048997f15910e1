//! Rendering configuration.
//!
//! Contains the RenderConfig struct controlling paper geometry, grid
//! planning and index construction. Loading this from a file is external
//! glue; the struct only carries documented defaults and is validated by
//! the components that consume it.

use serde::{Deserialize, Serialize};

use crate::layout::PaperFormat;

/// Configuration for one atlas planning request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Physical page format (dimensions and print margins in millimetres).
    pub paper: PaperFormat,

    /// Scale denominator: 10_000 means 1 paper mm covers 10 ground metres.
    pub scale_denominator: f64,

    /// Seam overlap between adjacent detail pages, in paper millimetres.
    /// Repeated on both pages so a reader can follow a street across the
    /// page break.
    pub overlap_mm: f64,

    /// Width of the strip reserved along the map edges for grid reference
    /// labels (column letters, row numbers), in paper millimetres.
    pub grid_label_margin_mm: f64,

    /// Smallest acceptable trailing tile, as a fraction of the usable page
    /// span. A remainder below this threshold switches the axis to evenly
    /// distributed tiles instead of producing a near-empty final page.
    pub min_tile_fraction: f64,

    /// Upper bound on detail cells. More cells than this means the scale is
    /// too fine for a usable cross-referenced index.
    pub max_cells: usize,

    /// Query buffer around each cell in ground metres, so geometry crossing
    /// a seam is indexed in every cell it touches.
    pub cell_buffer_m: f64,

    /// Index entries per physical index page.
    pub entries_per_page: usize,

    /// Leading articles stripped from names when building sort keys
    /// (lowercase, compared after case folding). Empty by default.
    pub strip_articles: Vec<String>,

    /// Escalate per-cell provider failures instead of degrading them to an
    /// empty cell with a warning.
    pub strict_index: bool,

    /// Treat a fully empty index as a fatal error instead of producing an
    /// atlas without index pages.
    pub fail_on_empty_index: bool,

    /// Worker threads for per-cell index queries. `None` lets rayon pick.
    pub threads: Option<usize>,

    /// Fractional expansion of the overview viewport around the full
    /// envelope, per side.
    pub overview_expansion: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            paper: PaperFormat::a4_portrait(),
            scale_denominator: 10_000.0,
            overlap_mm: 20.0,
            grid_label_margin_mm: 10.0,
            min_tile_fraction: 0.2,
            max_cells: 676,
            cell_buffer_m: 10.0,
            entries_per_page: 60,
            strip_articles: Vec::new(),
            strict_index: false,
            fail_on_empty_index: false,
            threads: None,
            overview_expansion: 0.001,
        }
    }
}

impl RenderConfig {
    /// Ground metres covered by one paper millimetre at the configured
    /// scale.
    pub fn metres_per_paper_mm(&self) -> f64 {
        self.scale_denominator / 1000.0
    }

    /// Ground span of the map area of one detail page, per axis, in metres.
    /// The map area is the paper minus print margins and the grid label
    /// strip on both sides.
    pub fn page_ground_span_m(&self) -> (f64, f64) {
        let reserved = 2.0 * (self.paper.margin_mm + self.grid_label_margin_mm);
        let w = (self.paper.width_mm - reserved) * self.metres_per_paper_mm();
        let h = (self.paper.height_mm - reserved) * self.metres_per_paper_mm();
        (w, h)
    }

    /// Seam overlap in ground metres.
    pub fn overlap_ground_m(&self) -> f64 {
        self.overlap_mm * self.metres_per_paper_mm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_page_span_is_positive() {
        let cfg = RenderConfig::default();
        let (w, h) = cfg.page_ground_span_m();
        assert!(w > 0.0 && h > 0.0);
        assert!(cfg.overlap_ground_m() < w.min(h));
    }

    #[test]
    fn scale_converts_mm_to_metres() {
        let cfg = RenderConfig {
            scale_denominator: 25_000.0,
            ..RenderConfig::default()
        };
        assert_eq!(cfg.metres_per_paper_mm(), 25.0);
    }
}
