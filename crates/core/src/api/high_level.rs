//! High-level planning pipeline.
//!
//! One request flows through the pipeline once: area resolution, grid
//! planning, index construction, page assembly. Resolver and planner
//! failures are fatal; the index degrades per cell unless strict mode is
//! configured. The caller receives either a complete plan or the first
//! terminal error naming the failing stage.

use tracing::debug;

use crate::area::{AreaSelection, ResolvedArea, resolve};
use crate::cancel::CancelToken;
use crate::config::RenderConfig;
use crate::error::{AtlasError, Result};
use crate::grid::{self, GridPlan};
use crate::index::{Collator, IndexOutcome, build_index};
use crate::layout::{PageDescriptor, assemble};
use crate::provider::{GeometryKind, GeometryProvider};

/// The complete plan for one atlas: resolved area, page grid, street
/// index and the final ordered page descriptors. All read-only; the
/// engine retains no state between requests.
#[derive(Debug, Clone)]
pub struct AtlasPlan {
    pub area: ResolvedArea,
    pub grid: GridPlan,
    pub index: IndexOutcome,
    pub pages: Vec<PageDescriptor>,
}

impl AtlasPlan {
    /// Number of physical pages, all kinds included.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Runs the whole planning pipeline for one request.
pub fn plan_atlas(
    provider: &dyn GeometryProvider,
    selection: &AreaSelection,
    config: &RenderConfig,
    kinds: &[GeometryKind],
    collator: &dyn Collator,
    cancel: &CancelToken,
) -> Result<AtlasPlan> {
    if cancel.is_cancelled() {
        return Err(AtlasError::Cancelled);
    }

    let area = resolve(provider, selection)?;
    let grid = grid::plan(area.envelope(), config)?;
    debug!(
        cells = grid.cells().len(),
        single_page = grid.is_single_page(),
        "grid planned"
    );

    let index = build_index(provider, &grid, kinds, config, collator, cancel)?;
    let pages = assemble(&grid, &index.pages, config)?;

    Ok(AtlasPlan {
        area,
        grid,
        index,
        pages,
    })
}
