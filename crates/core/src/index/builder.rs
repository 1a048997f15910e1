//! Cell-by-cell index construction.
//!
//! Cells have no data dependency on one another, so their geometry
//! queries run on a bounded rayon pool. Each worker returns a local
//! per-cell result; results are collected in row-major cell order and
//! reduced sequentially into the shared entry map, so there is no shared
//! mutable state and re-running on identical inputs yields identical
//! entries and page assignments.

use indexmap::IndexMap;
use itertools::Itertools;
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use tracing::{debug, warn};

use super::collate::Collator;
use super::normalize::{category_key, sort_key};
use super::{IndexCategory, IndexPage, StreetEntry};
use crate::cancel::CancelToken;
use crate::config::RenderConfig;
use crate::error::{AtlasError, Result};
use crate::grid::{CellId, GridPlan};
use crate::provider::{GeometryKind, GeometryProvider, NamedGeometry};

/// The finalized index: all entries in display order, plus the same
/// entries paginated into physical index pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexOutcome {
    pub entries: Vec<StreetEntry>,
    pub pages: Vec<IndexPage>,
}

impl IndexOutcome {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds the street index for a planned grid.
///
/// Per-cell provider failures are degraded to an empty cell with a
/// warning unless `strict_index` is set. An entirely empty index is only
/// an error under `fail_on_empty_index`. Cancellation is checked before
/// every cell query; a cancelled request returns `AtlasError::Cancelled`
/// without any partially merged index escaping.
pub fn build_index(
    provider: &dyn GeometryProvider,
    grid: &GridPlan,
    kinds: &[GeometryKind],
    config: &RenderConfig,
    collator: &dyn Collator,
    cancel: &CancelToken,
) -> Result<IndexOutcome> {
    if config.entries_per_page == 0 {
        return Err(AtlasError::Layout(
            "entries_per_page must be at least 1".to_string(),
        ));
    }

    let per_cell = scan_cells(provider, grid, kinds, config, cancel)?;
    if cancel.is_cancelled() {
        return Err(AtlasError::Cancelled);
    }

    let entries = reduce(per_cell, config, collator);
    debug!(entries = entries.len(), "index reduced and sorted");

    if entries.is_empty() {
        if config.fail_on_empty_index {
            return Err(AtlasError::EmptyIndex);
        }
        return Ok(IndexOutcome {
            entries,
            pages: Vec::new(),
        });
    }

    let pages = paginate(&entries, config.entries_per_page);
    Ok(IndexOutcome { entries, pages })
}

/// Queries every cell, in parallel, returning per-cell results in
/// row-major cell order.
fn scan_cells(
    provider: &dyn GeometryProvider,
    grid: &GridPlan,
    kinds: &[GeometryKind],
    config: &RenderConfig,
    cancel: &CancelToken,
) -> Result<Vec<(CellId, Vec<NamedGeometry>)>> {
    let mut pool_builder = ThreadPoolBuilder::new();
    if let Some(threads) = config.threads {
        pool_builder = pool_builder.num_threads(threads);
    }
    let pool = pool_builder
        .build()
        .map_err(|e| AtlasError::Layout(format!("worker pool: {e}")))?;

    pool.install(|| {
        grid.cells()
            .par_iter()
            .map(|cell| {
                if cancel.is_cancelled() {
                    return Err(AtlasError::Cancelled);
                }
                let mut found = Vec::new();
                for kind in kinds {
                    match provider.query_geometries(cell.envelope(), config.cell_buffer_m, *kind) {
                        Ok(mut geometries) => found.append(&mut geometries),
                        Err(e) if config.strict_index => {
                            return Err(AtlasError::Provider {
                                cell: cell.label(),
                                msg: e.to_string(),
                            });
                        }
                        Err(e) => {
                            warn!(
                                cell = %cell.label(),
                                error = %e,
                                "cell query failed, indexing cell as empty"
                            );
                        }
                    }
                }
                Ok((cell.id(), found))
            })
            .collect()
    })
}

/// Sequentially merges per-cell results into deduplicated entries and
/// sorts them. Merge order is the row-major cell order regardless of
/// which worker finished first, which pins down first-seen cells and
/// display casing.
fn reduce(
    per_cell: Vec<(CellId, Vec<NamedGeometry>)>,
    config: &RenderConfig,
    collator: &dyn Collator,
) -> Vec<StreetEntry> {
    let mut merged: IndexMap<String, StreetEntry> = IndexMap::new();
    for (cell_id, geometries) in per_cell {
        for geometry in geometries {
            let name = geometry.name.trim();
            if name.is_empty() {
                continue;
            }
            let key = sort_key(name, &config.strip_articles);
            if key.is_empty() {
                continue;
            }
            merged
                .entry(key.clone())
                .or_insert_with(|| StreetEntry::new(name.to_string(), key, cell_id))
                .add_cell(cell_id);
        }
    }

    let mut entries: Vec<StreetEntry> = merged.into_values().collect();
    entries.sort_by(|a, b| {
        collator
            .compare(a.sort_key(), b.sort_key())
            .then_with(|| a.name().cmp(b.name()))
            .then_with(|| a.first_cell().cmp(&b.first_cell()))
    });
    entries
}

/// Splits sorted entries into pages of at most `entries_per_page`,
/// bucketing them under alphabetical category headers. A category that
/// does not fit continues on the next page under a repeated header.
fn paginate(entries: &[StreetEntry], entries_per_page: usize) -> Vec<IndexPage> {
    let mut pages = Vec::new();
    for chunk in &entries.iter().chunks(entries_per_page) {
        let mut page = IndexPage::default();
        for entry in chunk {
            let label = category_key(entry.sort_key());
            match page.categories.last_mut() {
                Some(category) if category.label == label => category.entries.push(entry.clone()),
                _ => {
                    let mut category = IndexCategory::new(label);
                    category.entries.push(entry.clone());
                    page.categories.push(category);
                }
            }
        }
        pages.push(page);
    }
    pages
}
