//! Street index construction.
//!
//! This module contains:
//! - StreetEntry, IndexCategory and IndexPage data types
//! - Name normalization for sort keys and alphabetical buckets
//! - The Collator capability trait with deterministic and natural-order
//!   implementations
//! - The cell-by-cell index builder with its parallel scan

pub mod builder;
pub mod collate;
pub mod normalize;

pub use builder::{IndexOutcome, build_index};
pub use collate::{BytewiseCollator, Collator, NaturalCollator};
pub use normalize::{category_key, sort_key, unaccent};

use std::collections::BTreeSet;

use crate::grid::CellId;

/// One deduplicated index record: a display name and the set of grid
/// cells where the named geometry appears.
///
/// Built up during the cell scan, finalized (sorted) once all cells are
/// processed, read-only thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreetEntry {
    name: String,
    sort_key: String,
    cells: BTreeSet<CellId>,
    first_cell: CellId,
}

impl StreetEntry {
    pub(crate) fn new(name: String, sort_key: String, cell: CellId) -> Self {
        let mut cells = BTreeSet::new();
        cells.insert(cell);
        Self {
            name,
            sort_key,
            cells,
            first_cell: cell,
        }
    }

    /// Adds a cell occurrence. Set semantics: merging the same cell twice
    /// is a no-op.
    pub(crate) fn add_cell(&mut self, cell: CellId) {
        self.cells.insert(cell);
    }

    /// Display name, original casing of the first occurrence.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sort_key(&self) -> &str {
        &self.sort_key
    }

    /// Cells where this name appears, in row-major order. Never empty.
    pub fn cells(&self) -> &BTreeSet<CellId> {
        &self.cells
    }

    /// Cell of the first occurrence during the scan; final sorting
    /// tie-break.
    pub fn first_cell(&self) -> CellId {
        self.first_cell
    }

    /// Reader-facing square list, e.g. "A1-B2" for a span or "C4" for a
    /// single square.
    pub fn squares_label(&self) -> String {
        let first = self.cells.iter().next();
        let last = self.cells.iter().next_back();
        match (first, last) {
            (Some(a), Some(b)) if a != b => format!("{a}-{b}"),
            (Some(a), _) => a.to_string(),
            (None, _) => String::new(),
        }
    }
}

/// An alphabetical bucket of the index: a header label ("A", "0-9") and
/// its entries in sorted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexCategory {
    pub label: String,
    pub entries: Vec<StreetEntry>,
}

impl IndexCategory {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One physical index page: an ordered run of categories sized to the
/// configured entries-per-page budget. Categories continue across page
/// boundaries with their label repeated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IndexPage {
    pub categories: Vec<IndexCategory>,
}

impl IndexPage {
    /// Total entries on this page, headers not counted.
    pub fn entry_count(&self) -> usize {
        self.categories.iter().map(IndexCategory::len).sum()
    }
}
