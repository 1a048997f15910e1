//! Builder pattern for atlas planning requests.
//!
//! Provides a fluent API for configuring and executing one plan.
//!
//! # Example
//! ```ignore
//! use atlas_core::api::AtlasBuilder;
//! use atlas_core::area::AreaSelection;
//!
//! let plan = AtlasBuilder::new(AreaSelection::OsmId(-10142))
//!     .paper_name("A3")?
//!     .scale(15_000.0)
//!     .threads(4)
//!     .plan(&provider)?;
//! ```

use crate::area::AreaSelection;
use crate::cancel::CancelToken;
use crate::config::RenderConfig;
use crate::error::{AtlasError, Result};
use crate::index::{Collator, NaturalCollator};
use crate::layout::PaperFormat;
use crate::provider::{GeometryKind, GeometryProvider};

use super::high_level::{AtlasPlan, plan_atlas};

/// A builder for configuring one atlas planning request.
pub struct AtlasBuilder {
    selection: AreaSelection,
    config: RenderConfig,
    kinds: Vec<GeometryKind>,
    collator: Box<dyn Collator>,
    cancel: CancelToken,
}

impl AtlasBuilder {
    /// Creates a builder for the given area selection with default
    /// configuration: A4 paper, 1:10000, natural-order collation, streets
    /// only.
    pub fn new(selection: AreaSelection) -> Self {
        Self {
            selection,
            config: RenderConfig::default(),
            kinds: vec![GeometryKind::Street],
            collator: Box::new(NaturalCollator),
            cancel: CancelToken::new(),
        }
    }

    /// Replaces the whole configuration at once.
    pub fn config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn paper(mut self, paper: PaperFormat) -> Self {
        self.config.paper = paper;
        self
    }

    /// Selects a preset paper format by name ("A4", "US letter", ...).
    pub fn paper_name(mut self, name: &str) -> Result<Self> {
        self.config.paper = PaperFormat::by_name(name)
            .ok_or_else(|| AtlasError::Layout(format!("unknown paper format {name:?}")))?;
        Ok(self)
    }

    /// Sets the scale denominator (10_000 for 1:10000).
    pub fn scale(mut self, denominator: f64) -> Self {
        self.config.scale_denominator = denominator;
        self
    }

    /// Seam overlap between adjacent detail pages, in paper millimetres.
    pub fn overlap_mm(mut self, mm: f64) -> Self {
        self.config.overlap_mm = mm;
        self
    }

    /// Index entries per physical index page.
    pub fn entries_per_page(mut self, entries: usize) -> Self {
        self.config.entries_per_page = entries;
        self
    }

    /// Worker threads for per-cell index queries.
    pub fn threads(mut self, threads: usize) -> Self {
        self.config.threads = Some(threads);
        self
    }

    /// Escalate per-cell provider failures instead of degrading them.
    pub fn strict_index(mut self, strict: bool) -> Self {
        self.config.strict_index = strict;
        self
    }

    /// Treat an empty index as fatal.
    pub fn fail_on_empty_index(mut self, fatal: bool) -> Self {
        self.config.fail_on_empty_index = fatal;
        self
    }

    /// Leading articles to strip when building sort keys.
    pub fn strip_articles<I, S>(mut self, articles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.strip_articles = articles.into_iter().map(Into::into).collect();
        self
    }

    /// Geometry kinds to index. Defaults to streets only.
    pub fn kinds(mut self, kinds: &[GeometryKind]) -> Self {
        self.kinds = kinds.to_vec();
        self
    }

    /// Also index amenities and named places, the way full city atlases
    /// list schools, townhalls and quarters alongside streets.
    pub fn with_amenities_and_places(mut self) -> Self {
        for kind in [GeometryKind::Amenity, GeometryKind::Place] {
            if !self.kinds.contains(&kind) {
                self.kinds.push(kind);
            }
        }
        self
    }

    /// Replaces the collation backing index order.
    pub fn collator(mut self, collator: impl Collator + 'static) -> Self {
        self.collator = Box::new(collator);
        self
    }

    /// Attaches an external cancellation token.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Runs the pipeline against the given provider.
    pub fn plan(self, provider: &dyn GeometryProvider) -> Result<AtlasPlan> {
        plan_atlas(
            provider,
            &self.selection,
            &self.config,
            &self.kinds,
            self.collator.as_ref(),
            &self.cancel,
        )
    }
}
