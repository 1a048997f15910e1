//! Error types for the atlas planning engine.

use thiserror::Error;

/// Primary error type for atlas planning operations.
///
/// Area resolution and grid planning errors are fatal to a request; index
/// construction degrades per cell unless strict mode is enabled.
#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("no geometry found for OSM id {0}")]
    NotFound(i64),

    #[error("ambiguous geometry: {0}")]
    AmbiguousGeometry(String),

    #[error("projection failed: {0}")]
    Projection(String),

    #[error("invalid layout: {0}")]
    Layout(String),

    #[error("index is empty: no named geometry inside any grid cell")]
    EmptyIndex,

    #[error("geometry provider failed for cell {cell}: {msg}")]
    Provider { cell: String, msg: String },

    #[error("request cancelled")]
    Cancelled,
}

/// Convenience Result type alias for AtlasError.
pub type Result<T> = std::result::Result<T, AtlasError>;
