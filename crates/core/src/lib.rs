//! atlas-core - city atlas planning from OpenStreetMap geometry.
//!
//! Turns a target area (an administrative boundary id or an explicit
//! bounding box) into a complete plan for a paginated, printable city
//! atlas: page-sized map tiles with a reference grid, an overview page,
//! and a sorted street index cross-referencing grid squares. Rendering
//! and database access stay outside; the engine only talks to a
//! [`provider::GeometryProvider`] and emits [`layout::PageDescriptor`]s.

pub mod api;
pub mod area;
pub mod cancel;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod index;
pub mod layout;
pub mod provider;

pub use api::{AtlasBuilder, AtlasPlan, plan_atlas};
pub use area::AreaSelection;
pub use cancel::CancelToken;
pub use config::RenderConfig;
pub use error::{AtlasError, Result};
