//! Public API for atlas planning.
//!
//! [`AtlasBuilder`] gives fluent configuration of one planning request,
//! [`plan_atlas`] drives resolve, grid, index and assembly, and
//! [`AtlasPlan`] is the complete result handed to an external renderer.

pub mod builder;
pub mod high_level;

pub use builder::AtlasBuilder;
pub use high_level::{AtlasPlan, plan_atlas};
