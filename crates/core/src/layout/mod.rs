//! Page layout: paper formats, page descriptors and final assembly.
//!
//! This module contains:
//! - PaperFormat presets and metadata
//! - PageDescriptor, the renderer-facing description of one output page
//! - The assembler combining grid cells and index pages into the final
//!   ordered page sequence

pub mod assembler;
pub mod pages;
pub mod paper;

pub use assembler::assemble;
pub use pages::{LabelStrips, PageDescriptor, PageKind};
pub use paper::PaperFormat;
