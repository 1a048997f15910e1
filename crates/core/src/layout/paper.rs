//! Physical paper formats.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A physical paper format with printable margins, in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperFormat {
    pub name: String,
    pub width_mm: f64,
    pub height_mm: f64,
    /// Printer margin on every side.
    pub margin_mm: f64,
}

static PRESETS: Lazy<Vec<PaperFormat>> = Lazy::new(|| {
    vec![
        PaperFormat::named("A5", 148.0, 210.0),
        PaperFormat::named("A4", 210.0, 297.0),
        PaperFormat::named("A3", 297.0, 420.0),
        PaperFormat::named("A2", 420.0, 594.0),
        PaperFormat::named("US letter", 215.9, 279.4),
        PaperFormat::named("US legal", 215.9, 355.6),
    ]
});

impl PaperFormat {
    fn named(name: &str, width_mm: f64, height_mm: f64) -> Self {
        Self {
            name: name.to_string(),
            width_mm,
            height_mm,
            margin_mm: 10.0,
        }
    }

    /// Looks up a well-known format by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<PaperFormat> {
        PRESETS
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    /// All known preset names, in ascending size order.
    pub fn preset_names() -> Vec<&'static str> {
        PRESETS.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn a4_portrait() -> Self {
        Self::by_name("A4").unwrap()
    }

    /// The same sheet turned 90 degrees.
    pub fn rotated(&self) -> Self {
        Self {
            name: self.name.clone(),
            width_mm: self.height_mm,
            height_mm: self.width_mm,
            margin_mm: self.margin_mm,
        }
    }

    pub fn is_landscape(&self) -> bool {
        self.width_mm > self.height_mm
    }
}
