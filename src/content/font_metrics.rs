//! Glyph advance widths of simple fonts.
//!
//! Widths come from the font's `Widths` array when present. Courier faces
//! are monospace at 600/1000 em; anything else without widths falls back to
//! the descriptor's `MissingWidth` or an average of 500/1000 em.

use super::objects::{get_resolved, name, number, resolve};
use lopdf::{Dictionary, Document, Object};

/// Default advance for fonts without width information, in 1/1000 em.
const AVERAGE_WIDTH: f32 = 500.0;

/// Advance of every Courier glyph, in 1/1000 em.
const COURIER_WIDTH: f32 = 600.0;

/// Width information for one font resource.
#[derive(Debug, Clone, PartialEq)]
pub struct FontMetrics {
    base_font: String,
    first_char: u32,
    widths: Vec<f32>,
    default_width: f32,
    composite: bool,
}

impl FontMetrics {
    /// Metrics with no width table, using `default_width` for every code.
    pub fn uniform(base_font: impl Into<String>, default_width: f32) -> Self {
        Self {
            base_font: base_font.into(),
            first_char: 0,
            widths: Vec::new(),
            default_width,
            composite: false,
        }
    }

    /// Read metrics from a font dictionary.
    pub fn from_dict(doc: &Document, font: &Dictionary) -> Self {
        let base_font = get_resolved(doc, font, b"BaseFont")
            .and_then(name)
            .map(|n| String::from_utf8_lossy(n).into_owned())
            .unwrap_or_default();
        let composite =
            get_resolved(doc, font, b"Subtype").and_then(name) == Some(b"Type0".as_slice());

        let first_char = get_resolved(doc, font, b"FirstChar")
            .and_then(number)
            .map(|n| n.max(0.0) as u32)
            .unwrap_or(0);
        let widths = match get_resolved(doc, font, b"Widths") {
            Some(Object::Array(items)) => items
                .iter()
                .map(|item| resolve(doc, item).ok().and_then(number).unwrap_or(0.0))
                .collect(),
            _ => Vec::new(),
        };

        let missing_width = match get_resolved(doc, font, b"FontDescriptor") {
            Some(Object::Dictionary(descriptor)) => {
                get_resolved(doc, descriptor, b"MissingWidth").and_then(number)
            },
            _ => None,
        };

        let default_width = if is_courier(&base_font) {
            COURIER_WIDTH
        } else {
            missing_width.filter(|w| *w > 0.0).unwrap_or(AVERAGE_WIDTH)
        };

        Self {
            base_font,
            first_char,
            widths,
            default_width,
            composite,
        }
    }

    /// PostScript name of the font, without any subset prefix handling.
    pub fn base_font(&self) -> &str {
        &self.base_font
    }

    /// Check whether the font is a composite (Type0) font.
    pub fn is_composite(&self) -> bool {
        self.composite
    }

    /// Advance width of a character code, in em units.
    pub fn glyph_width(&self, code: u8) -> f32 {
        let index = (code as u32).checked_sub(self.first_char);
        let width = index
            .and_then(|i| self.widths.get(i as usize))
            .copied()
            .filter(|w| *w > 0.0)
            .unwrap_or(self.default_width);
        width / 1000.0
    }
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::uniform("", AVERAGE_WIDTH)
    }
}

fn is_courier(base_font: &str) -> bool {
    // Subset fonts carry a "ABCDEF+" prefix
    let name = base_font.split_once('+').map_or(base_font, |(_, rest)| rest);
    name.starts_with("Courier")
}
