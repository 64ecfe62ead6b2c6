//! Configuration for part highlighting.

use crate::color::{resolve_all, NamedColor};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Palette of the original highlighting tool, in its original order.
pub const DEFAULT_PALETTE: [&str; 27] = [
    "deeppink",
    "pink3",
    "magenta",
    "darkorchid2",
    "maroon",
    "slateblue",
    "steelblue",
    "deepskyblue",
    "cyan",
    "cyan3",
    "aquamarine3",
    "royalblue2",
    "green",
    "limegreen",
    "chartreuse1",
    "yellowgreen",
    "khaki4",
    "gold2",
    "darkgoldenrod3",
    "orange",
    "darkorange1",
    "orangered",
    "orangered3",
    "salmon3",
    "red3",
    "indianred3",
    "snow4",
];

/// Outline shape drawn around `-L`/`-R` markers.
///
/// Search regions for short literals sit slightly off the printed glyphs,
/// so both shapes push the outline outward by fixed amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderGeometry {
    /// Move every corner of the marker region outward: +1 on the leading
    /// edge, +4 on the trailing edge, 1 unit up or down vertically.
    #[default]
    CornerOffsets,
    /// Fixed 11x13 box hanging off the marker's upper-left corner.
    AnchoredBox,
}

/// Highlighting configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Highlight colors, by name.
    pub palette: Vec<String>,

    /// Color for identifiers once the palette is used up.
    pub fallback_color: String,

    /// Highlight opacity.
    pub opacity: f32,

    /// Border color for `-L` markers.
    pub left_border_color: String,

    /// Border color for `-R` markers.
    pub right_border_color: String,

    /// Border line width.
    pub border_width: f32,

    /// Border outline shape.
    pub border_geometry: BorderGeometry,

    /// Seed for palette shuffles; random when absent.
    pub seed: Option<u64>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl HighlightConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            palette: DEFAULT_PALETTE.iter().map(|s| s.to_string()).collect(),
            fallback_color: "yellow".to_string(),
            opacity: 0.5,
            left_border_color: "darkred".to_string(),
            right_border_color: "chartreuse4".to_string(),
            border_width: 1.0,
            border_geometry: BorderGeometry::CornerOffsets,
            seed: None,
        }
    }

    /// Load configuration from a JSON file. Missing keys take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the palette.
    pub fn with_palette<S: Into<String>>(mut self, palette: impl IntoIterator<Item = S>) -> Self {
        self.palette = palette.into_iter().map(Into::into).collect();
        self
    }

    /// Set the fallback color.
    pub fn with_fallback_color(mut self, name: impl Into<String>) -> Self {
        self.fallback_color = name.into();
        self
    }

    /// Set the opacity (0.0 = transparent, 1.0 = opaque).
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Set the border colors for left and right markers.
    pub fn with_border_colors(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.left_border_color = left.into();
        self.right_border_color = right.into();
        self
    }

    /// Set the border outline shape.
    pub fn with_border_geometry(mut self, geometry: BorderGeometry) -> Self {
        self.border_geometry = geometry;
        self
    }

    /// Seed palette shuffles.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every value, resolving all color names.
    pub fn validate(&self) -> Result<()> {
        resolve_all(&self.palette)?;
        NamedColor::lookup(&self.fallback_color)?;
        NamedColor::lookup(&self.left_border_color)?;
        NamedColor::lookup(&self.right_border_color)?;

        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(Error::Config(format!("opacity {} outside 0..=1", self.opacity)));
        }
        if self.border_width.is_nan() || self.border_width <= 0.0 {
            return Err(Error::Config(format!(
                "border width must be positive, got {}",
                self.border_width
            )));
        }
        Ok(())
    }
}
