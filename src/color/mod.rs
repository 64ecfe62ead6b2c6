//! Named colors and per-page color assignment.
//!
//! Colors are referred to by their X11 names (`deeppink`, `chartreuse4`, ...)
//! everywhere in configuration and reports; [`NamedColor`] carries the
//! resolved RGB value used when drawing.

mod palette;

pub use palette::{assign_colors, ColorAssignment, PaletteState};

use crate::error::{Error, Result};
use phf::phf_map;
use serde::{Serialize, Serializer};

/// X11 color names to 8-bit RGB.
static X11_COLORS: phf::Map<&'static str, (u8, u8, u8)> = phf_map! {
    // Default highlight palette
    "deeppink" => (255, 20, 147),
    "pink3" => (205, 145, 158),
    "magenta" => (255, 0, 255),
    "darkorchid2" => (178, 58, 238),
    "maroon" => (176, 48, 96),
    "slateblue" => (106, 90, 205),
    "steelblue" => (70, 130, 180),
    "deepskyblue" => (0, 191, 255),
    "cyan" => (0, 255, 255),
    "cyan3" => (0, 205, 205),
    "aquamarine3" => (102, 205, 170),
    "royalblue2" => (67, 110, 238),
    "green" => (0, 255, 0),
    "limegreen" => (50, 205, 50),
    "chartreuse1" => (127, 255, 0),
    "yellowgreen" => (154, 205, 50),
    "khaki4" => (139, 134, 78),
    "gold2" => (238, 201, 0),
    "darkgoldenrod3" => (205, 149, 12),
    "orange" => (255, 165, 0),
    "darkorange1" => (255, 127, 0),
    "orangered" => (255, 69, 0),
    "orangered3" => (205, 55, 0),
    "salmon3" => (205, 112, 84),
    "red3" => (205, 0, 0),
    "indianred3" => (205, 85, 85),
    "snow4" => (139, 137, 137),
    // Fallback and border colors
    "yellow" => (255, 255, 0),
    "darkred" => (139, 0, 0),
    "chartreuse4" => (69, 139, 0),
    // Basics
    "black" => (0, 0, 0),
    "white" => (255, 255, 255),
    "gray" => (190, 190, 190),
    "red" => (255, 0, 0),
    "blue" => (0, 0, 255),
    "olivedrab" => (107, 142, 35),
    "darksalmon" => (233, 150, 122),
    "darkslateblue" => (72, 61, 139),
    "lime" => (0, 255, 0),
    "tomato" => (255, 99, 71),
    "springgreen" => (0, 255, 127),
    "goldenrod" => (218, 165, 32),
};

/// An RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
}

impl Rgb {
    /// Create a color from 8-bit components.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Components as an array, in PDF `DeviceRGB` order.
    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// A color name together with its resolved RGB value.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedColor {
    name: String,
    rgb: Rgb,
}

impl NamedColor {
    /// Resolve a color name.
    ///
    /// Lookup ignores case and whitespace, so `"Dark Red"` resolves to
    /// `darkred`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_partmark::color::NamedColor;
    ///
    /// let color = NamedColor::lookup("Yellow").unwrap();
    /// assert_eq!(color.name(), "yellow");
    /// assert_eq!(color.rgb().to_array(), [1.0, 1.0, 0.0]);
    /// assert!(NamedColor::lookup("no-such-color").is_err());
    /// ```
    pub fn lookup(name: &str) -> Result<Self> {
        let key: String = name
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        let (r, g, b) = X11_COLORS
            .get(key.as_str())
            .copied()
            .ok_or_else(|| Error::UnknownColor(name.to_string()))?;

        Ok(Self {
            name: key,
            rgb: Rgb::from_u8(r, g, b),
        })
    }

    /// Normalized color name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// RGB value.
    pub fn rgb(&self) -> Rgb {
        self.rgb
    }
}

impl Serialize for NamedColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

/// Resolve a list of color names, failing on the first unknown one.
pub fn resolve_all<S: AsRef<str>>(names: &[S]) -> Result<Vec<NamedColor>> {
    names.iter().map(|n| NamedColor::lookup(n.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_and_space_insensitive() {
        let color = NamedColor::lookup("Dark Red").unwrap();
        assert_eq!(color.name(), "darkred");
        assert_eq!(color.rgb(), Rgb::from_u8(139, 0, 0));
    }

    #[test]
    fn test_unknown_color() {
        let err = NamedColor::lookup("ultraviolet").unwrap_err();
        assert!(matches!(err, Error::UnknownColor(ref n) if n == "ultraviolet"));
    }

    #[test]
    fn test_rgb_from_u8() {
        let rgb = Rgb::from_u8(255, 0, 51);
        assert_eq!(rgb.to_array(), [1.0, 0.0, 0.2]);
    }

    #[test]
    fn test_resolve_all_stops_on_unknown() {
        assert_eq!(resolve_all(&["cyan", "gold2"]).unwrap().len(), 2);
        assert!(resolve_all(&["cyan", "bogus"]).is_err());
    }

    #[test]
    fn test_serializes_as_name() {
        let json = serde_json::to_string(&NamedColor::lookup("snow4").unwrap()).unwrap();
        assert_eq!(json, "\"snow4\"");
    }
}
