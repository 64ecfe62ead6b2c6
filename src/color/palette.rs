//! Palette state and color assignment.
//!
//! The palette is page-scoped mutable state: it is reshuffled once at every
//! page boundary, and [`assign_colors`] reads it without mutation. The same
//! identifier therefore usually gets a different color on every page.

use super::NamedColor;
use crate::config::HighlightConfig;
use crate::error::Result;
use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Shuffled palette plus the fallback used once it runs out.
#[derive(Debug, Clone)]
pub struct PaletteState {
    colors: Vec<NamedColor>,
    fallback: NamedColor,
    rng: StdRng,
}

impl PaletteState {
    /// Create palette state.
    ///
    /// With a `seed` the sequence of shuffles is reproducible.
    pub fn new(colors: Vec<NamedColor>, fallback: NamedColor, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            colors,
            fallback,
            rng,
        }
    }

    /// Build palette state from configuration, resolving every color name.
    pub fn from_config(config: &HighlightConfig) -> Result<Self> {
        let colors = super::resolve_all(&config.palette)?;
        let fallback = NamedColor::lookup(&config.fallback_color)?;
        Ok(Self::new(colors, fallback, config.seed))
    }

    /// Reshuffle the palette for the next page.
    pub fn reshuffle(&mut self) {
        self.colors.shuffle(&mut self.rng);
    }

    /// Current palette order.
    pub fn colors(&self) -> &[NamedColor] {
        &self.colors
    }

    /// Color given to identifiers beyond the palette size.
    pub fn fallback(&self) -> &NamedColor {
        &self.fallback
    }

    /// Number of palette colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check whether the palette has no colors.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Colors assigned to the identifiers of one page, in assignment order.
#[derive(Debug, Clone, Default)]
pub struct ColorAssignment {
    colors: IndexMap<String, NamedColor>,
}

impl ColorAssignment {
    /// Color assigned to an identifier.
    pub fn get(&self, identifier: &str) -> Option<&NamedColor> {
        self.colors.get(identifier)
    }

    /// Number of identifiers with a color.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check whether no identifier has a color.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Identifier/color pairs in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NamedColor)> {
        self.colors.iter().map(|(id, color)| (id.as_str(), color))
    }
}

/// Assign colors to a page's identifiers.
///
/// Identifiers are taken in the order given; each new identifier gets the
/// next palette color, and every identifier past the palette size gets the
/// fallback. Repeated identifiers keep their first color.
///
/// # Examples
///
/// ```
/// use pdf_partmark::color::{assign_colors, NamedColor, PaletteState};
///
/// let palette = PaletteState::new(
///     vec![NamedColor::lookup("cyan").unwrap()],
///     NamedColor::lookup("yellow").unwrap(),
///     Some(1),
/// );
/// let colors = assign_colors(["Z-001", "AB-123"], &palette);
/// assert_eq!(colors.get("Z-001").unwrap().name(), "cyan");
/// assert_eq!(colors.get("AB-123").unwrap().name(), "yellow");
/// ```
pub fn assign_colors<I, S>(identifiers: I, palette: &PaletteState) -> ColorAssignment
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut colors: IndexMap<String, NamedColor> = IndexMap::new();

    for identifier in identifiers {
        let identifier = identifier.as_ref();
        if colors.contains_key(identifier) {
            continue;
        }
        let color = palette
            .colors
            .get(colors.len())
            .unwrap_or(&palette.fallback)
            .clone();
        log::debug!("{} -> {}", identifier, color.name());
        colors.insert(identifier.to_string(), color);
    }

    ColorAssignment { colors }
}
