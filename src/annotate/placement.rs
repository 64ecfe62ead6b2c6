//! Highlight and border placement.

use super::dedup::HighlightDedup;
use crate::color::{ColorAssignment, NamedColor};
use crate::config::{BorderGeometry, HighlightConfig};
use crate::error::Result;
use crate::geometry::{Point, Quad};
use crate::parts::{Direction, PageParts};
use crate::surface::{resolve_regions, PageSurface, RegionLookup};
use serde::Serialize;

/// Corner deltas for [`BorderGeometry::CornerOffsets`], in `[ul, ur, ll, lr]` order.
const CORNER_OFFSETS: [(f32, f32); 4] = [(1.0, -1.0), (4.0, -1.0), (1.0, 1.0), (4.0, 1.0)];

/// Horizontal span of [`BorderGeometry::AnchoredBox`] relative to the marker's
/// upper-left corner.
const ANCHOR_X: (f32, f32) = (2.0, 13.0);
/// Height of [`BorderGeometry::AnchoredBox`].
const ANCHOR_HEIGHT: f32 = 13.0;

/// Resolved border drawing settings.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderStyle {
    /// Color for `-L` markers
    pub left: NamedColor,
    /// Color for `-R` markers
    pub right: NamedColor,
    /// Stroke width
    pub width: f32,
    /// Outline shape
    pub geometry: BorderGeometry,
}

impl BorderStyle {
    /// Resolve border colors from configuration.
    pub fn from_config(config: &HighlightConfig) -> Result<Self> {
        Ok(Self {
            left: NamedColor::lookup(&config.left_border_color)?,
            right: NamedColor::lookup(&config.right_border_color)?,
            width: config.border_width,
            geometry: config.border_geometry,
        })
    }

    /// Border color of a direction.
    pub fn color_for(&self, direction: Direction) -> &NamedColor {
        match direction {
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }
}

/// Outline drawn around a marker region.
///
/// # Examples
///
/// ```
/// use pdf_partmark::annotate::border_quad;
/// use pdf_partmark::config::BorderGeometry;
/// use pdf_partmark::geometry::{Quad, Rect};
///
/// let marker = Quad::from_rect(&Rect::new(100.0, 50.0, 12.0, 10.0));
/// let border = border_quad(&marker, BorderGeometry::CornerOffsets);
/// assert_eq!((border.ul.x, border.ul.y), (101.0, 49.0));
/// assert_eq!((border.lr.x, border.lr.y), (116.0, 61.0));
/// ```
pub fn border_quad(region: &Quad, geometry: BorderGeometry) -> Quad {
    match geometry {
        BorderGeometry::CornerOffsets => region.offset_corners(CORNER_OFFSETS),
        BorderGeometry::AnchoredBox => {
            let anchor = region.ul;
            let (left, right) = (anchor.x + ANCHOR_X.0, anchor.x + ANCHOR_X.1);
            let (top, bottom) = (anchor.y, anchor.y + ANCHOR_HEIGHT);
            Quad::new(
                Point::new(left, top),
                Point::new(right, top),
                Point::new(left, bottom),
                Point::new(right, bottom),
            )
        }
    }
}

/// Counts of draw calls issued and skipped on a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlacementStats {
    /// Highlight annotations added
    pub highlights: usize,
    /// Highlights suppressed by geometric deduplication
    pub duplicate_highlights: usize,
    /// Borders drawn
    pub borders: usize,
    /// Lookups that found no region on the page
    pub skipped_regions: usize,
}

impl PlacementStats {
    /// Add another page's counts.
    pub fn merge(&mut self, other: &PlacementStats) {
        self.highlights += other.highlights;
        self.duplicate_highlights += other.duplicate_highlights;
        self.borders += other.borders;
        self.skipped_regions += other.skipped_regions;
    }
}

/// Highlight every colored identifier on a page.
///
/// Identifiers are placed in assignment order. An identifier whose search
/// finds nothing is skipped; one whose last region shares its lower-left
/// corner with an earlier highlight on the page is suppressed.
pub fn place_highlights<S: PageSurface + ?Sized>(
    surface: &mut S,
    page: usize,
    colors: &ColorAssignment,
    opacity: f32,
    stats: &mut PlacementStats,
) -> Result<()> {
    let mut dedup = HighlightDedup::new();

    for (identifier, color) in colors.iter() {
        let regions = match resolve_regions(surface, page, identifier)? {
            RegionLookup::Found(regions) => regions,
            RegionLookup::NotFound => {
                stats.skipped_regions += 1;
                continue;
            }
        };

        if !dedup.claim(&regions) {
            log::debug!(
                "Skipping duplicate highlight for '{}' on page {}",
                identifier,
                page + 1
            );
            stats.duplicate_highlights += 1;
            continue;
        }

        surface.add_highlight(page, &regions, color.rgb(), opacity)?;
        stats.highlights += 1;
    }

    Ok(())
}

/// Draw a border around every `-L`/`-R` marker on a page.
///
/// The marker literal is searched once per direction; the n-th marker
/// found in the line view gets the n-th region. Markers left without a
/// region are counted as skipped.
pub fn place_borders<S: PageSurface + ?Sized>(
    surface: &mut S,
    page: usize,
    parts: &PageParts,
    style: &BorderStyle,
    stats: &mut PlacementStats,
) -> Result<()> {
    for direction in Direction::ALL {
        let wanted = parts.markers_for(direction).count();
        if wanted == 0 {
            continue;
        }

        let lookup = resolve_regions(surface, page, direction.marker())?;
        let regions = lookup.regions();
        let color = style.color_for(direction).rgb();

        for region in regions.iter().take(wanted) {
            let border = border_quad(region, style.geometry);
            surface.draw_quad(page, &border, color, style.width)?;
            stats.borders += 1;
        }

        let missing = wanted.saturating_sub(regions.len());
        if missing > 0 {
            log::debug!(
                "{} '{}' marker(s) without a region on page {}",
                missing,
                direction.marker(),
                page + 1
            );
        }
        stats.skipped_regions += missing;
    }

    Ok(())
}
