//! The page surface: text extraction, search and drawing for a document.
//!
//! Highlighting logic only talks to a document through [`PageSurface`].
//! Two implementations are provided:
//! - [`PdfSurface`] reads and annotates real PDF files
//! - [`MemorySurface`] keeps pages in memory and records every draw call
//!
//! Pages are 0-indexed. All geometry uses the top-left page origin of
//! [`crate::geometry`].

mod memory;
mod pdf;

pub use memory::{MemorySurface, SurfaceCall};
pub use pdf::PdfSurface;

pub use crate::layout::Token;

use crate::color::Rgb;
use crate::error::Result;
use crate::geometry::Quad;

/// Handle of an annotation written to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnnotationHandle {
    /// Page holding the annotation
    pub page: usize,
    /// Position of the annotation among those added to the page
    pub index: usize,
}

/// Text extraction, search and drawing over the pages of one document.
///
/// Calls are synchronous. Any error is fatal for the document being
/// processed; callers do not retry.
pub trait PageSurface {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Line view of a page's text.
    fn text_lines(&mut self, page: usize) -> Result<Vec<String>>;

    /// Word view of a page's text.
    ///
    /// Not guaranteed to be positionally consistent with
    /// [`text_lines`](Self::text_lines).
    fn words(&mut self, page: usize) -> Result<Vec<Token>>;

    /// Regions of every exact occurrence of `literal` on a page.
    fn search_for(&mut self, page: usize, literal: &str) -> Result<Vec<Quad>>;

    /// Stroke the outline of a quad, without fill.
    fn draw_quad(&mut self, page: usize, quad: &Quad, color: Rgb, width: f32) -> Result<()>;

    /// Add a highlight annotation covering one or more regions.
    fn add_highlight(
        &mut self,
        page: usize,
        regions: &[Quad],
        color: Rgb,
        opacity: f32,
    ) -> Result<AnnotationHandle>;

    /// Serialize the document with everything drawn so far.
    fn save(&mut self) -> Result<Vec<u8>>;
}

/// Outcome of looking up a literal's regions on a page.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionLookup {
    /// At least one region was found
    Found(Vec<Quad>),
    /// The literal is present in the text views but search cannot place it
    NotFound,
}

impl RegionLookup {
    /// Regions found, empty when not found.
    pub fn regions(&self) -> &[Quad] {
        match self {
            RegionLookup::Found(regions) => regions,
            RegionLookup::NotFound => &[],
        }
    }
}

/// Search a literal and classify the result.
pub fn resolve_regions<S: PageSurface + ?Sized>(
    surface: &mut S,
    page: usize,
    literal: &str,
) -> Result<RegionLookup> {
    let regions = surface.search_for(page, literal)?;
    if regions.is_empty() {
        log::debug!("No region found for '{}' on page {}", literal, page + 1);
        Ok(RegionLookup::NotFound)
    } else {
        Ok(RegionLookup::Found(regions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_regions_found_and_not_found() {
        let mut surface = MemorySurface::new()
            .with_text_page(&["(AB-123-L) C-100"])
            .hide_from_search(0, "C-100");

        let found = resolve_regions(&mut surface, 0, "AB-123").unwrap();
        assert_eq!(found.regions().len(), 1);

        let missing = resolve_regions(&mut surface, 0, "C-100").unwrap();
        assert_eq!(missing, RegionLookup::NotFound);
        assert!(missing.regions().is_empty());
    }
}
