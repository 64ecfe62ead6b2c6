//! In-memory page surface.

use super::{AnnotationHandle, PageSurface, Token};
use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::geometry::{Quad, Rect};
use crate::layout::{Glyph, PageText};
use crate::search::TextSearcher;
use serde::Serialize;
use std::collections::HashSet;

/// Glyph advance used by [`MemorySurface::with_text_page`].
const GLYPH_WIDTH: f32 = 6.0;
/// Glyph height used by [`MemorySurface::with_text_page`].
const GLYPH_HEIGHT: f32 = 10.0;
/// Distance between baselines used by [`MemorySurface::with_text_page`].
const LINE_PITCH: f32 = 14.0;
/// Page margin used by [`MemorySurface::with_text_page`].
const MARGIN: f32 = 72.0;

/// A draw call recorded by [`MemorySurface`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SurfaceCall {
    /// A highlight annotation
    Highlight {
        /// Page (0-indexed)
        page: usize,
        /// Covered regions
        regions: Vec<Quad>,
        /// RGB color
        color: [f32; 3],
        /// Opacity
        opacity: f32,
    },
    /// A stroked quad
    Border {
        /// Page (0-indexed)
        page: usize,
        /// Outline
        quad: Quad,
        /// RGB color
        color: [f32; 3],
        /// Line width
        width: f32,
    },
}

impl SurfaceCall {
    /// Page the call drew on.
    pub fn page(&self) -> usize {
        match self {
            SurfaceCall::Highlight { page, .. } | SurfaceCall::Border { page, .. } => *page,
        }
    }
}

/// Page surface holding pages in memory.
///
/// Draw calls are recorded instead of rendered; [`PageSurface::save`]
/// returns the call log as JSON. Literals can be hidden from search to
/// reproduce text that extraction sees but search cannot place.
///
/// # Examples
///
/// ```
/// use pdf_partmark::surface::{MemorySurface, PageSurface};
///
/// let mut surface = MemorySurface::new().with_text_page(&["Use (AB-123-L) here"]);
/// assert_eq!(surface.page_count(), 1);
/// assert_eq!(surface.search_for(0, "AB-123").unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    pages: Vec<PageText>,
    hidden: HashSet<(usize, String)>,
    calls: Vec<SurfaceCall>,
}

impl MemorySurface {
    /// Create a surface with no pages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page.
    pub fn with_page(mut self, page: PageText) -> Self {
        self.pages.push(page);
        self
    }

    /// Append a page laid out from plain text lines in a monospace grid.
    pub fn with_text_page<S: AsRef<str>>(self, lines: &[S]) -> Self {
        let glyphs = lines.iter().enumerate().flat_map(|(row, line)| {
            let top = MARGIN + LINE_PITCH * row as f32;
            let line: &str = line.as_ref();
            line.chars()
                .enumerate()
                .map(move |(col, ch)| {
                    let left = MARGIN + GLYPH_WIDTH * col as f32;
                    Glyph::new(ch, Rect::new(left, top, GLYPH_WIDTH, GLYPH_HEIGHT))
                })
                .collect::<Vec<_>>()
        });
        self.with_page(PageText::from_glyphs(glyphs))
    }

    /// Make search on `page` return nothing for `literal`.
    pub fn hide_from_search(mut self, page: usize, literal: impl Into<String>) -> Self {
        self.hidden.insert((page, literal.into()));
        self
    }

    /// Every draw call so far, in order.
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Highlight calls on one page.
    pub fn highlights_on(&self, page: usize) -> Vec<&SurfaceCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::Highlight { .. }) && c.page() == page)
            .collect()
    }

    /// Border calls on one page.
    pub fn borders_on(&self, page: usize) -> Vec<&SurfaceCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::Border { .. }) && c.page() == page)
            .collect()
    }

    fn page(&self, page: usize) -> Result<&PageText> {
        self.pages.get(page).ok_or(Error::PageOutOfRange {
            page,
            count: self.pages.len(),
        })
    }
}

impl PageSurface for MemorySurface {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn text_lines(&mut self, page: usize) -> Result<Vec<String>> {
        Ok(self.page(page)?.lines())
    }

    fn words(&mut self, page: usize) -> Result<Vec<Token>> {
        Ok(self.page(page)?.tokens())
    }

    fn search_for(&mut self, page: usize, literal: &str) -> Result<Vec<Quad>> {
        let text = self.page(page)?;
        if self.hidden.contains(&(page, literal.to_string())) {
            return Ok(Vec::new());
        }
        TextSearcher::search_quads(text, literal)
    }

    fn draw_quad(&mut self, page: usize, quad: &Quad, color: Rgb, width: f32) -> Result<()> {
        self.page(page)?;
        self.calls.push(SurfaceCall::Border {
            page,
            quad: *quad,
            color: color.to_array(),
            width,
        });
        Ok(())
    }

    fn add_highlight(
        &mut self,
        page: usize,
        regions: &[Quad],
        color: Rgb,
        opacity: f32,
    ) -> Result<AnnotationHandle> {
        self.page(page)?;
        let index = self.highlights_on(page).len();
        self.calls.push(SurfaceCall::Highlight {
            page,
            regions: regions.to_vec(),
            color: color.to_array(),
            opacity,
        });
        Ok(AnnotationHandle { page, index })
    }

    fn save(&mut self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(&self.calls)?)
    }
}
