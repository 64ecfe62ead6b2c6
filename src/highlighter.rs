//! The page pipeline.
//!
//! For every page: collect direction markers from the line view, reshuffle
//! the palette, collect identifiers from the word view, assign colors,
//! place highlights and finally place borders. Pages are processed strictly
//! in order; any surface error aborts the document.

use crate::annotate::{place_borders, place_highlights, BorderStyle, PlacementStats};
use crate::color::{assign_colors, NamedColor, PaletteState};
use crate::config::HighlightConfig;
use crate::error::Result;
use crate::parts::{DirectionMarker, PageParts};
use crate::surface::PageSurface;
use indexmap::IndexMap;
use serde::Serialize;

/// What happened on one page.
#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    /// Page number (1-based)
    pub page: usize,
    /// Word tokens that matched the identifier grammar
    pub match_count: usize,
    /// Distinct identifiers, in color assignment order
    pub identifiers: Vec<String>,
    /// Color given to each identifier
    pub colors: IndexMap<String, NamedColor>,
    /// Direction markers found in the line view
    pub markers: Vec<DirectionMarker>,
    /// Draw call counts
    #[serde(flatten)]
    pub placement: PlacementStats,
}

/// What happened across a document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentReport {
    /// Number of pages processed
    pub page_count: usize,
    /// Sum of the pages' match counts
    pub total_matches: usize,
    /// Draw call counts summed over all pages
    pub totals: PlacementStats,
    /// Per-page reports, in page order
    pub pages: Vec<PageReport>,
}

impl DocumentReport {
    /// Add a page's report to the totals.
    pub fn push(&mut self, report: PageReport) {
        self.page_count += 1;
        self.total_matches += report.match_count;
        self.totals.merge(&report.placement);
        self.pages.push(report);
    }
}

/// Highlights part identifiers page by page.
///
/// # Examples
///
/// ```
/// use pdf_partmark::config::HighlightConfig;
/// use pdf_partmark::highlighter::Highlighter;
/// use pdf_partmark::surface::MemorySurface;
///
/// let mut surface = MemorySurface::new().with_text_page(&["Fit (AB-123-L) first"]);
/// let mut highlighter = Highlighter::new(HighlightConfig::default().with_seed(7)).unwrap();
///
/// let report = highlighter.process_document(&mut surface).unwrap();
/// assert_eq!(report.total_matches, 1);
/// assert_eq!(report.pages[0].identifiers, vec!["AB-123"]);
/// assert_eq!(report.totals.borders, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Highlighter {
    config: HighlightConfig,
    palette: PaletteState,
    borders: BorderStyle,
}

impl Highlighter {
    /// Create a highlighter, resolving every configured color.
    pub fn new(config: HighlightConfig) -> Result<Self> {
        config.validate()?;
        let palette = PaletteState::from_config(&config)?;
        let borders = BorderStyle::from_config(&config)?;
        Ok(Self {
            config,
            palette,
            borders,
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// Current palette order.
    pub fn palette(&self) -> &PaletteState {
        &self.palette
    }

    /// Process one page (0-indexed).
    pub fn process_page<S: PageSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        page: usize,
    ) -> Result<PageReport> {
        let lines = surface.text_lines(page)?;
        self.palette.reshuffle();
        let tokens = surface.words(page)?;

        let parts = PageParts::collect(&tokens, &lines);
        let identifiers: Vec<String> =
            parts.ordered_identifiers().into_iter().map(str::to_string).collect();
        let colors = assign_colors(&identifiers, &self.palette);

        let mut placement = PlacementStats::default();
        place_highlights(surface, page, &colors, self.config.opacity, &mut placement)?;
        place_borders(surface, page, &parts, &self.borders, &mut placement)?;

        log::debug!(
            "Page {}: {} matches, {} identifiers, {} highlights, {} borders",
            page + 1,
            parts.match_count,
            identifiers.len(),
            placement.highlights,
            placement.borders
        );

        Ok(PageReport {
            page: page + 1,
            match_count: parts.match_count,
            identifiers,
            colors: colors
                .iter()
                .map(|(id, color)| (id.to_string(), color.clone()))
                .collect(),
            markers: parts.markers,
            placement,
        })
    }

    /// Process every page in order.
    pub fn process_document<S: PageSurface + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> Result<DocumentReport> {
        let mut report = DocumentReport::default();
        for page in 0..surface.page_count() {
            report.push(self.process_page(surface, page)?);
        }
        log::info!(
            "Processed {} pages, {} matches",
            report.page_count,
            report.total_matches
        );
        Ok(report)
    }
}
