//! Literal text search over positioned page text.
//!
//! Every occurrence yields the bounding quad of the matched characters.
//! Occurrences may sit inside a longer word, so searching `AB-123` finds it
//! within `(AB-123-L)`.

use crate::error::{Error, Result};
use crate::geometry::{Quad, Rect};
use crate::layout::{PageText, TextLine};
use regex::{Regex, RegexBuilder};

/// A search hit with position information.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Line index within the page
    pub line: usize,
    /// The matched text
    pub text: String,
    /// Bounding quad of the matched characters
    pub quad: Quad,
}

/// Text searcher over a page's lines.
pub struct TextSearcher;

impl TextSearcher {
    /// Find every exact occurrence of `needle`, in reading order.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_partmark::geometry::Rect;
    /// use pdf_partmark::layout::{PageText, TextLine, Word};
    /// use pdf_partmark::search::TextSearcher;
    ///
    /// let page = PageText::new(vec![TextLine::new(vec![Word::proportional(
    ///     "(AB-123-L)",
    ///     Rect::new(0.0, 0.0, 100.0, 10.0),
    /// )])]);
    ///
    /// let hits = TextSearcher::search(&page, "-L").unwrap();
    /// assert_eq!(hits.len(), 1);
    /// assert_eq!(hits[0].quad.rect(), Rect::new(70.0, 0.0, 20.0, 10.0));
    /// ```
    pub fn search(page: &PageText, needle: &str) -> Result<Vec<SearchResult>> {
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let regex = Self::build_regex(needle)?;

        let mut results = Vec::new();
        for (line_idx, line) in page.text_lines().iter().enumerate() {
            results.extend(Self::search_line(line_idx, line, &regex));
        }
        Ok(results)
    }

    /// Quads of every occurrence of `needle`.
    pub fn search_quads(page: &PageText, needle: &str) -> Result<Vec<Quad>> {
        Ok(Self::search(page, needle)?.into_iter().map(|r| r.quad).collect())
    }

    fn search_line(line_idx: usize, line: &TextLine, regex: &Regex) -> Vec<SearchResult> {
        let (text, boxes) = line.indexed();

        regex
            .find_iter(&text)
            .filter_map(|m| {
                let start = text[..m.start()].chars().count();
                let len = m.as_str().chars().count();
                let bbox = Self::union_boxes(&boxes[start..start + len])?;
                Some(SearchResult {
                    line: line_idx,
                    text: m.as_str().to_string(),
                    quad: Quad::from_rect(&bbox),
                })
            })
            .collect()
    }

    /// Build a regex matching `needle` literally.
    fn build_regex(needle: &str) -> Result<Regex> {
        RegexBuilder::new(&regex::escape(needle))
            .build()
            .map_err(|e| Error::InvalidPdf(format!("Invalid search text: {}", e)))
    }

    fn union_boxes(boxes: &[Option<Rect>]) -> Option<Rect> {
        boxes.iter().flatten().copied().reduce(|acc, r| acc.union(&r))
    }
}
