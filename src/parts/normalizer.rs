//! Per-page token normalization and deduplication.
//!
//! Two independent views of a page feed this module: the word view supplies
//! the tokens that may hold part identifiers, the line view supplies the
//! `-L`/`-R` direction markers. A marker attached to an identifier token is
//! found by both.

use super::matcher::{classify, is_part_token, Direction};
use crate::layout::Token;
use serde::Serialize;
use std::collections::BTreeSet;

/// One `-L`/`-R` occurrence in the line view of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectionMarker {
    /// Left or right
    pub direction: Direction,
    /// Line index in the page's line view
    pub line: usize,
    /// Byte offset of the marker within its line
    pub column: usize,
    /// Position among the page's markers of the same direction
    pub ordinal: usize,
}

/// Normalized identifiers and markers found on a single page.
#[derive(Debug, Clone, Default)]
pub struct PageParts {
    /// Distinct canonical identifiers
    pub identifiers: BTreeSet<String>,
    /// Direction marker occurrences in line order
    pub markers: Vec<DirectionMarker>,
    /// Number of word tokens that matched the identifier grammar
    pub match_count: usize,
}

impl PageParts {
    /// Build the page's identifier and marker sets from both text views.
    pub fn collect(tokens: &[Token], lines: &[String]) -> Self {
        let matches = matching_tokens(tokens);
        for token in &matches {
            log::debug!("Matched token: {}", token.text);
        }

        Self {
            identifiers: unique_identifiers(matches.iter().map(|t| t.text.as_str())),
            markers: scan_markers(lines),
            match_count: matches.len(),
        }
    }

    /// Identifiers in color assignment order (descending lexicographic).
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_partmark::parts::PageParts;
    ///
    /// let mut parts = PageParts::default();
    /// for id in ["AB-123", "AA-999", "Z-001"] {
    ///     parts.identifiers.insert(id.to_string());
    /// }
    /// assert_eq!(parts.ordered_identifiers(), vec!["Z-001", "AB-123", "AA-999"]);
    /// ```
    pub fn ordered_identifiers(&self) -> Vec<&str> {
        self.identifiers.iter().rev().map(String::as_str).collect()
    }

    /// Markers of one direction, in ordinal order.
    pub fn markers_for(&self, direction: Direction) -> impl Iterator<Item = &DirectionMarker> {
        self.markers.iter().filter(move |m| m.direction == direction)
    }
}

/// Word tokens that contain an identifier.
pub fn matching_tokens(tokens: &[Token]) -> Vec<&Token> {
    tokens.iter().filter(|t| is_part_token(&t.text)).collect()
}

/// Distinct canonical identifiers among the fragments.
///
/// Fragments that hold no identifier once noise is stripped are dropped.
pub fn unique_identifiers<'a, I>(fragments: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    fragments
        .into_iter()
        .filter_map(|fragment| classify(fragment).canonical().map(str::to_string))
        .collect()
}

/// Every literal `-L` and `-R` in the page's lines.
pub fn scan_markers(lines: &[String]) -> Vec<DirectionMarker> {
    let mut markers = Vec::new();
    let mut ordinals = [0usize; 2];

    for (line_idx, line) in lines.iter().enumerate() {
        for (slot, direction) in Direction::ALL.iter().enumerate() {
            for (column, _) in line.match_indices(direction.marker()) {
                markers.push(DirectionMarker {
                    direction: *direction,
                    line: line_idx,
                    column,
                    ordinal: ordinals[slot],
                });
                ordinals[slot] += 1;
            }
        }
    }

    markers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Quad, Rect};

    fn token(text: &str) -> Token {
        Token {
            text: text.to_string(),
            quad: Quad::from_rect(&Rect::new(0.0, 0.0, 10.0, 10.0)),
        }
    }

    #[test]
    fn test_unique_identifiers_dedups_variants() {
        let ids = unique_identifiers(["AB-123", "(AB-123-L)", "AB-123-R,", "C-4567"]);
        assert_eq!(ids.len(), 2);
        assert!(ids.contains("AB-123"));
        assert!(ids.contains("C-4567"));
    }

    #[test]
    fn test_fragment_without_identifier_is_dropped() {
        let ids = unique_identifiers(["(,", "hello"]);
        assert!(ids.is_empty());
    }

    #[test]
    fn test_ordered_identifiers_descending() {
        let tokens = vec![token("AB-123"), token("AA-999"), token("Z-001")];
        let parts = PageParts::collect(&tokens, &[]);
        assert_eq!(parts.ordered_identifiers(), vec!["Z-001", "AB-123", "AA-999"]);
    }

    #[test]
    fn test_match_count_counts_tokens_not_identifiers() {
        let tokens = vec![token("AB-123"), token("AB-123,"), token("see"), token("C-100")];
        let parts = PageParts::collect(&tokens, &[]);
        assert_eq!(parts.match_count, 3);
        assert_eq!(parts.identifiers.len(), 2);
    }

    #[test]
    fn test_scan_markers_orders_by_line_then_direction() {
        let lines = vec![
            "(AB-123-L) and C-100-R".to_string(),
            "no markers".to_string(),
            "X-900-L".to_string(),
        ];
        let markers = scan_markers(&lines);
        assert_eq!(markers.len(), 3);

        assert_eq!(markers[0].direction, Direction::Left);
        assert_eq!((markers[0].line, markers[0].column, markers[0].ordinal), (0, 7, 0));
        assert_eq!(markers[1].direction, Direction::Right);
        assert_eq!((markers[1].line, markers[1].ordinal), (0, 0));
        assert_eq!(markers[2].direction, Direction::Left);
        assert_eq!((markers[2].line, markers[2].ordinal), (2, 1));
    }

    #[test]
    fn test_markers_for_filters_direction() {
        let lines = vec!["A-100-L B-200-L C-300-R".to_string()];
        let parts = PageParts::collect(&[], &lines);
        assert_eq!(parts.markers_for(Direction::Left).count(), 2);
        assert_eq!(parts.markers_for(Direction::Right).count(), 1);
    }
}
