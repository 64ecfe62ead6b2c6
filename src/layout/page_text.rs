//! Line and word views over positioned page text.

use crate::geometry::{Quad, Rect};
use serde::Serialize;

/// Fraction of the glyph height a baseline may drift before a new line starts.
const LINE_TOLERANCE: f32 = 0.5;

/// Horizontal gap, as a fraction of glyph height, that splits a word.
const WORD_GAP: f32 = 0.25;

/// A single positioned character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    /// Decoded character
    pub ch: char,
    /// Glyph box in page space
    pub rect: Rect,
}

impl Glyph {
    /// Create a glyph.
    pub fn new(ch: char, rect: Rect) -> Self {
        Self { ch, rect }
    }
}

/// A word-view token: literal text and its bounding quad.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// Token text as extracted
    pub text: String,
    /// Bounding quad on the page
    pub quad: Quad,
}

/// A word with one box per character.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    text: String,
    boxes: Vec<Rect>,
}

impl Word {
    fn from_glyphs(glyphs: &[Glyph]) -> Self {
        Self {
            text: glyphs.iter().map(|g| g.ch).collect(),
            boxes: glyphs.iter().map(|g| g.rect).collect(),
        }
    }

    /// Build a word from its overall box, giving each character an equal
    /// horizontal slice.
    pub fn proportional(text: &str, rect: Rect) -> Self {
        let count = text.chars().count().max(1) as f32;
        let step = rect.width / count;
        let boxes = text
            .chars()
            .enumerate()
            .map(|(i, _)| Rect::new(rect.x + step * i as f32, rect.y, step, rect.height))
            .collect();
        Self {
            text: text.to_string(),
            boxes,
        }
    }

    /// Word text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Per-character boxes.
    pub fn boxes(&self) -> &[Rect] {
        &self.boxes
    }

    /// Bounding box of the whole word.
    pub fn bbox(&self) -> Option<Rect> {
        self.boxes.iter().copied().reduce(|acc, r| acc.union(&r))
    }
}

/// Words sharing a baseline, in reading order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextLine {
    words: Vec<Word>,
}

impl TextLine {
    /// Create a line from its words.
    pub fn new(words: Vec<Word>) -> Self {
        Self { words }
    }

    /// Words of the line.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Line text (words joined by single spaces) with the box of every
    /// character; separators have no box.
    pub fn indexed(&self) -> (String, Vec<Option<Rect>>) {
        let mut text = String::new();
        let mut boxes = Vec::new();

        for (idx, word) in self.words.iter().enumerate() {
            if idx > 0 {
                text.push(' ');
                boxes.push(None);
            }
            text.push_str(&word.text);
            boxes.extend(word.boxes.iter().copied().map(Some));
        }

        (text, boxes)
    }
}

/// Positioned text of one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageText {
    lines: Vec<TextLine>,
}

impl PageText {
    /// Create page text from ready-made lines.
    pub fn new(lines: Vec<TextLine>) -> Self {
        Self { lines }
    }

    /// Group glyphs, given in content order, into lines and words.
    ///
    /// A new line starts when the baseline moves by more than half a glyph
    /// height or the pen jumps back to the left. Whitespace and horizontal
    /// gaps wider than a quarter of the glyph height end a word.
    pub fn from_glyphs<I: IntoIterator<Item = Glyph>>(glyphs: I) -> Self {
        let mut lines = Vec::new();
        let mut words: Vec<Word> = Vec::new();
        let mut current: Vec<Glyph> = Vec::new();
        let mut last: Option<Glyph> = None;

        for glyph in glyphs {
            if let Some(prev) = last {
                let size = prev.rect.height.max(glyph.rect.height).max(1.0);
                let new_line = (glyph.rect.bottom() - prev.rect.bottom()).abs() > LINE_TOLERANCE * size
                    || glyph.rect.left() < prev.rect.left() - size;
                let gap = glyph.rect.left() - prev.rect.right() > WORD_GAP * size;

                if new_line || gap {
                    flush_word(&mut current, &mut words);
                }
                if new_line && !words.is_empty() {
                    lines.push(TextLine::new(std::mem::take(&mut words)));
                }
            }

            if glyph.ch.is_whitespace() {
                flush_word(&mut current, &mut words);
            } else {
                current.push(glyph);
            }
            last = Some(glyph);
        }

        flush_word(&mut current, &mut words);
        if !words.is_empty() {
            lines.push(TextLine::new(words));
        }

        Self { lines }
    }

    /// Lines of the page.
    pub fn text_lines(&self) -> &[TextLine] {
        &self.lines
    }

    /// Line view: one string per line.
    pub fn lines(&self) -> Vec<String> {
        self.lines.iter().map(|line| line.indexed().0).collect()
    }

    /// Word view: every word with its bounding quad.
    pub fn tokens(&self) -> Vec<Token> {
        self.lines
            .iter()
            .flat_map(|line| line.words.iter())
            .filter_map(|word| {
                word.bbox().map(|bbox| Token {
                    text: word.text.clone(),
                    quad: Quad::from_rect(&bbox),
                })
            })
            .collect()
    }
}

fn flush_word(current: &mut Vec<Glyph>, words: &mut Vec<Word>) {
    if !current.is_empty() {
        words.push(Word::from_glyphs(current));
        current.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Monospace glyphs, 6 wide and 10 tall, starting at `(x, y)`.
    fn glyph_run(text: &str, x: f32, y: f32) -> Vec<Glyph> {
        text.chars()
            .enumerate()
            .map(|(i, ch)| Glyph::new(ch, Rect::new(x + 6.0 * i as f32, y, 6.0, 10.0)))
            .collect()
    }

    #[test]
    fn test_groups_words_on_whitespace() {
        let page = PageText::from_glyphs(glyph_run("see (AB-123-L) here", 10.0, 100.0));
        assert_eq!(page.lines(), vec!["see (AB-123-L) here"]);

        let tokens = page.tokens();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].text, "(AB-123-L)");
        assert_eq!(tokens[1].quad.rect(), Rect::new(34.0, 100.0, 60.0, 10.0));
    }

    #[test]
    fn test_baseline_change_starts_new_line() {
        let mut glyphs = glyph_run("A-100", 10.0, 100.0);
        glyphs.extend(glyph_run("B-200", 10.0, 120.0));
        let page = PageText::from_glyphs(glyphs);
        assert_eq!(page.lines(), vec!["A-100", "B-200"]);
    }

    #[test]
    fn test_gap_splits_words_without_space() {
        let mut glyphs = glyph_run("A-100", 10.0, 100.0);
        glyphs.extend(glyph_run("B-200", 100.0, 100.0));
        let page = PageText::from_glyphs(glyphs);
        assert_eq!(page.lines(), vec!["A-100 B-200"]);
        assert_eq!(page.tokens().len(), 2);
    }

    #[test]
    fn test_proportional_word_boxes() {
        let word = Word::proportional("AB-1", Rect::new(0.0, 0.0, 40.0, 10.0));
        assert_eq!(word.boxes().len(), 4);
        assert_eq!(word.boxes()[2], Rect::new(20.0, 0.0, 10.0, 10.0));
        assert_eq!(word.bbox(), Some(Rect::new(0.0, 0.0, 40.0, 10.0)));
    }

    #[test]
    fn test_indexed_line_marks_separators() {
        let line = TextLine::new(vec![
            Word::proportional("ab", Rect::new(0.0, 0.0, 10.0, 10.0)),
            Word::proportional("c", Rect::new(20.0, 0.0, 5.0, 10.0)),
        ]);
        let (text, boxes) = line.indexed();
        assert_eq!(text, "ab c");
        assert_eq!(boxes.len(), 4);
        assert!(boxes[2].is_none());
    }

    #[test]
    fn test_empty_page() {
        let page = PageText::from_glyphs(Vec::new());
        assert!(page.lines().is_empty());
        assert!(page.tokens().is_empty());
    }
}
