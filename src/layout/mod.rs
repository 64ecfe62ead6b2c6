//! Positioned page text.
//!
//! Surfaces describe each page as [`PageText`]: lines of words where every
//! character carries its own box. The line view, the word view and literal
//! search are all derived from it.

mod page_text;

pub use page_text::{Glyph, PageText, TextLine, Token, Word};
