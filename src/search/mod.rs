//! Literal text search returning page regions.
//!
//! ## Example
//!
//! ```
//! use pdf_partmark::geometry::Rect;
//! use pdf_partmark::layout::{PageText, TextLine, Word};
//! use pdf_partmark::search::TextSearcher;
//!
//! let page = PageText::new(vec![TextLine::new(vec![
//!     Word::proportional("C-4567", Rect::new(72.0, 100.0, 36.0, 12.0)),
//! ])]);
//!
//! for hit in TextSearcher::search(&page, "C-4567").unwrap() {
//!     println!("Found '{}' at {:?}", hit.text, hit.quad);
//! }
//! ```

mod text_search;

pub use text_search::{SearchResult, TextSearcher};
