// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::wrong_self_convention)]
#![allow(clippy::match_like_matches_macro)]

//! # PDF Partmark
//!
//! Finds part numbers in PDF pages, gives every distinct part on a page its
//! own highlight color, and outlines the `-L`/`-R` markers of left and right
//! variants.
//!
//! ## Pipeline
//!
//! ```text
//! page surface ── line view ──► direction markers ──────────────┐
//!      │                                                        ▼
//!      └──────── word view ──► identifiers ──► colors ──► highlights, borders
//! ```
//!
//! - [`parts`]: identifier grammar, noise stripping and per-page dedup
//! - [`color`]: named colors, the per-page shuffled palette and assignment
//! - [`annotate`]: geometric dedup of highlights and border outlines
//! - [`surface`]: the page surface capability, over PDF files or in memory
//! - [`highlighter`]: runs the pipeline page by page
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_partmark::config::HighlightConfig;
//! use pdf_partmark::highlighter::Highlighter;
//! use pdf_partmark::surface::{PageSurface, PdfSurface};
//!
//! # fn main() -> pdf_partmark::Result<()> {
//! let mut surface = PdfSurface::open("assembly.pdf")?;
//! let mut highlighter = Highlighter::new(HighlightConfig::default())?;
//!
//! let report = highlighter.process_document(&mut surface)?;
//! println!("{} Matches found", report.total_matches);
//!
//! std::fs::write("assembly-marked.pdf", surface.save()?)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Identifier recognition and coloring
pub mod color;
pub mod config;
pub mod parts;

// Page model
pub mod geometry;
pub mod layout;
pub mod search;

// PDF backend
pub mod content;
pub mod surface;
pub mod writer;

// Placement and pipeline
pub mod annotate;
pub mod highlighter;

pub use config::HighlightConfig;
pub use error::{Error, Result};
pub use highlighter::{DocumentReport, Highlighter, PageReport};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.starts_with("0."));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "pdf_partmark");
    }
}
