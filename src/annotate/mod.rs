//! Annotation placement.
//!
//! Turns a page's colored identifiers into highlight annotations and its
//! `-L`/`-R` markers into stroked borders. Border colors depend only on the
//! direction, never on the identifier colors.

mod dedup;
mod placement;

pub use dedup::{HighlightDedup, PositionKey};
pub use placement::{border_quad, place_borders, place_highlights, BorderStyle, PlacementStats};
