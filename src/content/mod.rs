//! PDF content stream interpretation.
//!
//! Turns the text operators of decoded page content into positioned glyphs
//! for [`crate::layout::PageText`].

mod font_metrics;
pub mod graphics_state;
pub(crate) mod objects;
mod text_interpreter;

pub use font_metrics::FontMetrics;
pub use graphics_state::{GraphicsState, GraphicsStateStack, Matrix};
pub use text_interpreter::TextInterpreter;
