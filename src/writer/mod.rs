//! PDF object writers for highlight annotations and border outlines.
//!
//! Everything here works in PDF user space (bottom-left origin); the page
//! surface converts from page space before calling in.

mod border;
mod highlight;

pub use border::BorderPath;
pub use highlight::HighlightAnnotation;
