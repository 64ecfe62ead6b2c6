//! Part identifier classification and per-page normalization.
//!
//! ## Example
//!
//! ```
//! use pdf_partmark::parts::{unique_identifiers, classify, Classification};
//!
//! let ids = unique_identifiers(["(AB-123-L)", "AB-123,", "C-4567"]);
//! assert_eq!(ids.len(), 2);
//! assert!(matches!(classify("none"), Classification::NoMatch));
//! ```

mod matcher;
mod normalizer;

pub use matcher::{classify, is_part_token, strip_noise, Classification, Direction, NOISE_CHARS};
pub use normalizer::{matching_tokens, scan_markers, unique_identifiers, DirectionMarker, PageParts};
