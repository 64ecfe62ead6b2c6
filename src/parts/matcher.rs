//! Part identifier grammar.
//!
//! A part identifier is one or two uppercase letters, a hyphen, three to five
//! digits and an optional trailing uppercase letter, e.g. `AB-123`,
//! `F-01234C`. Tokens may carry a trailing `-L`/`-R` designator marking the
//! left or right variant of the part; the canonical identifier never
//! includes it.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    /// Identifier with its optional direction designator
    static ref RE_PART: Regex = Regex::new(r"[A-Z]{1,2}-\d{3,5}[A-Z]?(-[LR])?").unwrap();

    /// Identifier without designator (canonical form)
    static ref RE_PART_CORE: Regex = Regex::new(r"[A-Z]{1,2}-\d{3,5}[A-Z]?").unwrap();
}

/// Characters stripped from both ends of a token before canonicalization.
///
/// The pattern alone cannot exclude a leading `(`, so tokens such as
/// `(AB-123-L)` or `AB-123,` are cleaned here first.
pub const NOISE_CHARS: &[char] = &['(', ')', ',', ';'];

/// Left or right variant designator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Direction {
    /// `-L`
    Left,
    /// `-R`
    Right,
}

impl Direction {
    /// Both directions, left first.
    pub const ALL: [Direction; 2] = [Direction::Left, Direction::Right];

    /// The literal marker text for this direction.
    pub fn marker(&self) -> &'static str {
        match self {
            Direction::Left => "-L",
            Direction::Right => "-R",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "-L" => Some(Direction::Left),
            "-R" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Outcome of classifying a text fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The fragment holds no part identifier
    NoMatch,
    /// The first identifier found in the fragment
    Identifier {
        /// Identifier without designator or surrounding punctuation
        canonical: String,
        /// Designator attached to the identifier, if any
        direction: Option<Direction>,
    },
}

impl Classification {
    /// Canonical identifier, if the fragment matched.
    pub fn canonical(&self) -> Option<&str> {
        match self {
            Classification::Identifier { canonical, .. } => Some(canonical),
            Classification::NoMatch => None,
        }
    }
}

/// Check whether a raw token contains a part identifier anywhere.
///
/// # Examples
///
/// ```
/// use pdf_partmark::parts::is_part_token;
///
/// assert!(is_part_token("(AB-123-L)"));
/// assert!(!is_part_token("AB-12"));
/// ```
pub fn is_part_token(fragment: &str) -> bool {
    RE_PART.is_match(fragment)
}

/// Remove leading and trailing noise characters.
pub fn strip_noise(fragment: &str) -> &str {
    fragment.trim_matches(NOISE_CHARS)
}

/// Classify a fragment as a part identifier.
///
/// Noise characters are stripped first, then the first match wins. A longer
/// digit run is not rejected: `AB-1234567` yields `AB-12345`.
///
/// # Examples
///
/// ```
/// use pdf_partmark::parts::{classify, Classification, Direction};
///
/// assert_eq!(
///     classify("(AB-123-L)"),
///     Classification::Identifier {
///         canonical: "AB-123".to_string(),
///         direction: Some(Direction::Left),
///     }
/// );
/// assert_eq!(classify("page 12"), Classification::NoMatch);
/// ```
pub fn classify(fragment: &str) -> Classification {
    let cleaned = strip_noise(fragment);
    let Some(caps) = RE_PART.captures(cleaned) else {
        return Classification::NoMatch;
    };

    let Some(whole) = caps.get(0) else {
        return Classification::NoMatch;
    };
    let Some(core) = RE_PART_CORE.find(whole.as_str()) else {
        return Classification::NoMatch;
    };
    let direction = caps.get(1).and_then(|m| Direction::from_suffix(m.as_str()));

    Classification::Identifier {
        canonical: core.as_str().to_string(),
        direction,
    }
}
