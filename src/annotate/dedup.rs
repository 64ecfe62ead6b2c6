//! Geometric deduplication of highlights.
//!
//! Highlighting the same spot twice stacks the translucent fills and darkens
//! it. Each highlight request is keyed by the truncated lower-left corner of
//! the last region resolved for the identifier; a key already used on the
//! page suppresses the highlight.

use crate::geometry::Quad;
use std::collections::HashSet;

/// Truncated lower-left corner of a region.
pub type PositionKey = (i64, i64);

/// Position keys already highlighted on the current page.
#[derive(Debug, Clone, Default)]
pub struct HighlightDedup {
    seen: HashSet<PositionKey>,
}

impl HighlightDedup {
    /// Create an empty set for a new page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Key of a resolved region list: the last region's lower-left corner.
    pub fn position_key(regions: &[Quad]) -> Option<PositionKey> {
        regions.last().map(Quad::lower_left_key)
    }

    /// Record the regions' key. Returns `false` if the key was already used
    /// or there are no regions.
    pub fn claim(&mut self, regions: &[Quad]) -> bool {
        match Self::position_key(regions) {
            Some(key) => self.seen.insert(key),
            None => false,
        }
    }

    /// Number of keys claimed.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Check whether no key has been claimed.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn quad(x: f32, y: f32) -> Quad {
        Quad::from_rect(&Rect::new(x, y, 30.0, 10.0))
    }

    #[test]
    fn test_key_uses_last_region_only() {
        let regions = [quad(10.0, 10.0), quad(50.5, 90.9)];
        assert_eq!(HighlightDedup::position_key(&regions), Some((50, 100)));
        assert_eq!(HighlightDedup::position_key(&[]), None);
    }

    #[test]
    fn test_same_truncated_corner_is_claimed_once() {
        let mut dedup = HighlightDedup::new();
        assert!(dedup.claim(&[quad(10.2, 20.0)]));
        assert!(!dedup.claim(&[quad(10.9, 20.4)]));
        assert!(dedup.claim(&[quad(11.0, 20.0)]));
        assert_eq!(dedup.len(), 2);
    }

    #[test]
    fn test_earlier_regions_do_not_collide() {
        let mut dedup = HighlightDedup::new();
        assert!(dedup.claim(&[quad(10.0, 10.0), quad(100.0, 100.0)]));
        // Shares the first region but not the last one
        assert!(dedup.claim(&[quad(10.0, 10.0), quad(200.0, 100.0)]));
    }

    #[test]
    fn test_swapped_coordinates_are_distinct() {
        let mut dedup = HighlightDedup::new();
        // Lower-left corners (40, 30) and (30, 40)
        assert!(dedup.claim(&[quad(40.0, 20.0)]));
        assert!(dedup.claim(&[quad(30.0, 30.0)]));
    }

    #[test]
    fn test_empty_regions_are_never_claimed() {
        let mut dedup = HighlightDedup::new();
        assert!(!dedup.claim(&[]));
        assert!(dedup.is_empty());
    }
}
