//! Circle collision tests
//!
//! Every body in the game is a circle, so overlap is a single distance check.

use glam::Vec2;

use crate::distance;

/// Whether two circles overlap. Touching (distance == r1 + r2) is not a hit.
#[inline]
pub fn circles_overlap(p1: Vec2, r1: f32, p2: Vec2, r2: f32) -> bool {
    distance(p1, p2) < r1 + r2
}

/// Unit vector pointing from `from` toward `to`; coincident centres give zero
#[inline]
pub fn separation_normal(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_inside() {
        assert!(circles_overlap(Vec2::ZERO, 10.0, Vec2::new(15.0, 0.0), 10.0));
    }

    #[test]
    fn test_touching_is_not_overlap() {
        assert!(!circles_overlap(Vec2::ZERO, 18.0, Vec2::new(0.0, 38.0), 20.0));
        assert!(!circles_overlap(Vec2::ZERO, 3.0, Vec2::new(3.0, 4.0), 2.0));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(8.0, -3.0);
        assert_eq!(circles_overlap(a, 4.0, b, 5.0), circles_overlap(b, 5.0, a, 4.0));
    }

    #[test]
    fn test_separation_normal() {
        let n = separation_normal(Vec2::new(0.0, 0.0), Vec2::new(0.0, 5.0));
        assert_eq!(n, Vec2::Y);
        assert_eq!(separation_normal(Vec2::ONE, Vec2::ONE), Vec2::ZERO);
    }
}
