//! # Geometry
//!
//! Axis-aligned boxes and grid snapping. Boxes are anchored at their top-left
//! corner and `y` grows downward, matching screen space.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Extent along x
    pub width: f32,
    /// Extent along y
    pub height: f32,
}

impl Aabb {
    /// Creates a box; negative extents are clamped to zero.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Aabb {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True iff the two boxes share interior area.
    ///
    /// Touching edges do not count, and a zero-area box never overlaps anything.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// True iff the vertical spans overlap (open intervals).
    pub fn overlaps_vertically(&self, other: &Aabb) -> bool {
        self.bottom() > other.top() && self.top() < other.bottom()
    }

    /// True iff the horizontal spans overlap (open intervals).
    pub fn overlaps_horizontally(&self, other: &Aabb) -> bool {
        self.right() > other.left() && self.left() < other.right()
    }

    /// Point containment with inclusive edges, as used for pointer picking.
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// The same box moved to a new top-left corner.
    pub fn at(&self, x: f32, y: f32) -> Aabb {
        Aabb { x, y, ..*self }
    }
}

/// Rounds `value` down to the nearest multiple of `tile_size`.
pub fn snap_to_grid(value: f32, tile_size: f32) -> f32 {
    (value / tile_size).floor() * tile_size
}

/// Rounds `value` up to the nearest multiple of `tile_size`.
pub fn snap_up_to_grid(value: f32, tile_size: f32) -> f32 {
    (value / tile_size).ceil() * tile_size
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Aabb::new(0.0, 0.0, 10.0, 10.0), Aabb::new(5.0, 5.0, 10.0, 10.0), true)]
    #[case(Aabb::new(0.0, 0.0, 10.0, 10.0), Aabb::new(10.0, 0.0, 10.0, 10.0), false)]
    #[case(Aabb::new(0.0, 0.0, 10.0, 10.0), Aabb::new(0.0, 10.0, 10.0, 10.0), false)]
    #[case(Aabb::new(0.0, 0.0, 10.0, 10.0), Aabb::new(2.0, 2.0, 2.0, 2.0), true)]
    #[case(Aabb::new(0.0, 0.0, 10.0, 10.0), Aabb::new(-20.0, 0.0, 5.0, 5.0), false)]
    fn overlap_cases(#[case] a: Aabb, #[case] b: Aabb, #[case] expected: bool) {
        assert_eq!(a.overlaps(&b), expected);
        assert_eq!(b.overlaps(&a), expected);
    }

    #[test]
    fn degenerate_boxes_never_overlap() {
        let big = Aabb::new(0.0, 0.0, 100.0, 100.0);
        assert!(!Aabb::new(50.0, 50.0, 0.0, 10.0).overlaps(&big));
        assert!(!Aabb::new(50.0, 50.0, 10.0, 0.0).overlaps(&big));
        assert!(!big.overlaps(&Aabb::new(50.0, 50.0, 0.0, 0.0)));
    }

    #[test]
    fn negative_extents_are_clamped() {
        let b = Aabb::new(1.0, 2.0, -3.0, -4.0);
        assert_eq!(b.width, 0.0);
        assert_eq!(b.height, 0.0);
    }

    #[rstest]
    #[case(0.0)]
    #[case(31.9)]
    #[case(32.0)]
    #[case(-0.5)]
    #[case(-64.0)]
    #[case(1234.567)]
    fn snapping_is_idempotent_and_aligned(#[case] v: f32) {
        let once = snap_to_grid(v, 32.0);
        assert_eq!(snap_to_grid(once, 32.0), once);
        assert_eq!(once % 32.0, 0.0);
        assert!(once <= v);
        assert!(v - once < 32.0);
    }

    #[test]
    fn snap_up_rounds_toward_positive() {
        assert_eq!(snap_up_to_grid(33.0, 32.0), 64.0);
        assert_eq!(snap_up_to_grid(64.0, 32.0), 64.0);
    }
}
