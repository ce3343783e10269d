//! Geometry primitives: points, sizes, rects and the [`SizeRange`] box constraint.
//!
//! All measurements are `f64` points. `NaN` is the undefined marker and
//! `f64::INFINITY` stands for an unbounded maximum.
use serde::{Deserialize, Serialize};

/// Marker for a dimension that has no definite value.
pub const UNDEFINED: f64 = f64::NAN;

/// Maximum used for unconstrained ranges.
pub const INFINITY: f64 = f64::INFINITY;

/// Compares two scalars treating two undefined values as equal.
#[inline]
pub fn same_value(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self::ZERO
    }

    /// A size whose axes are both undefined.
    pub fn undefined() -> Self {
        Self::new(UNDEFINED, UNDEFINED)
    }

    /// Value equality where undefined axes compare equal to each other.
    pub fn same_as(&self, other: &Size) -> bool {
        same_value(self.width, other.width) && same_value(self.height, other.height)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }
}

/// Per-edge insets, used for text margins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Insets {
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// A closed scalar interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn exactly(value: f64) -> Self {
        Self::new(value, value)
    }

    /// Overlap of two ranges.
    ///
    /// Never fails: disjoint ranges collapse onto the bound of `self` that is
    /// closest to `other`.
    pub fn intersection(&self, other: &Range) -> Range {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        if min <= max {
            return Range::new(min, max);
        }
        if self.min < other.min {
            Range::exactly(self.max)
        } else {
            Range::exactly(self.min)
        }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        self.min.max(self.max.min(value))
    }
}

/// Minimum and maximum box size accepted by a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: Size,
    pub max: Size,
}

impl Default for SizeRange {
    fn default() -> Self {
        Self::unconstrained()
    }
}

impl SizeRange {
    pub fn new(min: Size, max: Size) -> Self {
        Self { min, max }
    }

    pub fn exactly(size: Size) -> Self {
        Self::new(size, size)
    }

    /// `[0, 0] .. [inf, inf]`
    pub fn unconstrained() -> Self {
        Self::new(Size::ZERO, Size::new(INFINITY, INFINITY))
    }

    pub fn from_ranges(width: Range, height: Range) -> Self {
        Self::new(
            Size::new(width.min, height.min),
            Size::new(width.max, height.max),
        )
    }

    pub fn width(&self) -> Range {
        Range::new(self.min.width, self.max.width)
    }

    pub fn height(&self) -> Range {
        Range::new(self.min.height, self.max.height)
    }

    pub fn intersection(&self, other: &SizeRange) -> SizeRange {
        SizeRange::from_ranges(
            self.width().intersection(&other.width()),
            self.height().intersection(&other.height()),
        )
    }

    /// Clamps each axis of `size` into this range.
    pub fn clamp(&self, size: Size) -> Size {
        Size::new(
            self.width().clamp(size.width),
            self.height().clamp(size.height),
        )
    }

    pub fn same_as(&self, other: &SizeRange) -> bool {
        self.min.same_as(&other.min) && self.max.same_as(&other.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_intersection_overlapping() {
        let r = Range::new(0.0, 100.0).intersection(&Range::new(50.0, 200.0));
        assert_eq!(r, Range::new(50.0, 100.0));
    }

    #[test]
    fn test_range_intersection_disjoint_collapses() {
        // self lies entirely before other
        let before = Range::new(0.0, 10.0).intersection(&Range::new(20.0, 30.0));
        assert_eq!(before, Range::exactly(10.0));
        // self lies entirely after other
        let after = Range::new(40.0, 50.0).intersection(&Range::new(20.0, 30.0));
        assert_eq!(after, Range::exactly(40.0));
    }

    #[test]
    fn test_size_range_clamp() {
        let range = SizeRange::new(Size::new(10.0, 10.0), Size::new(100.0, 50.0));
        assert_eq!(range.clamp(Size::new(5.0, 75.0)), Size::new(10.0, 50.0));
        assert_eq!(range.clamp(Size::new(42.0, 20.0)), Size::new(42.0, 20.0));
    }

    #[test]
    fn test_unconstrained_clamp_is_identity_for_positive_sizes() {
        let size = Size::new(1234.5, 0.25);
        assert_eq!(SizeRange::unconstrained().clamp(size), size);
    }

    #[test]
    fn test_same_as_treats_undefined_as_equal() {
        assert!(Size::undefined().same_as(&Size::undefined()));
        assert!(!Size::undefined().same_as(&Size::ZERO));
        assert_ne!(Size::undefined(), Size::undefined());
    }
}
