//! Numeric sanity predicates applied to layout geometry.
//!
//! A value is usable for a size when it is normal or zero, non-negative and
//! comfortably below `f64::MAX`. Positions additionally allow negatives.
use trellis_types::{Point, Rect, Size};

const LIMIT: f64 = f64::MAX / 2.0;

#[inline]
pub fn is_points_valid_for_layout(points: f64) -> bool {
    (points.is_normal() || points == 0.0) && points >= 0.0 && points < LIMIT
}

#[inline]
pub fn is_size_valid_for_layout(size: Size) -> bool {
    is_points_valid_for_layout(size.width) && is_points_valid_for_layout(size.height)
}

#[inline]
pub fn is_position_points_valid_for_layout(points: f64) -> bool {
    (points.is_normal() || points == 0.0) && points < LIMIT
}

#[inline]
pub fn is_position_valid_for_layout(point: Point) -> bool {
    is_position_points_valid_for_layout(point.x) && is_position_points_valid_for_layout(point.y)
}

pub fn is_rect_valid_for_layout(rect: Rect) -> bool {
    is_position_valid_for_layout(rect.origin) && is_size_valid_for_layout(rect.size)
}
