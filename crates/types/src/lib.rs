pub mod attribute;
pub mod color;
pub mod geometry;
pub mod ids;

pub use attribute::LayoutAttribute;
pub use color::Color;
pub use geometry::{Insets, Point, Range, Rect, Size, SizeRange, INFINITY, UNDEFINED};
pub use ids::{ComponentId, LayoutObjectId};
