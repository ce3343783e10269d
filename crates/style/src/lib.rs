pub mod dimension;
pub mod parsers;
pub mod stack;
pub mod validity;

pub use dimension::{constrain, Dimension, DimensionSize, DimensionUnit, LayoutSize};
pub use parsers::{parse_dimension, StyleParseError};
pub use stack::{
    AbsoluteSizing, StackAlignment, StackAxis, StackContentAlignment, StackFlexWrap,
    StackHorizontalAlignment, StackItemJustification, StackSelfAlignment, StackVerticalAlignment,
};
pub use validity::{
    is_points_valid_for_layout, is_position_points_valid_for_layout, is_position_valid_for_layout,
    is_rect_valid_for_layout, is_size_valid_for_layout,
};
