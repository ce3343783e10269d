//! Per-component box and flex properties.
//!
//! [`LayoutProperties`] guards a [`LayoutPropertyValues`] record with a
//! read/write lock so properties can be edited while layout passes on other
//! threads read them. Passes usually take one [`LayoutProperties::snapshot`]
//! per child instead of locking per field.

use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use trellis_style::{Dimension, DimensionSize, DimensionUnit, LayoutSize, StackSelfAlignment};
use trellis_types::{Point, Size};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutPropertyValues {
    pub spacing_before: f64,
    pub spacing_after: f64,
    pub flex_grow: f64,
    pub flex_shrink: f64,
    pub flex_basis: Dimension,
    pub self_alignment: StackSelfAlignment,
    /// Distance from the top edge to the first baseline.
    pub ascender: f64,
    /// Distance from the last baseline to the bottom edge, negative below.
    pub descender: f64,
    /// Offset inside an absolute parent.
    pub position: Point,
    pub size: LayoutSize,
}

impl Default for LayoutPropertyValues {
    fn default() -> Self {
        Self {
            spacing_before: 0.0,
            spacing_after: 0.0,
            flex_grow: 0.0,
            flex_shrink: 0.0,
            flex_basis: Dimension::AUTO,
            self_alignment: StackSelfAlignment::Auto,
            ascender: 0.0,
            descender: 0.0,
            position: Point::ZERO,
            size: LayoutSize::default(),
        }
    }
}

impl LayoutPropertyValues {
    pub fn is_flexible_in_both_directions(&self) -> bool {
        self.flex_grow > 0.0 && self.flex_shrink > 0.0
    }
}

#[derive(Debug, Default)]
pub struct LayoutProperties {
    values: RwLock<LayoutPropertyValues>,
}

macro_rules! property {
    ($get:ident, $set:ident, $ty:ty, $($field:ident).+) => {
        pub fn $get(&self) -> $ty {
            self.read(|v| v.$($field).+)
        }

        pub fn $set(&self, value: $ty) {
            self.write(|v| v.$($field).+ = value)
        }
    };
}

impl LayoutProperties {
    pub fn new(values: LayoutPropertyValues) -> Self {
        Self {
            values: RwLock::new(values),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&LayoutPropertyValues) -> T) -> T {
        match self.values.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    fn write(&self, f: impl FnOnce(&mut LayoutPropertyValues)) {
        match self.values.write() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }

    /// A consistent copy of every property.
    pub fn snapshot(&self) -> LayoutPropertyValues {
        self.read(|v| v.clone())
    }

    pub fn replace(&self, values: LayoutPropertyValues) {
        self.write(|v| *v = values)
    }

    property!(spacing_before, set_spacing_before, f64, spacing_before);
    property!(spacing_after, set_spacing_after, f64, spacing_after);
    property!(flex_grow, set_flex_grow, f64, flex_grow);
    property!(flex_shrink, set_flex_shrink, f64, flex_shrink);
    property!(flex_basis, set_flex_basis, Dimension, flex_basis);
    property!(self_alignment, set_self_alignment, StackSelfAlignment, self_alignment);
    property!(ascender, set_ascender, f64, ascender);
    property!(descender, set_descender, f64, descender);
    property!(position, set_position, Point, position);
    property!(size, set_size, LayoutSize, size);
    property!(width, set_width, Dimension, size.width);
    property!(height, set_height, Dimension, size.height);
    property!(min_width, set_min_width, Dimension, size.min_width);
    property!(max_width, set_max_width, Dimension, size.max_width);
    property!(min_height, set_min_height, Dimension, size.min_height);
    property!(max_height, set_max_height, Dimension, size.max_height);

    /// The exact size in points. Fractional dimensions have no preferred
    /// size and report zero.
    pub fn preferred_size(&self) -> Size {
        self.read(|v| {
            let fractional = v.size.width.unit() == DimensionUnit::Fraction
                || v.size.height.unit() == DimensionUnit::Fraction;
            debug_assert!(!fractional, "fractional size has no preferred size");
            if fractional {
                Size::ZERO
            } else {
                Size::new(v.size.width.value(), v.size.height.value())
            }
        })
    }

    pub fn set_preferred_size(&self, size: Size) {
        self.write(|v| {
            v.size.width = Dimension::points(size.width);
            v.size.height = Dimension::points(size.height);
        })
    }

    pub fn min_size(&self) -> Size {
        self.read(|v| Size::new(v.size.min_width.value(), v.size.min_height.value()))
    }

    pub fn set_min_size(&self, size: Size) {
        self.write(|v| {
            v.size.min_width = Dimension::points(size.width);
            v.size.min_height = Dimension::points(size.height);
        })
    }

    pub fn max_size(&self) -> Size {
        self.read(|v| Size::new(v.size.max_width.value(), v.size.max_height.value()))
    }

    pub fn set_max_size(&self, size: Size) {
        self.write(|v| {
            v.size.max_width = Dimension::points(size.width);
            v.size.max_height = Dimension::points(size.height);
        })
    }

    pub fn min_layout_size(&self) -> DimensionSize {
        self.read(|v| v.size.min())
    }

    pub fn set_min_layout_size(&self, size: DimensionSize) {
        self.write(|v| {
            v.size.min_width = size.width;
            v.size.min_height = size.height;
        })
    }

    pub fn max_layout_size(&self) -> DimensionSize {
        self.read(|v| v.size.max())
    }

    pub fn set_max_layout_size(&self, size: DimensionSize) {
        self.write(|v| {
            v.size.max_width = size.width;
            v.size.max_height = size.height;
        })
    }

    pub fn is_flexible_in_both_directions(&self) -> bool {
        self.read(|v| v.is_flexible_in_both_directions())
    }
}
