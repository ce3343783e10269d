use serde::{Deserialize, Serialize};

/// A box-model side or axis that a constraint edge refers to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
#[derive(Default)]
pub enum LayoutAttribute {
    Top,
    Bottom,
    Left,
    Right,
    Leading,
    Trailing,
    Width,
    Height,
    CenterX,
    CenterY,
    #[default]
    NotAnAttribute,
}

impl LayoutAttribute {
    pub fn is_horizontal(self) -> bool {
        matches!(
            self,
            LayoutAttribute::Width
                | LayoutAttribute::Left
                | LayoutAttribute::Right
                | LayoutAttribute::CenterX
                | LayoutAttribute::Leading
                | LayoutAttribute::Trailing
        )
    }

    pub fn is_vertical(self) -> bool {
        matches!(
            self,
            LayoutAttribute::Height
                | LayoutAttribute::Top
                | LayoutAttribute::Bottom
                | LayoutAttribute::CenterY
        )
    }

    pub fn is_sizing(self) -> bool {
        matches!(self, LayoutAttribute::Width | LayoutAttribute::Height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_classification() {
        assert!(LayoutAttribute::Leading.is_horizontal());
        assert!(LayoutAttribute::CenterY.is_vertical());
        assert!(!LayoutAttribute::NotAnAttribute.is_horizontal());
        assert!(!LayoutAttribute::NotAnAttribute.is_vertical());
        assert!(LayoutAttribute::Height.is_sizing());
        assert!(!LayoutAttribute::Top.is_sizing());
    }
}
