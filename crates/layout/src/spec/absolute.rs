use crate::engine::LayoutContext;
use crate::layout::Layout;
use crate::tree::NodeId;
use serde::{Deserialize, Serialize};
use trellis_style::{is_points_valid_for_layout, AbsoluteSizing};
use trellis_types::{Size, SizeRange, UNDEFINED};

/// Places every child at its declared position.
///
/// With [`AbsoluteSizing::Default`] the spec claims the maximum constrained
/// size; an unbounded axis and [`AbsoluteSizing::SizeToFit`] fall back to the
/// union of the children's frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AbsoluteLayoutSpec {
    pub sizing: AbsoluteSizing,
}

impl AbsoluteLayoutSpec {
    pub fn new(sizing: AbsoluteSizing) -> Self {
        Self { sizing }
    }

    pub fn size_to_fit() -> Self {
        Self::new(AbsoluteSizing::SizeToFit)
    }

    pub fn layout_that_fits(&self, ctx: &LayoutContext<'_>, node: NodeId, constrained_size: SizeRange) -> Layout {
        let tree = ctx.tree();
        let definite = |v: f64| if is_points_valid_for_layout(v) { v } else { UNDEFINED };
        let mut size = Size::new(
            definite(constrained_size.max.width),
            definite(constrained_size.max.height),
        );

        let sublayouts: Vec<Layout> = tree
            .children(node)
            .iter()
            .map(|&child| {
                let props = tree[child].properties().snapshot();
                let auto_max = Size::new(
                    constrained_size.max.width - props.position.x,
                    constrained_size.max.height - props.position.y,
                );
                let auto_range = SizeRange::new(Size::ZERO, auto_max);
                let child_constraint = props.size.resolve_auto_size(size, auto_range);
                ctx.layout_that_fits_with_parent(child, child_constraint, size)
                    .with_position(props.position)
            })
            .collect();

        let fit = self.sizing == AbsoluteSizing::SizeToFit;
        if fit || size.width.is_nan() {
            size.width = sublayouts
                .iter()
                .fold(constrained_size.min.width, |w, l| w.max(l.origin().x + l.size.width));
        }
        if fit || size.height.is_nan() {
            size.height = sublayouts
                .iter()
                .fold(constrained_size.min.height, |h, l| h.max(l.origin().y + l.size.height));
        }

        Layout::new(tree[node].id().clone(), constrained_size.clamp(size), sublayouts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{auto, fixed, NodeExt, TestTree};
    use trellis_types::{Point, INFINITY};

    #[test]
    fn test_size_to_fit_is_union_of_children() {
        let mut t = TestTree::new(AbsoluteLayoutSpec::size_to_fit());
        t.child(fixed("a", 10.0, 10.0).at(0.0, 0.0));
        t.child(fixed("b", 30.0, 40.0).at(30.0, 5.0));

        let layout = t.layout(SizeRange::unconstrained());
        assert_eq!(layout.size, Size::new(60.0, 45.0));
        assert_eq!(layout.sublayouts[1].position, Some(Point::new(30.0, 5.0)));
    }

    #[test]
    fn test_default_sizing_claims_max() {
        let mut t = TestTree::new(AbsoluteLayoutSpec::default());
        t.child(fixed("a", 10.0, 10.0).at(5.0, 5.0));

        let layout = t.layout(SizeRange::new(Size::ZERO, Size::new(200.0, 100.0)));
        assert_eq!(layout.size, Size::new(200.0, 100.0));
    }

    #[test]
    fn test_unbounded_axis_falls_back_to_children() {
        let mut t = TestTree::new(AbsoluteLayoutSpec::default());
        t.child(fixed("a", 10.0, 20.0).at(0.0, 30.0));

        let layout = t.layout(SizeRange::new(Size::ZERO, Size::new(80.0, INFINITY)));
        assert_eq!(layout.size, Size::new(80.0, 50.0));
    }

    #[test]
    fn test_auto_child_is_bounded_by_position() {
        let mut t = TestTree::new(AbsoluteLayoutSpec::default());
        // No size: the default child spec claims whatever its auto range allows.
        t.child(auto("a").at(30.0, 10.0));

        let layout = t.layout(SizeRange::exactly(Size::new(100.0, 50.0)));
        assert_eq!(layout.sublayouts[0].size, Size::new(70.0, 40.0));
    }
}
