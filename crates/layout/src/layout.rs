use serde::Serialize;
use trellis_style::{is_points_valid_for_layout, is_position_points_valid_for_layout};
use trellis_types::{ComponentId, Point, Rect, Size};

/// Computed geometry of one component and its laid-out children.
///
/// Sizes are always finite and non-negative. Invalid input trips a debug
/// assertion and is replaced by zero in release builds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub component_id: ComponentId,
    /// `None` only for the root of a freshly computed subtree.
    pub position: Option<Point>,
    pub size: Size,
    pub sublayouts: Vec<Layout>,
}

fn sanitize_size(id: &ComponentId, size: Size) -> Size {
    let valid = is_points_valid_for_layout(size.width) && is_points_valid_for_layout(size.height);
    debug_assert!(valid, "layout size {:?} of '{}' is invalid", size, id);
    if valid {
        return size;
    }
    log::warn!("Layout size {:?} of '{}' is invalid; using zero", size, id);
    let fix = |v: f64| if is_points_valid_for_layout(v) { v } else { 0.0 };
    Size::new(fix(size.width), fix(size.height))
}

fn sanitize_position(id: &ComponentId, position: Point) -> Point {
    let valid = is_position_points_valid_for_layout(position.x)
        && is_position_points_valid_for_layout(position.y);
    debug_assert!(valid, "layout position {:?} of '{}' is invalid", position, id);
    if valid {
        return position;
    }
    log::warn!("Layout position {:?} of '{}' is invalid; using zero", position, id);
    let fix = |v: f64| if is_position_points_valid_for_layout(v) { v } else { 0.0 };
    Point::new(fix(position.x), fix(position.y))
}

impl Layout {
    pub fn new(component_id: ComponentId, size: Size, sublayouts: Vec<Layout>) -> Self {
        let size = sanitize_size(&component_id, size);
        Self {
            component_id,
            position: None,
            size,
            sublayouts,
        }
    }

    /// A zero-sized layout without children.
    pub fn empty(component_id: ComponentId) -> Self {
        Self::new(component_id, Size::ZERO, Vec::new())
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = Some(sanitize_position(&self.component_id, position));
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.set_position(position);
        self
    }

    /// Position, treating an unset position as the origin.
    pub fn origin(&self) -> Point {
        self.position.unwrap_or(Point::ZERO)
    }

    pub fn frame(&self) -> Rect {
        let origin = self.origin();
        Rect::new(origin.x, origin.y, self.size.width, self.size.height)
    }

    /// Depth-first search for the layout of `id` in this subtree.
    pub fn find(&self, id: &ComponentId) -> Option<&Layout> {
        if &self.component_id == id {
            return Some(self);
        }
        self.sublayouts.iter().find_map(|l| l.find(id))
    }

    /// Frames of every layout in the subtree in the coordinate space of this
    /// layout's parent, depth first.
    pub fn flattened_frames(&self) -> Vec<(ComponentId, Rect)> {
        let mut out = Vec::new();
        self.collect_frames(Point::ZERO, &mut out);
        out
    }

    fn collect_frames(&self, offset: Point, out: &mut Vec<(ComponentId, Rect)>) {
        let origin = offset + self.origin();
        out.push((
            self.component_id.clone(),
            Rect::new(origin.x, origin.y, self.size.width, self.size.height),
        ));
        for sub in &self.sublayouts {
            sub.collect_frames(origin, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_layout_has_no_position() {
        let layout = Layout::new(ComponentId::new("a"), Size::new(3.0, 4.0), vec![]);
        assert_eq!(layout.position, None);
        assert_eq!(layout.origin(), Point::ZERO);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invalid")]
    fn test_invalid_size_asserts_in_debug() {
        let _ = Layout::new(ComponentId::new("a"), Size::new(-1.0, 4.0), vec![]);
    }

    #[test]
    fn test_flattened_frames_accumulate_offsets() {
        let leaf = Layout::new(ComponentId::new("leaf"), Size::new(5.0, 5.0), vec![])
            .with_position(Point::new(2.0, 3.0));
        let mid = Layout::new(ComponentId::new("mid"), Size::new(20.0, 20.0), vec![leaf])
            .with_position(Point::new(10.0, 10.0));
        let root = Layout::new(ComponentId::new("root"), Size::new(50.0, 50.0), vec![mid]);

        let frames = root.flattened_frames();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[2].1, Rect::new(12.0, 13.0, 5.0, 5.0));
        assert!(root.find(&ComponentId::new("leaf")).is_some());
    }
}
