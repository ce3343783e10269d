use crate::tree::{ComponentTree, NodeId};
use trellis_traits::TextDescriptor;
use trellis_types::{Color, ComponentId};

/// Read access to a loaded layout source.
///
/// Lookups that miss return `None`; callers log and skip.
pub trait ComponentRepository {
    fn tree(&self) -> &ComponentTree;

    fn top_level_components(&self) -> &[NodeId] {
        self.tree().roots()
    }

    fn component_by_id(&self, id: &ComponentId) -> Option<NodeId> {
        self.tree().find(id)
    }

    fn component_by_name(&self, name: &str) -> Option<NodeId> {
        self.tree().find_by_name(name)
    }

    fn project_color(&self, identifier: &str) -> Option<Color>;

    fn text_descriptor(&self, identifier: &str) -> Option<&TextDescriptor>;
}
