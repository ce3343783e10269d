//! Dependency graph over authored constraint edges.
//!
//! Vertices are (component, side) pairs. An edge runs from the constrained
//! side to the side it is related (or proportional) to, so a component's
//! dependents are the components whose frames move when it moves.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use trellis_layout::{ComponentTree, LayoutObject};
use trellis_types::{ComponentId, LayoutAttribute, LayoutObjectId};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayoutVertex {
    pub component_id: ComponentId,
    pub side: LayoutAttribute,
}

impl LayoutVertex {
    pub fn new(component_id: ComponentId, side: LayoutAttribute) -> Self {
        Self { component_id, side }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEdge {
    pub layout_object_id: LayoutObjectId,
    pub source: LayoutVertex,
    pub target: LayoutVertex,
}

#[derive(Debug, Default)]
pub struct LayoutGraph {
    vertices: HashSet<LayoutVertex>,
    edges: Vec<LayoutEdge>,
    dependents: HashMap<ComponentId, BTreeSet<ComponentId>>,
}

impl LayoutGraph {
    pub fn from_tree(tree: &ComponentTree) -> Self {
        let mut graph = Self::default();
        for (_, node) in tree.iter() {
            let constraints = node.constraints();
            for edge in &constraints.layout_objects {
                graph.add_layout_object(edge);
            }
        }
        log::debug!(
            "Layout graph: {} vertices, {} edges",
            graph.vertices.len(),
            graph.edges.len()
        );
        graph
    }

    /// Adds the dependencies one authored edge introduces. Fully disabled
    /// edges constrain nothing and are ignored.
    pub fn add_layout_object(&mut self, edge: &LayoutObject) {
        if edge.is_completely_deactivated() {
            return;
        }
        let source = LayoutVertex::new(edge.component_id.clone(), edge.attribute);
        self.vertices.insert(source.clone());

        let related = edge
            .related_component_id
            .clone()
            .map(|id| LayoutVertex::new(id, edge.related_attribute));
        let proportional = edge
            .metas()
            .into_iter()
            .filter(|m| m.is_active() && m.is_proportional())
            .filter_map(|m| {
                m.proportional_target()
                    .map(|(id, _)| LayoutVertex::new(id, m.proportional_attribute))
            });

        for target in related.into_iter().chain(proportional) {
            if target.component_id != edge.component_id {
                self.dependents
                    .entry(target.component_id.clone())
                    .or_default()
                    .insert(edge.component_id.clone());
            }
            self.vertices.insert(target.clone());
            self.edges.push(LayoutEdge {
                layout_object_id: edge.id.clone(),
                source: source.clone(),
                target,
            });
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edges(&self) -> &[LayoutEdge] {
        &self.edges
    }

    pub fn contains_vertex(&self, component_id: &ComponentId, side: LayoutAttribute) -> bool {
        self.vertices
            .contains(&LayoutVertex::new(component_id.clone(), side))
    }

    /// Every component constrained, directly or transitively, relative to
    /// `component_id`. Sorted by id; never contains `component_id` itself.
    pub fn dependents_of(&self, component_id: &ComponentId) -> Vec<ComponentId> {
        let mut seen: BTreeSet<ComponentId> = BTreeSet::new();
        let mut queue: VecDeque<&ComponentId> = VecDeque::from([component_id]);
        while let Some(next) = queue.pop_front() {
            for dependent in self.dependents.get(next).into_iter().flatten() {
                if dependent != component_id && seen.insert(dependent.clone()) {
                    queue.push_back(dependent);
                }
            }
        }
        seen.into_iter().collect()
    }

    /// Bumps the layout version of every dependent of `component_id`.
    /// Returns how many components were invalidated.
    pub fn invalidate_dependents(&self, tree: &ComponentTree, component_id: &ComponentId) -> usize {
        let mut count = 0;
        for dependent in self.dependents_of(component_id) {
            match tree.find(&dependent) {
                Some(node) => {
                    tree.invalidate_layout(node);
                    count += 1;
                }
                None => log::warn!("Dependent '{}' is not in the tree", dependent),
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_layout::{ComponentNode, LayoutMeta, LayoutState, MetaType};

    fn chain_tree() -> ComponentTree {
        // b is below a, c is right of b, d is as wide as half of a.
        let mut wide = LayoutObject::ideal("d-w", "d", LayoutAttribute::Width, 0.0);
        wide.ideal_meta = LayoutMeta {
            multiplier: 0.5,
            proportional_layout_object_id: Some("a|a-w".into()),
            proportional_attribute: LayoutAttribute::Width,
            ..LayoutMeta::new(0.0, LayoutState::Required, MetaType::Ideal)
        };
        let mut disabled = LayoutObject::ideal("e-top", "e", LayoutAttribute::Top, 0.0)
            .related_to("a", LayoutAttribute::Bottom);
        disabled.ideal_meta.state = LayoutState::Disabled;

        let mut tree = ComponentTree::new();
        let root = tree.add_root(ComponentNode::new("root")).unwrap();
        let nodes = [
            ComponentNode::new("a"),
            ComponentNode::new("b").with_layout_objects(vec![
                LayoutObject::ideal("b-top", "b", LayoutAttribute::Top, 8.0)
                    .related_to("a", LayoutAttribute::Bottom),
            ]),
            ComponentNode::new("c").with_layout_objects(vec![
                LayoutObject::ideal("c-left", "c", LayoutAttribute::Left, 4.0)
                    .related_to("b", LayoutAttribute::Right),
            ]),
            ComponentNode::new("d").with_layout_objects(vec![wide]),
            ComponentNode::new("e").with_layout_objects(vec![disabled]),
        ];
        for node in nodes {
            tree.add_child(root, node).unwrap();
        }
        tree
    }

    #[test]
    fn test_dependents_are_transitive() {
        let graph = LayoutGraph::from_tree(&chain_tree());
        let ids = |v: Vec<ComponentId>| v.iter().map(|c| c.as_str().to_string()).collect::<Vec<_>>();
        assert_eq!(ids(graph.dependents_of(&ComponentId::new("a"))), vec!["b", "c", "d"]);
        assert_eq!(ids(graph.dependents_of(&ComponentId::new("b"))), vec!["c"]);
        assert!(graph.dependents_of(&ComponentId::new("c")).is_empty());
    }

    #[test]
    fn test_vertices_and_edges() {
        let graph = LayoutGraph::from_tree(&chain_tree());
        assert_eq!(graph.edges().len(), 3);
        assert!(graph.contains_vertex(&ComponentId::new("a"), LayoutAttribute::Bottom));
        assert!(graph.contains_vertex(&ComponentId::new("a"), LayoutAttribute::Width));
        assert!(!graph.contains_vertex(&ComponentId::new("e"), LayoutAttribute::Top));
        assert_eq!(graph.vertex_count(), 6);
    }

    #[test]
    fn test_cycles_terminate() {
        let mut graph = LayoutGraph::default();
        graph.add_layout_object(
            &LayoutObject::ideal("x", "p", LayoutAttribute::Left, 0.0).related_to("q", LayoutAttribute::Right),
        );
        graph.add_layout_object(
            &LayoutObject::ideal("y", "q", LayoutAttribute::Left, 0.0).related_to("p", LayoutAttribute::Right),
        );
        assert_eq!(graph.dependents_of(&ComponentId::new("p")), vec![ComponentId::new("q")]);
    }

    #[test]
    fn test_invalidate_dependents_bumps_versions() {
        let tree = chain_tree();
        let graph = LayoutGraph::from_tree(&tree);
        let c = tree.find(&ComponentId::new("c")).unwrap();
        let before = tree.layout_version(c);
        assert_eq!(graph.invalidate_dependents(&tree, &ComponentId::new("a")), 3);
        assert!(tree.layout_version(c) > before);
    }
}
