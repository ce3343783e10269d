//! Binding of a single meta (ideal, min or max) of one constraint edge.
//!
//! A plain edge becomes one native constraint. A proportional edge either
//! binds directly with its multiplier (same-axis sizing) or goes through a
//! spacer view added to the common ancestor, whose extent along the edge's
//! axis is tied to the proportional component's extent.

use crate::priority::{priority_for, relation_for};
use trellis_layout::{ComponentTree, LayoutMeta, LayoutObject, MetaType};
use trellis_traits::{
    ConstraintHandle, ConstraintRelation, ConstraintSink, LayoutPriority, NativeConstraint, ViewHost, ViewRef,
};
use trellis_types::{ComponentId, LayoutAttribute};

#[derive(Debug, Default)]
pub struct MetaBinder {
    constraint: Option<ConstraintHandle>,
    proportional_constraint: Option<ConstraintHandle>,
    spacer: Option<ViewRef>,
    /// Thickness and cross-axis pin of the spacer.
    spacer_frame: Vec<ConstraintHandle>,
    spacer_view_constraint: Option<ConstraintHandle>,
    spacer_related_view_constraint: Option<ConstraintHandle>,
}

/// Everything a spacer needs, resolved before the spacer is created.
struct SpacerPlan {
    view: ViewRef,
    related: ViewRef,
    proportional: ViewRef,
    ancestor: ComponentId,
    thickness: LayoutAttribute,
    cross_pin: LayoutAttribute,
    extent: LayoutAttribute,
    start: LayoutAttribute,
    end: LayoutAttribute,
}

fn registered(host: &dyn ViewHost, id: Option<&ComponentId>) -> Option<ViewRef> {
    id.filter(|id| host.is_registered(id))
        .map(|id| ViewRef::Component(id.clone()))
}

fn is_default_needed(tree: &ComponentTree, edge: &LayoutObject) -> bool {
    tree.find(&edge.component_id)
        .and_then(|n| tree.node(n))
        .is_some_and(|n| n.constraints().needs_default_layout_object(edge.attribute))
}

impl MetaBinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_bound(&self) -> bool {
        self.constraint.is_some() || self.proportional_constraint.is_some()
    }

    pub fn constraint(&self) -> Option<ConstraintHandle> {
        self.constraint
    }

    pub fn proportional_constraint(&self) -> Option<ConstraintHandle> {
        self.proportional_constraint
    }

    /// The constraint whose constant carries the meta's constant.
    pub fn constant_handle(&self) -> Option<ConstraintHandle> {
        self.constraint.or(self.proportional_constraint)
    }

    pub fn spacer(&self) -> Option<&ViewRef> {
        self.spacer.as_ref()
    }

    pub fn handles(&self) -> Vec<ConstraintHandle> {
        self.spacer_frame
            .iter()
            .copied()
            .chain(self.constraint)
            .chain(self.proportional_constraint)
            .chain(self.spacer_view_constraint)
            .chain(self.spacer_related_view_constraint)
            .collect()
    }

    /// Creates and activates the native constraints for `slot` of `edge`
    /// when every precondition holds. Binding twice is a no-op.
    pub fn bind(
        &mut self,
        edge: &LayoutObject,
        slot: MetaType,
        tree: &ComponentTree,
        host: &mut dyn ViewHost,
        sink: &mut dyn ConstraintSink,
    ) -> bool {
        let Some(meta) = edge.meta(slot) else {
            return false;
        };
        let id = &edge.component_id;
        if self.is_bound() || !meta.is_active() {
            return false;
        }
        if !host.is_registered(id) {
            log::debug!("Skipping edge '{}': no view for '{}'", edge.id, id);
            return false;
        }
        if host.is_root_view(id) || !host.is_mounted(id) {
            return false;
        }
        if edge.is_default && !is_default_needed(tree, edge) {
            return false;
        }

        let related_mounted = edge
            .related_component_id
            .as_ref()
            .is_none_or(|related| host.is_mounted(related));
        let default_ok = edge.is_default && related_mounted;
        let regular_ok = !edge.is_default && (edge.is_sizing() || edge.related_component_id.is_some());
        if !(default_ok || regular_ok) {
            return false;
        }

        let Some(priority) = priority_for(meta.state) else {
            return false;
        };
        let relation = relation_for(slot);
        let built = if meta.is_proportional() {
            self.build_proportional(edge, meta, relation, priority, host, sink)
        } else {
            self.build_direct(edge, meta, relation, priority, host, sink)
        };
        if !built {
            return false;
        }

        for handle in self.handles() {
            sink.activate(handle);
        }
        log::trace!("Bound {:?} meta of edge '{}'", slot, edge.id);
        true
    }

    fn build_direct(
        &mut self,
        edge: &LayoutObject,
        meta: &LayoutMeta,
        relation: ConstraintRelation,
        priority: LayoutPriority,
        host: &dyn ViewHost,
        sink: &mut dyn ConstraintSink,
    ) -> bool {
        let related = registered(host, edge.related_component_id.as_ref());
        if related.is_none() && !edge.is_sizing() {
            log::warn!(
                "Edge '{}' refers to unknown component {:?}",
                edge.id,
                edge.related_component_id
            );
            return false;
        }
        let related_attribute = if related.is_some() {
            edge.related_attribute
        } else {
            LayoutAttribute::NotAnAttribute
        };

        self.constraint = Some(sink.create(NativeConstraint {
            item: ViewRef::Component(edge.component_id.clone()),
            attribute: edge.attribute,
            relation,
            related_item: related,
            related_attribute,
            multiplier: 1.0,
            constant: meta.constant,
            priority,
        }));
        true
    }

    fn build_proportional(
        &mut self,
        edge: &LayoutObject,
        meta: &LayoutMeta,
        relation: ConstraintRelation,
        priority: LayoutPriority,
        host: &mut dyn ViewHost,
        sink: &mut dyn ConstraintSink,
    ) -> bool {
        let target = meta.proportional_target().map(|(component, _)| component);
        let Some(proportional) = registered(host, target.as_ref()) else {
            log::warn!(
                "Edge '{}' is proportional to unknown {:?}",
                edge.id,
                meta.proportional_layout_object_id
            );
            return false;
        };
        let view = ViewRef::Component(edge.component_id.clone());

        let same_axis_sizing = edge.is_sizing() && edge.attribute == meta.proportional_attribute;
        if same_axis_sizing {
            self.constraint = Some(sink.create(NativeConstraint {
                item: view,
                attribute: edge.attribute,
                relation,
                related_item: Some(proportional),
                related_attribute: meta.proportional_attribute,
                multiplier: meta.multiplier,
                constant: meta.constant,
                priority,
            }));
            return true;
        }

        let Some(plan) = self.plan_spacer(edge, meta, view, proportional, host) else {
            return false;
        };
        let Some(spacer) = host.add_spacer(&plan.ancestor) else {
            log::warn!("No spacer host '{}' for edge '{}'", plan.ancestor, edge.id);
            return false;
        };
        let ancestor = ViewRef::Component(plan.ancestor.clone());

        self.spacer_frame = vec![
            sink.create(NativeConstraint::fixed(spacer.clone(), plan.thickness, 0.0)),
            sink.create(NativeConstraint::pinned(
                spacer.clone(),
                plan.cross_pin,
                ancestor,
                plan.cross_pin,
            )),
        ];
        self.spacer_view_constraint = Some(sink.create(NativeConstraint {
            priority,
            ..NativeConstraint::pinned(spacer.clone(), plan.start, plan.view, edge.attribute)
        }));
        self.spacer_related_view_constraint = Some(sink.create(NativeConstraint {
            priority,
            ..NativeConstraint::pinned(spacer.clone(), plan.end, plan.related, edge.related_attribute)
        }));
        self.proportional_constraint = Some(sink.create(NativeConstraint {
            item: spacer.clone(),
            attribute: plan.extent,
            relation,
            related_item: Some(plan.proportional),
            related_attribute: plan.extent,
            multiplier: meta.multiplier.abs(),
            constant: meta.constant,
            priority,
        }));
        self.spacer = Some(spacer);
        true
    }

    fn plan_spacer(
        &self,
        edge: &LayoutObject,
        meta: &LayoutMeta,
        view: ViewRef,
        proportional: ViewRef,
        host: &dyn ViewHost,
    ) -> Option<SpacerPlan> {
        let Some(related) = registered(host, edge.related_component_id.as_ref()) else {
            log::warn!("Proportional edge '{}' has no related view", edge.id);
            return None;
        };
        let Some(ancestor) = edge
            .common_ancestor_component_id
            .clone()
            .filter(|a| host.is_registered(a))
        else {
            log::warn!("Proportional edge '{}' has no common ancestor view", edge.id);
            return None;
        };

        let forward = meta.multiplier >= 0.0;
        let (thickness, cross_pin, extent, start, end) = if edge.is_horizontal() {
            let (start, end) = if forward {
                (LayoutAttribute::Right, LayoutAttribute::Left)
            } else {
                (LayoutAttribute::Left, LayoutAttribute::Right)
            };
            (LayoutAttribute::Height, LayoutAttribute::Top, LayoutAttribute::Width, start, end)
        } else if edge.is_vertical() {
            let (start, end) = if forward {
                (LayoutAttribute::Bottom, LayoutAttribute::Top)
            } else {
                (LayoutAttribute::Top, LayoutAttribute::Bottom)
            };
            (LayoutAttribute::Width, LayoutAttribute::Left, LayoutAttribute::Height, start, end)
        } else {
            return None;
        };

        Some(SpacerPlan {
            view,
            related,
            proportional,
            ancestor,
            thickness,
            cross_pin,
            extent,
            start,
            end,
        })
    }

    /// Removes every native constraint and the spacer, if any.
    pub fn clean_up(&mut self, host: &mut dyn ViewHost, sink: &mut dyn ConstraintSink) {
        for handle in self.handles() {
            sink.deactivate(handle);
            sink.remove(handle);
        }
        if let Some(spacer) = self.spacer.take() {
            host.remove_spacer(&spacer);
        }
        *self = Self::default();
    }
}
