//! Text-driven constraint constants.
//!
//! Edges flagged `is_linked_to_text_size` take their constant from the
//! measured size of the component's text instead of the authored value.

use crate::binder::LayoutBinder;
use std::collections::HashMap;
use std::sync::RwLock;
use trellis_layout::{ComponentTree, MetaType, NodeId};
use trellis_traits::{ConstraintSink, TextDescriptor, TextHostKind, TextMeasurer, TextMetrics};
use trellis_types::{LayoutAttribute, Size, INFINITY};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MetricsKey {
    descriptor: TextDescriptor,
    width: u64,
    height: u64,
    host: TextHostKind,
}

/// Entries kept before the cache starts over.
pub const DEFAULT_TEXT_CACHE_CAPACITY: usize = 1024;

/// Memoizes measurements by (descriptor, bounding size, host kind).
///
/// Holds at most `capacity` entries. Inserting a new key into a full cache
/// drops everything first.
#[derive(Debug)]
pub struct TextMetricsCache {
    entries: RwLock<HashMap<MetricsKey, TextMetrics>>,
    capacity: usize,
}

impl Default for TextMetricsCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_TEXT_CACHE_CAPACITY)
    }
}

impl TextMetricsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn measure(
        &self,
        measurer: &dyn TextMeasurer,
        descriptor: &TextDescriptor,
        host: TextHostKind,
        bounds: Size,
    ) -> TextMetrics {
        let key = MetricsKey {
            descriptor: descriptor.clone(),
            width: bounds.width.to_bits(),
            height: bounds.height.to_bits(),
            host,
        };
        let hit = self.entries.read().ok().and_then(|e| e.get(&key).copied());
        if let Some(metrics) = hit {
            return metrics;
        }

        let metrics = measurer.measure(descriptor, host, bounds);
        if let Ok(mut entries) = self.entries.write() {
            if entries.len() >= self.capacity && !entries.contains_key(&key) {
                log::debug!("Text metrics cache reached {} entries; clearing", entries.len());
                entries.clear();
            }
            entries.insert(key, metrics);
        }
        metrics
    }

    /// Drops every measurement of `descriptor`. Returns how many went.
    pub fn forget(&self, descriptor: &TextDescriptor) -> usize {
        let Ok(mut entries) = self.entries.write() else {
            return 0;
        };
        let before = entries.len();
        entries.retain(|key, _| &key.descriptor != descriptor);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}

pub struct TextSizeLinker<'a> {
    measurer: &'a dyn TextMeasurer,
    cache: TextMetricsCache,
}

impl<'a> TextSizeLinker<'a> {
    pub fn new(measurer: &'a dyn TextMeasurer) -> Self {
        Self {
            measurer,
            cache: TextMetricsCache::new(),
        }
    }

    pub fn with_cache(measurer: &'a dyn TextMeasurer, cache: TextMetricsCache) -> Self {
        Self { measurer, cache }
    }

    pub fn cache(&self) -> &TextMetricsCache {
        &self.cache
    }

    /// Evicts the cached measurements of a component leaving the tree.
    pub fn forget_component(&self, tree: &ComponentTree, node: NodeId) -> usize {
        tree.node(node)
            .and_then(|c| c.text_descriptor())
            .map_or(0, |descriptor| self.cache.forget(descriptor))
    }

    /// The constant a text-linked `attribute` edge of `node` should carry.
    ///
    /// Heights are measured at the component's laid-out width, widths
    /// without a bound.
    pub fn linked_constant(&self, tree: &ComponentTree, node: NodeId, attribute: LayoutAttribute) -> Option<f64> {
        let component = tree.node(node)?;
        let Some(descriptor) = component.text_descriptor() else {
            log::warn!("Text-linked edge on '{}' without a text descriptor", component.id());
            return None;
        };
        let bounds = match attribute {
            LayoutAttribute::Height => {
                let Some(layout) = tree.current_layout(node) else {
                    log::debug!("'{}' has no layout to measure text against", component.id());
                    return None;
                };
                Size::new(layout.size.width, INFINITY)
            }
            LayoutAttribute::Width => Size::new(INFINITY, INFINITY),
            _ => return None,
        };

        let metrics = self
            .cache
            .measure(self.measurer, descriptor, descriptor.host_kind, bounds);
        Some(match attribute {
            LayoutAttribute::Height => metrics.content_height(),
            _ => metrics.content_width(),
        })
    }

    /// Re-derives the ideal constant of every text-linked edge of `node`,
    /// updating the edge and any constraint already bound for it.
    pub fn update_component(
        &self,
        tree: &ComponentTree,
        node: NodeId,
        binder: &LayoutBinder,
        sink: &mut dyn ConstraintSink,
    ) -> usize {
        let Some(component) = tree.node(node) else {
            return 0;
        };
        let linked: Vec<(usize, LayoutAttribute)> = component
            .constraints()
            .layout_objects
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_linked_to_text_size)
            .map(|(i, e)| (i, e.attribute))
            .collect();

        let mut updated = 0;
        for (index, attribute) in linked {
            let Some(constant) = self.linked_constant(tree, node, attribute) else {
                continue;
            };
            let mut constraints = component.constraints_mut();
            let Some(edge) = constraints.layout_objects.get_mut(index) else {
                continue;
            };
            edge.ideal_meta.constant = constant;
            if let Some(handle) = binder.constant_handle(&edge.id, MetaType::Ideal) {
                sink.set_constant(handle, constant);
            }
            log::trace!("Text-linked {:?} of '{}' is now {}", attribute, component.id(), constant);
            updated += 1;
        }
        updated
    }

    pub fn update_tree(&self, tree: &ComponentTree, binder: &LayoutBinder, sink: &mut dyn ConstraintSink) -> usize {
        let mut updated = 0;
        for (node, _) in tree.iter() {
            updated += self.update_component(tree, node, binder, &mut *sink);
        }
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use trellis_traits::TextAttributes;
    use trellis_types::Insets;

    /// Eight points per character on one line, wrapped at the bound.
    struct MonospaceMeasurer {
        calls: AtomicUsize,
    }

    impl TextMeasurer for MonospaceMeasurer {
        fn measure(&self, descriptor: &TextDescriptor, _host: TextHostKind, bounds: Size) -> TextMetrics {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let width = descriptor.text.chars().count() as f64 * 8.0;
            let lines = (width / bounds.width).ceil().max(1.0);
            TextMetrics {
                text_size: Size::new(width.min(bounds.width), lines * 10.0),
                text_margins: Insets::new(2.0, 1.0, 2.0, 1.0),
                view_insets: Insets::default(),
            }
        }
    }

    #[test]
    fn test_cache_measures_each_key_once() {
        let measurer = MonospaceMeasurer { calls: AtomicUsize::new(0) };
        let cache = TextMetricsCache::new();
        let text = TextDescriptor::new("hello", TextAttributes::default());
        let bounds = Size::new(100.0, INFINITY);

        let first = cache.measure(&measurer, &text, TextHostKind::Label, bounds);
        let second = cache.measure(&measurer, &text, TextHostKind::Label, bounds);
        assert_eq!(first, second);
        assert_eq!(measurer.calls.load(Ordering::SeqCst), 1);

        cache.measure(&measurer, &text, TextHostKind::TextView, bounds);
        cache.measure(&measurer, &text, TextHostKind::Label, Size::new(20.0, INFINITY));
        assert_eq!(measurer.calls.load(Ordering::SeqCst), 3);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_full_cache_starts_over() {
        let measurer = MonospaceMeasurer { calls: AtomicUsize::new(0) };
        let cache = TextMetricsCache::with_capacity(2);
        let text = TextDescriptor::new("hello", TextAttributes::default());
        let at = |width: f64| Size::new(width, INFINITY);

        cache.measure(&measurer, &text, TextHostKind::Label, at(10.0));
        cache.measure(&measurer, &text, TextHostKind::Label, at(20.0));
        assert_eq!(cache.len(), 2);
        // A known key never evicts.
        cache.measure(&measurer, &text, TextHostKind::Label, at(20.0));
        assert_eq!(cache.len(), 2);

        cache.measure(&measurer, &text, TextHostKind::Label, at(30.0));
        assert_eq!(cache.len(), 1);
        cache.measure(&measurer, &text, TextHostKind::Label, at(10.0));
        assert_eq!(measurer.calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_forget_drops_only_that_descriptor() {
        let measurer = MonospaceMeasurer { calls: AtomicUsize::new(0) };
        let cache = TextMetricsCache::new();
        let hello = TextDescriptor::new("hello", TextAttributes::default());
        let world = TextDescriptor::new("world", TextAttributes::default());
        let bounds = Size::new(100.0, INFINITY);

        cache.measure(&measurer, &hello, TextHostKind::Label, bounds);
        cache.measure(&measurer, &hello, TextHostKind::TextView, bounds);
        cache.measure(&measurer, &world, TextHostKind::Label, bounds);

        assert_eq!(cache.forget(&hello), 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.forget(&hello), 0);
    }

    #[test]
    fn test_content_size_includes_margins() {
        let measurer = MonospaceMeasurer { calls: AtomicUsize::new(0) };
        let cache = TextMetricsCache::new();
        let text = TextDescriptor::new("abcdefghij", TextAttributes::default());

        // 80pt of text in a 30pt column wraps to three lines.
        let metrics = cache.measure(&measurer, &text, TextHostKind::Label, Size::new(30.0, INFINITY));
        assert_eq!(metrics.content_height(), 34.0);
        let metrics = cache.measure(&measurer, &text, TextHostKind::Label, Size::new(INFINITY, INFINITY));
        assert_eq!(metrics.content_width(), 82.0);
    }
}
