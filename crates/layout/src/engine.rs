//! Entry point for layout passes.
//!
//! [`LayoutEngine`] owns the configuration, the worker pool and the profiler.
//! Every request creates a [`LayoutContext`] that the specs carry through the
//! recursion. Component cache locks are taken only around reads and writes
//! of the cache fields, never across a child's layout, so concurrent or
//! nested requests for the same component cannot deadlock.

use crate::config::LayoutConfig;
use crate::layout::Layout;
use crate::perf::{DebugProfiler, NoOpProfiler, Profiler};
use crate::tree::{ComponentTree, NodeId};
use std::time::Instant;
use trellis_executor::WorkerPool;
use trellis_types::{Size, SizeRange};

pub struct LayoutEngine {
    config: LayoutConfig,
    pool: WorkerPool,
    profiler: Box<dyn Profiler>,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        let pool = if config.concurrent {
            WorkerPool::new(config.worker_threads)
        } else {
            WorkerPool::serial()
        };
        Self::with_pool(config, pool)
    }

    pub fn with_pool(config: LayoutConfig, pool: WorkerPool) -> Self {
        let profiler: Box<dyn Profiler> = if config.profiling {
            Box::new(DebugProfiler::new())
        } else {
            Box::new(NoOpProfiler)
        };
        log::debug!(
            "Layout engine: concurrent={}, parallelism={}, profiling={}",
            config.concurrent,
            pool.parallelism(),
            config.profiling
        );
        Self {
            config,
            pool,
            profiler,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    pub fn profiler(&self) -> &dyn Profiler {
        self.profiler.as_ref()
    }

    /// Lays out `node` within `constrained_size`, resolving fractions
    /// against the maximum of the range.
    pub fn layout_that_fits(&self, tree: &ComponentTree, node: NodeId, constrained_size: SizeRange) -> Layout {
        self.layout_that_fits_with_parent(tree, node, constrained_size, constrained_size.max)
    }

    pub fn layout_that_fits_with_parent(
        &self,
        tree: &ComponentTree,
        node: NodeId,
        constrained_size: SizeRange,
        parent_size: Size,
    ) -> Layout {
        LayoutContext::new(self, tree).layout_that_fits_with_parent(node, constrained_size, parent_size)
    }

    /// Lays out a root at exactly `size` and commits the pending layouts of
    /// its subtree.
    pub fn layout_root(&self, tree: &ComponentTree, node: NodeId, size: Size) -> Layout {
        let layout = self.layout_that_fits(tree, node, SizeRange::exactly(size));
        let committed = tree.commit_subtree(node);
        log::debug!("Committed {} layouts under {:?}", committed, node);
        layout
    }
}

/// State of one traversal, shared by every spec it reaches.
#[derive(Clone, Copy)]
pub struct LayoutContext<'a> {
    engine: &'a LayoutEngine,
    tree: &'a ComponentTree,
}

impl<'a> LayoutContext<'a> {
    pub fn new(engine: &'a LayoutEngine, tree: &'a ComponentTree) -> Self {
        Self { engine, tree }
    }

    pub fn tree(&self) -> &'a ComponentTree {
        self.tree
    }

    pub fn engine(&self) -> &'a LayoutEngine {
        self.engine
    }

    /// Runs `f` for every index, on the worker pool when concurrency is on.
    pub fn dispatch_map<R, F>(&self, count: usize, f: F) -> Vec<R>
    where
        R: Send,
        F: Fn(usize) -> R + Sync,
    {
        self.engine
            .pool
            .dispatch_map_if_needed(count, self.engine.config.concurrent, f)
    }

    pub fn layout_that_fits(&self, node: NodeId, constrained_size: SizeRange) -> Layout {
        self.layout_that_fits_with_parent(node, constrained_size, constrained_size.max)
    }

    pub fn layout_that_fits_with_parent(&self, node: NodeId, constrained_size: SizeRange, parent_size: Size) -> Layout {
        let Some(component) = self.tree.node(node) else {
            log::warn!("Layout requested for unknown node {:?}", node);
            return Layout::new("unknown".into(), Size::ZERO, Vec::new());
        };

        let version = {
            let cache = component.lock_cache();
            if cache.transition_invalid {
                None
            } else if let Some(layout) = cache.lookup(&constrained_size, &parent_size) {
                log::trace!("Layout cache hit for '{}'", component.id());
                self.engine.profiler.count_hit();
                return layout.clone();
            } else {
                Some(cache.layout_version)
            }
        };

        let Some(version) = version else {
            log::trace!("Transition in flight for '{}'; computing without caching", component.id());
            return self.calculate_layout(node, constrained_size, parent_size);
        };

        self.engine.profiler.count_miss();
        let layout = self.calculate_layout(node, constrained_size, parent_size);
        component
            .lock_cache()
            .store_pending(layout.clone(), constrained_size, parent_size, version);
        layout
    }

    fn calculate_layout(&self, node: NodeId, constrained_size: SizeRange, parent_size: Size) -> Layout {
        let component = &self.tree[node];
        let own_size = component.properties().size().resolve(parent_size);
        let resolved = constrained_size.intersection(&own_size);

        let Some(spec) = component.spec() else {
            log::warn!("Component '{}' has no layout spec; using an empty layout", component.id());
            return Layout::empty(component.id().clone());
        };

        let started = self.engine.config.profiling.then(Instant::now);
        let layout = spec.layout_that_fits(self, node, resolved);
        if let Some(started) = started {
            let elapsed = started.elapsed();
            self.engine.profiler.record(spec.name(), elapsed);
            self.engine.profiler.record_component_computed(elapsed);
        }
        log::trace!(
            "Computed '{}' in {:?}: {:?}",
            component.id(),
            resolved,
            layout.size
        );
        layout
    }
}
