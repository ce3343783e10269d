//! Versioned per-component layout cache.
//!
//! Each component keeps two generations: a *pending* layout produced by the
//! latest request and a *calculated* layout that was committed. A stored
//! layout answers a request only if it was made for the same constrained and
//! parent sizes at a version no older than the component's current one.

use crate::layout::Layout;
use trellis_types::{Size, SizeRange};

#[derive(Debug, Clone, Default)]
pub struct CalculatedLayout {
    pub layout: Option<Layout>,
    pub constrained_size: SizeRange,
    pub parent_size: Size,
    pub version: u64,
}

impl CalculatedLayout {
    pub fn new(layout: Layout, constrained_size: SizeRange, parent_size: Size, version: u64) -> Self {
        Self {
            layout: Some(layout),
            constrained_size,
            parent_size,
            version,
        }
    }

    /// Undefined parent axes compare equal to each other.
    pub fn is_valid(&self, constrained_size: &SizeRange, parent_size: &Size, version: u64) -> bool {
        self.version >= version
            && self.layout.is_some()
            && self.parent_size.same_as(parent_size)
            && self.constrained_size.same_as(constrained_size)
    }
}

/// Observable state of a component's cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutCacheState {
    /// Nothing valid for the current version.
    Clean,
    /// A request produced a layout that has not been committed.
    Pending,
    /// The latest layout was committed.
    Committed,
}

/// Lock-guarded cache fields of one component.
#[derive(Debug, Default)]
pub struct NodeLayoutCache {
    pub calculated: CalculatedLayout,
    pub pending: CalculatedLayout,
    pub layout_version: u64,
    pub transition_invalid: bool,
}

impl NodeLayoutCache {
    pub fn lookup(&self, constrained_size: &SizeRange, parent_size: &Size) -> Option<&Layout> {
        let version = self.layout_version;
        if self.calculated.is_valid(constrained_size, parent_size, version) {
            return self.calculated.layout.as_ref();
        }
        if self.pending.is_valid(constrained_size, parent_size, version) {
            return self.pending.layout.as_ref();
        }
        None
    }

    pub fn store_pending(&mut self, layout: Layout, constrained_size: SizeRange, parent_size: Size, version: u64) {
        self.pending = CalculatedLayout::new(layout, constrained_size, parent_size, version);
    }

    /// Promotes a current pending layout. Returns whether anything moved.
    pub fn commit(&mut self) -> bool {
        let current = self.pending.layout.is_some() && self.pending.version >= self.layout_version;
        if current {
            self.calculated = std::mem::take(&mut self.pending);
        }
        current
    }

    pub fn state(&self) -> LayoutCacheState {
        let version = self.layout_version;
        let fresh = |c: &CalculatedLayout| c.layout.is_some() && c.version >= version;
        if fresh(&self.pending) {
            LayoutCacheState::Pending
        } else if fresh(&self.calculated) {
            LayoutCacheState::Committed
        } else {
            LayoutCacheState::Clean
        }
    }

    pub fn bump_version(&mut self) -> u64 {
        self.layout_version += 1;
        self.layout_version
    }
}
