//! Executor trait for fanning indexed work out across threads.
//!
//! Every method blocks until all iterations finished. Closures may borrow
//! from the caller's stack, which is what lets a layout pass hand out
//! references to its component tree.

use std::sync::{Mutex, PoisonError};

/// A scoped, blocking executor over index ranges.
///
/// # Implementations
///
/// - [`SyncExecutor`]: runs every iteration on the calling thread
/// - `RayonExecutor` (in `trellis-executor`): fixed worker pool pulling
///   indices from a shared counter
pub trait Executor: Send + Sync {
    /// Calls `f(i)` for each `i` in `0..count` and waits for all of them.
    fn apply<F>(&self, count: usize, f: F)
    where
        F: Fn(usize) + Sync;

    /// Like [`Executor::apply`] but collects results in index order.
    ///
    /// # Panics
    ///
    /// Panics if `apply` returned without producing a result for some index,
    /// e.g. because it swallowed a panicking iteration.
    fn map_indexed<R, F>(&self, count: usize, f: F) -> Vec<R>
    where
        R: Send,
        F: Fn(usize) -> R + Sync,
    {
        let slots: Vec<Mutex<Option<R>>> = (0..count).map(|_| Mutex::new(None)).collect();
        self.apply(count, |i| {
            let result = f(i);
            *slots[i].lock().unwrap_or_else(PoisonError::into_inner) = Some(result);
        });
        slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| match slot.into_inner().unwrap_or_else(PoisonError::into_inner) {
                Some(result) => result,
                None => panic!("{} produced no result for index {}", self.name(), i),
            })
            .collect()
    }

    /// Number of threads work may be spread across.
    fn parallelism(&self) -> usize;

    /// Returns a human-readable name for this executor (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// Sequential execution, no threading.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncExecutor;

impl SyncExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Executor for SyncExecutor {
    fn apply<F>(&self, count: usize, f: F)
    where
        F: Fn(usize) + Sync,
    {
        (0..count).for_each(f);
    }

    fn map_indexed<R, F>(&self, count: usize, f: F) -> Vec<R>
    where
        R: Send,
        F: Fn(usize) -> R + Sync,
    {
        (0..count).map(f).collect()
    }

    fn parallelism(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "SyncExecutor"
    }
}
