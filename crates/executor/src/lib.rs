//! Executor implementations for Trellis layout passes.
//!
//! ## Available Executors
//!
//! - [`RayonExecutor`]: fixed-size worker pool (feature: `rayon`)
//! - [`SyncExecutor`]: sequential execution (re-exported from trellis-traits)
//!
//! [`WorkerPool`] wraps one of them and decides per call whether fanning
//! out is worth it.
//!
//! ## Usage
//!
//! ```ignore
//! use trellis_executor::WorkerPool;
//!
//! let pool = WorkerPool::new(0);
//! let sizes = pool.dispatch_map_if_needed(children.len(), true, |i| measure(i));
//! ```

mod dispatch;
#[cfg(feature = "rayon")]
mod rayon_executor;

pub use dispatch::WorkerPool;
#[cfg(feature = "rayon")]
pub use rayon_executor::RayonExecutor;

// Re-export from trellis-traits
pub use trellis_traits::{Executor, SyncExecutor};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("Failed to build worker pool with {threads} threads: {message}")]
    PoolBuild { threads: usize, message: String },
}

/// Default worker count: twice the number of logical CPUs.
pub fn default_thread_count() -> usize {
    num_cpus::get().saturating_mul(2).max(1)
}

/// A type-erased executor that wraps concrete executor implementations.
///
/// Since the `Executor` trait has generic methods, it cannot be used as a trait object
/// (`dyn Executor`). This enum holds the concrete executor types and delegates to them.
#[derive(Clone, Debug)]
pub enum ExecutorImpl {
    /// Sequential executor (no parallelism)
    Sync(SyncExecutor),

    /// Fixed thread pool executor
    #[cfg(feature = "rayon")]
    Rayon(RayonExecutor),
}

impl Executor for ExecutorImpl {
    fn apply<F>(&self, count: usize, f: F)
    where
        F: Fn(usize) + Sync,
    {
        match self {
            ExecutorImpl::Sync(exec) => exec.apply(count, f),
            #[cfg(feature = "rayon")]
            ExecutorImpl::Rayon(exec) => exec.apply(count, f),
        }
    }

    fn map_indexed<R, F>(&self, count: usize, f: F) -> Vec<R>
    where
        R: Send,
        F: Fn(usize) -> R + Sync,
    {
        match self {
            ExecutorImpl::Sync(exec) => exec.map_indexed(count, f),
            #[cfg(feature = "rayon")]
            ExecutorImpl::Rayon(exec) => exec.map_indexed(count, f),
        }
    }

    fn parallelism(&self) -> usize {
        match self {
            ExecutorImpl::Sync(exec) => exec.parallelism(),
            #[cfg(feature = "rayon")]
            ExecutorImpl::Rayon(exec) => exec.parallelism(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ExecutorImpl::Sync(exec) => exec.name(),
            #[cfg(feature = "rayon")]
            ExecutorImpl::Rayon(exec) => exec.name(),
        }
    }
}

impl ExecutorImpl {
    /// Builds the parallel executor when available, falling back to
    /// sequential execution if the pool cannot be created.
    pub fn with_threads(threads: usize) -> Self {
        #[cfg(feature = "rayon")]
        {
            match RayonExecutor::with_threads(threads) {
                Ok(exec) => return ExecutorImpl::Rayon(exec),
                Err(e) => log::warn!("{}; falling back to sequential execution", e),
            }
        }
        #[cfg(not(feature = "rayon"))]
        let _ = threads;
        ExecutorImpl::Sync(SyncExecutor::new())
    }
}

impl Default for ExecutorImpl {
    fn default() -> Self {
        Self::with_threads(0)
    }
}
