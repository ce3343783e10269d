//! Scatter/gather dispatch used by layout passes.
//!
//! A call fans out only when the caller asked for concurrency, there is more
//! than one iteration, and the call is not on the registered main thread.
//! Everything else runs inline on the calling thread.

use crate::{default_thread_count, ExecutorImpl};
use std::thread::{self, ThreadId};
use trellis_traits::{Executor, SyncExecutor};

#[derive(Debug, Clone)]
pub struct WorkerPool {
    executor: ExecutorImpl,
    main_thread: Option<ThreadId>,
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(0)
    }
}

impl WorkerPool {
    /// A pool with `threads` workers; 0 means twice the CPU count.
    pub fn new(threads: usize) -> Self {
        let threads = if threads == 0 {
            default_thread_count()
        } else {
            threads
        };
        Self {
            executor: ExecutorImpl::with_threads(threads),
            main_thread: None,
        }
    }

    /// A pool that never leaves the calling thread.
    pub fn serial() -> Self {
        Self {
            executor: ExecutorImpl::Sync(SyncExecutor::new()),
            main_thread: None,
        }
    }

    /// Marks `id` as the UI thread. Dispatch from it is always serialized.
    pub fn with_main_thread(mut self, id: ThreadId) -> Self {
        self.main_thread = Some(id);
        self
    }

    pub fn is_main_thread(&self) -> bool {
        self.main_thread == Some(thread::current().id())
    }

    pub fn parallelism(&self) -> usize {
        self.executor.parallelism()
    }

    pub fn executor(&self) -> &ExecutorImpl {
        &self.executor
    }

    fn should_fan_out(&self, count: usize, forced: bool) -> bool {
        count > 1 && forced && !self.is_main_thread() && self.executor.parallelism() > 1
    }

    /// Runs `worker(i)` for `i` in `0..count`, in parallel when allowed.
    pub fn dispatch_apply_if_needed<F>(&self, count: usize, forced: bool, worker: F)
    where
        F: Fn(usize) + Sync,
    {
        match count {
            0 => {}
            1 => worker(0),
            _ if self.should_fan_out(count, forced) => {
                log::trace!("Dispatching {} iterations on {}", count, self.executor.name());
                self.executor.apply(count, worker);
            }
            _ => (0..count).for_each(worker),
        }
    }

    /// Like [`WorkerPool::dispatch_apply_if_needed`], collecting results in
    /// index order.
    pub fn dispatch_map_if_needed<R, F>(&self, count: usize, forced: bool, worker: F) -> Vec<R>
    where
        R: Send,
        F: Fn(usize) -> R + Sync,
    {
        if self.should_fan_out(count, forced) {
            log::trace!("Dispatching {} iterations on {}", count, self.executor.name());
            self.executor.map_indexed(count, worker)
        } else {
            (0..count).map(worker).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_zero_iterations_never_calls_worker() {
        let pool = WorkerPool::new(2);
        let calls = AtomicUsize::new(0);
        pool.dispatch_apply_if_needed(0, true, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_single_iteration_runs_inline() {
        let pool = WorkerPool::new(2);
        let caller = thread::current().id();
        let ran_on = Mutex::new(None);
        pool.dispatch_apply_if_needed(1, true, |_| {
            *ran_on.lock().unwrap() = Some(thread::current().id());
        });
        assert_eq!(ran_on.into_inner().unwrap(), Some(caller));
    }

    #[test]
    fn test_main_thread_dispatch_is_serialized() {
        let pool = WorkerPool::new(4).with_main_thread(thread::current().id());
        assert!(pool.is_main_thread());
        let caller = thread::current().id();
        let threads = Mutex::new(HashSet::new());
        pool.dispatch_apply_if_needed(16, true, |_| {
            threads.lock().unwrap().insert(thread::current().id());
        });
        let threads = threads.into_inner().unwrap();
        assert_eq!(threads.len(), 1);
        assert!(threads.contains(&caller));
    }

    #[test]
    fn test_unforced_dispatch_stays_on_caller() {
        let pool = WorkerPool::new(4);
        let caller = thread::current().id();
        let off_thread = AtomicUsize::new(0);
        pool.dispatch_apply_if_needed(8, false, |_| {
            if thread::current().id() != caller {
                off_thread.fetch_add(1, Ordering::SeqCst);
            }
        });
        assert_eq!(off_thread.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_forced_map_returns_results_in_order() {
        let pool = WorkerPool::new(4);
        let out = pool.dispatch_map_if_needed(50, true, |i| i + 1);
        assert_eq!(out, (1..=50).collect::<Vec<_>>());
    }
}
