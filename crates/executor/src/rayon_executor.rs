//! Fixed-size worker pool executor backed by a dedicated rayon pool.
//!
//! Each call spawns at most `num_threads` workers. Workers pull iteration
//! indices from a shared atomic counter until it runs past `count`, and
//! the call returns once every worker joined.

use crate::{default_thread_count, ExecutorError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use trellis_traits::Executor;

#[derive(Debug, Clone)]
pub struct RayonExecutor {
    pool: Arc<rayon::ThreadPool>,
    num_threads: usize,
}

impl RayonExecutor {
    /// Creates a pool with `threads` workers; 0 means [`default_thread_count`].
    pub fn with_threads(threads: usize) -> Result<Self, ExecutorError> {
        let num_threads = if threads == 0 {
            default_thread_count()
        } else {
            threads
        };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("trellis-layout-{}", i))
            .build()
            .map_err(|e| ExecutorError::PoolBuild {
                threads: num_threads,
                message: e.to_string(),
            })?;
        log::debug!("Started layout worker pool with {} threads", num_threads);
        Ok(Self {
            pool: Arc::new(pool),
            num_threads,
        })
    }
}

impl Executor for RayonExecutor {
    fn apply<F>(&self, count: usize, f: F)
    where
        F: Fn(usize) + Sync,
    {
        if count == 0 {
            return;
        }
        let next = AtomicUsize::new(0);
        let workers = self.num_threads.min(count);
        let f = &f;
        let next = &next;
        // Blocks until every spawned worker returned.
        self.pool.scope(|scope| {
            for _ in 0..workers {
                scope.spawn(move |_| {
                    loop {
                        let i = next.fetch_add(1, Ordering::Relaxed);
                        if i >= count {
                            break;
                        }
                        f(i);
                    }
                });
            }
        });
    }

    fn parallelism(&self) -> usize {
        self.num_threads
    }

    fn name(&self) -> &'static str {
        "RayonExecutor"
    }
}
