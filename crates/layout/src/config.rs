use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// Whether stack passes may lay out sibling components on worker threads.
    ///
    /// - **true**: Children of large stacks are measured in parallel. Calls
    ///   made from the registered main thread are still serialized.
    /// - **false**: Every pass runs on the calling thread.
    ///
    /// Defaults to `true`.
    pub concurrent: bool,

    /// Size of the worker pool used for concurrent passes. `0` means twice the
    /// number of logical CPUs.
    ///
    /// Defaults to `0`.
    pub worker_threads: usize,

    /// Record pass timings and cache hit rates with a [`crate::perf::DebugProfiler`].
    ///
    /// Defaults to `false` unless the `profiling` feature is enabled.
    pub profiling: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            concurrent: true,
            worker_threads: 0,
            profiling: cfg!(feature = "profiling"),
        }
    }
}

impl LayoutConfig {
    /// A configuration that never leaves the calling thread.
    pub fn serial() -> Self {
        Self {
            concurrent: false,
            ..Self::default()
        }
    }

    pub fn with_concurrent(mut self, concurrent: bool) -> Self {
        self.concurrent = concurrent;
        self
    }

    pub fn with_worker_threads(mut self, worker_threads: usize) -> Self {
        self.worker_threads = worker_threads;
        self
    }

    pub fn with_profiling(mut self, profiling: bool) -> Self {
        self.profiling = profiling;
        self
    }
}
