use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

/// Collects layout pass timings and cache statistics.
///
/// The engine holds one behind a `Box<dyn Profiler>` and calls it from every
/// worker thread, so implementations must be cheap and thread safe.
pub trait Profiler: Send + Sync {
    /// Adds `duration` to the total recorded under `key` (a spec kind).
    fn record(&self, key: &str, duration: Duration);
    fn count_hit(&self);
    fn count_miss(&self);
    fn reset(&self);

    /// A component layout was computed from scratch.
    fn record_component_computed(&self, duration: Duration);

    fn hits(&self) -> usize {
        0
    }

    fn misses(&self) -> usize {
        0
    }

    fn log_summary(&self, _label: &str) {}
}

/// Used when profiling is disabled.
pub struct NoOpProfiler;

impl Profiler for NoOpProfiler {
    #[inline(always)]
    fn record(&self, _key: &str, _duration: Duration) {}
    #[inline(always)]
    fn count_hit(&self) {}
    #[inline(always)]
    fn count_miss(&self) {}
    #[inline(always)]
    fn reset(&self) {}
    #[inline(always)]
    fn record_component_computed(&self, _duration: Duration) {}
}

pub struct DebugProfiler {
    stats: Mutex<HashMap<String, Duration>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
    components_computed: AtomicUsize,
    total_compute_time_ns: AtomicU64,
}

impl DebugProfiler {
    pub fn new() -> Self {
        Self {
            stats: Mutex::new(HashMap::new()),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
            components_computed: AtomicUsize::new(0),
            total_compute_time_ns: AtomicU64::new(0),
        }
    }

    pub fn components_computed(&self) -> usize {
        self.components_computed.load(Ordering::Acquire)
    }

    /// Mean wall time of a from-scratch component layout, children included.
    pub fn avg_component_time(&self) -> Option<Duration> {
        let computed = self.components_computed.load(Ordering::Acquire);
        if computed == 0 {
            return None;
        }
        let time_ns = self.total_compute_time_ns.load(Ordering::Acquire);
        Some(Duration::from_nanos(time_ns / computed as u64))
    }

    pub fn recorded(&self, key: &str) -> Option<Duration> {
        self.stats.lock().ok().and_then(|stats| stats.get(key).copied())
    }
}

impl Default for DebugProfiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Profiler for DebugProfiler {
    fn record(&self, key: &str, duration: Duration) {
        if let Ok(mut g) = self.stats.lock() {
            *g.entry(key.to_string()).or_default() += duration;
        }
    }

    fn count_hit(&self) {
        self.hits.fetch_add(1, Ordering::Release);
    }

    fn count_miss(&self) {
        self.misses.fetch_add(1, Ordering::Release);
    }

    fn reset(&self) {
        if let Ok(mut g) = self.stats.lock() {
            g.clear();
        }
        self.hits.store(0, Ordering::Release);
        self.misses.store(0, Ordering::Release);
        self.components_computed.store(0, Ordering::Release);
        self.total_compute_time_ns.store(0, Ordering::Release);
    }

    fn record_component_computed(&self, duration: Duration) {
        self.components_computed.fetch_add(1, Ordering::Release);
        // Saturate instead of wrapping on absurd durations
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        self.total_compute_time_ns.fetch_add(nanos, Ordering::Release);
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::Acquire)
    }

    fn misses(&self) -> usize {
        self.misses.load(Ordering::Acquire)
    }

    fn log_summary(&self, label: &str) {
        let hits = self.hits();
        let misses = self.misses();
        let total = hits + misses;
        if total == 0 {
            return;
        }

        log::info!("=== Layout Profile ({}) ===", label);
        log::info!(
            "Cache Hits: {} ({:.1}%), Misses: {}",
            hits,
            (hits as f64 / total as f64) * 100.0,
            misses
        );
        if let Some(avg) = self.avg_component_time() {
            log::info!(
                "Computed {} components, {:?} on average",
                self.components_computed(),
                avg
            );
        }
        if let Ok(stats) = self.stats.lock() {
            let mut keys: Vec<_> = stats.iter().collect();
            keys.sort_by(|a, b| a.0.cmp(b.0));
            for (k, v) in keys {
                log::info!("{}: {:?}", k, v);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_profiler_counts_and_resets() {
        let profiler = DebugProfiler::new();
        profiler.count_hit();
        profiler.count_miss();
        profiler.count_miss();
        profiler.record("stack", Duration::from_millis(2));
        profiler.record("stack", Duration::from_millis(3));
        profiler.record_component_computed(Duration::from_millis(4));

        assert_eq!(profiler.hits(), 1);
        assert_eq!(profiler.misses(), 2);
        assert_eq!(profiler.recorded("stack"), Some(Duration::from_millis(5)));
        assert_eq!(profiler.avg_component_time(), Some(Duration::from_millis(4)));

        profiler.reset();
        assert_eq!(profiler.hits(), 0);
        assert_eq!(profiler.recorded("stack"), None);
        assert_eq!(profiler.avg_component_time(), None);
    }
}
