//! In-process metrics registry.
//!
//! Counters, gauges and timers are keyed by name plus a sorted tag vector and are
//! created lazily on first use. Values are atomics inside `DashMap` shards, so
//! increments from concurrent requests never race. Timer buckets are fixed in
//! microseconds to avoid floating point math on the hot path.

use std::fmt::Write;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;

type TagKey = Vec<(String, String)>;

fn tag_key(tags: &[(&str, &str)]) -> TagKey {
    let mut key: TagKey = tags
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Prometheus metric names only allow `[a-zA-Z0-9_:]`.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

fn label_str(key: &TagKey) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", sanitize_name(k), escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Stable handle to one registered counter.
#[derive(Debug, Clone)]
pub struct CounterHandle(Arc<AtomicU64>);

impl CounterHandle {
    /// Atomically add 1.
    pub fn increment(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn value(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Default)]
struct CounterVec {
    map: DashMap<TagKey, Arc<AtomicU64>>,
}

impl CounterVec {
    fn handle(&self, tags: &[(&str, &str)]) -> CounterHandle {
        let counter = self
            .map
            .entry(tag_key(tags))
            .or_insert_with(|| Arc::new(AtomicU64::new(0)));
        CounterHandle(Arc::clone(counter.value()))
    }

    fn total(&self) -> u64 {
        self.map.iter().map(|r| r.value().load(Ordering::Relaxed)).sum()
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{}{{{}}} {}", name, label_str(r.key()), val);
        }
    }
}

/// Stable handle to one registered gauge.
#[derive(Debug, Clone)]
pub struct GaugeHandle(Arc<AtomicI64>);

impl GaugeHandle {
    pub fn inc(&self) {
        self.add(1);
    }

    pub fn dec(&self) {
        self.add(-1);
    }

    /// Add an arbitrary signed delta.
    pub fn add(&self, v: i64) {
        self.0.fetch_add(v, Ordering::Relaxed);
    }

    pub fn set(&self, v: i64) {
        self.0.store(v, Ordering::Relaxed);
    }

    pub fn value(&self) -> i64 {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Default)]
struct GaugeVec {
    map: DashMap<TagKey, Arc<AtomicI64>>,
}

impl GaugeVec {
    fn handle(&self, tags: &[(&str, &str)]) -> GaugeHandle {
        let gauge = self
            .map
            .entry(tag_key(tags))
            .or_insert_with(|| Arc::new(AtomicI64::new(0)));
        GaugeHandle(Arc::clone(gauge.value()))
    }

    fn total(&self) -> i64 {
        self.map.iter().map(|r| r.value().load(Ordering::Relaxed)).sum()
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} gauge", name);
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{}{{{}}} {}", name, label_str(r.key()), val);
        }
    }
}

// 100us, 500us, 1ms, 5ms, 10ms, 50ms, 100ms, 500ms, 1s
const BUCKETS_MICROS: [u64; 9] = [
    100, 500, 1_000, 5_000, 10_000, 50_000, 100_000, 500_000, 1_000_000,
];

#[derive(Debug, Default)]
struct AtomicTimer {
    count: AtomicU64,
    sum_micros: AtomicU64,
    max_micros: AtomicU64,
    buckets: [AtomicU64; 9],
}

impl AtomicTimer {
    fn observe(&self, duration: Duration) {
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);

        self.count.fetch_add(1, Ordering::Relaxed);
        self.sum_micros.fetch_add(micros, Ordering::Relaxed);
        self.max_micros.fetch_max(micros, Ordering::Relaxed);

        // Cumulative: every bucket at or above the value.
        for (i, &b) in BUCKETS_MICROS.iter().enumerate() {
            if micros <= b {
                self.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

/// Stable handle to one registered timer.
#[derive(Debug, Clone)]
pub struct TimerHandle(Arc<AtomicTimer>);

impl TimerHandle {
    pub fn record(&self, duration: Duration) {
        self.0.observe(duration);
    }
}

/// Point-in-time view of one or more timers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerSnapshot {
    pub count: u64,
    pub total: Duration,
    pub max: Duration,
}

impl TimerSnapshot {
    /// Mean duration, zero when nothing was recorded.
    pub fn mean(&self) -> Duration {
        if self.count == 0 {
            return Duration::ZERO;
        }
        Duration::from_micros(self.total.as_micros() as u64 / self.count)
    }
}

#[derive(Default)]
struct TimerVec {
    map: DashMap<TagKey, Arc<AtomicTimer>>,
}

impl TimerVec {
    fn handle(&self, tags: &[(&str, &str)]) -> TimerHandle {
        let timer = self
            .map
            .entry(tag_key(tags))
            .or_insert_with(|| Arc::new(AtomicTimer::default()));
        TimerHandle(Arc::clone(timer.value()))
    }

    fn snapshot(&self) -> TimerSnapshot {
        let mut count = 0;
        let mut sum = 0;
        let mut max = 0;
        for r in self.map.iter() {
            let t = r.value();
            count += t.count.load(Ordering::Relaxed);
            sum += t.sum_micros.load(Ordering::Relaxed);
            max = max.max(t.max_micros.load(Ordering::Relaxed));
        }
        TimerSnapshot {
            count,
            total: Duration::from_micros(sum),
            max: Duration::from_micros(max),
        }
    }

    /// Render as a Prometheus histogram (unit: microseconds).
    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} histogram", name);
        for r in self.map.iter() {
            let t = r.value();
            let labels = label_str(r.key());
            let prefix = if labels.is_empty() { String::new() } else { format!("{},", labels) };

            for (i, &le) in BUCKETS_MICROS.iter().enumerate() {
                let count = t.buckets[i].load(Ordering::Relaxed);
                let _ = writeln!(out, "{}_bucket{{{}le=\"{}\"}} {}", name, prefix, le, count);
            }
            let count = t.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, count);

            let sum = t.sum_micros.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_sum{{{}}} {}", name, labels, sum);
            let _ = writeln!(out, "{}_count{{{}}} {}", name, labels, count);
        }
    }
}

/// Process-wide counters, gauges and timers.
///
/// Constructed once at startup and shared by `Arc` with every component that
/// records or reads metrics.
#[derive(Default)]
pub struct MetricsRegistry {
    counters: DashMap<String, CounterVec>,
    gauges: DashMap<String, GaugeVec>,
    timers: DashMap<String, TimerVec>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the counter `name` with `tags`, registering it on first use.
    pub fn counter(&self, name: &str, tags: &[(&str, &str)]) -> CounterHandle {
        if let Some(vec) = self.counters.get(name) {
            return vec.handle(tags);
        }
        self.counters.entry(name.to_string()).or_default().handle(tags)
    }

    /// Atomically add 1 to the counter behind `handle`.
    pub fn increment(&self, handle: &CounterHandle) {
        handle.increment();
    }

    /// Handle to the gauge `name` with `tags`, registering it at zero on first use.
    pub fn gauge(&self, name: &str, tags: &[(&str, &str)]) -> GaugeHandle {
        if let Some(vec) = self.gauges.get(name) {
            return vec.handle(tags);
        }
        self.gauges.entry(name.to_string()).or_default().handle(tags)
    }

    /// Handle to the timer `name` with `tags`, registering it on first use.
    pub fn timer(&self, name: &str, tags: &[(&str, &str)]) -> TimerHandle {
        if let Some(vec) = self.timers.get(name) {
            return vec.handle(tags);
        }
        self.timers.entry(name.to_string()).or_default().handle(tags)
    }

    pub fn record_duration(&self, handle: &TimerHandle, duration: Duration) {
        handle.record(duration);
    }

    /// Current value of counter `name` summed over all tag sets.
    ///
    /// `None` means the counter was never registered; callers treat it as zero.
    pub fn snapshot(&self, name: &str) -> Option<u64> {
        self.counters.get(name).map(|vec| vec.total())
    }

    /// Current value of gauge `name` summed over all tag sets.
    pub fn gauge_value(&self, name: &str) -> Option<i64> {
        self.gauges.get(name).map(|vec| vec.total())
    }

    /// Aggregated view of timer `name` over all tag sets.
    pub fn timer_snapshot(&self, name: &str) -> Option<TimerSnapshot> {
        self.timers.get(name).map(|vec| vec.snapshot())
    }

    /// Render every registered metric in Prometheus text exposition format.
    pub fn render(&self) -> String {
        let mut out = String::new();

        let mut counter_names: Vec<String> =
            self.counters.iter().map(|r| r.key().clone()).collect();
        counter_names.sort();
        for name in counter_names {
            if let Some(vec) = self.counters.get(&name) {
                vec.render(&format!("{}_total", sanitize_name(&name)), &mut out);
            }
        }

        let mut gauge_names: Vec<String> = self.gauges.iter().map(|r| r.key().clone()).collect();
        gauge_names.sort();
        for name in gauge_names {
            if let Some(vec) = self.gauges.get(&name) {
                vec.render(&sanitize_name(&name), &mut out);
            }
        }

        let mut timer_names: Vec<String> = self.timers.iter().map(|r| r.key().clone()).collect();
        timer_names.sort();
        for name in timer_names {
            if let Some(vec) = self.timers.get(&name) {
                vec.render(&format!("{}_micros", sanitize_name(&name)), &mut out);
            }
        }
        out
    }
}
