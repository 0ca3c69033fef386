//! Metrics: a lock-free registry of tagged counters, gauges and timers, and the
//! per-service facade the instrumentation and classifier record through.

pub mod registry;
pub mod service;

pub use registry::{CounterHandle, GaugeHandle, MetricsRegistry, TimerHandle, TimerSnapshot};
pub use service::{
    OperationReport, Outcome, ServiceMetrics, FAILED_API_CALLS, SUCCESSFUL_API_CALLS,
    TOTAL_API_CALLS,
};
