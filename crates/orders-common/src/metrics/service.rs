//! Per-service view of the registry: global API call counters plus
//! per-operation success/failure counters and duration timers.

use std::sync::Arc;
use std::time::Duration;

use super::registry::{CounterHandle, GaugeHandle, MetricsRegistry, TimerSnapshot};

pub const TOTAL_API_CALLS: &str = "api.calls.total";
pub const SUCCESSFUL_API_CALLS: &str = "api.calls.success";
pub const FAILED_API_CALLS: &str = "api.calls.failure";

/// Outcome recorded for one operation invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Failure => "failure",
        }
    }
}

/// Counts and timings recorded for a single operation name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationReport {
    pub success: u64,
    pub failure: u64,
    pub duration: TimerSnapshot,
}

#[derive(Clone)]
pub struct ServiceMetrics {
    registry: Arc<MetricsRegistry>,
    service: Arc<str>,
    total: CounterHandle,
    successful: CounterHandle,
    failed: CounterHandle,
}

impl ServiceMetrics {
    /// Register the global counters for `service` up front, so a summary
    /// read before the first request reports zeros instead of absent values.
    pub fn new(registry: Arc<MetricsRegistry>, service: impl Into<String>) -> Self {
        let service: Arc<str> = Arc::from(service.into());
        let tags = [("service", &*service)];
        let total = registry.counter(TOTAL_API_CALLS, &tags);
        let successful = registry.counter(SUCCESSFUL_API_CALLS, &tags);
        let failed = registry.counter(FAILED_API_CALLS, &tags);
        tracing::info!(service = %service, "service metrics initialized");
        Self {
            registry,
            service,
            total,
            successful,
            failed,
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn registry(&self) -> &Arc<MetricsRegistry> {
        &self.registry
    }

    pub fn increment_total_api_calls(&self) {
        self.total.increment();
        tracing::debug!(service = %self.service, "total API calls incremented");
    }

    pub fn increment_successful_api_calls(&self) {
        self.successful.increment();
        tracing::debug!(service = %self.service, "successful API calls incremented");
    }

    pub fn increment_failed_api_calls(&self) {
        self.failed.increment();
        tracing::debug!(service = %self.service, "failed API calls incremented");
    }

    fn operation_counter_name(&self, operation: &str, outcome: Outcome) -> String {
        format!("{}.{}.{}", self.service, operation, outcome.as_str())
    }

    fn operation_timer_name(&self, operation: &str) -> String {
        format!("{}.{}.duration", self.service, operation)
    }

    pub fn operation_counter(&self, operation: &str, outcome: Outcome) -> CounterHandle {
        self.registry.counter(
            &self.operation_counter_name(operation, outcome),
            &[
                ("service", self.service()),
                ("operation", operation),
                ("status", outcome.as_str()),
            ],
        )
    }

    pub fn record_operation_success(&self, operation: &str) {
        self.operation_counter(operation, Outcome::Success).increment();
        self.increment_successful_api_calls();
        tracing::info!(operation, "operation successful - metrics recorded");
    }

    pub fn record_operation_failure(&self, operation: &str) {
        self.operation_counter(operation, Outcome::Failure).increment();
        self.increment_failed_api_calls();
        tracing::warn!(operation, "operation failed - metrics recorded");
    }

    pub fn record_operation_duration(&self, operation: &str, elapsed: Duration) {
        let timer = self.registry.timer(
            &self.operation_timer_name(operation),
            &[("service", self.service()), ("operation", operation)],
        );
        timer.record(elapsed);
        tracing::debug!(
            operation,
            elapsed_ms = elapsed.as_millis() as u64,
            "operation duration recorded"
        );
    }

    /// Register gauge `<service>.<name>` and return its handle. Registering the
    /// same name again hands back the same gauge.
    pub fn register_gauge(&self, name: &str, description: &str) -> GaugeHandle {
        let gauge = self
            .registry
            .gauge(&format!("{}.{}", self.service, name), &[("service", self.service())]);
        tracing::info!(gauge = name, description, "registered gauge");
        gauge
    }

    /// Current counts for `operation`; unregistered metrics read as zero.
    pub fn operation_report(&self, operation: &str) -> OperationReport {
        let read = |outcome| {
            self.registry
                .snapshot(&self.operation_counter_name(operation, outcome))
                .unwrap_or(0)
        };
        OperationReport {
            success: read(Outcome::Success),
            failure: read(Outcome::Failure),
            duration: self
                .registry
                .timer_snapshot(&self.operation_timer_name(operation))
                .unwrap_or_default(),
        }
    }
}
