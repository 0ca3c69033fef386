//! Exactly-once outcome accounting around a unit of work.

use std::future::Future;
use std::time::Instant;

use crate::error::{ApiError, Failure};
use crate::metrics::ServiceMetrics;

/// Wraps operations with start-time capture, outcome counters and duration
/// recording. The wrapped result is passed through untouched.
#[derive(Clone)]
pub struct Instrumentation {
    metrics: ServiceMetrics,
}

impl Instrumentation {
    pub fn new(metrics: ServiceMetrics) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &ServiceMetrics {
        &self.metrics
    }

    /// Drive `work` inside an instrumentation scope named `operation`.
    ///
    /// Exactly one of the success or failure branches runs per call. On
    /// failure the original error comes back inside a [`Failure`] already
    /// marked as recorded.
    pub async fn run<T, F>(&self, operation: &str, work: F) -> Result<T, Failure>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        let start = Instant::now();
        self.metrics.increment_total_api_calls();

        match work.await {
            Ok(value) => {
                self.metrics.record_operation_success(operation);
                self.metrics.record_operation_duration(operation, start.elapsed());
                Ok(value)
            }
            Err(err) => {
                self.metrics.record_operation_failure(operation);
                self.metrics.record_operation_duration(operation, start.elapsed());
                Err(Failure::recorded(err))
            }
        }
    }
}
