//! Read-only aggregation of the API call counters.

use serde::Serialize;

use crate::metrics::{
    MetricsRegistry, ServiceMetrics, FAILED_API_CALLS, SUCCESSFUL_API_CALLS, TOTAL_API_CALLS,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    pub total_api_calls: u64,
    pub successful_api_calls: u64,
    pub failed_api_calls: u64,
    /// Percentage with two decimals, e.g. `"66.67%"`.
    pub success_rate: String,
}

impl MetricsSummary {
    pub fn collect(registry: &MetricsRegistry) -> Self {
        let total = registry.snapshot(TOTAL_API_CALLS).unwrap_or(0);
        let successful = registry.snapshot(SUCCESSFUL_API_CALLS).unwrap_or(0);
        let failed = registry.snapshot(FAILED_API_CALLS).unwrap_or(0);
        Self {
            total_api_calls: total,
            successful_api_calls: successful,
            failed_api_calls: failed,
            success_rate: format_rate(successful, total),
        }
    }
}

pub fn success_rate(successful: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    successful as f64 / total as f64 * 100.0
}

fn format_rate(successful: u64, total: u64) -> String {
    format!("{:.2}%", success_rate(successful, total))
}

/// Per-operation counts and timings, durations in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationSummary {
    pub operation: String,
    pub success: u64,
    pub failure: u64,
    pub calls: u64,
    pub mean_duration_ms: f64,
    pub max_duration_ms: f64,
}

impl OperationSummary {
    pub fn collect(metrics: &ServiceMetrics, operation: &str) -> Self {
        let report = metrics.operation_report(operation);
        Self {
            operation: operation.to_string(),
            success: report.success,
            failure: report.failure,
            calls: report.duration.count,
            mean_duration_ms: report.duration.mean().as_secs_f64() * 1000.0,
            max_duration_ms: report.duration.max.as_secs_f64() * 1000.0,
        }
    }
}
