//! `/api/metrics` handlers.

use axum::{extract::State, Json};
use serde::Serialize;

use orders_common::{MetricsSummary, OperationSummary};

use crate::app_state::AppState;
use crate::services::orders::OPERATIONS;

pub async fn summary(State(state): State<AppState>) -> Json<MetricsSummary> {
    Json(MetricsSummary::collect(state.registry()))
}

/// Per-operation counts and durations for every order operation.
pub async fn operations(State(state): State<AppState>) -> Json<Vec<OperationSummary>> {
    Json(
        OPERATIONS
            .iter()
            .map(|op| OperationSummary::collect(state.metrics(), op))
            .collect(),
    )
}

#[derive(Debug, Serialize)]
pub struct MetricsHealth {
    pub status: &'static str,
    pub message: &'static str,
}

pub async fn health() -> Json<MetricsHealth> {
    Json(MetricsHealth {
        status: "UP",
        message: "Metrics service is running",
    })
}
