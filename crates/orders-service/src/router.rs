//! Axum router wiring.

use axum::{
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, http, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/orders", post(http::orders::create_order).get(http::orders::list_orders))
        .route("/api/orders/health", get(http::orders::health))
        .route(
            "/api/orders/:id",
            get(http::orders::get_order).delete(http::orders::delete_order),
        )
        .route("/api/orders/status/:status", get(http::orders::orders_by_status))
        .route("/api/orders/customer/:email", get(http::orders::orders_by_email))
        .route("/api/metrics/summary", get(http::metrics::summary))
        .route("/api/metrics/operations", get(http::metrics::operations))
        .route("/api/metrics/health", get(http::metrics::health))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
