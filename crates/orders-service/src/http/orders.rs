//! `/api/orders` handlers.
//!
//! Extractor rejections (malformed JSON, non-UUID ids, undecodable path
//! segments) are classified as bad requests; everything else comes back from
//! [`OrderService`] already instrumented.
//!
//! [`OrderService`]: crate::services::OrderService

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        OriginalUri, Path, State,
    },
    http::{StatusCode, Uri},
    Json,
};
use uuid::Uuid;

use orders_common::error::ApiError;

use super::HttpError;
use crate::app_state::AppState;
use crate::domain::{CreateOrderRequest, Order};

pub const HEALTH_MESSAGE: &str = "Orders Service is UP and running!";

fn path_param<T>(
    state: &AppState,
    uri: &Uri,
    path: Result<Path<T>, PathRejection>,
) -> Result<T, HttpError> {
    path.map(|Path(value)| value)
        .map_err(|r| HttpError::classify(state, uri, ApiError::bad_request(r.body_text())))
}

pub async fn create_order(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), HttpError> {
    let Json(req) = payload
        .map_err(|r| HttpError::classify(&state, &uri, ApiError::bad_request(r.body_text())))?;
    tracing::info!(product = %req.product_name, "received request to create order");

    req.validate()
        .map_err(|e| HttpError::classify(&state, &uri, e))?;

    let order = state
        .orders()
        .create(req)
        .await
        .map_err(|f| HttpError::classify(&state, &uri, f))?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn list_orders(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<Vec<Order>>, HttpError> {
    tracing::info!("received request to get all orders");
    state
        .orders()
        .list_all()
        .await
        .map(Json)
        .map_err(|f| HttpError::classify(&state, &uri, f))
}

pub async fn get_order(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Order>, HttpError> {
    let id = path_param(&state, &uri, path)?;
    tracing::info!(order_id = %id, "received request to get order");
    state
        .orders()
        .get_by_id(id)
        .await
        .map(Json)
        .map_err(|f| HttpError::classify(&state, &uri, f))
}

pub async fn orders_by_status(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Order>>, HttpError> {
    let status = path_param(&state, &uri, path)?;
    tracing::info!(%status, "received request to get orders by status");
    state
        .orders()
        .list_by_status(&status)
        .await
        .map(Json)
        .map_err(|f| HttpError::classify(&state, &uri, f))
}

pub async fn orders_by_email(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Order>>, HttpError> {
    let email = path_param(&state, &uri, path)?;
    tracing::info!(%email, "received request to get orders for customer");
    state
        .orders()
        .list_by_email(&email)
        .await
        .map(Json)
        .map_err(|f| HttpError::classify(&state, &uri, f))
}

pub async fn delete_order(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, HttpError> {
    let id = path_param(&state, &uri, path)?;
    tracing::info!(order_id = %id, "received request to delete order");
    state
        .orders()
        .delete(id)
        .await
        .map_err(|f| HttpError::classify(&state, &uri, f))?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn health() -> &'static str {
    HEALTH_MESSAGE
}
