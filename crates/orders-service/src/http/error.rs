use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};

use orders_common::error::Failure;
use orders_common::ErrorBody;

use crate::app_state::AppState;

/// Classified failure ready to be written as a response.
#[derive(Debug)]
pub struct HttpError(pub ErrorBody);

impl HttpError {
    pub fn classify(state: &AppState, uri: &Uri, failure: impl Into<Failure>) -> Self {
        Self(state.classify(failure, uri.path()))
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.0)).into_response()
    }
}
