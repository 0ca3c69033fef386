//! Failure-to-response translation.
//!
//! Every failure that reaches the response boundary goes through
//! [`ErrorClassifier::classify`], which picks the category by an exhaustive
//! match on [`ApiError`], logs it, and makes sure it is counted in the
//! failed-calls counter exactly once.

use serde::Serialize;

use crate::error::{ApiError, ErrorCategory, Failure};
use crate::metrics::ServiceMetrics;

/// Uniform error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
}

/// Strip the `uri=` marker some request descriptions carry.
pub fn request_path(description: &str) -> &str {
    description.strip_prefix("uri=").unwrap_or(description)
}

#[derive(Clone)]
pub struct ErrorClassifier {
    metrics: ServiceMetrics,
}

impl ErrorClassifier {
    pub fn new(metrics: ServiceMetrics) -> Self {
        Self { metrics }
    }

    pub fn classify(&self, failure: impl Into<Failure>, request: &str) -> ErrorBody {
        let failure = failure.into();
        let path = request_path(request);

        match failure.error() {
            ApiError::NotFound { .. } => {
                tracing::error!(%path, "Resource not found: {}", failure.error());
            }
            ApiError::BadRequest(message) => {
                tracing::error!(%path, "Bad request: {message}");
            }
            ApiError::Validation(violations) => {
                tracing::error!(
                    %path,
                    fields = violations.len(),
                    "Validation failed: {}",
                    failure.error()
                );
            }
            ApiError::Service(message) => {
                tracing::error!(%path, "Service exception: {message}");
            }
            ApiError::Unexpected(message) => {
                tracing::error!(%path, "Unexpected error occurred: {message}");
            }
        }

        if !failure.is_recorded() {
            self.metrics.increment_total_api_calls();
            self.metrics.increment_failed_api_calls();
        }

        let category: ErrorCategory = failure.error().category();
        ErrorBody {
            status: category.status(),
            error: category.title().to_string(),
            message: failure.error().to_string(),
            path: path.to_string(),
        }
    }
}
