//! Shared error type across the orders crates.

use std::fmt;

use thiserror::Error;

/// Response category for a failure (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Lookup found nothing.
    NotFound,
    /// Request rejected by a business rule.
    BadRequest,
    /// Request failed field-level validation.
    Validation,
    /// Explicit domain failure raised by a service.
    Service,
    /// Anything else.
    Unknown,
}

impl ErrorCategory {
    /// HTTP status code for the category.
    pub fn status(self) -> u16 {
        match self {
            ErrorCategory::NotFound => 404,
            ErrorCategory::BadRequest | ErrorCategory::Validation => 400,
            ErrorCategory::Service | ErrorCategory::Unknown => 500,
        }
    }

    /// Short title used as the `error` field of responses.
    pub fn title(self) -> &'static str {
        match self {
            ErrorCategory::NotFound => "Not Found",
            ErrorCategory::BadRequest | ErrorCategory::Validation => "Bad Request",
            ErrorCategory::Service => "Internal Server Error",
            ErrorCategory::Unknown => "Unexpected error occur",
        }
    }
}

/// One invalid field of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Unified error type used by the common library and the services.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{resource} not found with {field} : '{value}'")]
    NotFound {
        resource: &'static str,
        field: &'static str,
        value: String,
    },
    #[error("{0}")]
    BadRequest(String),
    #[error("Validation failed: {}", join_violations(.0))]
    Validation(Vec<FieldViolation>),
    #[error("{0}")]
    Service(String),
    #[error("{0}")]
    Unexpected(String),
}

impl ApiError {
    pub fn not_found(
        resource: &'static str,
        field: &'static str,
        value: impl fmt::Display,
    ) -> Self {
        ApiError::NotFound {
            resource,
            field,
            value: value.to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn service(message: impl Into<String>) -> Self {
        ApiError::Service(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        ApiError::Unexpected(message.into())
    }

    /// Map the error to its response category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::NotFound { .. } => ErrorCategory::NotFound,
            ApiError::BadRequest(_) => ErrorCategory::BadRequest,
            ApiError::Validation(_) => ErrorCategory::Validation,
            ApiError::Service(_) => ErrorCategory::Service,
            ApiError::Unexpected(_) => ErrorCategory::Unknown,
        }
    }
}

/// An error on its way to the response boundary.
///
/// `recorded` is set once the failure has been counted in the global
/// failed-calls counter, so the classifier does not count it twice.
#[derive(Debug)]
pub struct Failure {
    error: ApiError,
    recorded: bool,
}

impl Failure {
    /// Failure already accounted by instrumentation.
    pub fn recorded(error: ApiError) -> Self {
        Self {
            error,
            recorded: true,
        }
    }

    pub fn error(&self) -> &ApiError {
        &self.error
    }

    pub fn is_recorded(&self) -> bool {
        self.recorded
    }

    pub fn into_error(self) -> ApiError {
        self.error
    }
}

impl From<ApiError> for Failure {
    fn from(error: ApiError) -> Self {
        Self {
            error,
            recorded: false,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl std::error::Error for Failure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_resource_and_key() {
        let err = ApiError::not_found("Order", "id", "42");
        assert_eq!(err.to_string(), "Order not found with id : '42'");
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn validation_message_lists_every_field() {
        let err = ApiError::Validation(vec![
            FieldViolation::new("productName", "must not be blank"),
            FieldViolation::new("customerEmail", "must be a well-formed email address"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: productName: must not be blank; customerEmail: must be a well-formed email address"
        );
    }

    #[test]
    fn categories_map_to_status_and_title() {
        assert_eq!(ErrorCategory::NotFound.status(), 404);
        assert_eq!(ErrorCategory::Validation.status(), 400);
        assert_eq!(ErrorCategory::Validation.title(), "Bad Request");
        assert_eq!(ErrorCategory::Service.title(), "Internal Server Error");
        assert_eq!(ErrorCategory::Unknown.status(), 500);
        assert_eq!(ErrorCategory::Unknown.title(), "Unexpected error occur");
    }

    #[test]
    fn failure_from_error_is_not_recorded() {
        let f = Failure::from(ApiError::bad_request("nope"));
        assert!(!f.is_recorded());
        assert!(Failure::recorded(ApiError::bad_request("nope")).is_recorded());
        assert_eq!(f.to_string(), "nope");
    }
}
