//! Orders common library: metrics, instrumentation and error translation.
//!
//! This crate holds the cross-cutting pieces shared by the order services: a
//! process-wide metrics registry, the exactly-once outcome accounting wrapper
//! around business operations, the closed error taxonomy and its mapping to
//! uniform error bodies, and the read-only metrics summary. It carries no
//! HTTP or runtime dependencies so any transport can sit on top of it.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as `ApiError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod classify;
pub mod error;
pub mod instrument;
pub mod metrics;
pub mod summary;

pub use classify::{ErrorBody, ErrorClassifier};
pub use error::{ApiError, ErrorCategory, Failure, FieldViolation, Result};
pub use instrument::Instrumentation;
pub use metrics::{MetricsRegistry, ServiceMetrics};
pub use summary::{MetricsSummary, OperationSummary};
