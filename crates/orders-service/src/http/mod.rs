//! HTTP handlers for the orders and metrics APIs.

pub mod error;
pub mod metrics;
pub mod orders;

pub use error::HttpError;
