//! Orders service library entry.
//!
//! This crate wires the order domain, the store seam, the instrumented order
//! operations and the HTTP handlers into an axum application. It is consumed
//! by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod domain;
pub mod http;
pub mod ops;
pub mod router;
pub mod services;
pub mod store;
