//! Business services exposed over HTTP.

pub mod orders;

pub use orders::OrderService;
