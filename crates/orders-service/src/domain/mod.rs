//! Order domain types.

pub mod order;

pub use order::{CreateOrderRequest, Order, OrderStatus};
