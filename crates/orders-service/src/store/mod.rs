//! Order persistence seam.
//!
//! The service only needs identifier lookups and field-equality filters, so
//! any document store can sit behind [`OrderStore`].

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use orders_common::error::ApiError;

use crate::domain::Order;

pub use memory::InMemoryOrderStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("order store unavailable: {0}")]
    Unavailable(String),
    #[error("order store query failed: {0}")]
    Query(String),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::unexpected(e.to_string())
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert or replace by `order.id`.
    async fn save(&self, order: Order) -> StoreResult<Order>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Order>>;
    async fn find_all(&self) -> StoreResult<Vec<Order>>;
    /// Exact match on the status wire name.
    async fn find_by_status(&self, status: &str) -> StoreResult<Vec<Order>>;
    /// Exact match on the customer email.
    async fn find_by_customer_email(&self, email: &str) -> StoreResult<Vec<Order>>;
    /// Returns whether a document was removed.
    async fn delete_by_id(&self, id: Uuid) -> StoreResult<bool>;
}
