use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use uuid::Uuid;

use orders_common::error::{ApiError, Failure};
use orders_common::metrics::GaugeHandle;
use orders_common::Instrumentation;

use crate::domain::{CreateOrderRequest, Order};
use crate::store::{OrderStore, StoreResult};

pub const CREATE_ORDER: &str = "create-order";
pub const GET_ORDER: &str = "get-order";
pub const GET_ALL_ORDERS: &str = "get-all-order";
pub const GET_ORDERS_BY_STATUS: &str = "get-order-by-status";
pub const GET_ORDERS_BY_EMAIL: &str = "get-order-by-email";
pub const DELETE_ORDER: &str = "delete-order";

/// Every instrumented operation name, in route order.
pub const OPERATIONS: [&str; 6] = [
    CREATE_ORDER,
    GET_ALL_ORDERS,
    GET_ORDER,
    GET_ORDERS_BY_STATUS,
    GET_ORDERS_BY_EMAIL,
    DELETE_ORDER,
];

/// Gauge of orders currently held by the store, as `<service>.orders.stored`.
pub const STORED_ORDERS_GAUGE: &str = "orders.stored";

/// Order business operations. Each one is a single store call inside an
/// instrumentation scope; errors come back as [`Failure`]s already counted.
pub struct OrderService {
    store: Arc<dyn OrderStore>,
    instrumentation: Instrumentation,
    store_timeout: Option<Duration>,
    stored: GaugeHandle,
}

impl OrderService {
    pub fn new(
        store: Arc<dyn OrderStore>,
        instrumentation: Instrumentation,
        store_timeout: Option<Duration>,
    ) -> Self {
        let stored = instrumentation
            .metrics()
            .register_gauge(STORED_ORDERS_GAUGE, "orders currently held by the store");
        Self {
            store,
            instrumentation,
            store_timeout,
            stored,
        }
    }

    /// Await a store call, bounded by the configured timeout.
    async fn call<T>(&self, fut: impl Future<Output = StoreResult<T>>) -> Result<T, ApiError> {
        match self.store_timeout {
            Some(limit) => match tokio::time::timeout(limit, fut).await {
                Ok(res) => res.map_err(ApiError::from),
                Err(_) => Err(ApiError::service(format!(
                    "order store did not respond within {} ms",
                    limit.as_millis()
                ))),
            },
            None => fut.await.map_err(ApiError::from),
        }
    }

    pub async fn create(&self, req: CreateOrderRequest) -> Result<Order, Failure> {
        self.instrumentation
            .run(CREATE_ORDER, async {
                tracing::info!(product = %req.product_name, "creating new order");

                if req.quantity <= 0 {
                    return Err(ApiError::bad_request("Quantity must be greater than 0"));
                }
                if req.price <= Decimal::ZERO {
                    return Err(ApiError::bad_request("Price must be greater than 0"));
                }
                let quantity = u32::try_from(req.quantity)
                    .map_err(|_| ApiError::bad_request("Quantity is too large"))?;

                let order = Order::new(req.product_name, quantity, req.price, req.customer_email)?;
                let saved = self.call(self.store.save(order)).await?;
                self.stored.inc();
                tracing::info!(order_id = %saved.id, "order created");
                Ok(saved)
            })
            .await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Order, Failure> {
        self.instrumentation
            .run(GET_ORDER, async {
                tracing::info!(order_id = %id, "fetching order");
                self.call(self.store.find_by_id(id))
                    .await?
                    .ok_or_else(|| ApiError::not_found("Order", "id", id))
            })
            .await
    }

    pub async fn list_all(&self) -> Result<Vec<Order>, Failure> {
        self.instrumentation
            .run(GET_ALL_ORDERS, async {
                tracing::info!("fetching all orders");
                self.call(self.store.find_all()).await
            })
            .await
    }

    pub async fn list_by_status(&self, status: &str) -> Result<Vec<Order>, Failure> {
        self.instrumentation
            .run(GET_ORDERS_BY_STATUS, async {
                tracing::info!(%status, "fetching orders by status");
                self.call(self.store.find_by_status(status)).await
            })
            .await
    }

    pub async fn list_by_email(&self, email: &str) -> Result<Vec<Order>, Failure> {
        self.instrumentation
            .run(GET_ORDERS_BY_EMAIL, async {
                tracing::info!(%email, "fetching orders by customer email");
                self.call(self.store.find_by_customer_email(email)).await
            })
            .await
    }

    /// Deleting an unknown id succeeds.
    pub async fn delete(&self, id: Uuid) -> Result<(), Failure> {
        self.instrumentation
            .run(DELETE_ORDER, async {
                let removed = self.call(self.store.delete_by_id(id)).await?;
                if removed {
                    self.stored.dec();
                }
                tracing::info!(order_id = %id, removed, "order deleted");
                Ok(())
            })
            .await
    }
}
