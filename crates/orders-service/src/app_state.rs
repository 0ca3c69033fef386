//! Shared application state for the orders service.
//!
//! One `MetricsRegistry` is built here and handed to every component that
//! records or reads metrics.

use std::sync::Arc;

use orders_common::error::{Failure, Result};
use orders_common::{ErrorBody, ErrorClassifier, Instrumentation, MetricsRegistry, ServiceMetrics};

use crate::config::ServiceConfig;
use crate::store::{InMemoryOrderStore, OrderStore};
use crate::services::OrderService;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServiceConfig,
    registry: Arc<MetricsRegistry>,
    metrics: ServiceMetrics,
    classifier: ErrorClassifier,
    orders: OrderService,
}

impl AppState {
    /// Build application state over the in-memory store.
    pub fn new(cfg: ServiceConfig) -> Result<Self> {
        Self::with_store(cfg, Arc::new(InMemoryOrderStore::new()))
    }

    /// Build application state over any store.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn with_store(cfg: ServiceConfig, store: Arc<dyn OrderStore>) -> Result<Self> {
        cfg.validate()?;

        let registry = Arc::new(MetricsRegistry::new());
        let metrics = ServiceMetrics::new(Arc::clone(&registry), cfg.service.name.clone());
        let classifier = ErrorClassifier::new(metrics.clone());
        let orders = OrderService::new(
            store,
            Instrumentation::new(metrics.clone()),
            cfg.store.timeout(),
        );

        tracing::info!(
            service = %cfg.service.name,
            store_timeout_ms = cfg.store.timeout_ms,
            "application state ready"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                registry,
                metrics,
                classifier,
                orders,
            }),
        })
    }

    pub fn cfg(&self) -> &ServiceConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> &MetricsRegistry {
        &self.inner.registry
    }

    pub fn metrics(&self) -> &ServiceMetrics {
        &self.inner.metrics
    }

    pub fn orders(&self) -> &OrderService {
        &self.inner.orders
    }

    /// Translate a failure into the uniform error body for `request`.
    pub fn classify(&self, failure: impl Into<Failure>, request: &str) -> ErrorBody {
        self.inner.classifier.classify(failure, request)
    }
}
