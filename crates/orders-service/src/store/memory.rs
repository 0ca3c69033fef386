use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use super::{OrderStore, StoreResult};
use crate::domain::Order;

/// `DashMap`-backed store for single-process deployments and tests.
#[derive(Default)]
pub struct InMemoryOrderStore {
    orders: DashMap<Uuid, Order>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self {
            orders: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    fn collect<F>(&self, keep: F) -> Vec<Order>
    where
        F: Fn(&Order) -> bool,
    {
        let mut out: Vec<Order> = self
            .orders
            .iter()
            .filter(|e| keep(e.value()))
            .map(|e| e.value().clone())
            .collect();
        // DashMap iteration order is arbitrary.
        out.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        out
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn save(&self, order: Order) -> StoreResult<Order> {
        self.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Order>> {
        Ok(self.orders.get(&id).map(|e| e.value().clone()))
    }

    async fn find_all(&self) -> StoreResult<Vec<Order>> {
        Ok(self.collect(|_| true))
    }

    async fn find_by_status(&self, status: &str) -> StoreResult<Vec<Order>> {
        Ok(self.collect(|o| o.status.as_str() == status))
    }

    async fn find_by_customer_email(&self, email: &str) -> StoreResult<Vec<Order>> {
        Ok(self.collect(|o| o.customer_email == email))
    }

    async fn delete_by_id(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.orders.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn order(name: &str, email: &str) -> Order {
        Order::new(name.into(), 1, Decimal::ONE, email.into()).unwrap()
    }

    #[tokio::test]
    async fn save_then_find_round_trips() {
        let store = InMemoryOrderStore::new();
        let o = store.save(order("Widget", "a@b.com")).await.unwrap();
        assert_eq!(store.find_by_id(o.id).await.unwrap(), Some(o));
        assert_eq!(store.find_by_id(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn filters_are_exact_matches() {
        let store = InMemoryOrderStore::new();
        store.save(order("Widget", "a@b.com")).await.unwrap();
        store.save(order("Gadget", "A@b.com")).await.unwrap();

        assert_eq!(store.find_by_customer_email("a@b.com").await.unwrap().len(), 1);
        assert_eq!(store.find_by_status("PENDING").await.unwrap().len(), 2);
        assert!(store.find_by_status("pending").await.unwrap().is_empty());
        assert_eq!(store.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let store = InMemoryOrderStore::new();
        let o = store.save(order("Widget", "a@b.com")).await.unwrap();
        assert!(store.delete_by_id(o.id).await.unwrap());
        assert!(!store.delete_by_id(o.id).await.unwrap());
        assert!(store.is_empty());
    }
}
