use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use orders_common::error::{ApiError, FieldViolation, Result};

/// Order status vocabulary. Creation always yields `Pending`; nothing in this
/// service moves an order to another status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Completed,
    Failed,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Paid => "PAID",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Failed => "FAILED",
        }
    }
}

/// One purchase record as stored and returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub product_name: String,
    pub quantity: u32,
    /// Unit price.
    pub price: Decimal,
    /// `price * quantity`, fixed at creation.
    pub total_amount: Decimal,
    pub customer_email: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Build a new pending order; callers have already checked that
    /// `quantity` and `price` are positive.
    ///
    /// Fails when `price * quantity` does not fit in a `Decimal`.
    pub fn new(
        product_name: String,
        quantity: u32,
        price: Decimal,
        customer_email: String,
    ) -> Result<Self> {
        let total_amount = price
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| ApiError::bad_request("Total amount is out of range"))?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            product_name,
            quantity,
            price,
            total_amount,
            customer_email,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Body of `POST /api/orders`.
///
/// `quantity` is signed so non-positive values reach the business check and
/// are rejected as bad requests instead of failing to deserialize.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub product_name: String,
    pub quantity: i64,
    pub price: Decimal,
    #[serde(default)]
    pub customer_email: String,
}

impl CreateOrderRequest {
    /// Field-level checks, reported together.
    pub fn validate(&self) -> Result<()> {
        let mut violations = Vec::new();
        if self.product_name.trim().is_empty() {
            violations.push(FieldViolation::new("productName", "must not be blank"));
        }
        if self.customer_email.trim().is_empty() {
            violations.push(FieldViolation::new("customerEmail", "must not be blank"));
        } else if !is_plausible_email(&self.customer_email) {
            violations.push(FieldViolation::new(
                "customerEmail",
                "must be a well-formed email address",
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(violations))
        }
    }
}

fn is_plausible_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str) -> CreateOrderRequest {
        CreateOrderRequest {
            product_name: name.into(),
            quantity: 1,
            price: Decimal::ONE,
            customer_email: email.into(),
        }
    }

    #[test]
    fn new_order_is_pending_with_computed_total() {
        let order = Order::new("Widget".into(), 2, Decimal::new(999, 2), "a@b.com".into()).unwrap();
        assert_eq!(order.total_amount, Decimal::new(1998, 2));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.created_at, order.updated_at);
    }

    #[test]
    fn order_serializes_camel_case_with_numeric_amounts() {
        let order = Order::new("Widget".into(), 2, Decimal::new(999, 2), "a@b.com".into()).unwrap();
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["productName"], "Widget");
        assert_eq!(json["totalAmount"], 19.98);
        assert_eq!(json["price"], 9.99);
        assert_eq!(json["status"], "PENDING");
        assert!(json["createdAt"].is_string());
    }

    #[test]
    fn total_that_overflows_is_a_bad_request() {
        let err =
            Order::new("Widget".into(), u32::MAX, Decimal::MAX, "a@b.com".into()).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(m) if m == "Total amount is out of range"));
    }

    #[test]
    fn request_accepts_float_price() {
        let req: CreateOrderRequest = serde_json::from_str(
            r#"{"productName":"Widget","quantity":2,"price":9.99,"customerEmail":"a@b.com"}"#,
        )
        .unwrap();
        assert_eq!(req.price, Decimal::new(999, 2));
        assert_eq!(req.quantity, 2);
    }

    #[test]
    fn validate_reports_every_bad_field() {
        let err = request(" ", "not-an-email").validate().unwrap_err();
        match err {
            ApiError::Validation(v) => {
                assert_eq!(v.len(), 2);
                assert_eq!(v[0].field, "productName");
                assert_eq!(v[1].field, "customerEmail");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(request("Widget", "a@b.com").validate().is_ok());
    }

    #[test]
    fn status_wire_names() {
        assert_eq!(OrderStatus::Completed.as_str(), "COMPLETED");
        assert_eq!(serde_json::to_value(OrderStatus::Failed).unwrap(), "FAILED");
    }
}
