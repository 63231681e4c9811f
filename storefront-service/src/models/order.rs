use serde::{Deserialize, Serialize};
use validator::Validate;

use super::id::validate_document_id;
use crate::dtos::CheckoutRequest;
use crate::services::gateway::Record;
use crate::services::pricing::OrderTotals;

pub const ORDER_COLLECTION: &str = "order";

/// Lifecycle of an order. Every order is created `pending`; nothing in this
/// service moves it further.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Shipped,
    Delivered,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Paid => write!(f, "paid"),
            OrderStatus::Shipped => write!(f, "shipped"),
            OrderStatus::Delivered => write!(f, "delivered"),
        }
    }
}

/// A line item. Refers to a product by id; the product is not embedded.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct OrderItem {
    #[validate(custom(function = "validate_document_id"))]
    pub product_id: String,
    #[validate(range(
        min = 1,
        max = 1_000_000,
        message = "Quantity must be between 1 and 1000000"
    ))]
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Order {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub shipping_address: String,
    #[validate(nested)]
    pub items: Vec<OrderItem>,
    #[validate(range(min = 0.0))]
    pub subtotal: f64,
    #[validate(range(min = 0.0))]
    pub total: f64,
    #[serde(default)]
    pub status: OrderStatus,
}

impl Order {
    /// Build the record persisted at checkout.
    pub fn from_checkout(request: CheckoutRequest, totals: &OrderTotals) -> Self {
        Self {
            customer_name: request.customer_name,
            customer_email: request.customer_email,
            customer_phone: request.customer_phone,
            shipping_address: request.shipping_address,
            items: request.items,
            subtotal: totals.subtotal_f64(),
            total: totals.total_f64(),
            status: OrderStatus::Pending,
        }
    }
}

impl Record for Order {
    const COLLECTION: &'static str = ORDER_COLLECTION;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(OrderStatus::Shipped).unwrap(),
            serde_json::json!("shipped")
        );
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!(OrderStatus::Delivered.to_string(), "delivered");
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let item = OrderItem {
            product_id: "65a1b2c3d4e5f60718293a4b".to_string(),
            quantity: 0,
        };
        let errors = item.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("quantity"));
    }

    #[test]
    fn oversized_quantity_is_rejected() {
        let item = OrderItem {
            product_id: "65a1b2c3d4e5f60718293a4b".to_string(),
            quantity: 1_000_001,
        };
        let errors = item.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("quantity"));
    }

    #[test]
    fn malformed_product_id_is_rejected() {
        let item = OrderItem {
            product_id: "not-an-id".to_string(),
            quantity: 1,
        };
        let errors = item.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("product_id"));
    }
}
