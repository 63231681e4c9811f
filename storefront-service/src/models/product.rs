use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::gateway::Record;

pub const PRODUCT_COLLECTION: &str = "product";

/// A catalogue entry. Created once and never mutated by this service.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct Product {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price in INR. Capped so any quantity-weighted sum stays within
    /// decimal range at checkout.
    #[validate(range(
        min = 0.0,
        max = 1_000_000_000_000.0,
        message = "Price must be between 0 and 1e12"
    ))]
    pub price: f64,
    pub category: String,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default = "default_stock_qty")]
    #[validate(range(min = 0, message = "Stock quantity must be non-negative"))]
    pub stock_qty: i64,
    #[serde(default)]
    pub image: Option<String>,
}

fn default_in_stock() -> bool {
    true
}

fn default_stock_qty() -> i64 {
    10
}

impl Record for Product {
    const COLLECTION: &'static str = PRODUCT_COLLECTION;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_optional_fields_take_defaults() {
        let product: Product = serde_json::from_value(json!({
            "title": "Silk Scarf",
            "price": 1499.0,
            "category": "Accessories"
        }))
        .unwrap();

        assert!(product.in_stock);
        assert_eq!(product.stock_qty, 10);
        assert_eq!(product.description, None);
        assert_eq!(product.image, None);
        assert!(product.validate().is_ok());
    }

    #[test]
    fn negative_price_is_rejected() {
        let product: Product = serde_json::from_value(json!({
            "title": "Broken",
            "price": -1.0,
            "category": "Bags"
        }))
        .unwrap();

        let errors = product.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn price_beyond_decimal_range_is_rejected() {
        let product: Product = serde_json::from_value(json!({
            "title": "Gilded",
            "price": 1e30,
            "category": "Bags"
        }))
        .unwrap();

        let errors = product.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn negative_stock_is_rejected() {
        let product: Product = serde_json::from_value(json!({
            "title": "Broken",
            "price": 10.0,
            "category": "Bags",
            "stock_qty": -3
        }))
        .unwrap();

        let errors = product.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("stock_qty"));
    }
}
