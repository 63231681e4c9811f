use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::OrderItem;

/// Body of `POST /api/orders`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CheckoutRequest {
    pub customer_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    pub shipping_address: String,
    #[validate(nested)]
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OrderListQuery {
    pub email: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum SeedResponse {
    Inserted { inserted: usize },
    Skipped { message: String },
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of `GET /test`.
#[derive(Debug, Serialize)]
pub struct DiagnosticsResponse {
    pub backend: String,
    pub database: String,
    /// `Set` or `Not Set`; absent until the store answers.
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub connection_status: String,
    pub collections: Vec<String>,
}
