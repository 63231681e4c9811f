//! HTTP handlers for storefront-service.

pub mod health;
pub mod orders;
pub mod products;
pub mod seed;
pub mod system;

pub use health::{health_check, metrics_endpoint, readiness_check};
