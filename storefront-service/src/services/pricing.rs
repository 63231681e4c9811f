//! Order total calculation.
//!
//! Resolves each line item's product through the gateway and sums
//! `price * quantity` in decimal arithmetic. Read-only: nothing is written
//! until the totals are known.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use service_core::error::AppError;
use thiserror::Error;

use super::gateway::{DocumentGateway, GatewayError, PublicDocument};
use crate::models::{DocumentId, OrderItem, PRODUCT_COLLECTION};

const PRICE_FIELD: &str = "price";
const MONEY_SCALE: u32 = 2;

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Product {product_id} has an unusable price: {price}")]
    InvalidPrice { product_id: String, price: f64 },

    #[error("Order total overflowed")]
    Overflow,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::ProductNotFound(id) => {
                AppError::NotFound(anyhow::anyhow!("Product not found: {}", id))
            }
            PricingError::Gateway(e) => e.into(),
            other => AppError::InternalError(anyhow::anyhow!(other.to_string())),
        }
    }
}

/// Subtotal and total of an order, rounded to cents.
///
/// There is no tax or shipping model, so `total` always equals `subtotal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub total: Decimal,
}

impl OrderTotals {
    /// Rounds half to even.
    pub fn from_subtotal(subtotal: Decimal) -> Self {
        let rounded =
            subtotal.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven);
        Self {
            subtotal: rounded,
            total: rounded,
        }
    }

    pub fn subtotal_f64(&self) -> f64 {
        self.subtotal.to_f64().unwrap_or_default()
    }

    pub fn total_f64(&self) -> f64 {
        self.total.to_f64().unwrap_or_default()
    }
}

/// Price every line item against the products currently in the store.
///
/// Fails on the first product that cannot be found. A product stored without
/// a numeric price counts as free.
#[tracing::instrument(skip(gateway, items), fields(items = items.len()))]
pub async fn calculate_totals(
    gateway: &DocumentGateway,
    items: &[OrderItem],
) -> Result<OrderTotals, PricingError> {
    let mut subtotal = Decimal::ZERO;

    for item in items {
        let id = DocumentId::parse(&item.product_id)
            .map_err(|_| PricingError::ProductNotFound(item.product_id.clone()))?;

        let product = gateway
            .find_by_id(PRODUCT_COLLECTION, &id)
            .await?
            .ok_or_else(|| PricingError::ProductNotFound(item.product_id.clone()))?;

        let price = unit_price(&item.product_id, &product)?;
        subtotal = price
            .checked_mul(Decimal::from(item.quantity))
            .and_then(|line| subtotal.checked_add(line))
            .ok_or(PricingError::Overflow)?;
    }

    let totals = OrderTotals::from_subtotal(subtotal);
    tracing::debug!(subtotal = %totals.subtotal, "Calculated order totals");
    Ok(totals)
}

fn unit_price(product_id: &str, product: &PublicDocument) -> Result<Decimal, PricingError> {
    let price = product
        .get(PRICE_FIELD)
        .and_then(Value::as_f64)
        .unwrap_or(0.0);

    Decimal::from_f64(price).ok_or_else(|| PricingError::InvalidPrice {
        product_id: product_id.to_string(),
        price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_cents_half_even() {
        let totals = OrderTotals::from_subtotal(Decimal::new(10_125, 3));
        assert_eq!(totals.subtotal, Decimal::new(1012, 2));
        assert_eq!(totals.total, totals.subtotal);

        let totals = OrderTotals::from_subtotal(Decimal::new(10_135, 3));
        assert_eq!(totals.subtotal, Decimal::new(1014, 2));
    }

    #[test]
    fn converts_to_f64() {
        let totals = OrderTotals::from_subtotal(Decimal::new(5297, 0));
        assert_eq!(totals.subtotal_f64(), 5297.0);
        assert_eq!(totals.total_f64(), 5297.0);
    }

    #[test]
    fn missing_price_counts_as_zero() {
        let product = PublicDocument::new();
        assert_eq!(unit_price("x", &product).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err: AppError = PricingError::ProductNotFound("abc".into()).into();
        assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Not found: Product not found: abc");
    }
}
