use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

use crate::dtos::{CheckoutRequest, OrderListQuery};
use crate::models::{Order, ORDER_COLLECTION};
use crate::services::{calculate_totals, record_order_created, Filter, PublicDocument};
use crate::startup::AppState;

/// `POST /api/orders`
///
/// Totals are computed before anything is written, so a missing product or a
/// store failure leaves no order behind.
#[tracing::instrument(skip(state, request))]
pub async fn create_order(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CheckoutRequest>,
) -> Result<(StatusCode, Json<PublicDocument>), AppError> {
    let totals = calculate_totals(&state.gateway, &request.items).await?;
    let item_count = request.items.len();
    let order = Order::from_checkout(request, &totals);

    let order_id = state.gateway.insert(&order).await?;
    let document = state
        .gateway
        .find_by_id(ORDER_COLLECTION, &order_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!("Order {} missing after insert", order_id))
        })?;

    record_order_created(item_count);
    tracing::info!(
        order_id = %order_id,
        items = item_count,
        total = %totals.total,
        "Order created"
    );

    Ok((StatusCode::CREATED, Json(document)))
}

/// `GET /api/orders?email=`
#[tracing::instrument(skip(state, query))]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<Vec<PublicDocument>>, AppError> {
    let filter = Filter::new().eq_if_present("customer_email", query.email.as_deref());
    let orders = state.gateway.query(ORDER_COLLECTION, filter).await?;

    tracing::debug!(count = orders.len(), "Listed orders");
    Ok(Json(orders))
}
