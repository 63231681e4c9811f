use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

use crate::dtos::ProductListQuery;
use crate::models::{Product, PRODUCT_COLLECTION};
use crate::services::{record_product_created, Filter, PublicDocument};
use crate::startup::AppState;

/// `GET /api/products?category=`
#[tracing::instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<Vec<PublicDocument>>, AppError> {
    let filter = Filter::new().eq_if_present("category", query.category.as_deref());
    let products = state.gateway.query(PRODUCT_COLLECTION, filter).await?;

    tracing::debug!(count = products.len(), "Listed products");
    Ok(Json(products))
}

/// `POST /api/products`
#[tracing::instrument(skip(state, product))]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(product): ValidatedJson<Product>,
) -> Result<(StatusCode, Json<PublicDocument>), AppError> {
    let product_id = state.gateway.insert(&product).await?;
    let document = state
        .gateway
        .find_by_id(PRODUCT_COLLECTION, &product_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!(
                "Product {} missing after insert",
                product_id
            ))
        })?;

    record_product_created();
    tracing::info!(
        product_id = %product_id,
        category = %product.category,
        "Product created"
    );

    Ok((StatusCode::CREATED, Json(document)))
}
