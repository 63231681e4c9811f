use axum::{extract::State, http::StatusCode, Json};
use service_core::error::AppError;

use crate::dtos::SeedResponse;
use crate::services::{seed_products, SeedOutcome};
use crate::startup::AppState;

/// `POST /api/seed`
#[tracing::instrument(skip(state))]
pub async fn seed(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SeedResponse>), AppError> {
    let response = match seed_products(&state.gateway).await? {
        SeedOutcome::Inserted(inserted) => {
            tracing::info!(inserted, "Seeded demo products");
            SeedResponse::Inserted { inserted }
        }
        SeedOutcome::AlreadySeeded => {
            tracing::info!("Products already exist, skipping seed");
            SeedResponse::Skipped {
                message: "Products already exist".to_string(),
            }
        }
    };

    Ok((StatusCode::CREATED, Json(response)))
}
