use axum::{extract::State, Json};

use crate::dtos::{DiagnosticsResponse, MessageResponse};
use crate::startup::AppState;

const MAX_LISTED_COLLECTIONS: usize = 10;
const MAX_ERROR_CHARS: usize = 50;

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Storefront API is running".to_string(),
    })
}

pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from the storefront backend!".to_string(),
    })
}

/// `GET /test`: store diagnostics. Always 200; problems are reported in the
/// body.
pub async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticsResponse> {
    let mut response = DiagnosticsResponse {
        backend: "running".to_string(),
        database: "not available".to_string(),
        database_url: None,
        database_name: None,
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    if let Err(e) = state.gateway.ping().await {
        tracing::warn!("Diagnostics ping failed: {}", e);
        response.database = format!("error: {}", shorten(&e.to_string()));
        return Json(response);
    }

    response.database_url = Some(
        if state.config.mongodb.uri_from_env {
            "Set"
        } else {
            "Not Set"
        }
        .to_string(),
    );
    response.database_name = Some(state.gateway.database_name().to_string());
    response.connection_status = "Connected".to_string();

    match state.gateway.collection_names().await {
        Ok(mut names) => {
            names.truncate(MAX_LISTED_COLLECTIONS);
            response.collections = names;
            response.database = "connected and working".to_string();
        }
        Err(e) => {
            response.database = format!("connected but error: {}", shorten(&e.to_string()));
        }
    }

    Json(response)
}

fn shorten(message: &str) -> String {
    message.chars().take(MAX_ERROR_CHARS).collect()
}
