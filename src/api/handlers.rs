use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{error, info};

use crate::models::{ApiResponse, DeleteUrlRequest, SaveUrlRequest};
use crate::service::{ServiceError, Shortener};

pub struct AppState {
    pub shortener: Arc<Shortener>,
}

pub type ApiError = (StatusCode, Json<ApiResponse>);

fn reject(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ApiResponse::error(message)))
}

/// Decode a JSON body. Content-Type is not required.
fn decode_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        error!("request body is empty");
        return Err(reject(StatusCode::BAD_REQUEST, "empty request"));
    }

    serde_json::from_slice(body).map_err(|e| {
        error!(error = %e, "failed to decode request body");
        reject(StatusCode::BAD_REQUEST, "failed to decode request")
    })
}

/// Create a new alias for a URL
pub async fn save_url(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ApiResponse>, ApiError> {
    let payload: SaveUrlRequest = decode_body(&body)?;
    info!(url = %payload.url, alias = ?payload.alias, "request body decoded");

    match state
        .shortener
        .save(&payload.url, payload.alias.as_deref())
        .await
    {
        Ok(saved) => {
            info!(id = saved.id, alias = %saved.alias, "url added");
            Ok(Json(ApiResponse::ok(saved.alias)))
        }
        Err(ServiceError::InvalidInput(message)) => {
            error!(error = %message, "invalid request");
            Err(reject(StatusCode::BAD_REQUEST, message))
        }
        Err(err @ ServiceError::AlreadyExists(_)) => {
            info!(url = %payload.url, "{err}");
            Err(reject(StatusCode::CONFLICT, err.to_string()))
        }
        Err(err) => {
            error!(error = ?err, "failed to add url");
            Err(reject(StatusCode::INTERNAL_SERVER_ERROR, "failed to add url"))
        }
    }
}

/// Delete the alias named in the path
pub async fn delete_url(
    State(state): State<Arc<AppState>>,
    Path(alias): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    delete_alias(&state, &alias).await
}

/// Delete the alias named in a JSON body `{"alias": "..."}`
pub async fn delete_url_from_body(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ApiResponse>, ApiError> {
    let payload: DeleteUrlRequest = decode_body(&body)?;
    let alias = payload.alias.unwrap_or_default();
    delete_alias(&state, &alias).await
}

async fn delete_alias(state: &AppState, alias: &str) -> Result<Json<ApiResponse>, ApiError> {
    match state.shortener.delete(alias).await {
        Ok(()) => {
            info!(alias = %alias, "url deleted");
            Ok(Json(ApiResponse::ok(alias)))
        }
        Err(ServiceError::InvalidInput(message)) => {
            error!("{message}");
            Err(reject(StatusCode::BAD_REQUEST, message))
        }
        Err(ServiceError::NotFound) => {
            info!(alias = %alias, "url not found");
            Err(reject(StatusCode::CONFLICT, "url not found"))
        }
        Err(err) => {
            error!(error = ?err, alias = %alias, "failed to delete url");
            Err(reject(StatusCode::INTERNAL_SERVER_ERROR, "failed to delete url"))
        }
    }
}
