use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{error, info};

use crate::models::ApiResponse;
use crate::service::{ServiceError, Shortener};

pub struct RedirectState {
    pub shortener: Arc<Shortener>,
}

/// Unknown aliases get the same answer as malformed requests so the response
/// does not reveal which aliases exist.
fn invalid_request() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::error("invalid request")),
    )
        .into_response()
}

/// Redirect to the URL stored under `alias`
pub async fn redirect_url(
    State(state): State<Arc<RedirectState>>,
    Path(alias): Path<String>,
) -> Response {
    match state.shortener.resolve(&alias).await {
        Ok(url) => {
            info!(alias = %alias, url = %url, "got url");
            (StatusCode::FOUND, [(header::LOCATION, url)]).into_response()
        }
        Err(ServiceError::NotFound) => {
            info!(alias = %alias, "url not found");
            invalid_request()
        }
        Err(ServiceError::InvalidInput(_)) => {
            info!("alias is empty");
            invalid_request()
        }
        Err(err) => {
            error!(error = ?err, alias = %alias, "failed to get url");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("internal error")),
            )
                .into_response()
        }
    }
}

/// `GET /` carries no alias at all
pub async fn missing_alias() -> Response {
    info!("alias is empty");
    invalid_request()
}
