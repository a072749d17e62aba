use axum::{
    routing::{delete, post},
    Router,
};
use std::sync::Arc;

use crate::service::Shortener;

use super::handlers::{delete_url, delete_url_from_body, save_url, AppState};

pub fn create_api_router(shortener: Arc<Shortener>) -> Router {
    let state = Arc::new(AppState { shortener });

    Router::new()
        .route("/url", post(save_url).delete(delete_url_from_body))
        .route("/url/{alias}", delete(delete_url))
        .with_state(state)
}
