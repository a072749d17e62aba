use axum::{routing::get, Router};
use std::sync::Arc;

use crate::service::Shortener;

use super::handlers::{missing_alias, redirect_url, RedirectState};

pub fn create_redirect_router(shortener: Arc<Shortener>) -> Router {
    let state = Arc::new(RedirectState { shortener });

    Router::new()
        .route("/", get(missing_alias))
        .route("/{alias}", get(redirect_url))
        .with_state(state)
}
