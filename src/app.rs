use axum::Router;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::service::Shortener;
use crate::{api, middleware, redirect};

/// Build the full HTTP application:
///
/// - `POST   /url`          save a URL, optionally under a requested alias
/// - `DELETE /url/{alias}`  delete an alias
/// - `DELETE /url`          delete the alias given in the JSON body
/// - `GET    /{alias}`      302 redirect to the stored URL
pub fn create_app(shortener: Arc<Shortener>, server: &ServerConfig) -> Router {
    let router = api::create_api_router(Arc::clone(&shortener))
        .merge(redirect::create_redirect_router(shortener));

    middleware::apply(router, server.timeout())
}
