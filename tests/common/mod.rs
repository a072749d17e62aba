//! Shared helpers for the HTTP integration suites.
#![allow(dead_code)]

use anyhow::anyhow;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use urlalias::app::create_app;
use urlalias::config::{AliasConfig, ServerConfig};
use urlalias::service::Shortener;
use urlalias::storage::{
    MemoryStorage, SqliteStorage, Storage, StorageError, StorageResult, UrlDeleter, UrlGetter,
    UrlSaver,
};

pub fn create_app_with(storage: Arc<dyn Storage>) -> Router {
    let shortener = Arc::new(Shortener::new(storage, AliasConfig::default()));
    create_app(shortener, &ServerConfig::default())
}

pub fn memory_app() -> Router {
    create_app_with(Arc::new(MemoryStorage::new()))
}

pub async fn sqlite_app() -> Router {
    let storage = SqliteStorage::new("sqlite::memory:", 5).await.unwrap();
    storage.init().await.unwrap();
    create_app_with(Arc::new(storage))
}

pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn raw_request(method: Method, uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Store whose every operation fails with a backend error.
pub struct BrokenStorage;

fn backend_down() -> StorageError {
    StorageError::Other(anyhow!("database is locked: /var/lib/urlalias/secret.db"))
}

#[async_trait]
impl UrlSaver for BrokenStorage {
    async fn save_url(&self, _url: &str, _alias: &str) -> StorageResult<i64> {
        Err(backend_down())
    }
}

#[async_trait]
impl UrlGetter for BrokenStorage {
    async fn get_url(&self, _alias: &str) -> StorageResult<String> {
        Err(backend_down())
    }
}

#[async_trait]
impl UrlDeleter for BrokenStorage {
    async fn delete_url(&self, _alias: &str) -> StorageResult<()> {
        Err(backend_down())
    }
}

#[async_trait]
impl Storage for BrokenStorage {
    async fn init(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
