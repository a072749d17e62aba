pub mod api;
pub mod app;
pub mod config;
pub mod generator;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod redirect;
pub mod service;
pub mod storage;
