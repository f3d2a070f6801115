pub mod config;
pub mod errors;
pub mod models;
pub mod repository;
pub mod routes;
pub mod store;
pub mod swagger;

#[cfg(test)]
mod tests;

use axum::{http::StatusCode, Json};
use config::Config;
use repository::ClientRepository;

#[derive(Clone)]
pub struct AppState {
    pub repository: ClientRepository,
    pub config: Config,
}

/// Health check endpoint for monitoring
pub async fn health_check() -> Result<Json<serde_json::Value>, StatusCode> {
    Ok(Json(serde_json::json!({"status": "ok"})))
}
