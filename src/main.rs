use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use ponzibank::{config::Config, repository::ClientRepository, store::postgres::Database, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let db = Database::new(&config.database_url).await?;

    info!("Running schema migration...");
    db.migrate().await?;

    let repository = ClientRepository::new(Arc::new(db));
    let state = Arc::new(AppState {
        repository,
        config: config.clone(),
    });

    let app = Router::new()
        .route("/api/health", get(ponzibank::health_check))
        .nest(
            "/api/clients",
            ponzibank::routes::clients::router().merge(ponzibank::routes::accounts::router()),
        )
        .merge(ponzibank::swagger::create_swagger_router())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.server_address).await?;
    info!("Server starting on {}", config.server_address);

    axum::serve(listener, app).await?;

    Ok(())
}
