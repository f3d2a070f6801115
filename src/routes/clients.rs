use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::{errors::client::ClientError, models::Client, AppState};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_clients).post(create_client))
        .route(
            "/{id}",
            get(get_client).put(update_client).delete(delete_client),
        )
}

#[utoipa::path(
    post,
    path = "/api/clients",
    tag = "clients",
    request_body = Client,
    responses(
        (status = 201, description = "Client created", body = Client),
        (status = 409, description = "A client with this id already exists"),
        (status = 422, description = "Body is missing a required property"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_client(
    State(state): State<Arc<AppState>>,
    Json(client): Json<Client>,
) -> Result<(StatusCode, Json<Client>), ClientError> {
    let client = state.repository.create_client(client).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

#[utoipa::path(
    get,
    path = "/api/clients",
    tag = "clients",
    responses(
        (status = 200, description = "All clients", body = Vec<Client>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_clients(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Client>>, ClientError> {
    let clients = state.repository.list_clients().await?;
    Ok(Json(clients))
}

#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    tag = "clients",
    params(
        ("id" = String, Path, description = "Client ID")
    ),
    responses(
        (status = 200, description = "The client", body = Client),
        (status = 404, description = "Client not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_client(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Client>, ClientError> {
    let client = state.repository.get_client(&id).await?;
    Ok(Json(client))
}

#[utoipa::path(
    put,
    path = "/api/clients/{id}",
    tag = "clients",
    params(
        ("id" = String, Path, description = "Client ID")
    ),
    request_body = Client,
    responses(
        (status = 200, description = "Client replaced", body = Client),
        (status = 404, description = "Client not found"),
        (status = 409, description = "Concurrent modification, retries exhausted"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_client(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(client): Json<Client>,
) -> Result<Json<Client>, ClientError> {
    let client = state.repository.update_client(&id, client).await?;
    Ok(Json(client))
}

#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    tag = "clients",
    params(
        ("id" = String, Path, description = "Client ID")
    ),
    responses(
        (status = 204, description = "Client deleted"),
        (status = 404, description = "Client not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_client(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ClientError> {
    state.repository.delete_client(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
