use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Router,
};
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::{
    errors::client::ClientError,
    models::{Account, AccountFilter, AmountRequest, Client},
    AppState,
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/{id}/accounts", get(list_accounts).post(create_account))
        .route("/{id}/accounts/{name}", get(get_account))
        .route("/{id}/accounts/{name}/deposit", patch(deposit))
        .route("/{id}/accounts/{name}/withdraw", patch(withdraw))
}

/// Boundary validation for balance mutations: the account must exist and the
/// amount must not be negative. The repository does unchecked arithmetic, so
/// these checks run before it is invoked.
async fn checked_account(
    state: &AppState,
    client_id: &str,
    name: &str,
    amount: Decimal,
) -> Result<Account, ClientError> {
    let account = state.repository.get_account_by_name(client_id, name).await?;
    if amount < Decimal::ZERO {
        return Err(ClientError::NegativeAmount);
    }
    Ok(account)
}

#[utoipa::path(
    post,
    path = "/api/clients/{id}/accounts",
    tag = "accounts",
    params(
        ("id" = String, Path, description = "Client ID")
    ),
    request_body = Account,
    responses(
        (status = 201, description = "Account appended, updated client returned", body = Client),
        (status = 404, description = "Client not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(account): Json<Account>,
) -> Result<(StatusCode, Json<Client>), ClientError> {
    let client = state.repository.create_account(&id, account).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

#[utoipa::path(
    get,
    path = "/api/clients/{id}/accounts",
    tag = "accounts",
    params(
        ("id" = String, Path, description = "Client ID"),
        AccountFilter
    ),
    responses(
        (status = 200, description = "Accounts, optionally filtered by balance range", body = Vec<Account>),
        (status = 404, description = "Client not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(filter): Query<AccountFilter>,
) -> Result<Json<Vec<Account>>, ClientError> {
    let accounts = if filter.is_unbounded() {
        state.repository.list_accounts(&id).await?
    } else {
        state
            .repository
            .query_accounts(&id, filter.amount_greater_than, filter.amount_less_than)
            .await?
    };
    Ok(Json(accounts))
}

#[utoipa::path(
    get,
    path = "/api/clients/{id}/accounts/{name}",
    tag = "accounts",
    params(
        ("id" = String, Path, description = "Client ID"),
        ("name" = String, Path, description = "Account name")
    ),
    responses(
        (status = 200, description = "First account with that name", body = Account),
        (status = 404, description = "Client or account not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path((id, name)): Path<(String, String)>,
) -> Result<Json<Account>, ClientError> {
    let account = state.repository.get_account_by_name(&id, &name).await?;
    Ok(Json(account))
}

#[utoipa::path(
    patch,
    path = "/api/clients/{id}/accounts/{name}/deposit",
    tag = "accounts",
    params(
        ("id" = String, Path, description = "Client ID"),
        ("name" = String, Path, description = "Account name")
    ),
    request_body = AmountRequest,
    responses(
        (status = 200, description = "Updated account", body = Account),
        (status = 400, description = "Negative amount"),
        (status = 404, description = "Client or account not found"),
        (status = 409, description = "Concurrent modification, retries exhausted"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn deposit(
    State(state): State<Arc<AppState>>,
    Path((id, name)): Path<(String, String)>,
    Json(request): Json<AmountRequest>,
) -> Result<Json<Account>, ClientError> {
    checked_account(&state, &id, &name, request.amount).await?;
    let account = state
        .repository
        .deposit_into_account(&id, &name, request.amount)
        .await?;
    Ok(Json(account))
}

#[utoipa::path(
    patch,
    path = "/api/clients/{id}/accounts/{name}/withdraw",
    tag = "accounts",
    params(
        ("id" = String, Path, description = "Client ID"),
        ("name" = String, Path, description = "Account name")
    ),
    request_body = AmountRequest,
    responses(
        (status = 200, description = "Updated account", body = Account),
        (status = 400, description = "Negative amount"),
        (status = 404, description = "Client or account not found"),
        (status = 409, description = "Concurrent modification, retries exhausted"),
        (status = 422, description = "Withdrawal would overdraw the account"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn withdraw(
    State(state): State<Arc<AppState>>,
    Path((id, name)): Path<(String, String)>,
    Json(request): Json<AmountRequest>,
) -> Result<Json<Account>, ClientError> {
    let account = checked_account(&state, &id, &name, request.amount).await?;
    if account.balance - request.amount < Decimal::ZERO {
        return Err(ClientError::InsufficientFunds);
    }

    let account = state
        .repository
        .withdraw_from_account(&id, &name, request.amount)
        .await?;
    Ok(Json(account))
}
