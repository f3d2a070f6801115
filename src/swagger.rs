use axum::Router;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{Account, AmountRequest, Client},
    AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Client endpoints
        crate::routes::clients::create_client,
        crate::routes::clients::list_clients,
        crate::routes::clients::get_client,
        crate::routes::clients::update_client,
        crate::routes::clients::delete_client,
        // Account endpoints
        crate::routes::accounts::create_account,
        crate::routes::accounts::list_accounts,
        crate::routes::accounts::get_account,
        crate::routes::accounts::deposit,
        crate::routes::accounts::withdraw,
    ),
    components(
        schemas(Client, Account, AmountRequest)
    ),
    tags(
        (name = "clients", description = "Client record management"),
        (name = "accounts", description = "Account operations within a client document"),
    ),
    info(
        title = "Ponzibank API",
        version = "0.1.0",
        description = "Client and bank-account CRUD over a single-partition document store"
    )
)]
pub struct ApiDoc;

pub fn create_swagger_router() -> Router<Arc<AppState>> {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}
