use std::sync::Arc;

use axum::{routing::get, Router};
use rust_decimal::Decimal;

use crate::config::Config;
use crate::models::{Account, Client};
use crate::repository::ClientRepository;
use crate::store::memory::MemoryStore;
use crate::AppState;

/// Router plus repository over a fresh in-memory store, mirroring the wiring
/// in main.rs.
pub struct TestContext {
    pub app: Router,
    pub repository: ClientRepository,
}

impl TestContext {
    pub fn new() -> Self {
        let repository = ClientRepository::new(Arc::new(MemoryStore::new()));
        let config = Config {
            database_url: String::new(),
            server_address: String::new(),
        };
        let state = Arc::new(AppState {
            repository: repository.clone(),
            config,
        });

        let app = Router::new()
            .route("/api/health", get(crate::health_check))
            .nest(
                "/api/clients",
                crate::routes::clients::router().merge(crate::routes::accounts::router()),
            )
            .with_state(state);

        Self { app, repository }
    }
}

pub fn account(name: &str, balance: i64) -> Account {
    Account {
        account_name: name.to_string(),
        balance: Decimal::from(balance),
    }
}

pub fn madoff() -> Client {
    Client {
        id: String::new(),
        first_name: "Bernie".to_string(),
        last_name: "Madoff".to_string(),
        accounts: vec![
            account("Legal Defense Fund", 500_000),
            account("Public Relations Fund", 1_000),
            account("New Personality Fund", 500),
            account("Charity Fund", 10),
        ],
    }
}
