use axum::http::StatusCode;
use thiserror::Error;

use super::{impl_into_response, AppError};
use crate::store::StoreError;

/// Errors surfaced by client and account operations
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("client '{id}' does not exist")]
    NotFound { id: String },

    #[error("account '{name}' does not exist")]
    AccountNotFound { name: String },

    #[error("a client with id '{id}' already exists")]
    DuplicateId { id: String },

    #[error("amount must not be negative")]
    NegativeAmount,

    #[error("withdrawal would overdraw the account")]
    InsufficientFunds,

    #[error("document for client '{id}' kept changing while replacing it")]
    ReplaceConflict { id: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl AppError for ClientError {
    fn status_code(&self) -> StatusCode {
        match self {
            ClientError::NotFound { .. } | ClientError::AccountNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            ClientError::DuplicateId { .. } => StatusCode::CONFLICT,
            ClientError::NegativeAmount => StatusCode::BAD_REQUEST,
            ClientError::InsufficientFunds => StatusCode::UNPROCESSABLE_ENTITY,
            ClientError::ReplaceConflict { .. } => StatusCode::CONFLICT,
            ClientError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn user_message(&self) -> String {
        match self {
            ClientError::NotFound { .. } => "Client does not exist".to_string(),
            ClientError::AccountNotFound { .. } => "Account does not exist".to_string(),
            ClientError::DuplicateId { .. } => {
                "A client with this id already exists".to_string()
            }
            ClientError::NegativeAmount => "Amount must not be negative".to_string(),
            ClientError::InsufficientFunds => "Insufficient funds".to_string(),
            ClientError::ReplaceConflict { .. } => {
                "Client record is being modified concurrently, try again".to_string()
            }
            ClientError::Internal { .. } => "An internal error occurred".to_string(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ClientError::NotFound { .. } => "CLIENT_NOT_FOUND",
            ClientError::AccountNotFound { .. } => "ACCOUNT_NOT_FOUND",
            ClientError::DuplicateId { .. } => "CLIENT_ALREADY_EXISTS",
            ClientError::NegativeAmount => "NEGATIVE_AMOUNT",
            ClientError::InsufficientFunds => "INSUFFICIENT_FUNDS",
            ClientError::ReplaceConflict { .. } => "REPLACE_CONFLICT",
            ClientError::Internal { .. } => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl_into_response!(ClientError);

impl From<StoreError> for ClientError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ClientError::NotFound { id },
            StoreError::Duplicate(id) => ClientError::DuplicateId { id },
            StoreError::Conflict(id) => ClientError::ReplaceConflict { id },
            StoreError::Backend(err) => ClientError::internal(err.to_string()),
        }
    }
}

/// Convenience constructors for the common cases
impl ClientError {
    pub fn account_not_found<S: Into<String>>(name: S) -> Self {
        Self::AccountNotFound { name: name.into() }
    }

    pub fn replace_conflict<S: Into<String>>(id: S) -> Self {
        Self::ReplaceConflict { id: id.into() }
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
