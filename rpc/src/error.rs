//! API error types and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kavach_ledger::LedgerError;
use kavach_store::StoreError;
use kavach_verification::{PortalError, WorkflowError};
use kavach_wallet_core::WalletError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("{0}")]
    NotFound(String),

    /// Invalid status transition, wrong workflow step, or a request that is
    /// not granted.
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Invalid(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("server error: {0}")]
    Server(String),
}

impl RpcError {
    /// - NotFound: 404
    /// - Conflict: 409
    /// - Unauthorized: 401
    /// - Invalid: 422
    /// - Store, Server: 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Store(_) | Self::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<StoreError> for RpcError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(key) => RpcError::NotFound(format!("not found: {key}")),
            other => RpcError::Store(other.to_string()),
        }
    }
}

impl From<LedgerError> for RpcError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::RequestNotFound(_) => RpcError::NotFound(e.to_string()),
            LedgerError::InvalidTransition { .. } | LedgerError::NotGranted { .. } => {
                RpcError::Conflict(e.to_string())
            }
            LedgerError::Validation(_) => RpcError::Invalid(e.to_string()),
            LedgerError::Storage(inner) => inner.into(),
        }
    }
}

impl From<WalletError> for RpcError {
    fn from(e: WalletError) -> Self {
        match e {
            WalletError::NomineeNotFound(_) => RpcError::NotFound(e.to_string()),
            WalletError::Ledger(inner) => inner.into(),
            WalletError::Validation(_) => RpcError::Invalid(e.to_string()),
            WalletError::Storage(inner) => inner.into(),
        }
    }
}

impl From<WorkflowError> for RpcError {
    fn from(e: WorkflowError) -> Self {
        match e {
            WorkflowError::Ledger(inner) => inner.into(),
            WorkflowError::WrongStep { .. }
            | WorkflowError::Finished(_)
            | WorkflowError::NotGranted { .. } => RpcError::Conflict(e.to_string()),
        }
    }
}

impl From<PortalError> for RpcError {
    fn from(e: PortalError) -> Self {
        match e {
            PortalError::NotLoggedIn => RpcError::Unauthorized(e.to_string()),
            PortalError::ForeignRequest(_) => RpcError::NotFound(e.to_string()),
            PortalError::Workflow(inner) => inner.into(),
            PortalError::Ledger(inner) => inner.into(),
            PortalError::Validation(_) => RpcError::Invalid(e.to_string()),
            PortalError::Storage(inner) => inner.into(),
        }
    }
}
