use kavach_types::{KavachError, RequestStatus};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("request not found: {0}")]
    RequestNotFound(String),

    #[error("request {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: RequestStatus,
        to: RequestStatus,
    },

    #[error("request {id} is {status}, verification needs a granted request")]
    NotGranted { id: String, status: RequestStatus },

    #[error(transparent)]
    Validation(#[from] KavachError),

    #[error("storage error: {0}")]
    Storage(#[from] kavach_store::StoreError),
}
