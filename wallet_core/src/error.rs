use kavach_ledger::LedgerError;
use kavach_store::StoreError;
use kavach_types::KavachError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("nominee not found: {0}")]
    NomineeNotFound(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Validation(#[from] KavachError),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}
