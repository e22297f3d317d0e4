use kavach_ledger::LedgerError;
use kavach_store::StoreError;
use kavach_types::{KavachError, RequestStatus};
use thiserror::Error;

use crate::outcome::WorkflowOutcome;
use crate::step::WorkflowStep;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("cannot {action} at step {step}")]
    WrongStep {
        action: &'static str,
        step: WorkflowStep,
    },

    #[error("workflow already finished: {0}")]
    Finished(WorkflowOutcome),

    #[error("request {id} is {status}, verification needs a granted request")]
    NotGranted { id: String, status: RequestStatus },

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("no bank officer is logged in")]
    NotLoggedIn,

    #[error("request {0} was not sent by this organisation")]
    ForeignRequest(String),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Validation(#[from] KavachError),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}
