//! Bank-side KYC verification.
//!
//! A bank officer logs into the portal, sends a KYC request to a holder, and
//! polls the sent list until the holder decides. Once a request is granted
//! the officer runs the verification workflow: a linear step machine
//!
//! 0. collect applicant details
//! 1. review the consented fields
//! 2. TTL check
//! 3. document freshness check
//! 4. attribute hash vs. chain check
//! 5. face match
//! 6. presentation (VC → VP) generation
//! 7. success
//!
//! Steps 2–6 call out to a pluggable [`CheckService`]. The bundled
//! [`SimulatedChecks`] decides by random draw and never looks at the entered
//! data; nothing here is real KYC logic.

pub mod applicant;
pub mod checks;
pub mod error;
pub mod outcome;
pub mod poller;
pub mod portal;
pub mod runner;
pub mod session;
pub mod step;
pub mod timings;
pub mod workflow;

pub use applicant::ApplicantDetails;
pub use checks::{CheckKind, CheckProfile, CheckService, CheckVerdict, SimulatedChecks};
pub use error::{PortalError, WorkflowError};
pub use outcome::WorkflowOutcome;
pub use poller::{SentRequestPoller, DEFAULT_POLL_INTERVAL, MIN_POLL_INTERVAL};
pub use portal::{BankPortal, PortalConfig, SendRequest};
pub use runner::{WorkflowReport, WorkflowRunner};
pub use session::{BankSession, SessionInfo};
pub use step::WorkflowStep;
pub use timings::WorkflowTimings;
pub use workflow::{Progress, VerificationWorkflow, WorkflowEvent};
