//! Fundamental types for the Kavach identity wallet.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! identifiers, timestamps, lifecycle enums, the three persisted entities
//! (KYC requests, nominees, audit entries), and the clock/randomness seams
//! that let simulated behaviour be swapped for deterministic doubles.

pub mod audit;
pub mod error;
pub mod ids;
pub mod nominee;
pub mod random;
pub mod request;
pub mod sanitize;
pub mod state;
pub mod time;

pub use audit::AuditEntry;
pub use error::KavachError;
pub use ids::{AuditId, NomineeId, RequestId};
pub use nominee::Nominee;
pub use random::{RandomSource, ThreadRandom};
pub use request::KycRequest;
pub use state::{AuditStatus, NomineeSource, NomineeStatus, RequestStatus};
pub use time::{Clock, SystemClock, Timestamp};
