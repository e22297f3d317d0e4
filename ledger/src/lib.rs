//! Shared records of the Kavach wallet.
//!
//! Two persisted collections are read and written by both the holder and the
//! bank portal:
//! - **Audit logs**: append-only, newest-first, capped lists of what happened.
//! - **The request book**: every KYC request and its lifecycle status.
//!
//! Both are whole-array read-modify-write over a [`KeyValueStore`]; there is
//! no optimistic concurrency check, so concurrent writers lose updates.
//!
//! [`KeyValueStore`]: kavach_store::KeyValueStore

pub mod audit;
pub mod context;
pub mod error;
pub mod requests;

pub use audit::{AuditLog, AUDIT_CAPACITY};
pub use context::LedgerContext;
pub use error::LedgerError;
pub use requests::{NewRequest, RequestBook};
