//! Mock bank officer session.
//!
//! Any non-empty officer id logs in. The session is two store keys: a
//! logged-in flag and the officer's organisation, stored as a plain string.

use kavach_ledger::{AuditLog, LedgerContext};
use kavach_store::{read_flag, write_flag, StorageKey};
use kavach_types::{AuditStatus, KavachError};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::PortalError;

/// The logged-in officer's organisation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub org: String,
}

#[derive(Clone)]
pub struct BankSession {
    ctx: LedgerContext,
    audit: AuditLog,
}

impl BankSession {
    pub fn new(ctx: LedgerContext, audit: AuditLog) -> Self {
        Self { ctx, audit }
    }

    pub fn login(&self, officer_id: &str, org: &str) -> Result<SessionInfo, PortalError> {
        let officer_id = officer_id.trim();
        if officer_id.is_empty() {
            return Err(KavachError::validation("officer_id", "must not be empty").into());
        }
        let org = org.trim();
        if org.is_empty() {
            return Err(KavachError::validation("org", "must not be empty").into());
        }

        let store = self.ctx.store();
        store.set(StorageKey::BankOrg.as_str(), org)?;
        write_flag(store, StorageKey::BankOfficialLoggedIn, true)?;
        self.audit.record(
            "Officer Login",
            format!("{officer_id} signed in for {org}"),
            AuditStatus::Success,
        )?;
        info!(org, "bank officer logged in");
        Ok(SessionInfo { org: org.to_string() })
    }

    /// End the session. Logging out twice is harmless.
    pub fn logout(&self) -> Result<(), PortalError> {
        let store = self.ctx.store();
        write_flag(store, StorageKey::BankOfficialLoggedIn, false)?;
        store.remove(StorageKey::BankOrg.as_str())?;
        info!("bank officer logged out");
        Ok(())
    }

    /// The active session, if the flag is set and an organisation is stored.
    pub fn current(&self) -> Result<Option<SessionInfo>, PortalError> {
        let store = self.ctx.store();
        if !read_flag(store, StorageKey::BankOfficialLoggedIn)? {
            return Ok(None);
        }
        match store.get(StorageKey::BankOrg.as_str())? {
            Some(org) if !org.trim().is_empty() => Ok(Some(SessionInfo { org })),
            _ => Ok(None),
        }
    }

    pub fn require(&self) -> Result<SessionInfo, PortalError> {
        self.current()?.ok_or(PortalError::NotLoggedIn)
    }
}
