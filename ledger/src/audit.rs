//! Append-only audit logs.
//!
//! Entries are stored newest-first. Once the list reaches its capacity the
//! oldest entries are dropped on the next append.

use kavach_store::{read_list_or, JsonList, StorageKey};
use kavach_types::{AuditEntry, AuditId, AuditStatus};
use tracing::info;

use crate::{LedgerContext, LedgerError};

/// Maximum number of entries kept in any audit log.
pub const AUDIT_CAPACITY: usize = 50;

/// An audit log persisted under one storage key.
#[derive(Clone)]
pub struct AuditLog {
    ctx: LedgerContext,
    key: StorageKey,
    capacity: usize,
}

impl AuditLog {
    pub fn new(ctx: LedgerContext, key: StorageKey) -> Self {
        Self {
            ctx,
            key,
            capacity: AUDIT_CAPACITY,
        }
    }

    /// The holder's log (`kavach_audit_logs`).
    pub fn holder(ctx: LedgerContext) -> Self {
        Self::new(ctx, StorageKey::AuditLogs)
    }

    /// The bank portal's log (`kavach_bank_audit_logs`).
    pub fn bank(ctx: LedgerContext) -> Self {
        Self::new(ctx, StorageKey::BankAuditLogs)
    }

    /// Override the capacity. A capacity of zero is treated as one.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    pub fn key(&self) -> StorageKey {
        self.key
    }

    /// Append an entry at the head of the log and persist it.
    pub fn record(
        &self,
        action: &str,
        details: impl Into<String>,
        status: AuditStatus,
    ) -> Result<AuditEntry, LedgerError> {
        let entry = AuditEntry {
            id: AuditId::generate(self.ctx.random.as_ref()),
            action: action.to_string(),
            details: details.into(),
            time: self.ctx.clock.now(),
            status,
        };

        let mut entries = JsonList::load(self.ctx.store(), self.key, Vec::new)?;
        entries.push_front(entry.clone());
        entries.truncate(self.capacity);
        entries.save(self.ctx.store())?;

        info!(log = self.key.as_str(), action, %status, "audit entry recorded");
        Ok(entry)
    }

    /// All entries, newest first. A missing or malformed log reads as empty.
    pub fn entries(&self) -> Result<Vec<AuditEntry>, LedgerError> {
        Ok(read_list_or(self.ctx.store(), self.key, Vec::new)?)
    }

    pub fn latest(&self) -> Result<Option<AuditEntry>, LedgerError> {
        Ok(self.entries()?.into_iter().next())
    }
}
