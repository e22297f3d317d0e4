//! Documents fetched from DigiLocker.
//!
//! Only the document ids are kept; the documents themselves are never stored.

use kavach_ledger::{AuditLog, LedgerContext};
use kavach_store::{read_list_or, JsonList, StorageKey};
use kavach_types::{AuditStatus, KavachError};
use tracing::info;

use crate::WalletError;

#[derive(Clone)]
pub struct DocumentVault {
    ctx: LedgerContext,
    audit: AuditLog,
}

impl DocumentVault {
    pub fn new(ctx: LedgerContext, audit: AuditLog) -> Self {
        Self { ctx, audit }
    }

    /// Fetched document ids in fetch order.
    pub fn list(&self) -> Result<Vec<String>, WalletError> {
        Ok(read_list_or(
            self.ctx.store(),
            StorageKey::FetchedDocs,
            Vec::new,
        )?)
    }

    pub fn is_fetched(&self, doc_id: &str) -> Result<bool, WalletError> {
        Ok(self.list()?.iter().any(|d| d == doc_id))
    }

    /// Record a fetched document. Returns `false` if it was already on file.
    pub fn record(&self, doc_id: &str) -> Result<bool, WalletError> {
        let doc_id = doc_id.trim();
        if doc_id.is_empty() {
            return Err(KavachError::validation("doc_id", "must not be empty").into());
        }

        let mut docs: JsonList<String> =
            JsonList::load(self.ctx.store(), StorageKey::FetchedDocs, Vec::new)?;
        if docs.iter().any(|d| d == doc_id) {
            return Ok(false);
        }
        docs.push(doc_id.to_string());
        docs.save(self.ctx.store())?;

        self.audit.record(
            "Document Fetched",
            format!("{doc_id} fetched from DigiLocker"),
            AuditStatus::Success,
        )?;
        info!(doc_id, "document fetched");
        Ok(true)
    }
}
