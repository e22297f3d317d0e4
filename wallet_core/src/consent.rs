//! Holder decisions on incoming KYC requests.

use kavach_ledger::{AuditLog, RequestBook};
use kavach_types::{AuditStatus, KycRequest, RequestId, RequestStatus};
use tracing::info;

use crate::WalletError;

/// Grants, denies and revokes requests, recording each decision in the
/// holder audit log.
#[derive(Clone)]
pub struct ConsentManager {
    book: RequestBook,
    audit: AuditLog,
}

impl ConsentManager {
    pub fn new(book: RequestBook, audit: AuditLog) -> Self {
        Self { book, audit }
    }

    /// Every request addressed to the holder, newest first.
    pub fn requests(&self) -> Result<Vec<KycRequest>, WalletError> {
        Ok(self.book.all()?)
    }

    /// Badge count for the dashboard.
    pub fn pending_count(&self) -> Result<usize, WalletError> {
        Ok(self.book.pending_count()?)
    }

    /// Share the requested fields with the seeker.
    pub fn grant(&self, id: &RequestId) -> Result<KycRequest, WalletError> {
        let request = self.book.transition(id, RequestStatus::Granted)?;
        self.audit.record(
            "KYC Data Shared",
            format!(
                "Shared {} with {} for {}",
                request.fields.join(", "),
                request.org,
                request.purpose
            ),
            AuditStatus::Success,
        )?;
        info!(id = %id, org = %request.org, "consent granted");
        Ok(request)
    }

    pub fn deny(&self, id: &RequestId) -> Result<KycRequest, WalletError> {
        let request = self.book.transition(id, RequestStatus::Denied)?;
        self.audit.record(
            "KYC Request Denied",
            format!("Declined request from {}", request.org),
            AuditStatus::Warning,
        )?;
        info!(id = %id, org = %request.org, "consent denied");
        Ok(request)
    }

    /// Withdraw an earlier grant.
    pub fn revoke(&self, id: &RequestId) -> Result<KycRequest, WalletError> {
        let request = self.book.transition(id, RequestStatus::Revoked)?;
        self.audit.record(
            "Consent Revoked",
            format!("Revoked access previously granted to {}", request.org),
            AuditStatus::Warning,
        )?;
        info!(id = %id, org = %request.org, "consent revoked");
        Ok(request)
    }
}
