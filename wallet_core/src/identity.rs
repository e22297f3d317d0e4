//! Identity verification flags.
//!
//! Two boolean strings: `kavach_pending_kyc` is set when a video KYC is
//! submitted, `kavach_identity_verified` once it clears. Missing or garbled
//! values read as `false`.

use kavach_ledger::{AuditLog, LedgerContext};
use kavach_store::{read_flag, write_flag, StorageKey};
use kavach_types::AuditStatus;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::WalletError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityStatus {
    pub pending_kyc: bool,
    pub identity_verified: bool,
}

#[derive(Clone)]
pub struct IdentityFlags {
    ctx: LedgerContext,
    audit: AuditLog,
}

impl IdentityFlags {
    pub fn new(ctx: LedgerContext, audit: AuditLog) -> Self {
        Self { ctx, audit }
    }

    pub fn status(&self) -> Result<IdentityStatus, WalletError> {
        let store = self.ctx.store();
        Ok(IdentityStatus {
            pending_kyc: read_flag(store, StorageKey::PendingKyc)?,
            identity_verified: read_flag(store, StorageKey::IdentityVerified)?,
        })
    }

    /// Record a submitted video KYC awaiting review. No-op once verified.
    pub fn mark_kyc_pending(&self) -> Result<IdentityStatus, WalletError> {
        let current = self.status()?;
        if current.identity_verified || current.pending_kyc {
            return Ok(current);
        }
        write_flag(self.ctx.store(), StorageKey::PendingKyc, true)?;
        self.audit.record(
            "VKYC Submitted",
            "Video KYC submitted for review",
            AuditStatus::Success,
        )?;
        info!("video KYC pending review");
        self.status()
    }

    /// Mark the identity verified and clear any pending KYC.
    pub fn mark_verified(&self) -> Result<IdentityStatus, WalletError> {
        let current = self.status()?;
        if current.identity_verified && !current.pending_kyc {
            return Ok(current);
        }
        let store = self.ctx.store();
        write_flag(store, StorageKey::IdentityVerified, true)?;
        write_flag(store, StorageKey::PendingKyc, false)?;
        self.audit.record(
            "Identity Verified",
            "Verifiable credential issued to wallet",
            AuditStatus::Success,
        )?;
        info!("identity verified");
        self.status()
    }
}
