//! Terminal outcomes of a verification run.

use kavach_types::AuditStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a verification run ended. Exactly one per run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowOutcome {
    /// Presentation shared with the bank.
    Success,
    /// Re-KYC: the disclosure's TTL has lapsed.
    #[serde(rename = "rekyc_ttl")]
    ReKycTtlExpired,
    /// Re-KYC: the source documents changed since issuance.
    #[serde(rename = "rekyc_freshness")]
    ReKycHashMismatch,
    /// Attributes could not be matched; the applicant must visit a branch.
    ManualKyc,
}

impl WorkflowOutcome {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::ReKycTtlExpired => "rekyc_ttl",
            Self::ReKycHashMismatch => "rekyc_freshness",
            Self::ManualKyc => "manual_kyc",
        }
    }

    /// Severity tag written to the audit log.
    pub fn severity(&self) -> AuditStatus {
        match self {
            Self::Success => AuditStatus::Success,
            Self::ReKycTtlExpired | Self::ReKycHashMismatch => AuditStatus::Warning,
            Self::ManualKyc => AuditStatus::Error,
        }
    }

    /// Whether the officer is invited to start a fresh run.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ReKycTtlExpired | Self::ReKycHashMismatch)
    }

    pub fn audit_action(&self) -> &'static str {
        match self {
            Self::Success => "Verification Successful",
            Self::ReKycTtlExpired | Self::ReKycHashMismatch => "Re-KYC Required",
            Self::ManualKyc => "Manual KYC Required",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::Success => "verifiable presentation shared",
            Self::ReKycTtlExpired => "Re-KYC: TTL expired",
            Self::ReKycHashMismatch => "Re-KYC: hash mismatch",
            Self::ManualKyc => "attribute hash does not match the anchored record, manual KYC needed",
        }
    }
}

impl fmt::Display for WorkflowOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
