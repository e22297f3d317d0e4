//! Well-known storage keys.
//!
//! These names are a shared contract between the holder screens and the bank
//! portal; renaming one orphans whatever is already stored under it.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Holder audit log, newest first.
    AuditLogs,
    /// Every KYC request, newest first.
    KycRequests,
    Nominees,
    /// Ids of documents pulled from DigiLocker.
    FetchedDocs,
    /// `"true"` while a video KYC is awaiting review.
    PendingKyc,
    IdentityVerified,
    BankOfficialLoggedIn,
    BankOrg,
    /// Bank portal audit log, newest first.
    BankAuditLogs,
}

impl StorageKey {
    pub const ALL: [StorageKey; 9] = [
        StorageKey::AuditLogs,
        StorageKey::KycRequests,
        StorageKey::Nominees,
        StorageKey::FetchedDocs,
        StorageKey::PendingKyc,
        StorageKey::IdentityVerified,
        StorageKey::BankOfficialLoggedIn,
        StorageKey::BankOrg,
        StorageKey::BankAuditLogs,
    ];

    /// Keys whose value is a JSON array. The rest hold plain strings.
    pub fn holds_list(&self) -> bool {
        matches!(
            self,
            Self::AuditLogs
                | Self::KycRequests
                | Self::Nominees
                | Self::FetchedDocs
                | Self::BankAuditLogs
        )
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuditLogs => "kavach_audit_logs",
            Self::KycRequests => "kavach_kyc_requests",
            Self::Nominees => "kavach_nominees",
            Self::FetchedDocs => "kavach_fetched_docs",
            Self::PendingKyc => "kavach_pending_kyc",
            Self::IdentityVerified => "kavach_identity_verified",
            Self::BankOfficialLoggedIn => "kavach_bank_official_logged_in",
            Self::BankOrg => "kavach_bank_org",
            Self::BankAuditLogs => "kavach_bank_audit_logs",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
