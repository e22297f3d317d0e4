//! The holder's wallet: every holder-side component over one shared store.

use std::time::Duration;

use kavach_ledger::{AuditLog, LedgerContext, RequestBook, AUDIT_CAPACITY};
use kavach_types::AuditEntry;
use serde::{Deserialize, Serialize};

use crate::reauth::DEFAULT_REAUTH_DELAY;
use crate::{
    ConsentManager, DocumentVault, IdentityFlags, NomineeRegistry, Reauthenticator, WalletError,
};

/// Number of audit entries shown on the dashboard.
const RECENT_ACTIVITY: usize = 5;

#[derive(Clone, Debug)]
pub struct WalletConfig {
    pub reauth_delay: Duration,
    pub audit_capacity: usize,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            reauth_delay: DEFAULT_REAUTH_DELAY,
            audit_capacity: AUDIT_CAPACITY,
        }
    }
}

/// What the dashboard shows at a glance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub pending_requests: usize,
    pub pending_kyc: bool,
    pub identity_verified: bool,
    pub fetched_documents: usize,
    pub nominees: usize,
    pub recent_activity: Vec<AuditEntry>,
}

#[derive(Clone)]
pub struct Wallet {
    pub consent: ConsentManager,
    pub nominees: NomineeRegistry,
    pub identity: IdentityFlags,
    pub documents: DocumentVault,
    pub reauth: Reauthenticator,
    audit: AuditLog,
}

impl Wallet {
    pub fn new(ctx: LedgerContext) -> Self {
        Self::with_config(ctx, &WalletConfig::default())
    }

    pub fn with_config(ctx: LedgerContext, config: &WalletConfig) -> Self {
        let audit = AuditLog::holder(ctx.clone()).with_capacity(config.audit_capacity);
        Self {
            consent: ConsentManager::new(RequestBook::new(ctx.clone()), audit.clone()),
            nominees: NomineeRegistry::new(ctx.clone(), audit.clone()),
            identity: IdentityFlags::new(ctx.clone(), audit.clone()),
            documents: DocumentVault::new(ctx.clone(), audit.clone()),
            reauth: Reauthenticator::new(config.reauth_delay, ctx.clock.clone()),
            audit,
        }
    }

    /// The holder audit log, newest first.
    pub fn audit_log(&self) -> Result<Vec<AuditEntry>, WalletError> {
        Ok(self.audit.entries()?)
    }

    pub fn dashboard(&self) -> Result<DashboardSummary, WalletError> {
        let identity = self.identity.status()?;
        let mut recent_activity = self.audit_log()?;
        recent_activity.truncate(RECENT_ACTIVITY);
        Ok(DashboardSummary {
            pending_requests: self.consent.pending_count()?,
            pending_kyc: identity.pending_kyc,
            identity_verified: identity.identity_verified,
            fetched_documents: self.documents.list()?.len(),
            nominees: self.nominees.list()?.len(),
            recent_activity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kavach_nullables::{NullClock, NullRandom, NullStore};
    use std::sync::Arc;

    #[test]
    fn dashboard_reflects_store() {
        let store = Arc::new(NullStore::with_entries([(
            "kavach_kyc_requests",
            r#"[{"id":"req_1","status":"pending"},{"id":"req_2","status":"granted"}]"#,
        )]));
        let wallet = Wallet::new(LedgerContext::new(
            store,
            Arc::new(NullClock::default()),
            Arc::new(NullRandom::default()),
        ));
        wallet.documents.record("aadhaar").unwrap();
        wallet.identity.mark_verified().unwrap();

        let summary = wallet.dashboard().unwrap();
        assert_eq!(summary.pending_requests, 1);
        assert!(summary.identity_verified);
        assert_eq!(summary.fetched_documents, 1);
        assert_eq!(summary.nominees, 2);
        assert_eq!(summary.recent_activity.len(), 2);
    }

    #[test]
    fn audit_capacity_is_configurable() {
        let wallet = Wallet::with_config(
            LedgerContext::new(
                Arc::new(NullStore::new()),
                Arc::new(NullClock::default()),
                Arc::new(NullRandom::default()),
            ),
            &WalletConfig {
                reauth_delay: Duration::ZERO,
                audit_capacity: 3,
            },
        );
        for doc in ["a", "b", "c", "d", "e"] {
            wallet.documents.record(doc).unwrap();
        }
        assert_eq!(wallet.audit_log().unwrap().len(), 3);
    }
}
