//! The bank portal: everything a seeker can do.

use std::sync::Arc;
use std::time::Duration;

use kavach_ledger::{AuditLog, LedgerContext, NewRequest, RequestBook, AUDIT_CAPACITY};
use kavach_types::{AuditEntry, AuditStatus, KycRequest, RequestId};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

use crate::applicant::ApplicantDetails;
use crate::checks::{CheckProfile, CheckService, SimulatedChecks};
use crate::error::PortalError;
use crate::poller::{SentRequestPoller, DEFAULT_POLL_INTERVAL};
use crate::runner::{WorkflowReport, WorkflowRunner};
use crate::session::{BankSession, SessionInfo};
use crate::timings::WorkflowTimings;
use crate::workflow::VerificationWorkflow;

/// A request as the officer fills it in. The organisation comes from the
/// session.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SendRequest {
    pub purpose: String,
    pub fields: Vec<String>,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub retention: String,
    #[serde(rename = "targetId", default)]
    pub target_id: Option<String>,
}

#[derive(Clone, Debug)]
pub struct PortalConfig {
    pub timings: WorkflowTimings,
    pub checks: CheckProfile,
    pub audit_capacity: usize,
    pub poll_interval: Duration,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            timings: WorkflowTimings::default(),
            checks: CheckProfile::default(),
            audit_capacity: AUDIT_CAPACITY,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

#[derive(Clone)]
pub struct BankPortal {
    session: BankSession,
    book: RequestBook,
    audit: AuditLog,
    runner: WorkflowRunner,
    poll_interval: Duration,
}

impl BankPortal {
    /// A portal whose checks draw from the context's random source.
    pub fn new(ctx: LedgerContext, config: &PortalConfig) -> Self {
        let checks = Arc::new(SimulatedChecks::new(ctx.random.clone(), config.checks));
        Self::with_checks(ctx, checks, config)
    }

    pub fn with_checks(
        ctx: LedgerContext,
        checks: Arc<dyn CheckService>,
        config: &PortalConfig,
    ) -> Self {
        let audit = AuditLog::bank(ctx.clone()).with_capacity(config.audit_capacity);
        Self {
            session: BankSession::new(ctx.clone(), audit.clone()),
            book: RequestBook::new(ctx),
            runner: WorkflowRunner::new(checks, config.timings, audit.clone()),
            audit,
            poll_interval: config.poll_interval,
        }
    }

    pub fn login(&self, officer_id: &str, org: &str) -> Result<SessionInfo, PortalError> {
        self.session.login(officer_id, org)
    }

    pub fn logout(&self) -> Result<(), PortalError> {
        self.session.logout()
    }

    pub fn session(&self) -> Result<Option<SessionInfo>, PortalError> {
        self.session.current()
    }

    /// Create a pending request on behalf of the session's organisation.
    pub fn send_request(&self, request: SendRequest) -> Result<KycRequest, PortalError> {
        let session = self.session.require()?;
        let created = self.book.create(NewRequest {
            org: session.org,
            purpose: request.purpose,
            fields: request.fields,
            reason: request.reason,
            retention: request.retention,
            target_id: request.target_id,
        })?;
        self.audit.record(
            "KYC Request Sent",
            format!("{} requested for {}", created.fields.join(", "), created.purpose),
            AuditStatus::Success,
        )?;
        Ok(created)
    }

    /// Requests sent by the session's organisation, newest first.
    pub fn sent_requests(&self) -> Result<Vec<KycRequest>, PortalError> {
        let session = self.session.require()?;
        Ok(self.book.sent_by(&session.org)?)
    }

    /// Watch the sent list, re-read every poll interval.
    pub fn watch_sent_requests(
        &self,
    ) -> Result<(watch::Receiver<Vec<KycRequest>>, JoinHandle<()>), PortalError> {
        let session = self.session.require()?;
        Ok(SentRequestPoller::new(self.book.clone(), session.org, self.poll_interval).spawn())
    }

    /// Open a workflow for one of this organisation's granted requests.
    pub fn start_verification(&self, id: &RequestId) -> Result<VerificationWorkflow, PortalError> {
        let session = self.session.require()?;
        let request = self.book.get(id)?;
        if request.org != session.org {
            return Err(PortalError::ForeignRequest(id.to_string()));
        }
        Ok(VerificationWorkflow::start(request)?)
    }

    /// Run a whole verification: collect details (or the demo values),
    /// acknowledge consent, then drive every automatic step.
    pub async fn verify(
        &self,
        id: &RequestId,
        applicant: Option<ApplicantDetails>,
    ) -> Result<WorkflowReport, PortalError> {
        let mut workflow = self.start_verification(id)?;
        match applicant {
            Some(details) => workflow.submit_applicant(&details)?,
            None => workflow.prefill_mock()?,
        };
        workflow.acknowledge_consent()?;
        let report = self.runner.drive(workflow).await?;
        info!(request = %id, outcome = %report.outcome, "verification finished");
        Ok(report)
    }

    pub fn runner(&self) -> &WorkflowRunner {
        &self.runner
    }

    /// The bank audit log, newest first.
    pub fn audit_log(&self) -> Result<Vec<AuditEntry>, PortalError> {
        Ok(self.audit.entries()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kavach_nullables::{NullClock, NullRandom, NullStore};
    use kavach_types::RequestStatus;

    fn portal() -> (BankPortal, RequestBook) {
        let ctx = LedgerContext::new(
            Arc::new(NullStore::new()),
            Arc::new(NullClock::default()),
            Arc::new(NullRandom::always_pass()),
        );
        let config = PortalConfig {
            timings: WorkflowTimings::instant(),
            ..Default::default()
        };
        (BankPortal::new(ctx.clone(), &config), RequestBook::new(ctx))
    }

    fn kyc() -> SendRequest {
        SendRequest {
            purpose: "Savings account".into(),
            fields: vec!["name".into(), "address".into()],
            retention: "30 days".into(),
            ..Default::default()
        }
    }

    #[test]
    fn sending_requires_a_session() {
        let (portal, _) = portal();
        assert!(matches!(portal.send_request(kyc()), Err(PortalError::NotLoggedIn)));
        assert!(matches!(portal.sent_requests(), Err(PortalError::NotLoggedIn)));
    }

    #[test]
    fn send_uses_session_org_and_audits() {
        let (portal, _) = portal();
        portal.login("officer-1", "HDFC Bank").unwrap();
        let sent = portal.send_request(kyc()).unwrap();
        assert_eq!(sent.org, "HDFC Bank");
        assert_eq!(sent.status, RequestStatus::Pending);
        assert_eq!(portal.sent_requests().unwrap(), vec![sent]);

        let log = portal.audit_log().unwrap();
        assert_eq!(log[0].action, "KYC Request Sent");
        assert_eq!(log[1].action, "Officer Login");
    }

    #[tokio::test]
    async fn pending_request_cannot_be_verified() {
        let (portal, _) = portal();
        portal.login("officer-1", "HDFC Bank").unwrap();
        let sent = portal.send_request(kyc()).unwrap();
        let err = portal.verify(&sent.id, None).await.unwrap_err();
        assert!(matches!(
            err,
            PortalError::Workflow(crate::WorkflowError::NotGranted { .. })
        ));
    }

    #[tokio::test]
    async fn granted_request_verifies() {
        let (portal, book) = portal();
        portal.login("officer-1", "HDFC Bank").unwrap();
        let sent = portal.send_request(kyc()).unwrap();
        book.transition(&sent.id, RequestStatus::Granted).unwrap();

        let report = portal.verify(&sent.id, None).await.unwrap();
        assert_eq!(report.outcome, crate::WorkflowOutcome::Success);
        assert_eq!(portal.audit_log().unwrap()[0].action, "Verification Successful");
    }

    #[test]
    fn other_orgs_requests_are_off_limits() {
        let (portal, book) = portal();
        let foreign = book
            .create(NewRequest {
                org: "ICICI Bank".into(),
                purpose: "Loan".into(),
                fields: vec!["name".into()],
                ..Default::default()
            })
            .unwrap();
        book.transition(&foreign.id, RequestStatus::Granted).unwrap();
        portal.login("officer-1", "HDFC Bank").unwrap();
        assert!(matches!(
            portal.start_verification(&foreign.id),
            Err(PortalError::ForeignRequest(_))
        ));
    }
}
