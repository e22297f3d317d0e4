//! Drives a workflow through its automatic steps with simulated latency.

use std::sync::Arc;

use kavach_ledger::AuditLog;
use kavach_types::{AuditEntry, RequestId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::checks::CheckService;
use crate::error::WorkflowError;
use crate::outcome::WorkflowOutcome;
use crate::step::WorkflowStep;
use crate::timings::WorkflowTimings;
use crate::workflow::{Progress, VerificationWorkflow};

/// What a finished run looked like.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowReport {
    pub request_id: RequestId,
    pub outcome: WorkflowOutcome,
    pub retryable: bool,
    pub steps_visited: Vec<WorkflowStep>,
    pub audit_entry: AuditEntry,
}

#[derive(Clone)]
pub struct WorkflowRunner {
    checks: Arc<dyn CheckService>,
    timings: WorkflowTimings,
    audit: AuditLog,
}

impl WorkflowRunner {
    pub fn new(checks: Arc<dyn CheckService>, timings: WorkflowTimings, audit: AuditLog) -> Self {
        Self {
            checks,
            timings,
            audit,
        }
    }

    pub fn timings(&self) -> &WorkflowTimings {
        &self.timings
    }

    /// Run every automatic step of `workflow` until it finishes, then write
    /// the single audit entry for its outcome.
    ///
    /// The workflow must already be past the consent summary.
    pub async fn drive(
        &self,
        mut workflow: VerificationWorkflow,
    ) -> Result<WorkflowReport, WorkflowError> {
        let outcome = loop {
            let delay = self.timings.delay_for(workflow.step());
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            match workflow.advance(self.checks.as_ref())? {
                Progress::Advanced(step) => debug!(request = %workflow.request().id, %step, "step passed"),
                Progress::Finished(outcome) => break outcome,
            }
        };

        let request = workflow.request();
        let entry = self.audit.record(
            outcome.audit_action(),
            format!("{} for {} ({})", outcome.describe(), request.org, request.id),
            outcome.severity(),
        )?;
        info!(
            request = %request.id,
            checks = self.checks.name(),
            %outcome,
            "verification run recorded"
        );

        Ok(WorkflowReport {
            request_id: request.id.clone(),
            outcome,
            retryable: outcome.is_retryable(),
            steps_visited: workflow.visited().to_vec(),
            audit_entry: entry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{CheckKind, CheckProfile, CheckVerdict, SimulatedChecks};
    use kavach_ledger::LedgerContext;
    use kavach_nullables::{NullClock, NullRandom, NullStore};
    use kavach_types::{AuditStatus, KycRequest, RequestStatus, Timestamp};
    use std::time::Duration;

    fn granted() -> KycRequest {
        KycRequest {
            id: RequestId::new("req_7"),
            org: "HDFC Bank".into(),
            purpose: "Home loan".into(),
            fields: vec!["name".into()],
            reason: String::new(),
            retention: String::new(),
            timestamp: Timestamp::EPOCH,
            status: RequestStatus::Granted,
            target_id: None,
        }
    }

    fn ready() -> VerificationWorkflow {
        let mut wf = VerificationWorkflow::start(granted()).unwrap();
        wf.prefill_mock().unwrap();
        wf.acknowledge_consent().unwrap();
        wf
    }

    fn audit() -> AuditLog {
        AuditLog::bank(LedgerContext::new(
            Arc::new(NullStore::new()),
            Arc::new(NullClock::default()),
            Arc::new(NullRandom::default()),
        ))
    }

    fn runner(draws: Vec<f64>, audit: AuditLog) -> WorkflowRunner {
        WorkflowRunner::new(
            Arc::new(SimulatedChecks::new(
                Arc::new(NullRandom::new(draws)),
                CheckProfile::default(),
            )),
            WorkflowTimings::instant(),
            audit,
        )
    }

    #[tokio::test]
    async fn success_writes_one_success_entry() {
        let log = audit();
        let report = runner(vec![0.99], log.clone()).drive(ready()).await.unwrap();
        assert_eq!(report.outcome, WorkflowOutcome::Success);
        assert_eq!(report.steps_visited.last(), Some(&WorkflowStep::Success));

        let entries = log.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, "Verification Successful");
        assert_eq!(entries[0].status, AuditStatus::Success);
        assert!(entries[0].details.contains("req_7"));
    }

    #[tokio::test]
    async fn each_failure_branch_has_its_severity() {
        let cases = [
            (vec![0.1], WorkflowOutcome::ReKycTtlExpired, AuditStatus::Warning),
            (vec![0.9, 0.1], WorkflowOutcome::ReKycHashMismatch, AuditStatus::Warning),
            (vec![0.9, 0.9, 0.1], WorkflowOutcome::ManualKyc, AuditStatus::Error),
        ];
        for (draws, expected, severity) in cases {
            let log = audit();
            let report = runner(draws, log.clone()).drive(ready()).await.unwrap();
            assert_eq!(report.outcome, expected);
            assert_eq!(report.retryable, expected.is_retryable());
            let entries = log.entries().unwrap();
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].status, severity);
        }
    }

    #[tokio::test]
    async fn refuses_a_workflow_still_at_the_collector() {
        let log = audit();
        let wf = VerificationWorkflow::start(granted()).unwrap();
        let err = runner(vec![0.9], log.clone()).drive(wf).await.unwrap_err();
        assert!(matches!(err, WorkflowError::WrongStep { .. }));
        assert!(log.entries().unwrap().is_empty());
    }

    struct FailingFaceMatch;

    impl CheckService for FailingFaceMatch {
        fn name(&self) -> &str {
            "failing-face-match"
        }

        fn run(&self, kind: CheckKind, _request: &KycRequest) -> CheckVerdict {
            if kind == CheckKind::FaceMatch {
                CheckVerdict::Fail
            } else {
                CheckVerdict::Pass
            }
        }
    }

    #[tokio::test]
    async fn injected_face_match_failure_is_manual_kyc() {
        let runner = WorkflowRunner::new(Arc::new(FailingFaceMatch), WorkflowTimings::instant(), audit());
        let report = runner.drive(ready()).await.unwrap();
        assert_eq!(report.outcome, WorkflowOutcome::ManualKyc);
        assert_eq!(report.steps_visited.last(), Some(&WorkflowStep::FaceMatch));
    }

    #[tokio::test(start_paused = true)]
    async fn sleeps_the_configured_delays() {
        let log = audit();
        let runner = WorkflowRunner::new(
            Arc::new(SimulatedChecks::new(
                Arc::new(NullRandom::always_pass()),
                CheckProfile::default(),
            )),
            WorkflowTimings::default(),
            log,
        );
        let started = tokio::time::Instant::now();
        runner.drive(ready()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(8500));
    }
}
