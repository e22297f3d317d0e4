//! The verification workflow state machine.
//!
//! A step counter from 0 to 7. Steps 0 and 1 wait for the officer; steps 2–6
//! each run one check through a [`CheckService`] and either move on or end
//! the run. The machine itself never sleeps and never writes to storage; the
//! [`WorkflowRunner`](crate::WorkflowRunner) adds latency and the audit entry.

use kavach_types::KycRequest;
use tracing::info;

use crate::applicant::ApplicantDetails;
use crate::checks::{CheckKind, CheckService, CheckVerdict};
use crate::error::WorkflowError;
use crate::outcome::WorkflowOutcome;
use crate::step::WorkflowStep;

/// Events emitted by the workflow for observers to process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkflowEvent {
    StepEntered { step: WorkflowStep },
    CheckPassed { kind: CheckKind },
    CheckFailed { kind: CheckKind },
    /// Emitted exactly once per run.
    Finished { outcome: WorkflowOutcome },
}

/// Result of one automatic step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    Advanced(WorkflowStep),
    Finished(WorkflowOutcome),
}

/// One verification run against a granted request.
#[derive(Debug)]
pub struct VerificationWorkflow {
    request: KycRequest,
    step: WorkflowStep,
    applicant: Option<ApplicantDetails>,
    outcome: Option<WorkflowOutcome>,
    visited: Vec<WorkflowStep>,
    pending_events: Vec<WorkflowEvent>,
}

/// The outcome a failed check ends the run with.
fn failure_outcome(kind: CheckKind) -> WorkflowOutcome {
    match kind {
        CheckKind::Ttl => WorkflowOutcome::ReKycTtlExpired,
        CheckKind::Freshness => WorkflowOutcome::ReKycHashMismatch,
        CheckKind::ChainAnchor | CheckKind::FaceMatch | CheckKind::Presentation => {
            WorkflowOutcome::ManualKyc
        }
    }
}

impl VerificationWorkflow {
    /// Begin a run at the collector step. The request must be granted.
    pub fn start(request: KycRequest) -> Result<Self, WorkflowError> {
        if !request.status.allows_verification() {
            return Err(WorkflowError::NotGranted {
                id: request.id.to_string(),
                status: request.status,
            });
        }
        info!(request = %request.id, org = %request.org, "verification workflow started");
        Ok(Self {
            request,
            step: WorkflowStep::Collector,
            applicant: None,
            outcome: None,
            visited: vec![WorkflowStep::Collector],
            pending_events: vec![WorkflowEvent::StepEntered {
                step: WorkflowStep::Collector,
            }],
        })
    }

    pub fn request(&self) -> &KycRequest {
        &self.request
    }

    pub fn step(&self) -> WorkflowStep {
        self.step
    }

    pub fn outcome(&self) -> Option<WorkflowOutcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// The fields shown on the consent summary.
    pub fn consented_fields(&self) -> &[String] {
        &self.request.fields
    }

    /// Every step entered so far, in order.
    pub fn visited(&self) -> &[WorkflowStep] {
        &self.visited
    }

    /// Step 0: take the officer's input, stripped of formatting.
    pub fn submit_applicant(
        &mut self,
        details: &ApplicantDetails,
    ) -> Result<&ApplicantDetails, WorkflowError> {
        self.expect_step(WorkflowStep::Collector, "submit applicant details")?;
        let clean = details.sanitized();
        info!(request = %self.request.id, pan = %clean.masked_pan(), "applicant details collected");
        self.enter(WorkflowStep::ConsentSummary);
        Ok(self.applicant.insert(clean))
    }

    /// Step 0 shortcut: fill in the demo values.
    pub fn prefill_mock(&mut self) -> Result<&ApplicantDetails, WorkflowError> {
        self.submit_applicant(&ApplicantDetails::mock())
    }

    /// Step 1: the officer has reviewed the consented fields.
    pub fn acknowledge_consent(&mut self) -> Result<WorkflowStep, WorkflowError> {
        self.expect_step(WorkflowStep::ConsentSummary, "acknowledge consent")?;
        self.enter(WorkflowStep::TtlCheck);
        Ok(self.step)
    }

    /// Steps 2–6: run the current step's check and move on or finish.
    pub fn advance(&mut self, checks: &dyn CheckService) -> Result<Progress, WorkflowError> {
        self.ensure_active()?;
        let kind = self.step.check().ok_or(WorkflowError::WrongStep {
            action: "run a check",
            step: self.step,
        })?;

        match checks.run(kind, &self.request) {
            CheckVerdict::Pass => {
                self.pending_events.push(WorkflowEvent::CheckPassed { kind });
                let next = self.step.next().unwrap_or(WorkflowStep::Success);
                self.enter(next);
                if next == WorkflowStep::Success {
                    self.finish(WorkflowOutcome::Success);
                    Ok(Progress::Finished(WorkflowOutcome::Success))
                } else {
                    Ok(Progress::Advanced(next))
                }
            }
            CheckVerdict::Fail => {
                self.pending_events.push(WorkflowEvent::CheckFailed { kind });
                let outcome = failure_outcome(kind);
                self.finish(outcome);
                Ok(Progress::Finished(outcome))
            }
        }
    }

    /// Take all pending events, leaving the buffer empty.
    pub fn drain_events(&mut self) -> Vec<WorkflowEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn ensure_active(&self) -> Result<(), WorkflowError> {
        match self.outcome {
            Some(outcome) => Err(WorkflowError::Finished(outcome)),
            None => Ok(()),
        }
    }

    fn expect_step(&self, expected: WorkflowStep, action: &'static str) -> Result<(), WorkflowError> {
        self.ensure_active()?;
        if self.step != expected {
            return Err(WorkflowError::WrongStep {
                action,
                step: self.step,
            });
        }
        Ok(())
    }

    fn enter(&mut self, step: WorkflowStep) {
        self.step = step;
        self.visited.push(step);
        self.pending_events.push(WorkflowEvent::StepEntered { step });
    }

    fn finish(&mut self, outcome: WorkflowOutcome) {
        self.outcome = Some(outcome);
        self.pending_events.push(WorkflowEvent::Finished { outcome });
        info!(
            request = %self.request.id,
            step = %self.step,
            %outcome,
            "verification workflow finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{CheckProfile, SimulatedChecks};
    use kavach_nullables::NullRandom;
    use kavach_types::{RequestId, RequestStatus, Timestamp};
    use std::sync::Arc;

    fn request(status: RequestStatus) -> KycRequest {
        KycRequest {
            id: RequestId::new("req_1"),
            org: "HDFC Bank".into(),
            purpose: "Savings account".into(),
            fields: vec!["name".into(), "dob".into(), "address".into()],
            reason: String::new(),
            retention: "30 days".into(),
            timestamp: Timestamp::EPOCH,
            status,
            target_id: None,
        }
    }

    fn checks(draws: Vec<f64>) -> SimulatedChecks {
        SimulatedChecks::new(Arc::new(NullRandom::new(draws)), CheckProfile::default())
    }

    fn ready(status: RequestStatus) -> VerificationWorkflow {
        let mut wf = VerificationWorkflow::start(request(status)).unwrap();
        wf.prefill_mock().unwrap();
        wf.acknowledge_consent().unwrap();
        wf
    }

    fn drive(wf: &mut VerificationWorkflow, checks: &dyn CheckService) -> WorkflowOutcome {
        loop {
            if let Progress::Finished(outcome) = wf.advance(checks).unwrap() {
                return outcome;
            }
        }
    }

    #[test]
    fn start_requires_grant() {
        for status in [RequestStatus::Pending, RequestStatus::Denied, RequestStatus::Revoked] {
            assert!(matches!(
                VerificationWorkflow::start(request(status)),
                Err(WorkflowError::NotGranted { .. })
            ));
        }
    }

    #[test]
    fn all_checks_pass_reaches_success() {
        let mut wf = ready(RequestStatus::Granted);
        let outcome = drive(&mut wf, &checks(vec![0.99]));
        assert_eq!(outcome, WorkflowOutcome::Success);
        assert_eq!(wf.step(), WorkflowStep::Success);
        assert_eq!(
            wf.visited().iter().map(|s| s.index()).collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4, 5, 6, 7]
        );
    }

    #[test]
    fn ttl_failure_stops_at_step_two() {
        let mut wf = ready(RequestStatus::Granted);
        let outcome = drive(&mut wf, &checks(vec![0.05]));
        assert_eq!(outcome, WorkflowOutcome::ReKycTtlExpired);
        assert_eq!(wf.step(), WorkflowStep::TtlCheck);
    }

    #[test]
    fn freshness_failure_stops_at_step_three() {
        let mut wf = ready(RequestStatus::Granted);
        let outcome = drive(&mut wf, &checks(vec![0.9, 0.1]));
        assert_eq!(outcome, WorkflowOutcome::ReKycHashMismatch);
        assert_eq!(wf.step(), WorkflowStep::FreshnessCheck);
    }

    #[test]
    fn chain_failure_routes_to_manual_kyc() {
        let mut wf = ready(RequestStatus::Granted);
        let outcome = drive(&mut wf, &checks(vec![0.9, 0.9, 0.1]));
        assert_eq!(outcome, WorkflowOutcome::ManualKyc);
        assert_eq!(wf.step(), WorkflowStep::ChainCheck);
        assert!(!outcome.is_retryable());
    }

    #[test]
    fn operations_out_of_order_are_rejected() {
        let mut wf = VerificationWorkflow::start(request(RequestStatus::Granted)).unwrap();
        assert!(matches!(
            wf.acknowledge_consent(),
            Err(WorkflowError::WrongStep { step: WorkflowStep::Collector, .. })
        ));
        assert!(matches!(
            wf.advance(&checks(vec![0.9])),
            Err(WorkflowError::WrongStep { .. })
        ));
        wf.prefill_mock().unwrap();
        assert!(wf.prefill_mock().is_err());
    }

    #[test]
    fn finished_workflow_refuses_further_steps() {
        let mut wf = ready(RequestStatus::Granted);
        drive(&mut wf, &checks(vec![0.0]));
        assert!(matches!(
            wf.advance(&checks(vec![0.9])),
            Err(WorkflowError::Finished(WorkflowOutcome::ReKycTtlExpired))
        ));
    }

    #[test]
    fn emits_exactly_one_finished_event() {
        let mut wf = ready(RequestStatus::Granted);
        drive(&mut wf, &checks(vec![0.99]));
        let events = wf.drain_events();
        let finished = events
            .iter()
            .filter(|e| matches!(e, WorkflowEvent::Finished { .. }))
            .count();
        assert_eq!(finished, 1);
        assert!(wf.drain_events().is_empty());
    }

    #[test]
    fn collector_strips_formatting() {
        let mut wf = VerificationWorkflow::start(request(RequestStatus::Granted)).unwrap();
        let details = ApplicantDetails {
            pan: "abcde 1234 f".into(),
            phone: "98765-43210".into(),
            dob: "1990-01-01".into(),
        };
        let stored = wf.submit_applicant(&details).unwrap().clone();
        assert_eq!(stored.pan, "ABCDE1234F");
        assert_eq!(stored.phone, "9876543210");
        assert_eq!(wf.step(), WorkflowStep::ConsentSummary);
        assert_eq!(wf.consented_fields().len(), 3);
    }
}
