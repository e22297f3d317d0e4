//! Workflow steps.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::checks::CheckKind;

/// One screen of the verification workflow, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
    /// Officer enters PAN, phone and date of birth.
    Collector,
    /// The fields the holder agreed to share.
    ConsentSummary,
    TtlCheck,
    FreshnessCheck,
    /// Attribute hashes compared against the anchored copy.
    ChainCheck,
    FaceMatch,
    /// VC → VP packaging.
    PresentationGeneration,
    Success,
}

impl WorkflowStep {
    pub const ALL: [WorkflowStep; 8] = [
        WorkflowStep::Collector,
        WorkflowStep::ConsentSummary,
        WorkflowStep::TtlCheck,
        WorkflowStep::FreshnessCheck,
        WorkflowStep::ChainCheck,
        WorkflowStep::FaceMatch,
        WorkflowStep::PresentationGeneration,
        WorkflowStep::Success,
    ];

    /// Position in the step counter, 0 through 7.
    pub fn index(&self) -> u8 {
        match self {
            Self::Collector => 0,
            Self::ConsentSummary => 1,
            Self::TtlCheck => 2,
            Self::FreshnessCheck => 3,
            Self::ChainCheck => 4,
            Self::FaceMatch => 5,
            Self::PresentationGeneration => 6,
            Self::Success => 7,
        }
    }

    pub fn next(&self) -> Option<WorkflowStep> {
        Self::ALL.get(self.index() as usize + 1).copied()
    }

    /// The check run at this step, for the steps that advance on their own.
    pub fn check(&self) -> Option<CheckKind> {
        match self {
            Self::TtlCheck => Some(CheckKind::Ttl),
            Self::FreshnessCheck => Some(CheckKind::Freshness),
            Self::ChainCheck => Some(CheckKind::ChainAnchor),
            Self::FaceMatch => Some(CheckKind::FaceMatch),
            Self::PresentationGeneration => Some(CheckKind::Presentation),
            Self::Collector | Self::ConsentSummary | Self::Success => None,
        }
    }

    pub fn is_automatic(&self) -> bool {
        self.check().is_some()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Collector => "collector",
            Self::ConsentSummary => "consent_summary",
            Self::TtlCheck => "ttl_check",
            Self::FreshnessCheck => "freshness_check",
            Self::ChainCheck => "chain_check",
            Self::FaceMatch => "face_match",
            Self::PresentationGeneration => "presentation_generation",
            Self::Success => "success",
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.index(), self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_declaration_order() {
        for (i, step) in WorkflowStep::ALL.iter().enumerate() {
            assert_eq!(step.index() as usize, i);
        }
        assert_eq!(WorkflowStep::Success.next(), None);
        assert_eq!(
            WorkflowStep::ChainCheck.next(),
            Some(WorkflowStep::FaceMatch)
        );
    }

    #[test]
    fn only_steps_two_to_six_are_automatic() {
        let automatic: Vec<u8> = WorkflowStep::ALL
            .iter()
            .filter(|s| s.is_automatic())
            .map(|s| s.index())
            .collect();
        assert_eq!(automatic, vec![2, 3, 4, 5, 6]);
    }
}
