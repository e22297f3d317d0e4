//! Simulated latency per workflow step.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::step::WorkflowStep;

/// How long each automatic step pretends to work before resolving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowTimings {
    #[serde(default = "default_check_ms")]
    pub ttl_check_ms: u64,
    #[serde(default = "default_check_ms")]
    pub freshness_check_ms: u64,
    #[serde(default = "default_check_ms")]
    pub chain_check_ms: u64,
    #[serde(default = "default_animation_ms")]
    pub face_match_ms: u64,
    #[serde(default = "default_animation_ms")]
    pub presentation_ms: u64,
}

fn default_check_ms() -> u64 {
    1500
}

fn default_animation_ms() -> u64 {
    2000
}

impl Default for WorkflowTimings {
    fn default() -> Self {
        Self {
            ttl_check_ms: default_check_ms(),
            freshness_check_ms: default_check_ms(),
            chain_check_ms: default_check_ms(),
            face_match_ms: default_animation_ms(),
            presentation_ms: default_animation_ms(),
        }
    }
}

impl WorkflowTimings {
    /// No latency at all, for tests.
    pub fn instant() -> Self {
        Self {
            ttl_check_ms: 0,
            freshness_check_ms: 0,
            chain_check_ms: 0,
            face_match_ms: 0,
            presentation_ms: 0,
        }
    }

    pub fn delay_for(&self, step: WorkflowStep) -> Duration {
        let ms = match step {
            WorkflowStep::TtlCheck => self.ttl_check_ms,
            WorkflowStep::FreshnessCheck => self.freshness_check_ms,
            WorkflowStep::ChainCheck => self.chain_check_ms,
            WorkflowStep::FaceMatch => self.face_match_ms,
            WorkflowStep::PresentationGeneration => self.presentation_ms,
            WorkflowStep::Collector | WorkflowStep::ConsentSummary | WorkflowStep::Success => 0,
        };
        Duration::from_millis(ms)
    }

    /// Total simulated latency of a run that reaches success.
    pub fn full_run(&self) -> Duration {
        WorkflowStep::ALL.iter().map(|s| self.delay_for(*s)).sum()
    }
}
