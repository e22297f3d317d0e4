//! Pluggable verification checks.
//!
//! The workflow only knows *that* each check passed or failed, not *how*.
//! [`SimulatedChecks`] is the stand-in until a real backend exists: it draws
//! a random number per check and never inspects the request.

use std::fmt;
use std::sync::Arc;

use kavach_types::{KycRequest, RandomSource};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The checks run by the automatic workflow steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Has the disclosure outlived its time-to-live?
    Ttl,
    /// Do the source documents still hash to what was issued?
    Freshness,
    /// Do the attribute hashes match the anchored record?
    ChainAnchor,
    FaceMatch,
    /// Can the credentials be packaged into a presentation?
    Presentation,
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ttl => "ttl",
            Self::Freshness => "freshness",
            Self::ChainAnchor => "chain_anchor",
            Self::FaceMatch => "face_match",
            Self::Presentation => "presentation",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckVerdict {
    Pass,
    Fail,
}

/// A backend that performs verification checks.
pub trait CheckService: Send + Sync {
    /// Human-readable name of this service.
    fn name(&self) -> &str;

    fn run(&self, kind: CheckKind, request: &KycRequest) -> CheckVerdict;
}

/// Failure probabilities for the simulated checks.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckProfile {
    #[serde(default = "default_ttl_failure_rate")]
    pub ttl_failure_rate: f64,
    #[serde(default = "default_freshness_failure_rate")]
    pub freshness_failure_rate: f64,
    #[serde(default = "default_chain_failure_rate")]
    pub chain_failure_rate: f64,
}

fn default_ttl_failure_rate() -> f64 {
    0.20
}

fn default_freshness_failure_rate() -> f64 {
    0.20
}

fn default_chain_failure_rate() -> f64 {
    0.15
}

impl Default for CheckProfile {
    fn default() -> Self {
        Self {
            ttl_failure_rate: default_ttl_failure_rate(),
            freshness_failure_rate: default_freshness_failure_rate(),
            chain_failure_rate: default_chain_failure_rate(),
        }
    }
}

impl CheckProfile {
    /// A profile in which nothing ever fails.
    pub fn never_fail() -> Self {
        Self {
            ttl_failure_rate: 0.0,
            freshness_failure_rate: 0.0,
            chain_failure_rate: 0.0,
        }
    }

    /// Failure probability for `kind`; `None` for checks that always pass.
    pub fn failure_rate(&self, kind: CheckKind) -> Option<f64> {
        match kind {
            CheckKind::Ttl => Some(self.ttl_failure_rate),
            CheckKind::Freshness => Some(self.freshness_failure_rate),
            CheckKind::ChainAnchor => Some(self.chain_failure_rate),
            CheckKind::FaceMatch | CheckKind::Presentation => None,
        }
    }
}

/// Randomised checks: `draw < failure_rate` fails.
///
/// Face match and presentation always pass and consume no draw.
pub struct SimulatedChecks {
    random: Arc<dyn RandomSource>,
    profile: CheckProfile,
}

impl SimulatedChecks {
    pub fn new(random: Arc<dyn RandomSource>, profile: CheckProfile) -> Self {
        Self { random, profile }
    }
}

impl CheckService for SimulatedChecks {
    fn name(&self) -> &str {
        "simulated"
    }

    fn run(&self, kind: CheckKind, request: &KycRequest) -> CheckVerdict {
        let Some(rate) = self.profile.failure_rate(kind) else {
            return CheckVerdict::Pass;
        };
        let draw = self.random.next_f64();
        let verdict = if draw < rate {
            CheckVerdict::Fail
        } else {
            CheckVerdict::Pass
        };
        debug!(request = %request.id, %kind, draw, rate, ?verdict, "simulated check");
        verdict
    }
}
