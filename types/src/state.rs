//! Lifecycle and severity enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The lifecycle state of a KYC request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Sent by the seeker, awaiting the holder's decision.
    #[default]
    Pending,
    /// The holder shared the requested fields.
    Granted,
    /// The holder refused.
    Denied,
    /// A previous grant was withdrawn.
    Revoked,
}

impl RequestStatus {
    /// Whether a move from `self` to `next` is a legal lifecycle step.
    ///
    /// `pending → granted | denied` and `granted → revoked`. Denial is final.
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Granted)
                | (Self::Pending, Self::Denied)
                | (Self::Granted, Self::Revoked)
        )
    }

    /// Whether the seeker may run a verification against this request.
    pub fn allows_verification(&self) -> bool {
        matches!(self, Self::Granted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Revoked => "revoked",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a nominee has confirmed their nomination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NomineeStatus {
    Verified,
    PendingConsent,
}

/// Where a nominee record came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NomineeSource {
    Digilocker,
    Manual,
}

/// Severity tag carried by every audit-log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditStatus {
    Success,
    Warning,
    Error,
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Success => "Success",
            Self::Warning => "Warning",
            Self::Error => "Error",
        };
        f.write_str(s)
    }
}
