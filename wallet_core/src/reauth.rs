//! Mocked re-authentication before destructive actions.
//!
//! The holder picks a biometric scan or a 6-digit PIN. Neither is checked:
//! after a fixed delay every challenge is approved. The approval token is the
//! only way to call guarded operations such as nominee deletion.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use kavach_types::{Clock, Timestamp};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Default time the mocked scanner or PIN pad takes to "verify".
pub const DEFAULT_REAUTH_DELAY: Duration = Duration::from_millis(1500);

/// How the holder chose to re-authenticate.
#[derive(Clone, PartialEq, Eq)]
pub enum ReauthMethod {
    Biometric,
    Pin(String),
}

impl ReauthMethod {
    pub fn kind(&self) -> ReauthKind {
        match self {
            Self::Biometric => ReauthKind::Biometric,
            Self::Pin(_) => ReauthKind::Pin,
        }
    }
}

impl fmt::Debug for ReauthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Biometric => f.write_str("Biometric"),
            Self::Pin(_) => f.write_str("Pin(<redacted>)"),
        }
    }
}

/// The method, without any secret attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReauthKind {
    Biometric,
    Pin,
}

impl fmt::Display for ReauthKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Biometric => f.write_str("biometric"),
            Self::Pin => f.write_str("PIN"),
        }
    }
}

/// Proof that a re-authentication challenge completed.
#[derive(Clone, Debug)]
pub struct ReauthApproval {
    kind: ReauthKind,
    approved_at: Timestamp,
}

impl ReauthApproval {
    pub fn kind(&self) -> ReauthKind {
        self.kind
    }

    pub fn approved_at(&self) -> Timestamp {
        self.approved_at
    }
}

/// Runs mocked re-authentication challenges.
#[derive(Clone)]
pub struct Reauthenticator {
    delay: Duration,
    clock: Arc<dyn Clock>,
}

impl Reauthenticator {
    pub fn new(delay: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { delay, clock }
    }

    /// Wait out the simulated check and approve.
    pub async fn challenge(&self, method: ReauthMethod) -> ReauthApproval {
        let kind = method.kind();
        info!(%kind, delay_ms = self.delay.as_millis() as u64, "re-authentication started");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let approval = ReauthApproval {
            kind,
            approved_at: self.clock.now(),
        };
        info!(%kind, "re-authentication approved");
        approval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kavach_nullables::NullClock;

    #[tokio::test]
    async fn any_pin_is_approved() {
        let reauth = Reauthenticator::new(Duration::ZERO, Arc::new(NullClock::new(42)));
        let approval = reauth.challenge(ReauthMethod::Pin("000000".into())).await;
        assert_eq!(approval.kind(), ReauthKind::Pin);
        assert_eq!(approval.approved_at().as_millis(), 42);
    }

    #[tokio::test]
    async fn biometric_waits_for_the_delay() {
        let reauth = Reauthenticator::new(Duration::from_millis(20), Arc::new(NullClock::new(0)));
        let started = std::time::Instant::now();
        let approval = reauth.challenge(ReauthMethod::Biometric).await;
        assert!(started.elapsed() >= Duration::from_millis(20));
        assert_eq!(approval.kind(), ReauthKind::Biometric);
    }

    #[test]
    fn pin_is_redacted_in_debug_output() {
        let shown = format!("{:?}", ReauthMethod::Pin("123456".into()));
        assert!(!shown.contains("123456"));
    }
}
