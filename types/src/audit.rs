//! Audit-log entry.

use serde::{Deserialize, Serialize};

use crate::ids::AuditId;
use crate::state::AuditStatus;
use crate::time::Timestamp;

/// One line of an audit log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: AuditId,
    /// Short action title, e.g. "KYC Data Shared".
    pub action: String,
    pub details: String,
    pub time: Timestamp,
    pub status: AuditStatus,
}
