//! KYC request entity.

use serde::{Deserialize, Serialize};

use crate::ids::RequestId;
use crate::state::RequestStatus;
use crate::time::Timestamp;

/// A request from a seeker (bank) for a subset of the holder's identity fields.
///
/// Field names follow the persisted JSON shape, so records written by other
/// components (including partial ones) load without loss.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KycRequest {
    pub id: RequestId,
    /// Requesting organisation.
    #[serde(default)]
    pub org: String,
    #[serde(default)]
    pub purpose: String,
    /// Identity attributes the seeker wants disclosed.
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub reason: String,
    /// Free-form retention period, e.g. "30 days".
    #[serde(default)]
    pub retention: String,
    #[serde(default)]
    pub timestamp: Timestamp,
    pub status: RequestStatus,
    /// Holder the request is addressed to, when the seeker knows it.
    #[serde(rename = "targetId", default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
}

impl KycRequest {
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}
