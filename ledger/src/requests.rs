//! The KYC request book.
//!
//! Requests are created by a seeker, decided by the holder, and read back by
//! the seeker to unlock a verification run. Every change rewrites the whole
//! `kavach_kyc_requests` array; the entry is located by id. Entries that no
//! longer decode are written back as they were.

use kavach_store::{read_list_or, JsonList, StorageKey};
use kavach_types::{KavachError, KycRequest, RequestId, RequestStatus};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{LedgerContext, LedgerError};

/// What a seeker fills in when asking for a disclosure.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NewRequest {
    pub org: String,
    pub purpose: String,
    pub fields: Vec<String>,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub retention: String,
    #[serde(rename = "targetId", default)]
    pub target_id: Option<String>,
}

impl NewRequest {
    pub fn validate(&self) -> Result<(), KavachError> {
        if self.org.trim().is_empty() {
            return Err(KavachError::validation("org", "must not be empty"));
        }
        if self.purpose.trim().is_empty() {
            return Err(KavachError::validation("purpose", "must not be empty"));
        }
        if self.fields.iter().all(|f| f.trim().is_empty()) {
            return Err(KavachError::validation(
                "fields",
                "at least one field must be requested",
            ));
        }
        Ok(())
    }
}

/// Reads and rewrites the shared request list.
#[derive(Clone)]
pub struct RequestBook {
    ctx: LedgerContext,
}

impl RequestBook {
    pub fn new(ctx: LedgerContext) -> Self {
        Self { ctx }
    }

    /// Every request, newest first. A missing or malformed list reads as
    /// empty; malformed entries are left out.
    pub fn all(&self) -> Result<Vec<KycRequest>, LedgerError> {
        Ok(read_list_or(
            self.ctx.store(),
            StorageKey::KycRequests,
            Vec::new,
        )?)
    }

    pub fn get(&self, id: &RequestId) -> Result<KycRequest, LedgerError> {
        self.all()?
            .into_iter()
            .find(|r| &r.id == id)
            .ok_or_else(|| LedgerError::RequestNotFound(id.to_string()))
    }

    /// Record a new pending request at the head of the list.
    pub fn create(&self, new: NewRequest) -> Result<KycRequest, LedgerError> {
        new.validate()?;

        let request = KycRequest {
            id: RequestId::generate(self.ctx.random.as_ref()),
            org: new.org.trim().to_string(),
            purpose: new.purpose.trim().to_string(),
            fields: new
                .fields
                .into_iter()
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty())
                .collect(),
            reason: new.reason,
            retention: new.retention,
            timestamp: self.ctx.clock.now(),
            status: RequestStatus::Pending,
            target_id: new.target_id,
        };

        let mut requests = self.load()?;
        requests.push_front(request.clone());
        requests.save(self.ctx.store())?;

        info!(id = %request.id, org = %request.org, "KYC request created");
        Ok(request)
    }

    /// Requests sent by `org`, newest first.
    pub fn sent_by(&self, org: &str) -> Result<Vec<KycRequest>, LedgerError> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|r| r.org == org)
            .collect())
    }

    /// Number of requests still awaiting the holder.
    pub fn pending_count(&self) -> Result<usize, LedgerError> {
        Ok(self.all()?.iter().filter(|r| r.is_pending()).count())
    }

    /// Move the request `id` to `next`, leaving every other entry untouched.
    pub fn transition(
        &self,
        id: &RequestId,
        next: RequestStatus,
    ) -> Result<KycRequest, LedgerError> {
        let mut requests = self.load()?;
        let request = requests
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| LedgerError::RequestNotFound(id.to_string()))?;

        if !request.status.can_transition_to(next) {
            return Err(LedgerError::InvalidTransition {
                id: id.to_string(),
                from: request.status,
                to: next,
            });
        }

        debug!(id = %id, from = %request.status, to = %next, "request status change");
        request.status = next;
        let updated = request.clone();
        requests.save(self.ctx.store())?;
        Ok(updated)
    }

    /// The request `id`, provided the holder has granted it.
    pub fn ensure_verifiable(&self, id: &RequestId) -> Result<KycRequest, LedgerError> {
        let request = self.get(id)?;
        if !request.status.allows_verification() {
            return Err(LedgerError::NotGranted {
                id: id.to_string(),
                status: request.status,
            });
        }
        Ok(request)
    }

    fn load(&self) -> Result<JsonList<KycRequest>, LedgerError> {
        Ok(JsonList::load(
            self.ctx.store(),
            StorageKey::KycRequests,
            Vec::new,
        )?)
    }
}
