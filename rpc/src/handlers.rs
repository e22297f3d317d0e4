//! Request handlers and their request/response bodies.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kavach_types::{AuditEntry, KavachError, KycRequest, Nominee, NomineeId, RequestId};
use kavach_verification::{ApplicantDetails, SendRequest, SessionInfo, WorkflowReport};
use kavach_wallet_core::{
    DashboardSummary, IdentityStatus, NomineeDraft, ReauthKind, ReauthMethod,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::RpcError;
use crate::server::AppState;

type ApiResult<T> = Result<Json<T>, RpcError>;

// ── Health ───────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

// ── Holder: requests ─────────────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
pub struct PendingCountResponse {
    pub pending: usize,
}

pub async fn list_requests(State(state): State<Arc<AppState>>) -> ApiResult<Vec<KycRequest>> {
    Ok(Json(state.wallet.consent.requests()?))
}

pub async fn pending_count(State(state): State<Arc<AppState>>) -> ApiResult<PendingCountResponse> {
    Ok(Json(PendingCountResponse {
        pending: state.wallet.consent.pending_count()?,
    }))
}

pub async fn grant_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<KycRequest> {
    Ok(Json(state.wallet.consent.grant(&RequestId::from(id))?))
}

pub async fn deny_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<KycRequest> {
    Ok(Json(state.wallet.consent.deny(&RequestId::from(id))?))
}

pub async fn revoke_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<KycRequest> {
    Ok(Json(state.wallet.consent.revoke(&RequestId::from(id))?))
}

pub async fn holder_audit(State(state): State<Arc<AppState>>) -> ApiResult<Vec<AuditEntry>> {
    Ok(Json(state.wallet.audit_log()?))
}

pub async fn dashboard(State(state): State<Arc<AppState>>) -> ApiResult<DashboardSummary> {
    Ok(Json(state.wallet.dashboard()?))
}

// ── Holder: nominees ─────────────────────────────────────────────────────

/// Body of `DELETE /nominees/{id}`.
#[derive(Deserialize)]
pub struct ReauthBody {
    pub method: ReauthKind,
    #[serde(default)]
    pub pin: Option<String>,
}

impl ReauthBody {
    fn into_method(self) -> ReauthMethod {
        match self.method {
            ReauthKind::Biometric => ReauthMethod::Biometric,
            ReauthKind::Pin => ReauthMethod::Pin(self.pin.unwrap_or_default()),
        }
    }
}

pub async fn list_nominees(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Nominee>> {
    Ok(Json(state.wallet.nominees.list()?))
}

pub async fn add_nominee(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<NomineeDraft>,
) -> Result<(StatusCode, Json<Nominee>), RpcError> {
    let nominee = state.wallet.nominees.add_manual(draft)?;
    Ok((StatusCode::CREATED, Json(nominee)))
}

pub async fn import_nominees(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Nominee>> {
    Ok(Json(state.wallet.nominees.import_from_digilocker()?))
}

/// Re-authenticate, then delete. An unknown id is rejected before the
/// challenge so the holder is not made to wait for nothing.
pub async fn remove_nominee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<ReauthBody>,
) -> ApiResult<Nominee> {
    let id = NomineeId::from(id);
    if !state.wallet.nominees.list()?.iter().any(|n| n.id == id) {
        return Err(RpcError::NotFound(format!("nominee not found: {id}")));
    }
    let approval = state.wallet.reauth.challenge(body.into_method()).await;
    Ok(Json(state.wallet.nominees.remove(&id, &approval)?))
}

// ── Holder: identity and documents ───────────────────────────────────────

pub async fn identity_status(State(state): State<Arc<AppState>>) -> ApiResult<IdentityStatus> {
    Ok(Json(state.wallet.identity.status()?))
}

pub async fn mark_kyc_pending(State(state): State<Arc<AppState>>) -> ApiResult<IdentityStatus> {
    Ok(Json(state.wallet.identity.mark_kyc_pending()?))
}

pub async fn mark_verified(State(state): State<Arc<AppState>>) -> ApiResult<IdentityStatus> {
    Ok(Json(state.wallet.identity.mark_verified()?))
}

#[derive(Serialize, Deserialize)]
pub struct DocumentRecorded {
    pub doc_id: String,
    pub newly_fetched: bool,
}

pub async fn list_documents(State(state): State<Arc<AppState>>) -> ApiResult<Vec<String>> {
    Ok(Json(state.wallet.documents.list()?))
}

pub async fn record_document(
    State(state): State<Arc<AppState>>,
    Path(doc_id): Path<String>,
) -> ApiResult<DocumentRecorded> {
    let newly_fetched = state.wallet.documents.record(&doc_id)?;
    Ok(Json(DocumentRecorded {
        doc_id,
        newly_fetched,
    }))
}

// ── Bank portal ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginBody {
    pub officer_id: String,
    pub org: String,
}

#[derive(Serialize, Deserialize)]
pub struct SessionResponse {
    pub logged_in: bool,
    pub org: Option<String>,
}

impl From<Option<SessionInfo>> for SessionResponse {
    fn from(session: Option<SessionInfo>) -> Self {
        Self {
            logged_in: session.is_some(),
            org: session.map(|s| s.org),
        }
    }
}

/// Body of `POST /bank/requests/{id}/verify`: either `{"prefill": true}`
/// or the applicant's PAN, phone and date of birth.
#[derive(Default, Deserialize)]
pub struct VerifyBody {
    #[serde(default)]
    pub prefill: bool,
    pub pan: Option<String>,
    pub phone: Option<String>,
    pub dob: Option<String>,
}

impl VerifyBody {
    fn into_applicant(self) -> Result<Option<ApplicantDetails>, KavachError> {
        if self.prefill {
            return Ok(None);
        }
        match (self.pan, self.phone, self.dob) {
            (Some(pan), Some(phone), Some(dob)) => Ok(Some(ApplicantDetails { pan, phone, dob })),
            _ => Err(KavachError::validation(
                "applicant",
                "pan, phone and dob are required unless prefill is set",
            )),
        }
    }
}

pub async fn bank_login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginBody>,
) -> ApiResult<SessionResponse> {
    let session = state.portal.login(&body.officer_id, &body.org)?;
    Ok(Json(Some(session).into()))
}

pub async fn bank_logout(State(state): State<Arc<AppState>>) -> ApiResult<SessionResponse> {
    state.portal.logout()?;
    Ok(Json(None.into()))
}

pub async fn bank_session(State(state): State<Arc<AppState>>) -> ApiResult<SessionResponse> {
    Ok(Json(state.portal.session()?.into()))
}

pub async fn send_request(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SendRequest>,
) -> Result<(StatusCode, Json<KycRequest>), RpcError> {
    let request = state.portal.send_request(body)?;
    Ok((StatusCode::CREATED, Json(request)))
}

pub async fn sent_requests(State(state): State<Arc<AppState>>) -> ApiResult<Vec<KycRequest>> {
    Ok(Json(state.portal.sent_requests()?))
}

/// Default wait of `GET /bank/requests/watch`.
const WATCH_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_WATCH_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Deserialize)]
pub struct WatchQuery {
    pub timeout_ms: Option<u64>,
}

#[derive(Serialize, Deserialize)]
pub struct WatchResponse {
    pub changed: bool,
    pub requests: Vec<KycRequest>,
}

/// Long-poll the sent list. Answers after the next change, or with the
/// unchanged list once the timeout passes.
pub async fn watch_sent_requests(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WatchQuery>,
) -> ApiResult<WatchResponse> {
    let wait = query
        .timeout_ms
        .map(Duration::from_millis)
        .unwrap_or(WATCH_TIMEOUT)
        .min(MAX_WATCH_TIMEOUT);
    let (mut rx, _poller) = state.portal.watch_sent_requests()?;
    let changed = matches!(tokio::time::timeout(wait, rx.changed()).await, Ok(Ok(())));
    let requests = rx.borrow_and_update().clone();
    Ok(Json(WatchResponse { changed, requests }))
}

pub async fn verify_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<VerifyBody>,
) -> ApiResult<WorkflowReport> {
    let applicant = body
        .into_applicant()
        .map_err(|e| RpcError::Invalid(e.to_string()))?;
    let id = RequestId::from(id);
    let report = state.portal.verify(&id, applicant).await?;
    info!(request = %id, outcome = %report.outcome, "verification served");
    Ok(Json(report))
}

pub async fn bank_audit(State(state): State<Arc<AppState>>) -> ApiResult<Vec<AuditEntry>> {
    Ok(Json(state.portal.audit_log()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_body_needs_all_fields_without_prefill() {
        let partial = VerifyBody {
            pan: Some("ABCDE1234F".into()),
            ..Default::default()
        };
        assert!(partial.into_applicant().is_err());

        let prefill = VerifyBody {
            prefill: true,
            ..Default::default()
        };
        assert_eq!(prefill.into_applicant().unwrap(), None);
    }

    #[test]
    fn pin_body_becomes_pin_method() {
        let body: ReauthBody = serde_json::from_str(r#"{"method":"pin","pin":"123456"}"#).unwrap();
        assert_eq!(body.into_method().kind(), ReauthKind::Pin);
        let body: ReauthBody = serde_json::from_str(r#"{"method":"biometric"}"#).unwrap();
        assert_eq!(body.into_method(), ReauthMethod::Biometric);
    }
}
