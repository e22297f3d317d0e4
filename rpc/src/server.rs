//! Axum-based API server.

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use kavach_verification::BankPortal;
use kavach_wallet_core::Wallet;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::RpcError;
use crate::handlers;

/// Shared state for every handler: the holder's wallet and the bank portal,
/// both over the same store.
pub struct AppState {
    pub wallet: Wallet,
    pub portal: BankPortal,
}

impl AppState {
    pub fn new(wallet: Wallet, portal: BankPortal) -> Self {
        Self { wallet, portal }
    }
}

/// Build the router with all routes mounted.
pub fn router(state: Arc<AppState>) -> Router {
    let holder = Router::new()
        .route("/requests", get(handlers::list_requests))
        .route("/requests/pending_count", get(handlers::pending_count))
        .route("/requests/:id/grant", post(handlers::grant_request))
        .route("/requests/:id/deny", post(handlers::deny_request))
        .route("/requests/:id/revoke", post(handlers::revoke_request))
        .route("/audit", get(handlers::holder_audit))
        .route("/dashboard", get(handlers::dashboard))
        .route(
            "/nominees",
            get(handlers::list_nominees).post(handlers::add_nominee),
        )
        .route("/nominees/import", post(handlers::import_nominees))
        .route("/nominees/:id", delete(handlers::remove_nominee))
        .route("/identity", get(handlers::identity_status))
        .route("/identity/pending", post(handlers::mark_kyc_pending))
        .route("/identity/verified", post(handlers::mark_verified))
        .route("/documents", get(handlers::list_documents))
        .route("/documents/:doc_id", post(handlers::record_document));

    let bank = Router::new()
        .route("/login", post(handlers::bank_login))
        .route("/logout", post(handlers::bank_logout))
        .route("/session", get(handlers::bank_session))
        .route(
            "/requests",
            get(handlers::sent_requests).post(handlers::send_request),
        )
        .route("/requests/watch", get(handlers::watch_sent_requests))
        .route("/requests/:id/verify", post(handlers::verify_request))
        .route("/audit", get(handlers::bank_audit));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(holder)
        .nest("/bank", bank)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub struct RpcServer {
    pub port: u16,
    pub state: Arc<AppState>,
}

impl RpcServer {
    pub fn new(port: u16, state: Arc<AppState>) -> Self {
        Self { port, state }
    }

    /// Bind and serve until the process is stopped.
    pub async fn start(&self) -> Result<(), RpcError> {
        let app = router(self.state.clone());
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| RpcError::Server(format!("bind {addr}: {e}")))?;
        info!("API server listening on {}", addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| RpcError::Server(e.to_string()))
    }
}
