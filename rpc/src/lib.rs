//! HTTP/JSON API for the Kavach wallet.
//!
//! Exposes both sides of the prototype over one store:
//! - Holder: KYC request decisions, nominees, identity status, documents,
//!   and the holder audit log
//! - Seeker: bank session, sending requests, and verification runs
//!
//! Errors are returned as `{"error": "..."}` with a status code chosen by
//! [`RpcError::status_code`].

pub mod error;
pub mod handlers;
pub mod server;

pub use error::RpcError;
pub use server::{router, AppState, RpcServer};
