//! Wallet core library for the Kavach identity holder.
//!
//! Provides everything the holder-facing screens need:
//! - Consent decisions on KYC requests (grant, deny, revoke)
//! - Nominee management (manual wizard, DigiLocker import, guarded deletion)
//! - Mocked re-authentication (biometric or PIN)
//! - Identity status flags and fetched-document tracking
//! - The holder audit log and a dashboard summary

pub mod consent;
pub mod documents;
pub mod error;
pub mod identity;
pub mod nominees;
pub mod reauth;
pub mod wallet;

pub use consent::ConsentManager;
pub use documents::DocumentVault;
pub use error::WalletError;
pub use identity::{IdentityFlags, IdentityStatus};
pub use nominees::{NomineeDraft, NomineeRegistry};
pub use reauth::{ReauthApproval, ReauthKind, ReauthMethod, Reauthenticator};
pub use wallet::{DashboardSummary, Wallet, WalletConfig};
