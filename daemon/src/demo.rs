//! The `demo` command: one pass through the seeker and holder flows.

use kavach_utils::format_duration_millis;
use kavach_verification::{SendRequest, WorkflowReport};
use kavach_wallet_core::ReauthMethod;
use tracing::info;

use crate::app::App;

const DEMO_OFFICER: &str = "demo-officer";
const DEMO_ORG: &str = "Kavach Demo Bank";

/// Send a request, grant it from the wallet, verify it, then exercise the
/// guarded nominee removal.
pub async fn run(app: &App) -> anyhow::Result<WorkflowReport> {
    let portal = &app.portal;
    let wallet = &app.wallet;

    portal.login(DEMO_OFFICER, DEMO_ORG)?;
    let sent = portal.send_request(SendRequest {
        purpose: "Savings account opening".into(),
        fields: vec!["name".into(), "dob".into(), "address".into(), "pan".into()],
        reason: "RBI KYC master direction".into(),
        retention: "30 days".into(),
        target_id: None,
    })?;
    println!("sent      {} from {} ({} pending)", sent.id, sent.org, wallet.consent.pending_count()?);

    wallet.consent.grant(&sent.id)?;
    println!("granted   {}", sent.id);

    let expected = portal.runner().timings().full_run();
    println!(
        "verifying {} (up to {})",
        sent.id,
        format_duration_millis(expected.as_millis() as u64)
    );
    let report = portal.verify(&sent.id, None).await?;
    println!("outcome   {} ({})", report.outcome, report.outcome.describe());
    if report.retryable {
        println!("          Re-KYC required, a new run may be started");
    }

    let imported = wallet.nominees.import_from_digilocker()?;
    if let Some(nominee) = imported.first() {
        let approval = wallet.reauth.challenge(ReauthMethod::Biometric).await;
        let removed = wallet.nominees.remove(&nominee.id, &approval)?;
        println!("nominee   {} removed after {} check", removed.name, approval.kind());
    }

    portal.logout()?;
    info!(request = %sent.id, outcome = %report.outcome, "demo finished");
    Ok(report)
}
