//! Payment provider webhook endpoint.

use axum::extract::State;

use crate::db::AppState;
use crate::error::Result;
use crate::extractors::Json;
use crate::ledger::{self, IngestOutcome};
use crate::models::{PaymentWebhook, WebhookResponse, WebhookStatus};
use crate::signature::SignatureVerifier;

/// POST /webhook/payment
///
/// Responds `{"status": "success"}` or `{"status": "already_processed"}`;
/// a signature mismatch is rejected before any store access.
pub async fn handle_payment_webhook(
    State(state): State<AppState>,
    Json(payload): Json<PaymentWebhook>,
) -> Result<Json<WebhookResponse>> {
    let mut conn = state.db.get()?;
    let verifier = SignatureVerifier::new(&state.config.webhook_secret);

    let outcome = ledger::ingest_payment(
        &mut conn,
        &verifier,
        state.config.enforce_account_ownership,
        &payload,
    )?;

    let status = match outcome {
        IngestOutcome::Processed => WebhookStatus::Success,
        IngestOutcome::AlreadyProcessed => WebhookStatus::AlreadyProcessed,
    };

    Ok(Json(WebhookResponse { status }))
}
