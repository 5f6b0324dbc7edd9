//! Payment ingestion pipeline and account resolution.
//!
//! One webhook call runs verify -> dedupe-check -> resolve-account ->
//! record-payment -> adjust-balance. Everything after verification happens
//! inside a single database transaction, so an abort rolls the whole
//! delivery back.

use rusqlite::{Connection, TransactionBehavior};

use crate::db::queries::{self, PaymentInsert};
use crate::error::{AppError, Result};
use crate::models::{Account, NewPayment, PaymentWebhook};
use crate::signature::SignatureVerifier;

/// Outcome of ingesting one webhook delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The payment was recorded and the account credited.
    Processed,
    /// A payment with this transaction id already exists; nothing changed.
    /// This is the idempotence contract, not a failure.
    AlreadyProcessed,
}

/// Resolve a (user, account) reference to a persisted account row,
/// creating a zero-balance account when the id is unknown.
///
/// The user must genuinely exist - a webhook naming a missing user is a
/// hard NotFound, never a silent proceed. Ownership of an existing account
/// is only checked when `enforce_ownership` is set.
pub fn resolve_account(
    conn: &Connection,
    user_id: i64,
    account_id: i64,
    enforce_ownership: bool,
) -> Result<Account> {
    queries::get_user(conn, user_id)?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

    let account = queries::ensure_account(conn, account_id, user_id)?;

    if enforce_ownership && account.user_id != user_id {
        return Err(AppError::Forbidden(format!(
            "Account {} belongs to a different user",
            account.id
        )));
    }

    Ok(account)
}

/// Ingest one webhook delivery.
///
/// Verification happens before anything touches the store; a bad signature
/// causes no reads and no writes. The transaction takes the write lock up
/// front (IMMEDIATE) so concurrent deliveries serialize instead of failing
/// midway with a busy error.
pub fn ingest_payment(
    conn: &mut Connection,
    verifier: &SignatureVerifier,
    enforce_ownership: bool,
    payload: &PaymentWebhook,
) -> Result<IngestOutcome> {
    if !verifier.verify(payload) {
        tracing::warn!(
            transaction_id = %payload.transaction_id,
            "webhook rejected: signature mismatch"
        );
        return Err(AppError::Unauthorized);
    }

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    if queries::exists_payment(&tx, &payload.transaction_id)? {
        tracing::info!(
            transaction_id = %payload.transaction_id,
            "webhook replay: transaction already processed"
        );
        return Ok(IngestOutcome::AlreadyProcessed);
    }

    let account = resolve_account(&tx, payload.user_id, payload.account_id, enforce_ownership)?;

    let inserted = queries::insert_payment(
        &tx,
        &NewPayment {
            transaction_id: payload.transaction_id.clone(),
            account_id: account.id,
            user_id: payload.user_id,
            amount: payload.amount,
        },
    )?;

    match inserted {
        PaymentInsert::Inserted(payment) => {
            let credited = queries::credit_account(&tx, account.id, payload.amount)?
                .ok_or_else(|| {
                    AppError::Internal(format!("Account {} vanished during credit", account.id))
                })?;
            tx.commit()?;

            tracing::info!(
                transaction_id = %payment.transaction_id,
                account_id = payment.account_id,
                amount = payment.amount,
                balance = credited.balance,
                "payment ingested"
            );
            Ok(IngestOutcome::Processed)
        }
        PaymentInsert::DuplicateTransaction => {
            // Lost the race between the existence check and the insert.
            // The constraint is the safety net; treat it as a replay.
            tracing::info!(
                transaction_id = %payload.transaction_id,
                "webhook replay caught by uniqueness constraint"
            );
            Ok(IngestOutcome::AlreadyProcessed)
        }
    }
}
