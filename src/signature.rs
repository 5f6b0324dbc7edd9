//! Webhook signature verification.
//!
//! The payment provider signs each webhook by hashing the concatenation of
//! `account_id + amount + transaction_id + user_id + secret` with SHA-256
//! and sending the lowercase hex digest in the `signature` field.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::models::PaymentWebhook;

/// Verifies webhook payloads against a shared secret.
///
/// Constructed once from config and passed by reference; the secret is
/// never read from a global and never logged.
pub struct SignatureVerifier {
    secret: String,
}

impl SignatureVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.to_string(),
        }
    }

    /// Compute the expected signature for a payload.
    ///
    /// Field order is fixed by the provider contract:
    /// account_id, amount, transaction_id, user_id, secret.
    pub fn compute(&self, payload: &PaymentWebhook) -> String {
        let message = format!(
            "{}{}{}{}{}",
            payload.account_id,
            canonical_amount(payload.amount),
            payload.transaction_id,
            payload.user_id,
            self.secret
        );
        let digest = Sha256::digest(message.as_bytes());
        hex::encode(digest)
    }

    /// Check the payload's signature. Comparison is constant-time so response
    /// timing does not leak how much of the signature matched.
    pub fn verify(&self, payload: &PaymentWebhook) -> bool {
        let expected = self.compute(payload);

        tracing::debug!(
            computed = %expected,
            received = %payload.signature,
            transaction_id = %payload.transaction_id,
            "webhook signature check"
        );

        let expected_bytes = expected.as_bytes();
        let provided_bytes = payload.signature.as_bytes();

        // Length is not secret - a SHA-256 hex digest is always 64 chars.
        if expected_bytes.len() != provided_bytes.len() {
            return false;
        }

        expected_bytes.ct_eq(provided_bytes).into()
    }
}

/// Canonical string form of an amount for signing.
///
/// Integral values render with one fractional digit (25.00 -> "25.0"),
/// matching how the provider formats amounts on its side.
pub fn canonical_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.is_finite() {
        format!("{:.1}", amount)
    } else {
        amount.to_string()
    }
}
