use serde::{Deserialize, Serialize};

/// A recorded payment. Immutable once created - it represents a fact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    /// Provider-assigned transaction id; globally unique, the dedupe key.
    pub transaction_id: String,
    pub account_id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub created_at: i64,
}

/// Data required to insert a payment row.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub transaction_id: String,
    pub account_id: i64,
    pub user_id: i64,
    pub amount: f64,
}

/// Inbound webhook payload from the payment provider.
///
/// `amount` is deliberately unvalidated: the provider contract permits any
/// numeric value, including zero and negatives. A negative amount debits
/// the account through the payment channel.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentWebhook {
    pub transaction_id: String,
    pub account_id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub signature: String,
}

/// Webhook response body.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub status: WebhookStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookStatus {
    Success,
    AlreadyProcessed,
}
