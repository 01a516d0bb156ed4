use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Success,
    Failed,
}

/// The durable, append-only audit record of one payment attempt.
///
/// Exactly one `Transaction` exists per idempotency key; it is never updated
/// after creation. The full card number is never stored, only its last four
/// digits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub client_id: String,
    pub amount: Decimal,
    pub card_last4: String,
    pub status: TransactionStatus,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub idempotency_key: String,
    pub provider_transaction_id: Option<String>,
    pub metadata: HashMap<String, String>,
}
