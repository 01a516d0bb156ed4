use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Machine-readable error taxonomy surfaced to callers.
///
/// Serialized in snake_case (`card_declined`, `client_validation_error`, ...)
/// to match the wire format expected by integrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    ClientValidationError,
    ValidationError,
    CachedError,
    CardDeclined,
    ExpiredCard,
    IncorrectCvc,
    ProcessingError,
    InsufficientFunds,
    InvalidRequestError,
    NetworkError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ClientValidationError => "client_validation_error",
            ErrorCode::ValidationError => "validation_error",
            ErrorCode::CachedError => "cached_error",
            ErrorCode::CardDeclined => "card_declined",
            ErrorCode::ExpiredCard => "expired_card",
            ErrorCode::IncorrectCvc => "incorrect_cvc",
            ErrorCode::ProcessingError => "processing_error",
            ErrorCode::InsufficientFunds => "insufficient_funds",
            ErrorCode::InvalidRequestError => "invalid_request_error",
            ErrorCode::NetworkError => "network_error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payment attempt as submitted by a caller. Transient; never persisted
/// as-is (the durable record is [`crate::domain::transaction::Transaction`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub amount: Decimal,
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub cvv: String,
    #[serde(default)]
    pub expiry_date: String,
    #[serde(default)]
    pub idempotency_key: String,
    #[serde(default)]
    pub metadata: Option<HashMap<String, String>>,
    /// Optional explicit provider selection ("stripe" / "visa").
    #[serde(default)]
    pub provider: Option<String>,
}

/// The caller-facing outcome of a payment attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub success: bool,
    pub transaction_id: Option<String>,
    pub message: String,
    pub error_code: Option<ErrorCode>,
    pub timestamp: DateTime<Utc>,
}

impl PaymentResponse {
    pub fn approved(transaction_id: String, message: impl Into<String>) -> Self {
        Self {
            success: true,
            transaction_id: Some(transaction_id),
            message: message.into(),
            error_code: None,
            timestamp: Utc::now(),
        }
    }

    pub fn declined(message: impl Into<String>, error_code: ErrorCode) -> Self {
        Self {
            success: false,
            transaction_id: None,
            message: message.into(),
            error_code: Some(error_code),
            timestamp: Utc::now(),
        }
    }

    /// HTTP-style status discriminator for the transport boundary:
    /// 200 on success, 402 (payment required) on any business failure.
    pub fn http_status(&self) -> u16 {
        if self.success { 200 } else { 402 }
    }
}
