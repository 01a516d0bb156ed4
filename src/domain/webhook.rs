use crate::domain::payment::{PaymentRequest, PaymentResponse};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WebhookEventType {
    #[serde(rename = "payment.success")]
    PaymentSuccess,
    #[serde(rename = "payment.failed")]
    PaymentFailed,
}

/// An asynchronous notification describing a completed payment attempt.
///
/// One event is emitted per non-cached attempt. Event ids carry a random
/// UUID-derived suffix rather than a wall-clock value, so they stay unique
/// under concurrent emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    pub event_id: String,
    pub event_type: WebhookEventType,
    pub transaction_id: Option<String>,
    pub amount: Decimal,
    pub product_id: Option<String>,
    pub description: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl WebhookEvent {
    /// Builds the event for a freshly completed payment attempt.
    ///
    /// The transaction id mirrors the response, so it is absent on failure.
    /// Optional product context is pulled from the request metadata.
    pub fn for_payment(request: &PaymentRequest, response: &PaymentResponse) -> Self {
        let metadata = request.metadata.as_ref();
        Self {
            event_id: fresh_event_id(),
            event_type: if response.success {
                WebhookEventType::PaymentSuccess
            } else {
                WebhookEventType::PaymentFailed
            },
            transaction_id: response.transaction_id.clone(),
            amount: request.amount,
            product_id: metadata.and_then(|m| m.get("productId").cloned()),
            description: metadata.and_then(|m| m.get("description").cloned()),
            timestamp: Utc::now(),
        }
    }
}

fn fresh_event_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("evt_{}", &suffix[..12])
}
