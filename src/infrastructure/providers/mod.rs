//! Simulated payment-provider backends.
//!
//! Each provider maps a fixed table of reserved test card numbers to
//! deterministic failure outcomes, simulates processing latency, and mints a
//! fresh namespaced transaction id on success. The tables differ per
//! provider but the simulation harness is shared.

mod stripe;
mod visa;

pub use stripe::StripeProvider;
pub use visa::VisaProvider;

use crate::domain::card;
use crate::domain::payment::{ErrorCode, PaymentRequest, PaymentResponse};
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

/// One reserved test card and the outcome it always produces.
pub(crate) struct ReservedCard {
    pub number: &'static str,
    pub code: ErrorCode,
    pub message: &'static str,
}

/// Shared simulation harness.
///
/// Rejects an unusable request up front, sleeps for the provider's latency
/// window, then resolves the outcome: reserved-card table first, then the
/// temporal expiry check, then success with a fresh id.
pub(crate) async fn simulate_card_payment(
    provider: &'static str,
    delay: Duration,
    reserved: &[ReservedCard],
    id_prefix: &'static str,
    expired_message: &'static str,
    request: &PaymentRequest,
) -> PaymentResponse {
    info!(provider, amount = %request.amount, "processing payment");

    if request.card_number.is_empty() {
        warn!(provider, "invalid payment request received");
        return PaymentResponse::declined("Invalid payment request", ErrorCode::InvalidRequestError);
    }

    tokio::time::sleep(delay).await;

    if let Some(card) = reserved
        .iter()
        .find(|card| card.number == request.card_number)
    {
        warn!(provider, error_code = %card.code, "payment failed");
        return PaymentResponse::declined(card.message, card.code);
    }

    if !card::expiry_is_valid(&request.expiry_date) {
        warn!(provider, error_code = %ErrorCode::ExpiredCard, "payment failed");
        return PaymentResponse::declined(expired_message, ErrorCode::ExpiredCard);
    }

    let transaction_id = fresh_transaction_id(id_prefix);
    info!(provider, %transaction_id, "payment successful");
    PaymentResponse::approved(transaction_id, "Payment processed successfully")
}

/// Opaque, provider-namespaced transaction id, unique per call.
fn fresh_transaction_id(prefix: &'static str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}_{}", prefix, &suffix[..8])
}
