use super::{ReservedCard, simulate_card_payment};
use crate::domain::payment::{ErrorCode, PaymentRequest, PaymentResponse};
use crate::domain::ports::PaymentProvider;
use async_trait::async_trait;
use std::time::Duration;

const RESERVED_CARDS: &[ReservedCard] = &[
    ReservedCard {
        number: "4000000000000002",
        code: ErrorCode::CardDeclined,
        message: "Card declined",
    },
    ReservedCard {
        number: "4000000000000069",
        code: ErrorCode::ExpiredCard,
        message: "Card expired",
    },
    ReservedCard {
        number: "4000000000000127",
        code: ErrorCode::IncorrectCvc,
        message: "Incorrect CVC",
    },
    ReservedCard {
        number: "4000000000000119",
        code: ErrorCode::ProcessingError,
        message: "Processing error",
    },
    ReservedCard {
        number: "4000000000000341",
        code: ErrorCode::InsufficientFunds,
        message: "Insufficient funds",
    },
];

/// The primary provider simulator. Success ids look like `txn_1a2b3c4d`.
pub struct StripeProvider {
    delay: Duration,
}

impl StripeProvider {
    pub fn new() -> Self {
        Self::with_delay(Duration::from_millis(800))
    }

    /// Tests inject `Duration::ZERO` to skip the latency simulation.
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for StripeProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentProvider for StripeProvider {
    fn key(&self) -> &'static str {
        "stripe"
    }

    async fn process(&self, request: &PaymentRequest) -> PaymentResponse {
        simulate_card_payment(
            self.key(),
            self.delay,
            RESERVED_CARDS,
            "txn",
            "Card expired",
            request,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn provider() -> StripeProvider {
        StripeProvider::with_delay(Duration::ZERO)
    }

    fn request(card_number: &str, expiry_date: &str) -> PaymentRequest {
        PaymentRequest {
            amount: dec!(150.00),
            card_number: card_number.to_string(),
            cvv: "123".to_string(),
            expiry_date: expiry_date.to_string(),
            idempotency_key: "key-001".to_string(),
            metadata: None,
            provider: None,
        }
    }

    #[tokio::test]
    async fn test_reserved_card_outcomes() {
        let provider = provider();
        let cases = [
            ("4000000000000002", ErrorCode::CardDeclined),
            ("4000000000000069", ErrorCode::ExpiredCard),
            ("4000000000000127", ErrorCode::IncorrectCvc),
            ("4000000000000119", ErrorCode::ProcessingError),
            ("4000000000000341", ErrorCode::InsufficientFunds),
        ];

        for (card, expected) in cases {
            let response = provider.process(&request(card, "12/28")).await;
            assert!(!response.success);
            assert_eq!(response.error_code, Some(expected), "card {card}");
            assert!(response.transaction_id.is_none());
        }
    }

    #[tokio::test]
    async fn test_past_expiry_fails_as_expired() {
        let response = provider().process(&request("4242424242424242", "01/20")).await;
        assert!(!response.success);
        assert_eq!(response.error_code, Some(ErrorCode::ExpiredCard));
    }

    #[tokio::test]
    async fn test_success_mints_namespaced_id() {
        let response = provider().process(&request("4242424242424242", "12/28")).await;
        assert!(response.success);
        assert!(response.error_code.is_none());
        assert!(response.transaction_id.unwrap().starts_with("txn_"));
        assert_eq!(response.message, "Payment processed successfully");
    }

    #[tokio::test]
    async fn test_missing_card_number_is_invalid_request() {
        let response = provider().process(&request("", "12/28")).await;
        assert!(!response.success);
        assert_eq!(response.error_code, Some(ErrorCode::InvalidRequestError));
    }
}
