use super::{ReservedCard, simulate_card_payment};
use crate::domain::payment::{ErrorCode, PaymentRequest, PaymentResponse};
use crate::domain::ports::PaymentProvider;
use async_trait::async_trait;
use std::time::Duration;

const RESERVED_CARDS: &[ReservedCard] = &[
    ReservedCard {
        number: "4111111111111111",
        code: ErrorCode::CardDeclined,
        message: "Your card was declined",
    },
    ReservedCard {
        number: "4111111111111112",
        code: ErrorCode::ExpiredCard,
        message: "Your card has expired",
    },
    ReservedCard {
        number: "4111111111111113",
        code: ErrorCode::IncorrectCvc,
        message: "Your card's security code is incorrect",
    },
    ReservedCard {
        number: "4111111111111114",
        code: ErrorCode::ProcessingError,
        message: "An error occurred while processing your card",
    },
    ReservedCard {
        number: "4111111111111115",
        code: ErrorCode::InsufficientFunds,
        message: "Your card has insufficient funds",
    },
];

/// The alternate provider simulator. Success ids look like `visa_1a2b3c4d`.
pub struct VisaProvider {
    delay: Duration,
}

impl VisaProvider {
    pub fn new() -> Self {
        Self::with_delay(Duration::from_millis(600))
    }

    /// Tests inject `Duration::ZERO` to skip the latency simulation.
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for VisaProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentProvider for VisaProvider {
    fn key(&self) -> &'static str {
        "visa"
    }

    async fn process(&self, request: &PaymentRequest) -> PaymentResponse {
        simulate_card_payment(
            self.key(),
            self.delay,
            RESERVED_CARDS,
            "visa",
            "Your card has expired",
            request,
        )
        .await
    }
}
