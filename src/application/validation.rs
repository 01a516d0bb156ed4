use crate::domain::payment::PaymentRequest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Upper bound on a single payment amount.
pub const MAX_AMOUNT: Decimal = dec!(999999);

/// Checks payment-request field constraints.
///
/// Short-circuits at the first failing rule; the order below decides which
/// single message is surfaced. The returned message is exactly what the
/// caller sees (and what a failed transaction records as its error).
pub fn validate_request(request: &PaymentRequest) -> Result<(), &'static str> {
    if request.amount <= Decimal::ZERO {
        return Err("Amount must be positive");
    }
    if request.amount > MAX_AMOUNT {
        return Err("Amount exceeds limit");
    }
    if request.card_number.len() < 13 {
        return Err("Invalid card number");
    }
    if request.cvv.len() < 3 {
        return Err("Invalid CVV");
    }
    if !has_expiry_shape(&request.expiry_date) {
        return Err("Invalid expiry date format (use MM/YY)");
    }
    if request.idempotency_key.trim().is_empty() {
        return Err("Idempotency key is required");
    }
    Ok(())
}

/// Shape check only (`DD/DD`); temporal validity is the provider's concern.
fn has_expiry_shape(expiry_date: &str) -> bool {
    let bytes = expiry_date.as_bytes();
    bytes.len() == 5
        && bytes[0].is_ascii_digit()
        && bytes[1].is_ascii_digit()
        && bytes[2] == b'/'
        && bytes[3].is_ascii_digit()
        && bytes[4].is_ascii_digit()
}
