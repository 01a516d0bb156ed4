//! Pure helpers for card handling: expiry validity, last-4 extraction and
//! masking for logs. None of these functions can fail; malformed input is
//! simply reported as invalid or masked away.

use chrono::{Datelike, NaiveDate, Utc};

/// Returns true when an `MM/YY` expiry date is still current.
///
/// A card is valid through the last calendar day of its expiry month
/// inclusive. Malformed input (wrong segment count, non-numeric parts,
/// out-of-range month) is invalid, never an error.
pub fn expiry_is_valid(expiry_date: &str) -> bool {
    expiry_valid_on(expiry_date, Utc::now().date_naive())
}

pub(crate) fn expiry_valid_on(expiry_date: &str, today: NaiveDate) -> bool {
    match parse_expiry(expiry_date) {
        Some((year, month)) => {
            (today.year(), today.month()) <= (year, month)
        }
        None => false,
    }
}

/// Parses `MM/YY` into `(year, month)` with the year interpreted as 2000+YY.
/// Strict: surrounding whitespace makes the numeric parse fail.
fn parse_expiry(expiry_date: &str) -> Option<(i32, u32)> {
    let mut parts = expiry_date.split('/');
    let month: u32 = parts.next()?.parse().ok()?;
    let year: i32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    if !(1..=12).contains(&month) {
        return None;
    }

    Some((2000 + year, month))
}

/// Last four digits of a card number, or `"0000"` when the number is
/// missing or too short. This is what the audit record stores.
pub fn last4(card_number: &str) -> String {
    tail4(card_number).unwrap_or_else(|| "0000".to_string())
}

/// Masked representation (`****-****-****-1234`) for logging. Full card
/// numbers must never reach a log line.
pub fn mask(card_number: &str) -> String {
    match tail4(card_number) {
        Some(tail) => format!("****-****-****-{tail}"),
        None => "****".to_string(),
    }
}

/// Last four characters, counted in characters so arbitrary input (including
/// non-ASCII) never panics on a slice boundary.
fn tail4(card_number: &str) -> Option<String> {
    let chars: Vec<char> = card_number.chars().collect();
    (chars.len() >= 4).then(|| chars[chars.len() - 4..].iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_future_expiry_is_valid() {
        assert!(expiry_valid_on("12/28", date(2026, 8, 28)));
        assert!(expiry_valid_on("01/27", date(2026, 8, 28)));
    }

    #[test]
    fn test_valid_through_end_of_expiry_month() {
        // Still valid on the last day of the expiry month.
        assert!(expiry_valid_on("08/26", date(2026, 8, 31)));
        // Invalid the day after.
        assert!(!expiry_valid_on("08/26", date(2026, 9, 1)));
    }

    #[test]
    fn test_past_expiry_is_invalid() {
        assert!(!expiry_valid_on("12/20", date(2026, 8, 28)));
    }

    #[test]
    fn test_malformed_expiry_is_invalid() {
        assert!(!expiry_valid_on("", date(2026, 8, 28)));
        assert!(!expiry_valid_on("1228", date(2026, 8, 28)));
        assert!(!expiry_valid_on("12/28/01", date(2026, 8, 28)));
        assert!(!expiry_valid_on("ab/cd", date(2026, 8, 28)));
        assert!(!expiry_valid_on("13/28", date(2026, 8, 28)));
        assert!(!expiry_valid_on("00/28", date(2026, 8, 28)));
        // Surrounding whitespace is rejected, not trimmed away.
        assert!(!expiry_valid_on(" 12/28", date(2026, 8, 28)));
        assert!(!expiry_valid_on("12/28 ", date(2026, 8, 28)));
    }

    #[test]
    fn test_last4() {
        assert_eq!(last4("4242424242424242"), "4242");
        assert_eq!(last4("123"), "0000");
        assert_eq!(last4(""), "0000");
    }

    #[test]
    fn test_last4_counts_characters_not_bytes() {
        // A multi-byte character near the tail must not split a boundary.
        assert_eq!(last4("4242424242424éabc"), "éabc");
        assert_eq!(last4("ééé"), "0000");
    }

    #[test]
    fn test_mask_never_reveals_full_number() {
        assert_eq!(mask("4242424242424242"), "****-****-****-4242");
        assert_eq!(mask("42"), "****");
        assert_eq!(mask("4242424242424éabc"), "****-****-****-éabc");
    }
}
