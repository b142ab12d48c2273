//! # Cost Normalization
//!
//! The single input boundary for prices. Catalog data reaches the cart either
//! as a number (`5.0`) or as display text (`"$5.00"`); both are normalized
//! here, once, into a non-negative [`Money`]. Nothing downstream re-parses.
//!
//! ## Normalization Rules
//! ```text
//! ┌──────────────────────┬────────────┬──────────────────────────────────┐
//! │ Input                │ Result     │ Why                              │
//! ├──────────────────────┼────────────┼──────────────────────────────────┤
//! │ "$5.00"              │ 5.00       │ one leading symbol stripped      │
//! │ "  $ 3.33 "          │ 3.33       │ surrounding space ignored        │
//! │ "12.5 each"          │ 12.50      │ longest numeric prefix           │
//! │ ".75"                │ 0.75       │ bare fraction                    │
//! │ "$$5"                │ 0.00       │ only ONE symbol is stripped      │
//! │ "free" / ""          │ 0.00       │ nothing parseable                │
//! │ "-2.00" / -2.0       │ 0.00       │ costs are never negative         │
//! │ NaN / ∞              │ 0.00       │ not a price                      │
//! └──────────────────────┴────────────┴──────────────────────────────────┘
//! ```
//!
//! Normalization never fails. Digits past micro precision are rounded half
//! away from zero on the seventh fractional digit.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::money::{Money, CURRENCY_SYMBOL, MICROS_PER_UNIT};

/// A cost as it arrives from the catalog, before normalization.
///
/// Deserializes from either a JSON number or a JSON string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum CostInput {
    /// A plain numeric amount in currency units, e.g. `5.0`.
    Amount(f64),
    /// Currency-formatted text, e.g. `"$5.00"`.
    Text(String),
}

impl CostInput {
    /// Normalizes this input into a non-negative `Money`.
    ///
    /// ```rust
    /// use nursery_core::cost::CostInput;
    ///
    /// assert_eq!(CostInput::from("$5.00").normalize().to_decimal_string(), "5.00");
    /// assert_eq!(CostInput::from(3.33).normalize().to_decimal_string(), "3.33");
    /// assert!(CostInput::from("n/a").normalize().is_zero());
    /// ```
    pub fn normalize(&self) -> Money {
        match self {
            CostInput::Amount(amount) => money_from_amount(*amount),
            CostInput::Text(text) => parse_cost(text),
        }
    }
}

impl From<f64> for CostInput {
    fn from(amount: f64) -> Self {
        CostInput::Amount(amount)
    }
}

impl From<&str> for CostInput {
    fn from(text: &str) -> Self {
        CostInput::Text(text.to_string())
    }
}

impl From<String> for CostInput {
    fn from(text: String) -> Self {
        CostInput::Text(text)
    }
}

/// Parses currency-formatted text into a non-negative `Money`.
///
/// Strips a single leading `$`, then reads the longest leading decimal
/// number. Anything unparseable or negative becomes zero.
pub fn parse_cost(text: &str) -> Money {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix(CURRENCY_SYMBOL)
        .unwrap_or(trimmed)
        .trim_start();

    match parse_decimal_prefix(body) {
        Some(micros) if micros >= 0 => Money::from_micros(micros),
        Some(_) => {
            debug!(input = %text, "negative cost normalized to zero");
            Money::zero()
        }
        None => {
            debug!(input = %text, "unparseable cost normalized to zero");
            Money::zero()
        }
    }
}

/// Converts a numeric amount (in currency units) into a non-negative `Money`.
pub fn money_from_amount(amount: f64) -> Money {
    if !amount.is_finite() || amount < 0.0 {
        debug!(amount, "invalid numeric cost normalized to zero");
        return Money::zero();
    }
    // `as` saturates at i64::MAX for out-of-range floats
    Money::from_micros((amount * MICROS_PER_UNIT as f64).round() as i64)
}

/// Reads an optionally signed decimal number from the start of `s` and
/// returns it in micros. `None` when no digit is found.
fn parse_decimal_prefix(s: &str) -> Option<i64> {
    let bytes = s.as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let mut digits = 0usize;
    let mut whole: i64 = 0;
    while let Some(&b) = bytes.get(pos).filter(|b| b.is_ascii_digit()) {
        whole = whole
            .saturating_mul(10)
            .saturating_add(i64::from(b - b'0'));
        digits += 1;
        pos += 1;
    }

    let mut fraction: i64 = 0;
    let mut round_up = false;
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        let mut place = MICROS_PER_UNIT / 10;
        let mut seen = 0usize;
        while let Some(&b) = bytes.get(pos).filter(|b| b.is_ascii_digit()) {
            let digit = i64::from(b - b'0');
            if place > 0 {
                fraction += digit * place;
                place /= 10;
            } else if seen == 6 {
                round_up = digit >= 5;
            }
            seen += 1;
            digits += 1;
            pos += 1;
        }
    }

    if digits == 0 {
        return None;
    }

    let magnitude = whole
        .saturating_mul(MICROS_PER_UNIT)
        .saturating_add(fraction)
        .saturating_add(i64::from(round_up));

    Some(if negative { -magnitude } else { magnitude })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(text: &str) -> i64 {
        parse_cost(text).round_to_cents()
    }

    #[test]
    fn test_parse_currency_text() {
        assert_eq!(cents("$5.00"), 500);
        assert_eq!(cents("$3.33"), 333);
        assert_eq!(cents("12.50"), 1250);
        assert_eq!(cents("  $ 7.1 "), 710);
        assert_eq!(cents("$0.99"), 99);
    }

    #[test]
    fn test_parse_uses_numeric_prefix() {
        assert_eq!(cents("12.5 each"), 1250);
        assert_eq!(cents("1,299.00"), 100);
        assert_eq!(cents(".75"), 75);
        assert_eq!(cents("5."), 500);
    }

    #[test]
    fn test_parse_malformed_is_zero() {
        assert!(parse_cost("").is_zero());
        assert!(parse_cost("free").is_zero());
        assert!(parse_cost("$").is_zero());
        assert!(parse_cost("$$5.00").is_zero());
        assert!(parse_cost(".").is_zero());
        assert!(parse_cost("-").is_zero());
    }

    #[test]
    fn test_parse_negative_is_zero() {
        assert!(parse_cost("-2.00").is_zero());
        assert!(parse_cost("$-2.00").is_zero());
    }

    #[test]
    fn test_parse_keeps_sub_cent_precision() {
        assert_eq!(parse_cost("$0.005").micros(), 5_000);
        assert_eq!(parse_cost("1.2345675").micros(), 1_234_568);
        assert_eq!(parse_cost("1.2345674").micros(), 1_234_567);
    }

    #[test]
    fn test_parse_huge_value_saturates() {
        assert_eq!(parse_cost("99999999999999999999999"), Money::MAX);
    }

    #[test]
    fn test_numeric_amounts() {
        assert_eq!(money_from_amount(5.0).round_to_cents(), 500);
        assert_eq!(money_from_amount(3.33).round_to_cents(), 333);
        assert!(money_from_amount(-1.0).is_zero());
        assert!(money_from_amount(f64::NAN).is_zero());
        assert!(money_from_amount(f64::INFINITY).is_zero());
    }

    #[test]
    fn test_cost_input_deserializes_number_or_text() {
        let number: CostInput = serde_json::from_str("4.5").unwrap();
        assert_eq!(number, CostInput::Amount(4.5));

        let text: CostInput = serde_json::from_str("\"$4.50\"").unwrap();
        assert_eq!(text, CostInput::Text("$4.50".to_string()));

        assert_eq!(number.normalize(), text.normalize());
    }
}
