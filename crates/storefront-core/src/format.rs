//! # Currency Formatting
//!
//! Renders amounts for display. Formatting is pluggable so a storefront can
//! swap in locale-aware output without touching pricing.
//!
//! Amounts are always in the currency's minor unit: cents for USD, yen for
//! JPY (which has no decimals).

use crate::money::Money;

/// Turns an amount into display text for a currency.
pub trait CurrencyFormatter: Send + Sync {
    fn format(&self, amount: Money, currency_code: &str) -> String;
}

/// Symbol-prefixed, comma-grouped formatting.
///
/// | Code | Output      |
/// |------|-------------|
/// | USD  | `$1,234.56` |
/// | EUR  | `€1,234.56` |
/// | GBP  | `£1,234.56` |
/// | JPY  | `¥1,234`    |
/// | CAD  | `CA$1,234.56` |
/// | AUD  | `A$1,234.56` |
/// | other | `CHF 1,234.56` |
///
/// ```rust
/// use storefront_core::format::{CurrencyFormatter, StandardFormatter};
/// use storefront_core::money::Money;
///
/// let f = StandardFormatter;
/// assert_eq!(f.format(Money::from_cents(123_456), "USD"), "$1,234.56");
/// assert_eq!(f.format(Money::from_cents(-550), "USD"), "-$5.50");
/// assert_eq!(f.format(Money::from_cents(1200), "JPY"), "¥1,200");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFormatter;

impl StandardFormatter {
    /// Display symbol and number of decimals for a known code.
    fn lookup(currency_code: &str) -> Option<(&'static str, u32)> {
        match currency_code {
            "USD" => Some(("$", 2)),
            "EUR" => Some(("€", 2)),
            "GBP" => Some(("£", 2)),
            "JPY" => Some(("¥", 0)),
            "CAD" => Some(("CA$", 2)),
            "AUD" => Some(("A$", 2)),
            _ => None,
        }
    }
}

impl CurrencyFormatter for StandardFormatter {
    fn format(&self, amount: Money, currency_code: &str) -> String {
        let cents = amount.cents();
        let sign = if cents < 0 { "-" } else { "" };

        match Self::lookup(currency_code) {
            Some((symbol, decimals)) => {
                format!("{}{}{}", sign, symbol, format_number(cents, decimals))
            }
            None => format!("{}{} {}", sign, currency_code, format_number(cents, 2)),
        }
    }
}

/// Absolute value of `minor_units` with thousands separators and `decimals`
/// fraction digits.
fn format_number(minor_units: i64, decimals: u32) -> String {
    let abs = minor_units.unsigned_abs();
    let divisor = 10_u64.pow(decimals);
    let whole = group_thousands(abs / divisor);

    if decimals == 0 {
        whole
    } else {
        format!(
            "{}.{:0width$}",
            whole,
            abs % divisor,
            width = decimals as usize
        )
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(cents: i64, code: &str) -> String {
        StandardFormatter.format(Money::from_cents(cents), code)
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(fmt(1234, "USD"), "$12.34");
        assert_eq!(fmt(100, "USD"), "$1.00");
        assert_eq!(fmt(1, "USD"), "$0.01");
        assert_eq!(fmt(0, "USD"), "$0.00");
        assert_eq!(fmt(123_456_789, "USD"), "$1,234,567.89");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(fmt(-1234, "USD"), "-$12.34");
        assert_eq!(fmt(-5, "EUR"), "-€0.05");
    }

    #[test]
    fn test_format_other_symbols() {
        assert_eq!(fmt(10_000, "EUR"), "€100.00");
        assert_eq!(fmt(999, "GBP"), "£9.99");
        assert_eq!(fmt(250_000, "CAD"), "CA$2,500.00");
        assert_eq!(fmt(1, "AUD"), "A$0.01");
    }

    #[test]
    fn test_format_zero_decimal_currency() {
        assert_eq!(fmt(1200, "JPY"), "¥1,200");
        assert_eq!(fmt(5, "JPY"), "¥5");
    }

    #[test]
    fn test_format_unknown_code() {
        assert_eq!(fmt(123_456, "CHF"), "CHF 1,234.56");
        assert_eq!(fmt(-50, "XYZ"), "-XYZ 0.50");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(100_000), "100,000");
        assert_eq!(group_thousands(1_000_000), "1,000,000");
    }

    #[test]
    fn test_formatter_as_trait_object() {
        let boxed: Box<dyn CurrencyFormatter> = Box::new(StandardFormatter);
        assert_eq!(boxed.format(Money::from_major(5), "USD"), "$5.00");
    }
}
