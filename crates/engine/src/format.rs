//! Money presentation. Aggregation stays full-precision; only this layer
//! rounds, to two decimals.
use rust_decimal::Decimal;

fn symbol(currency: &str) -> Option<&'static str> {
    match currency {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "INR" => Some("₹"),
        _ => None,
    }
}

/// Formats an amount for display: two decimals, the currency symbol when
/// one is known and otherwise the code as a prefix, with a leading minus
/// for negative values.
///
/// # Examples
///
/// ```rust
/// use rust_decimal::Decimal;
///
/// assert_eq!(engine::signed_amount(Decimal::new(4000, 2), "USD"), "$40.00");
/// assert_eq!(engine::signed_amount(Decimal::new(-2550, 2), "USD"), "-$25.50");
/// assert_eq!(engine::signed_amount(Decimal::new(1200, 2), "CHF"), "CHF 12.00");
/// ```
#[must_use]
pub fn signed_amount(amount: Decimal, currency: &str) -> String {
    let rounded = amount.round_dp(2);
    let magnitude = rounded.abs();
    let body = match symbol(currency) {
        Some(symbol) => format!("{symbol}{magnitude:.2}"),
        None => format!("{currency} {magnitude:.2}"),
    };
    if rounded < Decimal::ZERO {
        format!("-{body}")
    } else {
        body
    }
}
