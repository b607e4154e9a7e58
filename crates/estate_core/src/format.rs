//! Display formatting shared by popups and views.

use num_format::{Locale, ToFormattedString};

/// Formats a price as US dollars with thousands separators.
///
/// Whole amounts render without decimals (`$1,200,000`); fractional amounts
/// keep up to two significant cents (`$950.5`, `$12.25`).
pub fn format_price(price: f64) -> String {
    if !price.is_finite() {
        return format!("${price}");
    }

    let sign = if price < 0.0 { "-" } else { "" };
    let cents = (price.abs() * 100.0).round();
    if cents >= u128::MAX as f64 {
        // Past u128 cents an f64 holds no fractional part anyway.
        let digits = format!("{:.0}", price.abs().trunc());
        return format!("{sign}${}", group_thousands(&digits));
    }

    let cents = cents as u128;
    let whole = (cents / 100).to_formatted_string(&Locale::en);
    let fraction = cents % 100;

    if fraction == 0 {
        return format!("{sign}${whole}");
    }
    let fraction = format!("{fraction:02}");
    format!("{sign}${whole}.{}", fraction.trim_end_matches('0'))
}

fn group_thousands(digits: &str) -> String {
    let separator = Locale::en.separator();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(digit);
    }
    out
}

/// Formats one coordinate with the fixed six-decimal precision used by
/// detail views.
pub fn format_coordinate(value: f64) -> String {
    format!("{value:.6}")
}
