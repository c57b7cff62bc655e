//! Amount formatting in en-IN conventions
//!
//! Amounts are stored as integers in the currency's minor unit (paise, cents)
//! and divided by 100 for display. Digits use Indian grouping: the last three
//! digits form one group, every group above it has two (`12,34,567.89`).

use tracing::debug;

use crate::types::{BookdeskError, Result};

pub const DEFAULT_CURRENCY: &str = "INR";

/// Format a minor-unit amount for display. Never fails.
///
/// Absent amounts are 0, absent or blank codes are INR. A code the formatter
/// rejects falls back to `"<CODE> <value>"`.
pub fn format_amount(minor_units: Option<f64>, currency: Option<&str>) -> String {
    let value = minor_units.unwrap_or(0.0) / 100.0;
    let code = currency
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CURRENCY);

    match format_currency(value, code) {
        Ok(formatted) => formatted,
        Err(e) => {
            debug!(currency = code, error = %e, "falling back to plain amount");
            format!("{} {}", code, value)
        }
    }
}

/// Format a major-unit value as an en-IN currency string.
///
/// The code must be three ASCII letters (any case). Codes without a known
/// symbol are printed before the number.
pub fn format_currency(value: f64, code: &str) -> Result<String> {
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(BookdeskError::Format(format!(
            "invalid currency code '{}'",
            code
        )));
    }
    if !value.is_finite() {
        return Err(BookdeskError::Format(format!("non-finite amount {}", value)));
    }

    let code = code.to_ascii_uppercase();
    let digits = fraction_digits(&code);
    let scale = 10u128.pow(digits);
    let scaled = (value.abs() * scale as f64).round() as u128;
    let whole = scaled / scale;
    let fraction = scaled % scale;

    let mut out = String::new();
    if value < 0.0 && scaled != 0 {
        out.push('-');
    }
    match symbol(&code) {
        Some(sym) => out.push_str(sym),
        None => {
            out.push_str(&code);
            out.push(' ');
        }
    }
    out.push_str(&group_indian(&whole.to_string()));
    if digits > 0 {
        out.push_str(&format!(".{:0width$}", fraction, width = digits as usize));
    }
    Ok(out)
}

fn symbol(code: &str) -> Option<&'static str> {
    match code {
        "INR" => Some("₹"),
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        "AUD" => Some("A$"),
        "CAD" => Some("CA$"),
        "CNY" => Some("CN¥"),
        "HKD" => Some("HK$"),
        "NZD" => Some("NZ$"),
        _ => None,
    }
}

fn fraction_digits(code: &str) -> u32 {
    match code {
        "JPY" | "KRW" | "VND" | "CLP" => 0,
        "BHD" | "KWD" | "OMR" | "JOD" | "TND" => 3,
        _ => 2,
    }
}

/// Insert en-IN group separators into a run of ASCII digits
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
