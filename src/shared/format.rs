//! Display formatting helpers: currency amounts and dates.

use chrono::{DateTime, Datelike, Local, NaiveDate};

pub const DEFAULT_CURRENCY: &str = "USD";

/// Currencies offered in onboarding and settings, with their symbols
pub const CURRENCIES: &[(&str, &str)] = &[
    ("USD", "$"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("ZAR", "R"),
    ("CAD", "C$"),
    ("AUD", "A$"),
    ("BWP", "P"),
    ("ZMW", "K"),
    ("NGN", "₦"),
    ("KES", "KSh"),
    ("GHS", "₵"),
    ("UGX", "USh"),
    ("TZS", "TSh"),
    ("ETB", "Br"),
    ("RWF", "RF"),
    ("MWK", "MK"),
    ("BRL", "R$"),
    ("MXN", "$"),
    ("PHP", "₱"),
    ("INR", "₹"),
    ("JPY", "¥"),
];

/// Symbol for an ISO currency code; unknown codes fall back to `$`.
pub fn currency_symbol(code: &str) -> &'static str {
    let code = code.trim();
    CURRENCIES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, symbol)| *symbol)
        .unwrap_or("$")
}

/// `symbol + en-US grouped amount` with exactly two decimals.
pub fn format_currency(amount: f64, code: &str) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    format!("{}{}", currency_symbol(code), group_thousands(amount))
}

fn group_thousands(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// "Jan 5, 2025"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Format a `YYYY-MM-DD` or RFC 3339 string, `None` if it parses as neither.
pub fn format_date_str(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(format_date(date));
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| format_date(dt.date_naive()))
}

/// Current month as `YYYY-MM`
pub fn current_month() -> String {
    Local::now().format("%Y-%m").to_string()
}

/// Today as `YYYY-MM-DD`
pub fn current_date() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// First and last day of a `YYYY-MM` month
pub fn date_range(month: &str) -> Option<(NaiveDate, NaiveDate)> {
    let (year, month) = month.trim().split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let end = next.pred_opt()?;
    debug_assert_eq!(end.month(), start.month());
    Some((start, end))
}
