//! pt-BR presentation helpers: currency, dates, and localized amount input.

use chrono::{Datelike, NaiveDate, Weekday};

pub const BRL_SYMBOL: &str = "R$";
/// Shown in place of the balance while it is hidden.
pub const MASKED_BALANCE: &str = "R$ ******";

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Formats currency amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: f64, currency: &str) -> String;
}

/// Formats dates for presentation.
pub trait DateFormatter: Send + Sync {
    fn format_date(&self, date: NaiveDate) -> String;
}

/// `.` groups thousands, `,` separates cents.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrazilianFormatter;

impl CurrencyFormatter for BrazilianFormatter {
    fn format_amount(&self, amount: f64, currency: &str) -> String {
        let symbol = if currency.eq_ignore_ascii_case("BRL") {
            BRL_SYMBOL
        } else {
            currency
        };
        format_with_symbol(amount, symbol)
    }
}

impl DateFormatter for BrazilianFormatter {
    fn format_date(&self, date: NaiveDate) -> String {
        date.format("%d/%m/%Y").to_string()
    }
}

/// `2500.0` becomes `R$ 2.500,00`; negatives carry a leading minus.
pub fn format_brl(amount: f64) -> String {
    format_with_symbol(amount, BRL_SYMBOL)
}

fn format_with_symbol(amount: f64, symbol: &str) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents != 0 { "-" } else { "" };
    format!(
        "{sign}{symbol} {},{:02}",
        group_thousands(cents / 100),
        cents % 100
    )
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn format_date(date: NaiveDate) -> String {
    BrazilianFormatter.format_date(date)
}

pub fn month_name(month: u32) -> &'static str {
    MONTHS
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("")
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "segunda-feira",
        Weekday::Tue => "terça-feira",
        Weekday::Wed => "quarta-feira",
        Weekday::Thu => "quinta-feira",
        Weekday::Fri => "sexta-feira",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

/// Greeting line such as `segunda-feira, 21/07/2025`.
pub fn long_date(date: NaiveDate) -> String {
    format!("{}, {}", weekday_name(date.weekday()), format_date(date))
}

/// Parses amounts typed in the pt-BR currency input, e.g. `R$ 1.234,56` or `-12,5`.
///
/// Returns `None` for blank or malformed input, and for values too large for an `f64`.
pub fn parse_brl(input: &str) -> Option<f64> {
    let mut text = input.trim();
    let mut negative = false;
    if let Some(rest) = text.strip_prefix('-') {
        negative = true;
        text = rest.trim_start();
    }
    if let Some(rest) = text.strip_prefix(BRL_SYMBOL) {
        text = rest.trim_start();
    }
    if let Some(rest) = text.strip_prefix('-') {
        if negative {
            return None;
        }
        negative = true;
        text = rest.trim_start();
    }
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
        return None;
    }

    let (whole, cents) = match text.split_once(',') {
        Some((whole, cents)) if !cents.contains(',') && !cents.contains('.') => (whole, cents),
        Some(_) => return None,
        None => (text, ""),
    };
    if !valid_grouping(whole) {
        return None;
    }
    let digits = whole.replace('.', "");
    let normalized = format!(
        "{}.{}",
        if digits.is_empty() { "0" } else { digits.as_str() },
        if cents.is_empty() { "0" } else { cents }
    );
    let value: f64 = normalized.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(if negative { -value } else { value })
}

fn valid_grouping(whole: &str) -> bool {
    if !whole.contains('.') {
        return true;
    }
    let groups: Vec<&str> = whole.split('.').collect();
    let head = groups[0];
    !head.is_empty() && head.len() <= 3 && groups[1..].iter().all(|group| group.len() == 3)
}
