//! Money and banner formatting

use rust_decimal::Decimal;
use std::io::{self, Write};
use treasury_client::envelope::parse_decimal;

/// Width of section rules
pub const RULE_WIDTH: usize = 60;

/// Format a raw amount string as dollars, e.g. `"$36,214,312,845,129.55"`
///
/// Input that is not a number is returned unchanged.
pub fn format_currency(amount: &str) -> String {
    match parse_decimal(amount) {
        Ok(value) => format_amount(value),
        Err(_) => amount.to_string(),
    }
}

/// Format a decimal as dollars with thousands separators and two places
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };

    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!("{}${}.{}", sign, group_thousands(whole), cents)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Write a section banner
pub fn write_banner<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out)?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", rule)
}
