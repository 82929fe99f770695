//! Text renderers, one per data series

use crate::format::{format_amount, format_currency, write_banner};
use chrono::NaiveDate;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::io::{self, Write};
use treasury_client::{DebtRecord, ExchangeRateRecord, RateRecord, StatementRecord};

/// Most dates shown in the rates section
pub const MAX_RATE_DATES: usize = 10;

/// Most dates shown in the debt section
pub const MAX_DEBT_DATES: usize = 5;

/// Daily yield curve rates, grouped by date, newest first
pub fn render_rates<W: Write>(out: &mut W, records: &[RateRecord]) -> io::Result<()> {
    if records.is_empty() {
        return writeln!(out, "No treasury rate data available");
    }

    write_banner(out, "DAILY TREASURY YIELD CURVE RATES")?;

    let mut by_date: BTreeMap<Reverse<NaiveDate>, Vec<&RateRecord>> = BTreeMap::new();
    for record in records {
        by_date.entry(Reverse(record.date)).or_default().push(record);
    }

    for (Reverse(date), mut group) in by_date.into_iter().take(MAX_RATE_DATES) {
        group.sort_by_key(|r| r.maturity);
        writeln!(out)?;
        writeln!(out, "Date: {}", date)?;
        writeln!(out, "{}", "-".repeat(30))?;
        for record in group {
            writeln!(out, "{:12}: {}%", record.maturity.label(), record.rate)?;
        }
    }

    Ok(())
}

/// Debt to the penny, most recent dates first
pub fn render_debt<W: Write>(out: &mut W, records: &[DebtRecord]) -> io::Result<()> {
    if records.is_empty() {
        return writeln!(out, "No debt data available");
    }

    write_banner(out, "U.S. DEBT TO THE PENNY")?;

    for record in records.iter().rev().take(MAX_DEBT_DATES) {
        writeln!(out)?;
        writeln!(out, "Date: {}", record.record_date)?;
        writeln!(out, "Total Public Debt: {}", format_amount(record.total_public_debt))?;
        if let Some(held) = record.debt_held_public {
            writeln!(out, "Held by Public:    {}", format_amount(held))?;
        }
        if let Some(intragov) = record.intragov_holdings {
            writeln!(out, "Intragovernmental: {}", format_amount(intragov))?;
        }
    }

    Ok(())
}

/// First line item of the Monthly Treasury Statement for a period
pub fn render_statement<W: Write>(
    out: &mut W,
    year: i32,
    month: u32,
    records: &[StatementRecord],
) -> io::Result<()> {
    let Some(latest) = records.first() else {
        return writeln!(out, "No statement published yet for {}-{:02}", year, month);
    };

    write_banner(out, "MONTHLY TREASURY STATEMENT (Latest)")?;

    let amount = |value: Option<rust_decimal::Decimal>| {
        format_amount(value.unwrap_or_default())
    };

    writeln!(out, "Date: {}", latest.record_date)?;
    writeln!(
        out,
        "Classification: {}",
        latest.classification.as_deref().unwrap_or("N/A")
    )?;
    writeln!(out, "Current Month: {}", amount(latest.current_month_net))?;
    writeln!(out, "Fiscal YTD: {}", amount(latest.fiscal_year_to_date_net))?;

    for (name, value) in latest.fields.iter().filter(|(name, _)| name.ends_with("_amt")) {
        writeln!(out, "  {}: {}", name, format_currency(value))?;
    }

    Ok(())
}

/// Exchange rate section banner
pub fn render_exchange_header<W: Write>(out: &mut W) -> io::Result<()> {
    write_banner(out, "TREASURY EXCHANGE RATES")
}

/// Latest rate for one currency
pub fn render_exchange_line<W: Write>(
    out: &mut W,
    currency: &str,
    records: &[ExchangeRateRecord],
) -> io::Result<()> {
    match records.first() {
        Some(latest) => writeln!(
            out,
            "{}/USD: {} (as of {})",
            currency, latest.exchange_rate, latest.record_date
        ),
        None => writeln!(out, "{}/USD: no rate recorded", currency),
    }
}
