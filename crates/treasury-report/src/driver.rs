//! Fixed report sequence
//!
//! Runs latest rates, the past week of debt, the current month's statement,
//! and four exchange rates, in that order. Each call is isolated: a failing
//! series is reported and counted, and the remaining series still run.

use crate::sections::{
    render_debt, render_exchange_header, render_exchange_line, render_rates, render_statement,
};
use chrono::{Datelike, Days, NaiveDate};
use std::io::{self, Write};
use tracing::warn;
use treasury_client::{Transport, TreasuryClient};

/// Currencies quoted in the exchange rate section
pub const REPORT_CURRENCIES: [&str; 4] = ["EUR", "GBP", "JPY", "CAD"];

/// Date rows requested for the rates section
pub const REPORT_RATES_LIMIT: u32 = 5;

/// Days of debt history shown
pub const REPORT_DEBT_DAYS: u64 = 7;

/// Public API documentation
pub const API_DOCS_URL: &str = "https://fiscaldata.treasury.gov/api-documentation/";

/// Outcome of a report run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    /// One message per failed call
    pub failures: Vec<String>,
}

impl ReportSummary {
    /// Check whether every call succeeded
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(
        &mut self,
        out: &mut impl Write,
        series: &str,
        err: &treasury_client::Error,
    ) -> io::Result<()> {
        warn!(series, error = %err, "report section failed");
        writeln!(out, "Error fetching {}: {}", series, err)?;
        self.failures.push(format!("{}: {}", series, err));
        Ok(())
    }
}

/// Run the full report against `client`, as of `today`
///
/// Output errors abort the run; request errors do not.
pub async fn run_report<T, W>(
    client: &TreasuryClient<T>,
    today: NaiveDate,
    out: &mut W,
) -> io::Result<ReportSummary>
where
    T: Transport,
    W: Write,
{
    let mut summary = ReportSummary::default();

    writeln!(out, "Bessent - Treasury API Client")?;
    writeln!(out, "===============================")?;

    writeln!(out, "\n1. Fetching latest Treasury rates...")?;
    match client.daily_treasury_rates(None, Some(REPORT_RATES_LIMIT)).await {
        Ok(records) => render_rates(out, &records)?,
        Err(err) => summary.record(out, "treasury rates", &err)?,
    }

    writeln!(out, "\n2. Fetching recent debt data...")?;
    let last_week = today.checked_sub_days(Days::new(REPORT_DEBT_DAYS)).unwrap_or(today);
    match client.debt_to_penny(Some(last_week), Some(today)).await {
        Ok(records) => render_debt(out, &records)?,
        Err(err) => summary.record(out, "debt data", &err)?,
    }

    writeln!(out, "\n3. Fetching Monthly Treasury Statement...")?;
    let (year, month) = (today.year(), today.month());
    match client.monthly_treasury_statement(year, month).await {
        Ok(records) => render_statement(out, year, month, &records)?,
        Err(err) => summary.record(out, "treasury statement", &err)?,
    }

    writeln!(out, "\n4. Fetching exchange rates...")?;
    render_exchange_header(out)?;
    for currency in REPORT_CURRENCIES {
        match client.exchange_rates(currency, None).await {
            Ok(records) => render_exchange_line(out, currency, &records)?,
            Err(err) => summary.record(out, &format!("{} exchange rate", currency), &err)?,
        }
    }

    writeln!(out, "\n{}", "=".repeat(crate::format::RULE_WIDTH))?;
    writeln!(out, "API Documentation: {}", API_DOCS_URL)?;
    writeln!(out, "{}", "=".repeat(crate::format::RULE_WIDTH))?;

    Ok(summary)
}
