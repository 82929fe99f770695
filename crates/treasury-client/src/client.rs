//! TreasuryClient - typed queries over the Fiscal Data API
//!
//! Each method validates its parameters, builds a [`FiscalRequest`], sends it
//! through the [`Transport`], and reshapes the `data` rows into records.
//! Validation failures are reported before anything touches the network.
//!
//! # Example
//!
//! ```rust,no_run
//! use treasury_client::{ClientConfig, TreasuryClient};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TreasuryClient::new(ClientConfig::default())?;
//!
//!     for rate in client.daily_treasury_rates(None, Some(5)).await? {
//!         println!("{} {}: {}%", rate.date, rate.maturity, rate.rate);
//!     }
//!
//!     Ok(())
//! }
//! ```

use crate::config::ClientConfig;
use crate::envelope::Envelope;
use crate::records::{DebtRecord, ExchangeRateRecord, RateRecord, StatementRecord};
use crate::transport::{Dataset, FiscalRequest, Filter, FilterOp, HttpTransport, Transport};
use crate::{Error, Result};
use chrono::NaiveDate;
use std::cmp::Reverse;
use tracing::debug;

/// Rows requested for daily rates when no limit is given
pub const DEFAULT_RATES_LIMIT: u32 = 100;

/// Page size for debt to the penny
pub const DEBT_PAGE_SIZE: u32 = 1000;

/// Page size for the Monthly Treasury Statement
pub const STATEMENT_PAGE_SIZE: u32 = 100;

/// Page size for rates of exchange
pub const EXCHANGE_PAGE_SIZE: u32 = 200;

const PAGE_SIZE: &str = "page[size]";
const SORT_NEWEST_FIRST: &str = "-record_date";

/// Client for the Treasury Fiscal Data API
///
/// Generic over its [`Transport`] so tests can substitute a mock. Holds no
/// state between calls.
#[derive(Debug, Clone)]
pub struct TreasuryClient<T = HttpTransport> {
    transport: T,
}

impl TreasuryClient<HttpTransport> {
    /// Create a client backed by reqwest
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }
}

impl<T: Transport> TreasuryClient<T> {
    /// Create a client over an existing transport
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Get the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Daily Treasury rates, one record per maturity per date
    ///
    /// With no `date`, the most recent dates are returned. Records are sorted
    /// by ascending maturity, newest date first within a maturity. `limit`
    /// caps the number of date rows and is passed through as-is, so the
    /// server enforces its own maximum.
    pub async fn daily_treasury_rates(
        &self,
        date: Option<NaiveDate>,
        limit: Option<u32>,
    ) -> Result<Vec<RateRecord>> {
        let limit = limit.unwrap_or(DEFAULT_RATES_LIMIT);
        if limit == 0 {
            return Err(Error::InvalidInput("limit must be at least 1".to_string()));
        }

        let request = FiscalRequest::new(Dataset::AvgInterestRates)
            .param(PAGE_SIZE, limit)
            .param("sort", SORT_NEWEST_FIRST)
            .filter(Filter::new().clause_opt("record_date", FilterOp::Eq, date));

        let envelope = self.fetch(&request).await?;

        let mut records = Vec::new();
        for row in &envelope.data {
            records.extend(RateRecord::from_row(row)?);
        }
        records.sort_by_key(|r| (r.maturity, Reverse(r.date)));

        debug!(rows = envelope.data.len(), records = records.len(), "parsed treasury rates");
        Ok(records)
    }

    /// Total public debt outstanding, oldest date first
    ///
    /// Either bound may be omitted; with neither, the server's default range
    /// applies. Rows outside the requested bounds are dropped.
    pub async fn debt_to_penny(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<DebtRecord>> {
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(Error::InvalidInput(format!(
                    "start date {} is after end date {}",
                    start, end
                )));
            }
        }

        let request = FiscalRequest::new(Dataset::DebtToPenny)
            .param(PAGE_SIZE, DEBT_PAGE_SIZE)
            .param("sort", SORT_NEWEST_FIRST)
            .filter(
                Filter::new()
                    .clause_opt("record_date", FilterOp::Gte, start_date)
                    .clause_opt("record_date", FilterOp::Lte, end_date),
            );

        let envelope = self.fetch(&request).await?;

        let mut records = envelope
            .data
            .iter()
            .map(DebtRecord::from_row)
            .collect::<Result<Vec<_>>>()?;
        records.retain(|r| {
            start_date.map_or(true, |start| r.record_date >= start)
                && end_date.map_or(true, |end| r.record_date <= end)
        });
        records.sort_by_key(|r| r.record_date);

        debug!(records = records.len(), "parsed debt data");
        Ok(records)
    }

    /// Monthly Treasury Statement line items for a calendar month
    ///
    /// An unpublished period yields an empty vector.
    pub async fn monthly_treasury_statement(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Vec<StatementRecord>> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidInput(format!("month must be 1-12, got {}", month)));
        }
        if !(1000..=9999).contains(&year) {
            return Err(Error::InvalidInput(format!("year must have four digits, got {}", year)));
        }

        let request = FiscalRequest::new(Dataset::MtsTable1)
            .param(PAGE_SIZE, STATEMENT_PAGE_SIZE)
            .filter(
                Filter::new()
                    .clause("record_calendar_year", FilterOp::Eq, year)
                    .clause("record_calendar_month", FilterOp::Eq, format!("{:02}", month)),
            );

        let envelope = self.fetch(&request).await?;

        let records = envelope
            .data
            .iter()
            .map(|row| StatementRecord::from_row(row, year, month))
            .collect::<Result<Vec<_>>>()?;

        debug!(year, month, records = records.len(), "parsed treasury statement");
        Ok(records)
    }

    /// Rates of exchange for a three-letter currency code, newest first
    ///
    /// Only rows for the requested currency (and date, when given) are kept.
    pub async fn exchange_rates(
        &self,
        currency: &str,
        date: Option<NaiveDate>,
    ) -> Result<Vec<ExchangeRateRecord>> {
        let code = normalize_currency(currency)?;

        let request = FiscalRequest::new(Dataset::RatesOfExchange)
            .param(PAGE_SIZE, EXCHANGE_PAGE_SIZE)
            .param("sort", SORT_NEWEST_FIRST)
            .filter(
                Filter::new()
                    .clause("currency", FilterOp::Eq, &code)
                    .clause_opt("record_date", FilterOp::Eq, date),
            );

        let envelope = self.fetch(&request).await?;

        let mut records = envelope
            .data
            .iter()
            .map(|row| ExchangeRateRecord::from_row(row, &code))
            .collect::<Result<Vec<_>>>()?;
        records.retain(|r| {
            r.currency.eq_ignore_ascii_case(&code) && date.map_or(true, |d| r.record_date == d)
        });

        debug!(currency = %code, records = records.len(), "parsed exchange rates");
        Ok(records)
    }

    async fn fetch(&self, request: &FiscalRequest) -> Result<Envelope> {
        let body = self.transport.get(request).await?;
        Envelope::parse(&body)
    }
}

/// Validate and upper-case an ISO 4217 code
fn normalize_currency(currency: &str) -> Result<String> {
    let code = currency.trim();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(Error::InvalidInput(format!(
            "currency must be a three-letter ISO code, got {:?}",
            currency
        )));
    }
    Ok(code.to_ascii_uppercase())
}
