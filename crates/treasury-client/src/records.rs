//! Record types produced by the client
//!
//! Records are built fresh from each response and never mutated. They carry
//! no identity beyond their natural keys (date, maturity, currency).

use crate::envelope::Row;
use crate::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Maturity
// =============================================================================

/// Treasury security maturity on the published yield curve
///
/// Variants are declared shortest first, so the derived ordering is ascending
/// maturity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Maturity {
    /// 1 month
    OneMonth,
    /// 3 months
    ThreeMonth,
    /// 6 months
    SixMonth,
    /// 1 year
    OneYear,
    /// 2 years
    TwoYear,
    /// 5 years
    FiveYear,
    /// 10 years
    TenYear,
    /// 30 years
    ThirtyYear,
}

impl Maturity {
    /// Every maturity, shortest first
    pub const ALL: [Maturity; 8] = [
        Maturity::OneMonth,
        Maturity::ThreeMonth,
        Maturity::SixMonth,
        Maturity::OneYear,
        Maturity::TwoYear,
        Maturity::FiveYear,
        Maturity::TenYear,
        Maturity::ThirtyYear,
    ];

    /// Column name in the response rows
    pub fn column(&self) -> &'static str {
        match self {
            Maturity::OneMonth => "1_month",
            Maturity::ThreeMonth => "3_month",
            Maturity::SixMonth => "6_month",
            Maturity::OneYear => "1_year",
            Maturity::TwoYear => "2_year",
            Maturity::FiveYear => "5_year",
            Maturity::TenYear => "10_year",
            Maturity::ThirtyYear => "30_year",
        }
    }

    /// Display label, e.g. "10 Year"
    pub fn label(&self) -> &'static str {
        match self {
            Maturity::OneMonth => "1 Month",
            Maturity::ThreeMonth => "3 Month",
            Maturity::SixMonth => "6 Month",
            Maturity::OneYear => "1 Year",
            Maturity::TwoYear => "2 Year",
            Maturity::FiveYear => "5 Year",
            Maturity::TenYear => "10 Year",
            Maturity::ThirtyYear => "30 Year",
        }
    }
}

impl fmt::Display for Maturity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Rates
// =============================================================================

/// Yield for one maturity on one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateRecord {
    /// Record date
    pub date: NaiveDate,
    /// Security maturity
    pub maturity: Maturity,
    /// Annualized yield, in percent
    pub rate: Decimal,
}

impl RateRecord {
    /// Expand one response row into a record per published maturity
    ///
    /// Records come out in ascending maturity order. Columns that are absent
    /// or null are skipped.
    pub fn from_row(row: &Row) -> Result<Vec<RateRecord>> {
        let date = row.date("record_date")?;
        let mut records = Vec::new();

        for maturity in Maturity::ALL {
            if let Some(rate) = row.decimal_opt(maturity.column())? {
                records.push(RateRecord { date, maturity, rate });
            }
        }

        Ok(records)
    }
}

// =============================================================================
// Debt
// =============================================================================

/// Total public debt outstanding on a date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebtRecord {
    /// Record date
    pub record_date: NaiveDate,
    /// Total public debt outstanding, in dollars
    pub total_public_debt: Decimal,
    /// Debt held by the public
    pub debt_held_public: Option<Decimal>,
    /// Intragovernmental holdings
    pub intragov_holdings: Option<Decimal>,
}

impl DebtRecord {
    /// Build a record from a response row
    pub fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            record_date: row.date("record_date")?,
            total_public_debt: row.decimal("tot_pub_debt_out_amt")?,
            debt_held_public: row.decimal_opt("debt_held_public_amt")?,
            intragov_holdings: row.decimal_opt("intragov_hold_amt")?,
        })
    }
}

// =============================================================================
// Monthly Treasury Statement
// =============================================================================

const STATEMENT_TYPED_FIELDS: [&str; 6] = [
    "record_date",
    "record_calendar_year",
    "record_calendar_month",
    "classification_desc",
    "current_month_net_amt",
    "fiscal_year_to_date_net_amt",
];

/// One line item of the Monthly Treasury Statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementRecord {
    /// Record date (end of the reported month)
    pub record_date: NaiveDate,
    /// Calendar year of the period
    pub year: i32,
    /// Calendar month of the period, 1-12
    pub month: u32,
    /// Line item description, e.g. "Total Receipts"
    pub classification: Option<String>,
    /// Net amount for the month
    pub current_month_net: Option<Decimal>,
    /// Net amount for the fiscal year to date
    pub fiscal_year_to_date_net: Option<Decimal>,
    /// Remaining named summary fields, raw
    pub fields: BTreeMap<String, String>,
}

impl StatementRecord {
    /// Build a record from a response row
    ///
    /// `year` and `month` are used when the row does not carry its own
    /// calendar period.
    pub fn from_row(row: &Row, year: i32, month: u32) -> Result<Self> {
        let fields = row
            .fields()
            .filter(|(key, _)| !STATEMENT_TYPED_FIELDS.contains(key))
            .map(|(key, value)| (key.to_string(), value))
            .collect();

        Ok(Self {
            record_date: row.date("record_date")?,
            year: row.integer_opt("record_calendar_year")?.unwrap_or(year),
            month: row.integer_opt("record_calendar_month")?.unwrap_or(month),
            classification: row.text("classification_desc"),
            current_month_net: row.decimal_opt("current_month_net_amt")?,
            fiscal_year_to_date_net: row.decimal_opt("fiscal_year_to_date_net_amt")?,
            fields,
        })
    }
}

// =============================================================================
// Exchange rates
// =============================================================================

/// Treasury reporting rate of exchange for one currency on one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangeRateRecord {
    /// Currency, as reported
    pub currency: String,
    /// Record date
    pub record_date: NaiveDate,
    /// Units of currency per U.S. dollar
    pub exchange_rate: Decimal,
    /// Country or country-currency description
    pub country: Option<String>,
}

impl ExchangeRateRecord {
    /// Build a record from a response row
    ///
    /// Falls back to the requested code when the row has no `currency`.
    pub fn from_row(row: &Row, requested: &str) -> Result<Self> {
        Ok(Self {
            currency: row.text("currency").unwrap_or_else(|| requested.to_string()),
            record_date: row.date("record_date")?,
            exchange_rate: row.decimal("exchange_rate")?,
            country: row.text("country").or_else(|| row.text("country_currency_desc")),
        })
    }
}
