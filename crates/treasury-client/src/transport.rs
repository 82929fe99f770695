//! HTTP transport for the Fiscal Data API
//!
//! This module holds the request type, the filter syntax used by the API,
//! and the [`Transport`] seam the client talks through. [`HttpTransport`] is
//! the reqwest-backed implementation; tests substitute their own.

use crate::config::ClientConfig;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use std::collections::BTreeMap;
use tracing::debug;

// =============================================================================
// Datasets
// =============================================================================

/// Fiscal Data endpoints used by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    /// Average interest rates on Treasury securities
    AvgInterestRates,
    /// Debt to the penny
    DebtToPenny,
    /// Monthly Treasury Statement, table 1 (summary of receipts and outlays)
    MtsTable1,
    /// Treasury reporting rates of exchange
    RatesOfExchange,
}

impl Dataset {
    /// Endpoint path relative to the service root
    pub fn path(&self) -> &'static str {
        match self {
            Dataset::AvgInterestRates => "v1/accounting/od/avg_interest_rates",
            Dataset::DebtToPenny => "v2/accounting/od/debt_to_penny",
            Dataset::MtsTable1 => "v1/accounting/mts/mts_table_1",
            Dataset::RatesOfExchange => "v1/accounting/od/rates_of_exchange",
        }
    }

    /// Human-readable name used in logs and error messages
    pub fn label(&self) -> &'static str {
        match self {
            Dataset::AvgInterestRates => "treasury rates",
            Dataset::DebtToPenny => "debt data",
            Dataset::MtsTable1 => "treasury statement",
            Dataset::RatesOfExchange => "exchange rates",
        }
    }
}

// =============================================================================
// Filters
// =============================================================================

/// Comparison operator in a filter clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Equal
    Eq,
    /// Greater than or equal
    Gte,
    /// Less than or equal
    Lte,
}

impl FilterOp {
    /// Wire form of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Gte => "gte",
            FilterOp::Lte => "lte",
        }
    }
}

/// Conjunction of `field:op:value` clauses
///
/// # Examples
/// ```
/// use treasury_client::transport::{Filter, FilterOp};
///
/// let filter = Filter::new()
///     .clause("record_date", FilterOp::Gte, "2025-06-01")
///     .clause("record_date", FilterOp::Lte, "2025-06-07");
/// assert_eq!(filter.render(), "record_date:gte:2025-06-01,record_date:lte:2025-06-07");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    clauses: Vec<String>,
}

impl Filter {
    /// Create an empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clause
    pub fn clause(mut self, field: &str, op: FilterOp, value: impl std::fmt::Display) -> Self {
        self.clauses.push(format!("{}:{}:{}", field, op.as_str(), value));
        self
    }

    /// Append a clause only when a value is present
    pub fn clause_opt<V: std::fmt::Display>(self, field: &str, op: FilterOp, value: Option<V>) -> Self {
        match value {
            Some(value) => self.clause(field, op, value),
            None => self,
        }
    }

    /// Check whether the filter has no clauses
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Render as the API expects
    pub fn render(&self) -> String {
        self.clauses.join(",")
    }
}

// =============================================================================
// Request
// =============================================================================

/// A GET request against one dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiscalRequest {
    /// Target dataset
    pub dataset: Dataset,
    /// Query parameters, ordered for deterministic URLs
    pub params: BTreeMap<String, String>,
}

impl FiscalRequest {
    /// Create a request with no parameters
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            params: BTreeMap::new(),
        }
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// Set the `filter` parameter, skipping empty filters
    pub fn filter(self, filter: Filter) -> Self {
        if filter.is_empty() {
            self
        } else {
            self.param("filter", filter.render())
        }
    }

    /// Get a parameter value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Full URL for a base service root
    pub fn url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.dataset.path())
    }
}

// =============================================================================
// Transport
// =============================================================================

/// Performs a request and returns the body of a successful response
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a GET request
    ///
    /// Returns the body text for 2xx responses, [`Error::HttpStatus`] for any
    /// other status, and [`Error::Network`] when the exchange itself fails.
    async fn get(&self, request: &FiscalRequest) -> Result<String>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: ReqwestClient,
    config: ClientConfig,
}

impl HttpTransport {
    /// Create a new transport
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the transport configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, request: &FiscalRequest) -> Result<String> {
        let url = request.url(&self.config.base_url);
        debug!(%url, params = ?request.params, "GET {}", request.dataset.label());

        let mut req = self.client.get(&url).query(&request.params);
        for (key, value) in &self.config.default_headers {
            req = req.header(key, value);
        }

        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("Unknown").to_string()
            } else {
                body
            };
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.text().await?)
    }
}
