//! Treasury Fiscal Data client library
//!
//! This crate provides a small typed client for the public U.S. Treasury
//! Fiscal Data API: average interest (yield curve) rates, debt to the penny,
//! the Monthly Treasury Statement, and rates of exchange.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod envelope;
pub mod records;
pub mod transport;

pub use client::TreasuryClient;
pub use config::ClientConfig;
pub use records::{DebtRecord, ExchangeRateRecord, Maturity, RateRecord, StatementRecord};
pub use transport::{Dataset, FiscalRequest, HttpTransport, Transport};

/// Result type for Treasury API operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Treasury API operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Connection, timeout or body read failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response from the server
    #[error("HTTP error ({status}): {message}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// Unexpected response shape or field value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Parameter rejected before any request was made
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

impl Error {
    /// Check whether the error was raised by parameter validation
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }

    /// HTTP status code, if the server answered with one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
