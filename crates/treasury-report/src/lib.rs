//! Console report for Treasury Fiscal Data
//!
//! This crate turns client records into human-readable text sections and runs
//! the fixed report sequence used by the `bessent` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod driver;
pub mod format;
pub mod sections;

pub use driver::{run_report, ReportSummary, REPORT_CURRENCIES};
pub use format::{format_amount, format_currency};
