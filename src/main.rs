//! Bessent - Treasury API client
//!
//! Prints latest yield curve rates, the past week of debt to the penny, the
//! current Monthly Treasury Statement, and four exchange rates. Takes no
//! flags; `BESSENT_BASE_URL` and `BESSENT_TIMEOUT_SECS` override the
//! defaults, and `RUST_LOG` controls logging on stderr.

use anyhow::{bail, Context, Result};
use std::io::Write;
use tracing_subscriber::EnvFilter;
use treasury_client::{ClientConfig, TreasuryClient};
use treasury_report::run_report;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env().context("Failed to read configuration")?;
    tracing::debug!(base_url = %config.base_url, timeout = ?config.timeout, "starting report");

    let client = TreasuryClient::new(config).context("Failed to build HTTP client")?;
    let today = chrono::Local::now().date_naive();

    let mut out = std::io::stdout().lock();
    let summary = run_report(&client, today, &mut out).await?;
    out.flush()?;

    if !summary.is_success() {
        bail!("{} request(s) failed: {}", summary.failures.len(), summary.failures.join("; "));
    }

    Ok(())
}
