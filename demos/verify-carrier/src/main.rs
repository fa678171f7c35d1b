//! Verifies one motor carrier against the SaferWebAPI snapshot and prints the result.

mod report;

use std::sync::Arc;

use anyhow::{Context, Result};
use carrier_adapters::saferweb::{SaferWebClient, SaferWebConfig};
use carrier_config::VerifierConfig;
use carrier_policy::{VerificationEngine, VerificationRequest};
use carrier_primitives::UsdotNumber;
use clap::Parser;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "verify-carrier", about = "FMCSA-based carrier onboarding check")]
struct Cli {
    /// USDOT number to verify; defaults to TEST_USDOT from the environment.
    #[arg(long)]
    usdot: Option<UsdotNumber>,

    /// Phone number the carrier claims, cross-checked against the record.
    #[arg(long)]
    phone: Option<String>,

    /// Print the result as JSON instead of a text report.
    #[arg(long)]
    json: bool,

    /// Log filter directive (overrides RUST_LOG).
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    carrier_telemetry::init(cli.log_level.as_deref())?;

    let config = VerifierConfig::from_env().context("failed to load configuration")?;
    info!(api_key = %config.masked_api_key(), base_url = config.api_base_url(), "configuration loaded");

    let source = SaferWebClient::new(
        SaferWebConfig::new(config.api_key())
            .with_base_url(config.api_base_url())?
            .with_timeout(config.timeout()),
    )?;
    let engine = VerificationEngine::new(Arc::new(source));

    let usdot = cli.usdot.unwrap_or_else(|| config.test_usdot());
    let mut request = VerificationRequest::new(usdot);
    if let Some(phone) = cli.phone.as_deref() {
        request = request.with_phone(phone);
    }

    let result = engine
        .verify(&request)
        .await
        .with_context(|| format!("verification failed for USDOT {usdot}"))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print!("{}", report::render(&result));

    // Without a claimed phone, re-run with the number on file to exercise the identity check.
    if request.phone().is_none()
        && let Some(phone) = result.record().phone().filter(|phone| !phone.trim().is_empty())
    {
        let recheck = engine
            .verify(&VerificationRequest::new(usdot).with_phone(phone))
            .await
            .with_context(|| format!("identity re-check failed for USDOT {usdot}"))?;
        println!("\nIdentity re-check with phone on file ({phone}): {}", recheck.identity());
    }

    Ok(())
}
