// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
use anyhow::{Context, Result};
use clap::Parser;
use fz_auth::{AuthAdapter, StaticRoleAuth};
use fz_cli::config::{load_config, validate_config};
use fz_contract::Contract;
use fz_orchestrator::FuzzOrchestrator;
use fz_transport::{ReqwestTransport, Transport};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Exit code for runtime errors.
const EXIT_RUNTIME_ERROR: i32 = 1;

#[derive(Parser, Debug)]
#[command(name = "fz", version, about = "Contract-aware security fuzzer for HTTP APIs")]
struct Cli {
    /// Path to a TOML file describing the `FuzzConfig` (budget, generation,
    /// validation tuning, and/or an inline endpoint list).
    #[arg(long)]
    config: PathBuf,

    /// Path to a JSON file describing the `Contract` (endpoints to fuzz),
    /// used when the config file doesn't already list endpoints.
    #[arg(long)]
    contract: Option<PathBuf>,

    /// Base URL of the target under test, e.g. `https://api.example.test`.
    #[arg(long)]
    target: String,

    /// Enable debug logging.
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("fz=debug")
    } else {
        EnvFilter::new("fz=info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run(cli).await {
        eprintln!("error: {e:#}");
        std::process::exit(EXIT_RUNTIME_ERROR);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli.config)?;
    if let Err(errors) = validate_config(&config) {
        for e in &errors {
            tracing::warn!("config: {e}");
        }
        anyhow::bail!("configuration is invalid: {} problem(s) found", errors.len());
    }

    let contract = match cli.contract {
        Some(path) => load_contract(&path)?,
        None => Contract::default(),
    };

    let auth: Arc<dyn AuthAdapter> = Arc::new(StaticRoleAuth::new());
    let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::default());

    let orchestrator = FuzzOrchestrator::new(config, contract, cli.target, auth, transport)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("build orchestrator")?;

    let session = orchestrator.fuzz_all().await;
    println!("{}", serde_json::to_string_pretty(&session)?);

    Ok(())
}

fn load_contract(path: &std::path::Path) -> Result<Contract> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read contract file '{}'", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parse contract from '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
