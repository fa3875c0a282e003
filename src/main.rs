//! Booth Billing operator shell
//!
//! Tracks calls and costs for a set of telephone booths from an
//! interactive menu.

use anyhow::Context;
use booth_core::AppConfig;
use booth_services::{source_from_config, BoothRegistry};
use std::env;
use std::io;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod shell;

use shell::Shell;

/// Initialize tracing/logging
///
/// Logs go to stderr so they never interleave with the menu on stdout.
fn init_tracing() {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "booth_billing={},booth_services={},booth_core={}",
            log_level, log_level, log_level
        ))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    info!("Starting Booth Billing v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load().context("failed to load configuration")?;

    let mut registry = BoothRegistry::new();
    for &number in &config.shell.initial_booths {
        registry
            .create_booth(number)
            .with_context(|| format!("invalid initial booth {}", number))?;
    }

    let source = source_from_config(&config.duration).context("invalid duration settings")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(
        registry,
        source,
        config.shell.output,
        stdin.lock(),
        stdout.lock(),
    );
    shell.run().context("shell terminated")?;

    info!("Booth Billing stopped");
    Ok(())
}
