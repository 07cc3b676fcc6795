//! CLI entrypoint for sealion-chat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use sealion_application::{ChatSessionUseCase, SessionOutcome};
use sealion_infrastructure::{ConfigLoader, build_transport};
use sealion_presentation::{Cli, ConsoleReplySink, open_console_input};
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so streamed replies on stdout stay clean
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(outcome) => {
            debug!(?outcome, "Session ended");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<SessionOutcome> {
    let config = ConfigLoader::load().context("Failed to load configuration")?;
    info!(region = %config.region, "AWS region");
    info!(endpoint = %config.endpoint_id, "Model endpoint");

    let kind = cli.transport_kind();
    info!(transport = %kind, "Selected transport");

    // === Dependency Injection ===
    let transport = build_transport(kind, &config)
        .await
        .context("Failed to initialize transport")?;

    let mut sink = ConsoleReplySink::stdout();
    sink.print_banner().context("Failed to write to stdout")?;

    let mut input = open_console_input();
    let mut session = ChatSessionUseCase::new(transport);
    let outcome = session.run(input.as_mut(), &mut sink).await?;

    Ok(outcome)
}
