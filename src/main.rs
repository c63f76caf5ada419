//! Yukchi CLI entrypoint for the freight marketplace client.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use ortho_config::OrthoConfig;
use tracing_subscriber::EnvFilter;
use yukchi::telemetry::{NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetrySink};
use yukchi::{AppServices, ClientError, OperationMode, YukchiConfig};

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(exit_code) => exit_code,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

/// Sends `tracing` output to stderr, filtered by `RUST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run() -> Result<ExitCode, ClientError> {
    let config = load_config()?;
    let telemetry = telemetry_sink(&config);

    let mode = config.operation_mode();
    if mode == OperationMode::MigrateDatabase {
        cli::migrations::run(&config, telemetry.as_ref())?;
        return Ok(ExitCode::SUCCESS);
    }

    let (services, _) = AppServices::start(&config, telemetry).await?;
    let outcome = dispatch(mode, &config, &services).await;
    let failed = cli::flush_notifications(&mut io::stderr().lock(), &services)?;
    services.shutdown();
    outcome?;

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

async fn dispatch(
    mode: OperationMode,
    config: &YukchiConfig,
    services: &AppServices,
) -> Result<(), ClientError> {
    let mut stdout = io::stdout().lock();
    match mode {
        OperationMode::MigrateDatabase => Ok(()),
        OperationMode::Tui => {
            drop(stdout);
            cli::browser::run(config, services).await
        }
        OperationMode::Login => cli::account::login(config, services, &mut stdout).await,
        OperationMode::Register => cli::account::register(config, services, &mut stdout).await,
        OperationMode::Logout => cli::account::logout(services, &mut stdout),
        OperationMode::AddCargo => cli::cargo::add(config, services, &mut stdout).await,
        OperationMode::UpdateCargo => cli::cargo::update(config, services, &mut stdout).await,
        OperationMode::Comment => cli::cargo::comment(config, services, &mut stdout).await,
        OperationMode::ShowCargo => cli::cargo::show(config, services, &mut stdout).await,
        OperationMode::Profile => cli::profile::show(services, &mut stdout).await,
        OperationMode::UpdateProfile => {
            cli::profile::update(config, services, &mut stdout).await
        }
        OperationMode::ListCargos => cli::listing::run(config, services, &mut stdout).await,
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ClientError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<YukchiConfig, ClientError> {
    YukchiConfig::load().map_err(|error| ClientError::Configuration {
        message: error.to_string(),
    })
}

fn telemetry_sink(config: &YukchiConfig) -> Arc<dyn TelemetrySink> {
    if config.telemetry {
        Arc::new(StderrJsonlTelemetrySink)
    } else {
        Arc::new(NoopTelemetrySink)
    }
}
