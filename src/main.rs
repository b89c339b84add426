// roster-notify - New student exports and password resets for building secretaries
// Licensed under the MIT License

use clap::Parser;
use roster_notify::cli::commands::export::ExportCommand;
use roster_notify::cli::Cli;
use roster_notify::config::{load_config, AppConfig};
use roster_notify::core::context::AppContext;
use roster_notify::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Help and version exit 0; usage errors exit 1
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    let mut config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration from {}: {e}", cli.config);
            process::exit(1);
        }
    };
    cli.apply_overrides(&mut config);

    let guard = match init_logging(&config.application.log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(1);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %cli.config,
        "roster-notify starting"
    );

    let exit_code = match execute_command(&cli, config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            1
        }
    };

    // process::exit skips destructors; flush the log writer first
    drop(guard);
    process::exit(exit_code);
}

/// Build the run context and dispatch to the selected command
async fn execute_command(cli: &Cli, config: AppConfig) -> anyhow::Result<i32> {
    let ctx = match AppContext::from_config(config, cli.testing) {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!(error = %e, "Failed to set up run");
            eprintln!("{e}");
            return Ok(1);
        }
    };

    if cli.reset.reset_password {
        cli.reset.execute(&ctx).await
    } else {
        ExportCommand.execute(&ctx).await
    }
}
