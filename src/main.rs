use clap::Parser;
use ksk_reports::cli::commands::EXIT_FATAL;
use ksk_reports::cli::Cli;
use ksk_reports::config::{load_config, LoggingConfig};
use ksk_reports::logging::{init_logging, LoggingGuard};
use std::process;

#[tokio::main]
async fn main() {
    // Optional .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let guard = match setup_logging(&cli) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_FATAL);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "KSK reports");

    let exit_code = match cli.command.execute(&cli.config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    // process::exit skips destructors; flush the file log first
    drop(guard);
    process::exit(exit_code);
}

/// Log to the configured file when the configuration loads, else console only
///
/// Configuration errors are reported by the command itself.
fn setup_logging(cli: &Cli) -> ksk_reports::domain::Result<LoggingGuard> {
    let console_only = LoggingConfig {
        local_enabled: false,
        ..LoggingConfig::default()
    };

    let (level, logging) = match load_config(&cli.config) {
        Ok(config) => (
            cli.log_level
                .clone()
                .unwrap_or(config.application.log_level),
            config.logging,
        ),
        Err(_) => (
            cli.log_level.clone().unwrap_or_else(|| "info".to_string()),
            console_only.clone(),
        ),
    };

    if logging.local_enabled && std::fs::create_dir_all(&logging.local_path).is_err() {
        eprintln!(
            "⚠️  Log directory {} is not writable, logging to console only",
            logging.local_path
        );
        return init_logging(&level, &console_only);
    }

    init_logging(&level, &logging)
}
