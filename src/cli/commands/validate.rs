//! Validate config command implementation

use crate::cli::commands::{EXIT_CONFIG, EXIT_OK};
use crate::config::load_config;
use crate::config::schema::SystemAccess;
use crate::config::secret::SecretString;
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loading runs the full validation, so success here means the file is
    /// usable as-is.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  PostgreSQL: {}",
            connection_target(&config.postgresql.connection_string)
        );
        println!("  Schema: {}", config.postgresql.schema);
        println!("  Max Connections: {}", config.postgresql.max_connections);
        println!("  SSL Mode: {}", config.postgresql.ssl_mode);
        println!(
            "  System Access: {}",
            match config.reports.system_access {
                SystemAccess::Header => "header",
                SystemAccess::ReportDate => "report_date",
            }
        );
        println!(
            "  Page Size: {} (max {})",
            config.reports.default_page_size, config.reports.max_page_size
        );
        println!("  Export Row Limit: {}", config.reports.export_row_limit);
        println!("  Queue Channel: {}", config.reports.queue_channel);
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        } else {
            println!("  File Logging: disabled");
        }
        println!();
        Ok(EXIT_OK)
    }
}

/// Host part of the connection string, without credentials
fn connection_target(connection_string: &SecretString) -> &str {
    let value = connection_string.expose_secret().as_str();
    value.rsplit_once('@').map_or("***", |(_, host)| host)
}
