//! CLI interface and argument parsing

pub mod commands;

use clap::{Parser, Subcommand};

/// KSK reports - browse, request and manage compliance reports
#[derive(Parser, Debug)]
#[command(name = "ksk-reports")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "ksk-reports.toml", env = "KSK_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "KSK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the range of dates with finished system reports
    Dates(commands::system::DatesArgs),

    /// Show one page of a system report for a date
    SystemData(commands::system::SystemDataArgs),

    /// List report types
    Types(commands::user::TypesArgs),

    /// List your reports
    List(commands::user::ListArgs),

    /// Request a new report
    Create(commands::user::CreateArgs),

    /// Show the status of one of your reports
    Status(commands::user::StatusArgs),

    /// Show one page of one of your reports
    UserData(commands::user::UserDataArgs),

    /// Delete one of your reports
    Delete(commands::user::DeleteArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),
}

impl Commands {
    /// Execute the command and return the process exit code
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        match self {
            Commands::Dates(args) => args.execute(config_path).await,
            Commands::SystemData(args) => args.execute(config_path).await,
            Commands::Types(args) => args.execute(config_path).await,
            Commands::List(args) => args.execute(config_path).await,
            Commands::Create(args) => args.execute(config_path).await,
            Commands::Status(args) => args.execute(config_path).await,
            Commands::UserData(args) => args.execute(config_path).await,
            Commands::Delete(args) => args.execute(config_path).await,
            Commands::ValidateConfig(args) => args.execute(config_path).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_dates() {
        let cli = Cli::parse_from(["ksk-reports", "dates"]);
        assert_eq!(cli.config, "ksk-reports.toml");
        assert!(matches!(cli.command, Commands::Dates(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["ksk-reports", "--config", "custom.toml", "types"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::Types(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["ksk-reports", "--log-level", "debug", "dates"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["ksk-reports", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_requires_command() {
        assert!(Cli::try_parse_from(["ksk-reports"]).is_err());
    }
}
