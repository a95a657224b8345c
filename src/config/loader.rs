//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{KskConfig, SystemAccess};
use super::secret::secret_string;
use crate::domain::errors::KskError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into KskConfig
/// 4. Applies environment variable overrides (KSK_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns `KskError::Configuration` if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use ksk_reports::config::loader::load_config;
///
/// let config = load_config("ksk-reports.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<KskConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(KskError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        KskError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: KskConfig = toml::from_str(&contents)
        .map_err(|e| KskError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        KskError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| KskError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(KskError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Parse a numeric override, failing loudly on garbage
fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| KskError::Configuration(format!("Invalid value for {name}: '{value}'")))
}

/// Applies environment variable overrides using the KSK_* prefix
///
/// Environment variables follow the pattern: KSK_<SECTION>_<KEY>
/// For example: KSK_POSTGRESQL_CONNECTION_STRING, KSK_REPORTS_SYSTEM_ACCESS
fn apply_env_overrides(config: &mut KskConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("KSK_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // PostgreSQL overrides
    if let Ok(val) = std::env::var("KSK_POSTGRESQL_CONNECTION_STRING") {
        config.postgresql.connection_string = secret_string(val);
    }
    if let Ok(val) = std::env::var("KSK_POSTGRESQL_MAX_CONNECTIONS") {
        config.postgresql.max_connections =
            parse_override("KSK_POSTGRESQL_MAX_CONNECTIONS", &val)?;
    }
    if let Ok(val) = std::env::var("KSK_POSTGRESQL_STATEMENT_TIMEOUT_SECONDS") {
        config.postgresql.statement_timeout_seconds =
            parse_override("KSK_POSTGRESQL_STATEMENT_TIMEOUT_SECONDS", &val)?;
    }
    if let Ok(val) = std::env::var("KSK_POSTGRESQL_SSL_MODE") {
        config.postgresql.ssl_mode = val;
    }
    if let Ok(val) = std::env::var("KSK_POSTGRESQL_SCHEMA") {
        config.postgresql.schema = val;
    }

    // Reports overrides
    if let Ok(val) = std::env::var("KSK_REPORTS_SYSTEM_ACCESS") {
        config.reports.system_access = match val.trim() {
            "header" => SystemAccess::Header,
            "report_date" => SystemAccess::ReportDate,
            other => {
                return Err(KskError::Configuration(format!(
                    "Invalid value for KSK_REPORTS_SYSTEM_ACCESS: '{other}'. Must be one of: header, report_date"
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("KSK_REPORTS_DEFAULT_PAGE_SIZE") {
        config.reports.default_page_size = parse_override("KSK_REPORTS_DEFAULT_PAGE_SIZE", &val)?;
    }
    if let Ok(val) = std::env::var("KSK_REPORTS_MAX_PAGE_SIZE") {
        config.reports.max_page_size = parse_override("KSK_REPORTS_MAX_PAGE_SIZE", &val)?;
    }
    if let Ok(val) = std::env::var("KSK_REPORTS_EXPORT_ROW_LIMIT") {
        config.reports.export_row_limit = parse_override("KSK_REPORTS_EXPORT_ROW_LIMIT", &val)?;
    }
    if let Ok(val) = std::env::var("KSK_REPORTS_QUEUE_CHANNEL") {
        config.reports.queue_channel = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("KSK_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("KSK_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("KSK_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
