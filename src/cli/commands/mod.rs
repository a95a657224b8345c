//! CLI command implementations
//!
//! Every command loads the configuration, builds a [`ReportService`] and
//! prints its result as pretty JSON on stdout. Failures are reported on
//! stderr and mapped to exit codes.

pub mod system;
pub mod user;
pub mod validate;

use crate::adapters::database::create_report_stores;
use crate::config::load_config;
use crate::core::service::ReportService;
use crate::domain::KskError;
use serde::Serialize;

/// Exit code: success
pub const EXIT_OK: i32 = 0;
/// Exit code: configuration could not be loaded or is invalid
pub const EXIT_CONFIG: i32 = 2;
/// Exit code: the request was rejected (unknown type, validation, not found, forbidden)
pub const EXIT_CLIENT: i32 = 3;
/// Exit code: the database could not be reached
pub const EXIT_CONNECTION: i32 = 4;
/// Exit code: any other failure
pub const EXIT_FATAL: i32 = 5;

/// Exit code for a failed operation
pub fn exit_code(error: &KskError) -> i32 {
    match error {
        KskError::Configuration(_) => EXIT_CONFIG,
        KskError::Connection(_) => EXIT_CONNECTION,
        e if e.is_client_error() => EXIT_CLIENT,
        _ => EXIT_FATAL,
    }
}

/// Report a failed operation and pick its exit code
pub(crate) fn fail(context: &str, error: &KskError) -> i32 {
    let code = exit_code(error);
    if code == EXIT_CLIENT {
        tracing::warn!(error = %error, context, "Request rejected");
    } else {
        crate::log_error_with_context!(error, context);
    }
    eprintln!("❌ {context}");
    eprintln!("   Error: {error}");
    code
}

/// Load the configuration and wire a report service
pub(crate) async fn open_service(config_path: &str) -> Result<ReportService, i32> {
    let config = load_config(config_path).map_err(|e| fail("Failed to load configuration", &e))?;

    let stores = create_report_stores(&config)
        .await
        .map_err(|e| fail("Failed to create database client", &e))?;

    Ok(ReportService::new(stores, config.reports))
}

/// Print a value as pretty JSON on stdout
pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<i32> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(EXIT_OK)
}

/// Print the result of an operation, or report its failure
pub(crate) fn finish<T: Serialize>(context: &str, result: crate::domain::Result<T>) -> anyhow::Result<i32> {
    match result {
        Ok(value) => print_json(&value),
        Err(e) => Ok(fail(context, &e)),
    }
}
