//! Logging and observability
//!
//! Structured `tracing` events with a console layer and an optional rotating
//! JSON file layer.
//!
//! ```no_run
//! use ksk_reports::logging::init_logging;
//! use ksk_reports::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(report_code = "totals", "Serving report page");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use ksk_reports::log_error_with_context;
/// use ksk_reports::domain::KskError;
///
/// let error = KskError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
