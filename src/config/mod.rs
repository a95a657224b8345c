//! Configuration management.
//!
//! TOML configuration with `${VAR_NAME}` substitution, `KSK_<SECTION>_<KEY>`
//! environment overrides and validation on load.
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`PostgreSQLConfig`] - Connection pool, TLS mode and report schema
//! - [`ReportsConfig`] - System data access mode, page sizes, export limit, queue channel
//! - [`LoggingConfig`] - Local JSON file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [postgresql]
//! connection_string = "${KSK_DATABASE_URL}"
//! max_connections = 10
//! ssl_mode = "require"
//! schema = "upoa_ksk_reports"
//!
//! [reports]
//! system_access = "header"
//! default_page_size = 100
//! queue_channel = "ksk_report_requests"
//!
//! [logging]
//! local_enabled = true
//! local_path = "/var/log/ksk-reports"
//! local_rotation = "daily"
//! ```
//!
//! ```rust,no_run
//! use ksk_reports::config::load_config;
//!
//! # fn example() {
//! match load_config("ksk-reports.toml") {
//!     Ok(config) => println!("Schema: {}", config.postgresql.schema),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, KskConfig, LoggingConfig, PostgreSQLConfig, ReportsConfig, SystemAccess,
};
pub use secret::{secret_string, SecretString, SecretValue};
