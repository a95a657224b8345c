//! # KSK reports
//!
//! Retrieval layer for KSK compliance reports stored in PostgreSQL.
//!
//! Reports come in two flavours:
//!
//! - **System reports**, produced on a schedule and browsed by type and date
//! - **User reports**, requested on demand for a date range and tracked
//!   through a header record until a worker marks them `done`
//!
//! Every report type stores its rows in its own table, except `review`,
//! which is computed by a database function for a given date. The crate
//! resolves report codes and dates to headers, dispatches to the right data
//! source and returns paginated rows.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface
//! - [`core`] - Locator, fetcher, request validation and the report service
//! - [`adapters`] - Store traits and the PostgreSQL implementation
//! - [`domain`] - Identifiers, report models, pages and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ksk_reports::adapters::database::create_report_stores;
//! use ksk_reports::config::load_config;
//! use ksk_reports::core::service::ReportService;
//! use ksk_reports::domain::{HeaderId, Username};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("ksk-reports.toml")?;
//!     let service = ReportService::new(create_report_stores(&config).await?, config.reports);
//!
//!     let user = Username::new("ivanov")?;
//!     let status = service.user_report_status(&user, HeaderId::new(126)?).await?;
//!     println!("{}: {}", status.id, status.message);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible APIs return [`domain::Result`]. Report-level failures are
//! [`domain::ReportError`] values wrapped in [`domain::KskError`];
//! `is_client_error()` tells caller mistakes apart from infrastructure
//! failures.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
