//! External system integrations.
//!
//! - [`database`] - Store traits and the factory
//! - [`postgresql`] - PostgreSQL implementation of the stores
//!
//! # Design Pattern
//!
//! The report logic only sees the traits in [`database::traits`]. The
//! PostgreSQL adapter implements all of them over one connection pool, and
//! tests substitute in-memory implementations.
//!
//! ```rust,no_run
//! use ksk_reports::adapters::database::create_report_stores;
//! use ksk_reports::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("ksk-reports.toml")?;
//! let stores = create_report_stores(&config).await?;
//! let types = stores.catalog.list_report_types().await?;
//! println!("{} report types", types.len());
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod postgresql;
