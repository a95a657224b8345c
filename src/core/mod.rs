//! Core report logic.
//!
//! # Modules
//!
//! - [`source`] - Report code to data source dispatch
//! - [`locator`] - Header resolution, ownership checks and available dates
//! - [`fetcher`] - Paged row fetching with pagination metadata
//! - [`request`] - Validation of user report requests
//! - [`export`] - Export formats and the encoder contract
//! - [`service`] - Client-facing operations composed from the above
//!
//! # Data Flow
//!
//! 1. **Resolve**: A report code and date are resolved to a system header,
//!    or a header id is checked against the caller
//! 2. **Dispatch**: The report code selects a table or the review function
//! 3. **Fetch**: One page of rows plus a count over the same filter
//! 4. **Paginate**: `has_more` is derived from offset, limit and total
//!
//! # Example
//!
//! ```rust,no_run
//! use ksk_reports::adapters::database::create_report_stores;
//! use ksk_reports::config::load_config;
//! use ksk_reports::core::service::ReportService;
//! use ksk_reports::domain::ReportCode;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("ksk-reports.toml")?;
//! let stores = create_report_stores(&config).await?;
//! let service = ReportService::new(stores, config.reports.clone());
//!
//! let dates = service.available_dates().await;
//! let page = service
//!     .system_report_data(
//!         &ReportCode::new("totals")?,
//!         dates.default_date,
//!         service.data_page(None, None)?,
//!     )
//!     .await?;
//!
//! println!("{} of {} rows", page.data.len(), page.pagination.total_records);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod fetcher;
pub mod locator;
pub mod request;
pub mod service;
pub mod source;
