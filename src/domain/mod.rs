//! Domain models and types for KSK reports.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`HeaderId`], [`ReportCode`], [`Username`])
//! - **Catalog and header models** ([`ReportType`], [`ReportHeader`], [`ReportStatus`])
//! - **Paging models** ([`PageRequest`], [`ReportPage`], [`Row`])
//! - **Error types** ([`KskError`], [`ReportError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, KskError>`]:
//!
//! ```rust
//! use ksk_reports::domain::{PageRequest, Result};
//!
//! fn example() -> Result<()> {
//!     let page = PageRequest::new(100, 0)?;
//!     assert!(page.has_more(150));
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod page;
pub mod report;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{KskError, ReportError};
pub use ids::{HeaderId, ReportCode, Username};
pub use page::{DateRange, PageRequest, Pagination, ReportList, ReportPage, Row};
pub use report::{
    CreateReportRequest, CreatedReport, DeletedReport, Initiator, ReportHeader, ReportStatus,
    ReportStatusView, ReportType, ReportTypes, StatusFilter,
};
pub use result::Result;
