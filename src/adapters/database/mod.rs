//! Database abstraction layer
//!
//! Trait seams between the report logic and the storage backend, plus the
//! factory that wires the PostgreSQL implementation.

pub mod factory;
pub mod traits;

pub use factory::{create_postgresql_client, create_report_stores, report_stores_from_client};
pub use traits::{
    HeaderStore, Orchestrator, ReportCatalog, ReportDataSource, ReportRequestStore, ReportStores,
};
