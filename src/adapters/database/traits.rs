//! Database abstraction traits
//!
//! This module defines the traits a storage backend implements to serve
//! reports. They are split by collaborator: the static report catalog, the
//! header table, the report data sources and the user request store. One
//! adapter usually implements all four; [`ReportStores`] bundles them.

use crate::core::source::DataQuery;
use crate::domain::ids::{HeaderId, Username};
use crate::domain::page::{PageRequest, Row};
use crate::domain::report::{CreateReportRequest, ReportHeader, ReportStatus, ReportType};
use crate::domain::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Catalog row for one report type, including its database id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Orchestrator {
    pub id: i64,
    pub report_code: String,
    pub name: String,
    pub system_ttl: i32,
    pub user_ttl: i32,
}

impl From<Orchestrator> for ReportType {
    fn from(orchestrator: Orchestrator) -> Self {
        Self {
            report_code: orchestrator.report_code,
            name: orchestrator.name,
            system_ttl: orchestrator.system_ttl,
            user_ttl: orchestrator.user_ttl,
        }
    }
}

/// Static catalog of report types
#[async_trait]
pub trait ReportCatalog: Send + Sync {
    /// Load the catalog entry for a report code
    ///
    /// # Returns
    ///
    /// Returns `Ok(None)` if the code has no catalog entry.
    async fn lookup_orchestrator(&self, report_code: &str) -> Result<Option<Orchestrator>>;

    /// Catalog id for a report code, `None` if the code is unknown
    async fn lookup_orchestrator_id(&self, report_code: &str) -> Result<Option<i64>> {
        Ok(self
            .lookup_orchestrator(report_code)
            .await?
            .map(|orchestrator| orchestrator.id))
    }

    /// All report types ordered by report code
    async fn list_report_types(&self) -> Result<Vec<ReportType>>;
}

/// Read access to report headers
#[async_trait]
pub trait HeaderStore: Send + Sync {
    /// Most recent `done` system header of an orchestrator created on `date`
    async fn latest_system_header(
        &self,
        orchestrator_id: i64,
        date: NaiveDate,
    ) -> Result<Option<HeaderId>>;

    /// Load a header with its report code joined in
    ///
    /// # Returns
    ///
    /// Returns `Ok(None)` if no header has this id.
    async fn load_header(&self, header_id: HeaderId) -> Result<Option<ReportHeader>>;

    /// Earliest and latest creation dates of `done` system headers
    ///
    /// Returns `Ok(None)` when there are no such headers.
    async fn system_date_bounds(&self) -> Result<Option<(NaiveDate, NaiveDate)>>;

    /// A page of one user's headers, newest first, plus the total count
    async fn list_user_headers(
        &self,
        owner: &Username,
        status: Option<ReportStatus>,
        page: PageRequest,
    ) -> Result<(Vec<ReportHeader>, i64)>;
}

/// Row access to report data tables and functions
#[async_trait]
pub trait ReportDataSource: Send + Sync {
    /// Fetch one page of rows
    ///
    /// # Errors
    ///
    /// Returns `ReportError::SourceUnavailable` if the table or function
    /// cannot be queried.
    async fn fetch_rows(&self, query: &DataQuery, page: PageRequest) -> Result<Vec<Row>>;

    /// Count all rows matching the query, ignoring paging
    async fn count_rows(&self, query: &DataQuery) -> Result<i64>;
}

/// Write access for user report requests
#[async_trait]
pub trait ReportRequestStore: Send + Sync {
    /// Insert a header in `created` state for a user request
    ///
    /// # Arguments
    ///
    /// * `orchestrator` - Catalog entry of the requested report type
    /// * `owner` - Requesting user
    /// * `request` - Date range and parameters
    async fn create_header(
        &self,
        orchestrator: &Orchestrator,
        owner: &Username,
        request: &CreateReportRequest,
    ) -> Result<ReportHeader>;

    /// Hand a header over to the report workers
    ///
    /// Fire-and-forget: success only means the request was dispatched.
    async fn enqueue_processing(&self, header_id: HeaderId) -> Result<()>;

    /// Delete a user header owned by `owner`, cascading to its rows
    ///
    /// # Returns
    ///
    /// Returns `Ok(false)` if no matching header was deleted.
    async fn delete_header(&self, header_id: HeaderId, owner: &Username) -> Result<bool>;
}

/// The four store handles, usually backed by one adapter
#[derive(Clone)]
pub struct ReportStores {
    pub catalog: Arc<dyn ReportCatalog>,
    pub headers: Arc<dyn HeaderStore>,
    pub data: Arc<dyn ReportDataSource>,
    pub requests: Arc<dyn ReportRequestStore>,
}

impl ReportStores {
    /// Use one adapter for every role
    pub fn from_shared<T>(adapter: Arc<T>) -> Self
    where
        T: ReportCatalog + HeaderStore + ReportDataSource + ReportRequestStore + 'static,
    {
        Self {
            catalog: adapter.clone(),
            headers: adapter.clone(),
            data: adapter.clone(),
            requests: adapter,
        }
    }
}
