//! Report service
//!
//! Composes the locator, the fetcher and the request store into the
//! operations exposed to clients: system report browsing and export, and the
//! user report lifecycle (types, list, create, status, data, delete, export).

use crate::adapters::database::traits::{
    HeaderStore, ReportCatalog, ReportRequestStore, ReportStores,
};
use crate::config::schema::{ReportsConfig, SystemAccess};
use crate::core::export::{ExportEncoder, ExportFormat, ExportPayload};
use crate::core::fetcher::ReportDataFetcher;
use crate::core::locator::ReportLocator;
use crate::core::request::validate_request;
use crate::domain::ids::{HeaderId, ReportCode, Username};
use crate::domain::page::{DateRange, PageRequest, Pagination, ReportList, ReportPage};
use crate::domain::report::{
    CreateReportRequest, CreatedReport, DeletedReport, Initiator, ReportStatus, ReportStatusView,
    ReportTypes, StatusFilter,
};
use crate::domain::{ReportError, Result};
use chrono::{Local, NaiveDate};
use std::sync::Arc;

/// Entry point for every report operation
pub struct ReportService {
    locator: ReportLocator,
    fetcher: ReportDataFetcher,
    catalog: Arc<dyn ReportCatalog>,
    headers: Arc<dyn HeaderStore>,
    requests: Arc<dyn ReportRequestStore>,
    config: ReportsConfig,
}

impl ReportService {
    /// Create a service over a set of stores
    pub fn new(stores: ReportStores, config: ReportsConfig) -> Self {
        Self {
            locator: ReportLocator::new(stores.catalog.clone(), stores.headers.clone()),
            fetcher: ReportDataFetcher::new(stores.headers.clone(), stores.data),
            catalog: stores.catalog,
            headers: stores.headers,
            requests: stores.requests,
            config,
        }
    }

    pub fn locator(&self) -> &ReportLocator {
        &self.locator
    }

    pub fn fetcher(&self) -> &ReportDataFetcher {
        &self.fetcher
    }

    /// Build a data page request, applying configured defaults and bounds
    pub fn data_page(&self, limit: Option<i64>, offset: Option<i64>) -> Result<PageRequest> {
        PageRequest::bounded(
            limit.unwrap_or(self.config.default_page_size),
            offset.unwrap_or(0),
            self.config.max_page_size,
        )
    }

    /// Build a report list page request, applying configured defaults and bounds
    pub fn list_page(&self, limit: Option<i64>, offset: Option<i64>) -> Result<PageRequest> {
        PageRequest::bounded(
            limit.unwrap_or(self.config.list_page_size),
            offset.unwrap_or(0),
            self.config.max_list_page_size,
        )
    }

    // ========== System reports ==========

    /// Range of dates with finished system reports
    pub async fn available_dates(&self) -> DateRange {
        self.locator.available_date_range().await
    }

    /// A page of a system report for a date
    ///
    /// Returns an empty page if no finished report exists for the date yet.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::UnknownReportType` when the code is not in the
    /// catalog, in either access mode.
    pub async fn system_report_data(
        &self,
        report_code: &ReportCode,
        date: NaiveDate,
        page: PageRequest,
    ) -> Result<ReportPage> {
        match self.config.system_access {
            SystemAccess::Header => {
                match self
                    .locator
                    .resolve_system_header(report_code.as_str(), date)
                    .await?
                {
                    Some(header_id) => self.fetcher.fetch_by_header_id(header_id, page).await,
                    None => Ok(ReportPage::empty(report_code.as_str(), Some(date), page)),
                }
            }
            SystemAccess::ReportDate => {
                self.catalog
                    .lookup_orchestrator_id(report_code.as_str())
                    .await?
                    .ok_or_else(|| ReportError::UnknownReportType(report_code.to_string()))?;

                self.fetcher
                    .fetch_by_date(report_code.as_str(), date, page)
                    .await
            }
        }
    }

    /// Export a system report for a date
    pub async fn export_system_report(
        &self,
        report_code: &ReportCode,
        date: NaiveDate,
        format: ExportFormat,
        encoder: &dyn ExportEncoder,
    ) -> Result<ExportPayload> {
        let page = self
            .system_report_data(report_code, date, self.export_page()?)
            .await?;
        self.encode_export(&page, format, encoder)
    }

    // ========== User reports ==========

    /// The report type catalog
    pub async fn report_types(&self) -> Result<ReportTypes> {
        Ok(ReportTypes {
            report_types: self.catalog.list_report_types().await?,
        })
    }

    /// A page of the caller's own reports, newest first
    pub async fn user_reports(
        &self,
        username: &Username,
        filter: StatusFilter,
        page: PageRequest,
    ) -> Result<ReportList> {
        let (headers, total) = self
            .headers
            .list_user_headers(username, filter.status(), page)
            .await?;

        Ok(ReportList {
            reports: headers.iter().map(ReportStatusView::from).collect(),
            pagination: Pagination::new(page, total),
        })
    }

    /// Create a user report and hand it to the workers
    pub async fn create_user_report(
        &self,
        username: &Username,
        request: &CreateReportRequest,
    ) -> Result<CreatedReport> {
        self.create_user_report_at(username, request, Local::now().date_naive())
            .await
    }

    /// [`Self::create_user_report`] with an explicit "today"
    ///
    /// The header is created even if dispatching it to the workers fails;
    /// the failure is only logged.
    pub async fn create_user_report_at(
        &self,
        username: &Username,
        request: &CreateReportRequest,
        today: NaiveDate,
    ) -> Result<CreatedReport> {
        validate_request(request, today)?;

        let orchestrator = self
            .catalog
            .lookup_orchestrator(request.report_code.as_str())
            .await?
            .ok_or_else(|| ReportError::UnknownReportType(request.report_code.to_string()))?;

        let header = self
            .requests
            .create_header(&orchestrator, username, request)
            .await?;

        tracing::info!(
            header_id = %header.id,
            report_code = %header.report_code,
            username = %username,
            "User report created"
        );

        if let Err(e) = self.requests.enqueue_processing(header.id).await {
            tracing::warn!(
                header_id = %header.id,
                error = %e,
                "Failed to dispatch report for processing"
            );
        }

        Ok(CreatedReport {
            id: header.id,
            report_code: header.report_code,
            status: header.status,
            created_datetime: header.created_datetime,
        })
    }

    /// Status of one of the caller's reports
    ///
    /// `done` reports also carry their row count.
    pub async fn user_report_status(
        &self,
        username: &Username,
        header_id: HeaderId,
    ) -> Result<ReportStatusView> {
        let header = self
            .locator
            .resolve_header_owner(header_id, username)
            .await?;

        let mut view = ReportStatusView::from(&header);
        if header.status == ReportStatus::Done {
            view.rows_count = Some(self.fetcher.count_for_header(&header).await?);
        }
        Ok(view)
    }

    /// A page of one of the caller's reports
    ///
    /// Rows are only present once the report is `done`.
    pub async fn user_report_data(
        &self,
        username: &Username,
        header_id: HeaderId,
        page: PageRequest,
    ) -> Result<ReportPage> {
        let header = self
            .locator
            .resolve_header_owner(header_id, username)
            .await?;
        self.fetcher.fetch_for_header(&header, page).await
    }

    /// Delete one of the caller's reports together with its rows
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Forbidden` for system reports and for other
    /// users' reports.
    pub async fn delete_user_report(
        &self,
        username: &Username,
        header_id: HeaderId,
    ) -> Result<DeletedReport> {
        let header = self
            .locator
            .resolve_header_owner(header_id, username)
            .await?;

        if header.initiator != Initiator::User {
            return Err(ReportError::Forbidden {
                header_id: header_id.get(),
            }
            .into());
        }

        if !self.requests.delete_header(header_id, username).await? {
            return Err(ReportError::HeaderNotFound(header_id.get()).into());
        }

        tracing::info!(header_id = %header_id, username = %username, "User report deleted");

        Ok(DeletedReport {
            message: "Report deleted successfully".to_string(),
            report_id: header_id,
        })
    }

    /// Export one of the caller's reports
    pub async fn export_user_report(
        &self,
        username: &Username,
        header_id: HeaderId,
        format: ExportFormat,
        encoder: &dyn ExportEncoder,
    ) -> Result<ExportPayload> {
        let page = self
            .user_report_data(username, header_id, self.export_page()?)
            .await?;
        self.encode_export(&page, format, encoder)
    }

    fn export_page(&self) -> Result<PageRequest> {
        PageRequest::new(self.config.export_row_limit, 0)
    }

    fn encode_export(
        &self,
        page: &ReportPage,
        format: ExportFormat,
        encoder: &dyn ExportEncoder,
    ) -> Result<ExportPayload> {
        if page.pagination.has_more {
            tracing::warn!(
                report_code = %page.report_code,
                total_records = page.pagination.total_records,
                export_row_limit = self.config.export_row_limit,
                "Export truncated at row limit"
            );
        }
        ExportPayload::encode(encoder, page, format)
    }
}
