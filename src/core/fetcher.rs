//! Report data fetcher
//!
//! Loads pages of report rows from the resolved data source. Every page is
//! two round trips: the rows themselves and a count over the same filter for
//! the pagination metadata.

use crate::adapters::database::traits::{HeaderStore, ReportDataSource};
use crate::core::source::{DataQuery, DataSource};
use crate::domain::ids::HeaderId;
use crate::domain::page::{PageRequest, Pagination, ReportPage};
use crate::domain::report::ReportHeader;
use crate::domain::{KskError, ReportError, Result};
use chrono::NaiveDate;
use std::sync::Arc;

/// Fetches paged report rows
pub struct ReportDataFetcher {
    headers: Arc<dyn HeaderStore>,
    data: Arc<dyn ReportDataSource>,
}

impl ReportDataFetcher {
    pub fn new(headers: Arc<dyn HeaderStore>, data: Arc<dyn ReportDataSource>) -> Self {
        Self { headers, data }
    }

    /// Fetch a page of a report by its date column
    ///
    /// Unknown codes read the default table; `review` reads the review
    /// function for `date`.
    pub async fn fetch_by_date(
        &self,
        report_code: &str,
        date: NaiveDate,
        page: PageRequest,
    ) -> Result<ReportPage> {
        let query = DataQuery::by_date(DataSource::for_code(report_code), date);
        self.fetch_page(report_code, Some(date), &query, page).await
    }

    /// Fetch a page of a report by header id
    ///
    /// The report code and creation date are read from the header first.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::HeaderNotFound` if the header does not exist.
    pub async fn fetch_by_header_id(
        &self,
        header_id: HeaderId,
        page: PageRequest,
    ) -> Result<ReportPage> {
        let header = self
            .headers
            .load_header(header_id)
            .await?
            .ok_or(ReportError::HeaderNotFound(header_id.get()))?;

        self.fetch_for_header(&header, page).await
    }

    /// Fetch a page of a report whose header is already loaded
    pub async fn fetch_for_header(
        &self,
        header: &ReportHeader,
        page: PageRequest,
    ) -> Result<ReportPage> {
        let report_date = header.report_date();
        let query = DataQuery::by_header(
            DataSource::for_code(&header.report_code),
            header.id,
            report_date,
        );
        self.fetch_page(&header.report_code, Some(report_date), &query, page)
            .await
    }

    /// Count all rows of a report whose header is already loaded
    pub async fn count_for_header(&self, header: &ReportHeader) -> Result<i64> {
        let query = DataQuery::by_header(
            DataSource::for_code(&header.report_code),
            header.id,
            header.report_date(),
        );
        self.data
            .count_rows(&query)
            .await
            .map_err(|e| log_source_failure(&header.report_code, query.source(), e))
    }

    async fn fetch_page(
        &self,
        report_code: &str,
        date: Option<NaiveDate>,
        query: &DataQuery,
        page: PageRequest,
    ) -> Result<ReportPage> {
        let source = query.source();
        tracing::debug!(
            report_code,
            source = %source,
            limit = page.limit,
            offset = page.offset,
            "Fetching report page"
        );

        let rows = self
            .data
            .fetch_rows(query, page)
            .await
            .map_err(|e| log_source_failure(report_code, source, e))?;
        let total = self
            .data
            .count_rows(query)
            .await
            .map_err(|e| log_source_failure(report_code, source, e))?;

        Ok(ReportPage {
            report_code: report_code.to_string(),
            date,
            data: rows,
            pagination: Pagination::new(page, total),
        })
    }
}

fn log_source_failure(report_code: &str, source: DataSource, error: KskError) -> KskError {
    tracing::error!(
        report_code,
        source = %source,
        error = %error,
        "Report data source query failed"
    );
    error
}
