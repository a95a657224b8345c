//! Report locator
//!
//! Resolves report codes and dates to headers, checks header ownership and
//! computes the range of dates with finished system reports.

use crate::adapters::database::traits::{HeaderStore, ReportCatalog};
use crate::domain::ids::{HeaderId, Username};
use crate::domain::page::DateRange;
use crate::domain::report::ReportHeader;
use crate::domain::{ReportError, Result};
use chrono::{Local, NaiveDate};
use std::sync::Arc;

/// Resolves report headers from the catalog and header table
pub struct ReportLocator {
    catalog: Arc<dyn ReportCatalog>,
    headers: Arc<dyn HeaderStore>,
}

impl ReportLocator {
    pub fn new(catalog: Arc<dyn ReportCatalog>, headers: Arc<dyn HeaderStore>) -> Self {
        Self { catalog, headers }
    }

    /// Find the latest finished system report of a type for a calendar date
    ///
    /// # Returns
    ///
    /// Returns `Ok(None)` when the type is known but no `done` system header
    /// was created on `date`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::UnknownReportType` if the code has no catalog
    /// entry. The header table is not queried in that case.
    pub async fn resolve_system_header(
        &self,
        report_code: &str,
        date: NaiveDate,
    ) -> Result<Option<HeaderId>> {
        let orchestrator_id = self
            .catalog
            .lookup_orchestrator_id(report_code)
            .await?
            .ok_or_else(|| ReportError::UnknownReportType(report_code.to_string()))?;

        let header_id = self
            .headers
            .latest_system_header(orchestrator_id, date)
            .await?;

        match header_id {
            Some(id) => {
                tracing::debug!(report_code, %date, header_id = %id, "Resolved system report header")
            }
            None => tracing::debug!(report_code, %date, "No finished system report for date"),
        }

        Ok(header_id)
    }

    /// Load a header on behalf of `username`
    ///
    /// System headers are readable by anyone. User headers are only readable
    /// by their owner.
    ///
    /// # Errors
    ///
    /// - `ReportError::HeaderNotFound` if the header does not exist
    /// - `ReportError::Forbidden` if it is another user's report
    pub async fn resolve_header_owner(
        &self,
        header_id: HeaderId,
        username: &Username,
    ) -> Result<ReportHeader> {
        let header = self
            .headers
            .load_header(header_id)
            .await?
            .ok_or(ReportError::HeaderNotFound(header_id.get()))?;

        if !header.is_visible_to(username) {
            tracing::warn!(
                header_id = %header_id,
                username = %username,
                "Rejected access to another user's report"
            );
            return Err(ReportError::Forbidden {
                header_id: header_id.get(),
            }
            .into());
        }

        Ok(header)
    }

    /// Dates for which finished system reports exist
    ///
    /// Never fails: with no finished system reports, or when the lookup
    /// itself fails, every field is today.
    pub async fn available_date_range(&self) -> DateRange {
        self.available_date_range_at(Local::now().date_naive()).await
    }

    /// [`Self::available_date_range`] with an explicit "today"
    pub async fn available_date_range_at(&self, today: NaiveDate) -> DateRange {
        match self.headers.system_date_bounds().await {
            Ok(Some((min_date, max_date))) => DateRange {
                min_date,
                max_date,
                default_date: max_date,
            },
            Ok(None) => DateRange::single(today),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read system report dates, using today");
                DateRange::single(today)
            }
        }
    }
}
