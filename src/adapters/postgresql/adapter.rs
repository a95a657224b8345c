//! PostgreSQL adapter implementing the report store traits

use crate::adapters::database::traits::{
    HeaderStore, Orchestrator, ReportCatalog, ReportDataSource, ReportRequestStore,
};
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::adapters::postgresql::models::{
    header_from_row, orchestrator_from_row, report_row_from_json,
};
use crate::adapters::postgresql::queries::ReportQueries;
use crate::core::source::DataQuery;
use crate::domain::ids::{HeaderId, Username};
use crate::domain::page::{PageRequest, Row};
use crate::domain::report::{
    CreateReportRequest, Initiator, ReportHeader, ReportStatus, ReportType,
};
use crate::domain::{KskError, ReportError, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// PostgreSQL implementation of every report store
pub struct PostgreSQLAdapter {
    client: Arc<PostgreSQLClient>,
    queries: ReportQueries,
    queue_channel: String,
}

impl PostgreSQLAdapter {
    /// Create a new PostgreSQL adapter
    ///
    /// `queue_channel` is the NOTIFY channel new user reports are announced on.
    pub fn new(client: PostgreSQLClient, queue_channel: impl Into<String>) -> Self {
        Self::new_with_arc(Arc::new(client), queue_channel)
    }

    /// Create a new PostgreSQL adapter with an Arc-wrapped client
    pub fn new_with_arc(client: Arc<PostgreSQLClient>, queue_channel: impl Into<String>) -> Self {
        let queries = ReportQueries::new(client.schema());
        Self {
            client,
            queries,
            queue_channel: queue_channel.into(),
        }
    }

    /// Get a reference to the underlying client
    pub fn client(&self) -> &Arc<PostgreSQLClient> {
        &self.client
    }
}

/// The single filter value a data query binds as `$1`
enum Filter {
    Date(NaiveDate),
    Header(i64),
}

impl Filter {
    fn of(query: &DataQuery) -> Self {
        match *query {
            DataQuery::TableByDate { date, .. } | DataQuery::FunctionByDate { date, .. } => {
                Filter::Date(date)
            }
            DataQuery::TableByHeader { header_id, .. } => Filter::Header(header_id.get()),
        }
    }

    fn as_param(&self) -> &(dyn ToSql + Sync) {
        match self {
            Filter::Date(date) => date,
            Filter::Header(id) => id,
        }
    }
}

/// Statement failures on a data table or function become `SourceUnavailable`
fn source_error(query: &DataQuery, error: KskError) -> KskError {
    match error {
        KskError::Database(message) => ReportError::SourceUnavailable {
            source_name: query.source().name().to_string(),
            message,
        }
        .into(),
        other => other,
    }
}

#[async_trait]
impl ReportCatalog for PostgreSQLAdapter {
    async fn lookup_orchestrator(&self, report_code: &str) -> Result<Option<Orchestrator>> {
        let row = self
            .client
            .query_opt(&self.queries.orchestrator_by_code(), &[&report_code])
            .await?;

        row.as_ref().map(orchestrator_from_row).transpose()
    }

    async fn list_report_types(&self) -> Result<Vec<ReportType>> {
        let rows = self.client.query(&self.queries.report_types(), &[]).await?;

        rows.iter()
            .map(|row| orchestrator_from_row(row).map(ReportType::from))
            .collect()
    }
}

#[async_trait]
impl HeaderStore for PostgreSQLAdapter {
    async fn latest_system_header(
        &self,
        orchestrator_id: i64,
        date: NaiveDate,
    ) -> Result<Option<HeaderId>> {
        let row = self
            .client
            .query_opt(
                &self.queries.latest_system_header(),
                &[&orchestrator_id, &date],
            )
            .await?;

        match row {
            Some(row) => {
                let id: i64 = row
                    .try_get("id")
                    .map_err(|e| KskError::Database(format!("Failed to read header id: {e}")))?;
                Ok(Some(HeaderId::new(id).map_err(KskError::Database)?))
            }
            None => Ok(None),
        }
    }

    async fn load_header(&self, header_id: HeaderId) -> Result<Option<ReportHeader>> {
        let id = header_id.get();
        let row = self
            .client
            .query_opt(&self.queries.header_by_id(), &[&id])
            .await?;

        row.as_ref().map(header_from_row).transpose()
    }

    async fn system_date_bounds(&self) -> Result<Option<(NaiveDate, NaiveDate)>> {
        let row = self
            .client
            .query_one(&self.queries.system_date_bounds(), &[])
            .await?;

        let min_date: Option<NaiveDate> = row
            .try_get("min_date")
            .map_err(|e| KskError::Database(format!("Failed to read min_date: {e}")))?;
        let max_date: Option<NaiveDate> = row
            .try_get("max_date")
            .map_err(|e| KskError::Database(format!("Failed to read max_date: {e}")))?;

        Ok(min_date.zip(max_date))
    }

    async fn list_user_headers(
        &self,
        owner: &Username,
        status: Option<ReportStatus>,
        page: PageRequest,
    ) -> Result<(Vec<ReportHeader>, i64)> {
        let login = owner.as_str();
        let status = status.map(ReportStatus::as_str);

        let rows = self
            .client
            .query(
                &self.queries.user_headers(),
                &[&login, &status, &page.limit, &page.offset],
            )
            .await?;
        let headers = rows
            .iter()
            .map(header_from_row)
            .collect::<Result<Vec<_>>>()?;

        let total: i64 = self
            .client
            .query_one(&self.queries.count_user_headers(), &[&login, &status])
            .await?
            .try_get(0)
            .map_err(|e| KskError::Database(format!("Failed to read header count: {e}")))?;

        Ok((headers, total))
    }
}

#[async_trait]
impl ReportDataSource for PostgreSQLAdapter {
    async fn fetch_rows(&self, query: &DataQuery, page: PageRequest) -> Result<Vec<Row>> {
        let sql = self.queries.data_rows(query);
        let filter = Filter::of(query);

        let rows = self
            .client
            .query(&sql, &[filter.as_param(), &page.limit, &page.offset])
            .await
            .map_err(|e| source_error(query, e))?;

        rows.iter()
            .map(|row| {
                let text: String = row.try_get(0).map_err(|e| {
                    source_error(
                        query,
                        KskError::Database(format!("Failed to read report row: {e}")),
                    )
                })?;
                report_row_from_json(&text)
            })
            .collect()
    }

    async fn count_rows(&self, query: &DataQuery) -> Result<i64> {
        let sql = self.queries.data_count(query);
        let filter = Filter::of(query);

        self.client
            .query_one(&sql, &[filter.as_param()])
            .await
            .and_then(|row| {
                row.try_get::<_, i64>(0)
                    .map_err(|e| KskError::Database(format!("Failed to read row count: {e}")))
            })
            .map_err(|e| source_error(query, e))
    }
}

#[async_trait]
impl ReportRequestStore for PostgreSQLAdapter {
    async fn create_header(
        &self,
        orchestrator: &Orchestrator,
        owner: &Username,
        request: &CreateReportRequest,
    ) -> Result<ReportHeader> {
        let row = self
            .client
            .query_one(
                &self.queries.insert_user_header(),
                &[
                    &orchestrator.id,
                    &owner.as_str(),
                    &request.start_date,
                    &request.end_date,
                    &request.parameters,
                    &orchestrator.user_ttl,
                ],
            )
            .await?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| KskError::Database(format!("Failed to read new header id: {e}")))?;
        let created_datetime: NaiveDateTime = row
            .try_get("created_datetime")
            .map_err(|e| KskError::Database(format!("Failed to read created_datetime: {e}")))?;

        Ok(ReportHeader {
            id: HeaderId::new(id).map_err(KskError::Database)?,
            orchestrator_id: orchestrator.id,
            report_code: orchestrator.report_code.clone(),
            initiator: Initiator::User,
            user_login: Some(owner.to_string()),
            status: ReportStatus::Created,
            created_datetime,
            finished_datetime: None,
            start_date: Some(request.start_date),
            end_date: Some(request.end_date),
            parameters: request.parameters.clone(),
            error_message: None,
        })
    }

    async fn enqueue_processing(&self, header_id: HeaderId) -> Result<()> {
        let payload = header_id.to_string();
        self.client
            .query(self.queries.notify(), &[&self.queue_channel, &payload])
            .await?;

        tracing::debug!(
            header_id = %header_id,
            channel = %self.queue_channel,
            "Report queued for processing"
        );
        Ok(())
    }

    async fn delete_header(&self, header_id: HeaderId, owner: &Username) -> Result<bool> {
        let id = header_id.get();
        let deleted = self
            .client
            .execute(&self.queries.delete_user_header(), &[&id, &owner.as_str()])
            .await?;

        Ok(deleted > 0)
    }
}
