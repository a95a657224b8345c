//! Report store factory
//!
//! Builds the store handles a [`ReportService`](crate::core::service::ReportService)
//! needs from configuration.

use crate::adapters::database::traits::ReportStores;
use crate::adapters::postgresql::adapter::PostgreSQLAdapter;
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::config::schema::KskConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Create the report stores over one pooled PostgreSQL client
///
/// The pool connects lazily; call [`create_postgresql_client`] and
/// `test_connection` first to fail fast.
///
/// # Errors
///
/// Returns an error if the connection pool cannot be created
pub async fn create_report_stores(config: &KskConfig) -> Result<ReportStores> {
    let client = create_postgresql_client(config)?;
    Ok(report_stores_from_client(Arc::new(client), config))
}

/// Create the pooled PostgreSQL client described by the configuration
pub fn create_postgresql_client(config: &KskConfig) -> Result<PostgreSQLClient> {
    tracing::info!(
        schema = %config.postgresql.schema,
        max_connections = config.postgresql.max_connections,
        ssl_mode = %config.postgresql.ssl_mode,
        "Creating PostgreSQL client"
    );
    PostgreSQLClient::new(config.postgresql.clone())
}

/// Wrap an existing client as report stores sharing its pool
pub fn report_stores_from_client(client: Arc<PostgreSQLClient>, config: &KskConfig) -> ReportStores {
    let adapter = PostgreSQLAdapter::new_with_arc(client, config.reports.queue_channel.clone());
    ReportStores::from_shared(Arc::new(adapter))
}
