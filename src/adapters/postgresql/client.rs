//! PostgreSQL client implementation
//!
//! Connection pooling, TLS setup and statement execution with a per-session
//! statement timeout.

use crate::config::schema::PostgreSQLConfig;
use crate::domain::{KskError, Result};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod, Runtime};
use postgres_native_tls::MakeTlsConnector;
use secrecy::ExposeSecret;
use std::time::Duration;
use tokio_postgres::config::SslMode;
use tokio_postgres::types::ToSql;
use tokio_postgres::{NoTls, Row};

/// Pooled PostgreSQL client
///
/// Every statement runs on a pooled connection after setting
/// `statement_timeout` from configuration.
pub struct PostgreSQLClient {
    pool: Pool,
    config: PostgreSQLConfig,
}

impl PostgreSQLClient {
    /// Create a new PostgreSQL client
    ///
    /// The pool is created lazily; no connection is opened until the first
    /// statement. Use [`Self::test_connection`] to fail fast.
    ///
    /// # Errors
    ///
    /// Returns `KskError::Configuration` for an unparseable connection string
    /// or TLS setup failure.
    pub fn new(config: PostgreSQLConfig) -> Result<Self> {
        let pool = build_pool(&config)?;
        Ok(Self { pool, config })
    }

    /// Test the connection to PostgreSQL
    pub async fn test_connection(&self) -> Result<()> {
        let client = self.get_connection().await?;

        client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| KskError::Connection(format!("Connection test failed: {}", e)))?;

        tracing::info!(
            target = %self.connection_string_safe(),
            "PostgreSQL connection test successful"
        );
        Ok(())
    }

    /// Get a connection from the pool
    ///
    /// # Errors
    ///
    /// Returns `KskError::Connection` if no connection can be obtained.
    pub async fn get_connection(&self) -> Result<deadpool_postgres::Object> {
        self.pool.get().await.map_err(|e| {
            KskError::Connection(format!("Failed to get connection from pool: {}", e))
        })
    }

    async fn prepared_connection(&self) -> Result<deadpool_postgres::Object> {
        let client = self.get_connection().await?;

        let timeout_query = format!(
            "SET statement_timeout = {}",
            self.config.statement_timeout_seconds * 1000
        );
        client
            .batch_execute(&timeout_query)
            .await
            .map_err(|e| KskError::Database(format!("Failed to set statement timeout: {}", e)))?;

        Ok(client)
    }

    /// Execute a query and return rows
    pub async fn query(&self, query: &str, params: &[&(dyn ToSql + Sync)]) -> Result<Vec<Row>> {
        let client = self.prepared_connection().await?;

        client
            .query(query, params)
            .await
            .map_err(|e| KskError::Database(format!("Query failed: {}", e)))
    }

    /// Execute a query expected to return at most one row
    pub async fn query_opt(
        &self,
        query: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Option<Row>> {
        let client = self.prepared_connection().await?;

        client
            .query_opt(query, params)
            .await
            .map_err(|e| KskError::Database(format!("Query failed: {}", e)))
    }

    /// Execute a query expected to return exactly one row
    pub async fn query_one(&self, query: &str, params: &[&(dyn ToSql + Sync)]) -> Result<Row> {
        let client = self.prepared_connection().await?;

        client
            .query_one(query, params)
            .await
            .map_err(|e| KskError::Database(format!("Query failed: {}", e)))
    }

    /// Execute a statement and return the number of affected rows
    pub async fn execute(&self, statement: &str, params: &[&(dyn ToSql + Sync)]) -> Result<u64> {
        let client = self.prepared_connection().await?;

        client
            .execute(statement, params)
            .await
            .map_err(|e| KskError::Database(format!("Statement execution failed: {}", e)))
    }

    /// Schema holding the report tables
    pub fn schema(&self) -> &str {
        &self.config.schema
    }

    /// The connection target with credentials removed
    pub fn connection_string_safe(&self) -> String {
        redact_connection_string(self.config.connection_string.expose_secret().as_str())
    }

    pub fn pool_status(&self) -> deadpool_postgres::Status {
        self.pool.status()
    }
}

fn build_pool(config: &PostgreSQLConfig) -> Result<Pool> {
    let mut pg_config: tokio_postgres::Config = config
        .connection_string
        .expose_secret()
        .as_str()
        .parse()
        .map_err(|e| {
            KskError::Configuration(format!("Invalid PostgreSQL connection string: {}", e))
        })?;

    pg_config.ssl_mode(ssl_mode(&config.ssl_mode));

    let manager_config = ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    };

    let manager = if config.ssl_mode == "disable" {
        Manager::from_config(pg_config, NoTls, manager_config)
    } else {
        Manager::from_config(pg_config, tls_connector(&config.ssl_mode)?, manager_config)
    };

    let timeout = Duration::from_secs(config.connection_timeout_seconds);
    Pool::builder(manager)
        .max_size(config.max_connections)
        .runtime(Runtime::Tokio1)
        .wait_timeout(Some(timeout))
        .create_timeout(Some(timeout))
        .recycle_timeout(Some(timeout))
        .build()
        .map_err(|e| KskError::Configuration(format!("Failed to create connection pool: {}", e)))
}

/// Map a libpq-style ssl mode onto the modes tokio-postgres negotiates
fn ssl_mode(mode: &str) -> SslMode {
    match mode {
        "disable" => SslMode::Disable,
        "allow" | "prefer" => SslMode::Prefer,
        _ => SslMode::Require,
    }
}

fn tls_connector(mode: &str) -> Result<MakeTlsConnector> {
    let mut builder = native_tls::TlsConnector::builder();
    match mode {
        "verify-full" => {}
        "verify-ca" => {
            builder.danger_accept_invalid_hostnames(true);
        }
        _ => {
            builder.danger_accept_invalid_certs(true);
        }
    }

    let connector = builder
        .build()
        .map_err(|e| KskError::Configuration(format!("Failed to initialise TLS: {}", e)))?;
    Ok(MakeTlsConnector::new(connector))
}

fn redact_connection_string(connection_string: &str) -> String {
    match connection_string.rsplit_once('@') {
        Some((_, host)) => format!("postgresql://***@{}", host),
        None => connection_string.to_string(),
    }
}
