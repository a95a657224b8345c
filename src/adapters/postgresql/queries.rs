//! SQL text for the report schema
//!
//! Table and function names come from the fixed source registry and the
//! schema name is validated as a plain identifier at config load, so both are
//! interpolated. Everything else is a bind parameter.

use crate::core::source::DataQuery;

/// Statement builder bound to one schema
#[derive(Debug, Clone)]
pub struct ReportQueries {
    schema: String,
}

const HEADER_COLUMNS: &str = "rh.id::bigint AS id, \
     rh.orchestrator_id::bigint AS orchestrator_id, \
     ro.report_code AS report_code, \
     rh.initiator::text AS initiator, \
     rh.user_login AS user_login, \
     rh.status::text AS status, \
     rh.created_datetime::timestamp AS created_datetime, \
     rh.finished_datetime::timestamp AS finished_datetime, \
     rh.start_date AS start_date, \
     rh.end_date AS end_date, \
     rh.parameters::jsonb AS parameters, \
     rh.error_message AS error_message";

impl ReportQueries {
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
        }
    }

    fn qualified(&self, name: &str) -> String {
        format!("{}.{}", self.schema, name)
    }

    fn header_from(&self) -> String {
        format!(
            "FROM {} rh JOIN {} ro ON ro.id = rh.orchestrator_id",
            self.qualified("ksk_report_header"),
            self.qualified("ksk_report_orchestrator")
        )
    }

    // ========== Catalog ==========

    /// `$1` report code
    pub fn orchestrator_by_code(&self) -> String {
        format!(
            "SELECT id::bigint AS id, report_code, name, system_ttl::int AS system_ttl, \
             user_ttl::int AS user_ttl FROM {} WHERE report_code = $1",
            self.qualified("ksk_report_orchestrator")
        )
    }

    pub fn report_types(&self) -> String {
        format!(
            "SELECT id::bigint AS id, report_code, name, system_ttl::int AS system_ttl, \
             user_ttl::int AS user_ttl FROM {} ORDER BY report_code",
            self.qualified("ksk_report_orchestrator")
        )
    }

    // ========== Headers ==========

    /// `$1` orchestrator id, `$2` calendar date
    pub fn latest_system_header(&self) -> String {
        format!(
            "SELECT id::bigint AS id FROM {} \
             WHERE orchestrator_id = $1::bigint \
             AND DATE(created_datetime) = $2 \
             AND initiator::text = 'system' \
             AND status::text = 'done' \
             ORDER BY created_datetime DESC \
             LIMIT 1",
            self.qualified("ksk_report_header")
        )
    }

    /// `$1` header id
    pub fn header_by_id(&self) -> String {
        format!(
            "SELECT {} {} WHERE rh.id = $1::bigint",
            HEADER_COLUMNS,
            self.header_from()
        )
    }

    pub fn system_date_bounds(&self) -> String {
        format!(
            "SELECT MIN(DATE(created_datetime)) AS min_date, \
             MAX(DATE(created_datetime)) AS max_date \
             FROM {} \
             WHERE initiator::text = 'system' AND status::text = 'done'",
            self.qualified("ksk_report_header")
        )
    }

    /// `$1` owner, `$2` optional status, `$3` limit, `$4` offset
    pub fn user_headers(&self) -> String {
        format!(
            "SELECT {} {} \
             WHERE rh.initiator::text = 'user' \
             AND rh.user_login = $1 \
             AND ($2::text IS NULL OR rh.status::text = $2) \
             ORDER BY rh.created_datetime DESC \
             LIMIT $3 OFFSET $4",
            HEADER_COLUMNS,
            self.header_from()
        )
    }

    /// `$1` owner, `$2` optional status
    pub fn count_user_headers(&self) -> String {
        format!(
            "SELECT COUNT(*) FROM {} \
             WHERE initiator::text = 'user' \
             AND user_login = $1 \
             AND ($2::text IS NULL OR status::text = $2)",
            self.qualified("ksk_report_header")
        )
    }

    // ========== Requests ==========

    /// `$1` orchestrator id, `$2` owner, `$3` start, `$4` end, `$5` parameters,
    /// `$6` ttl in days
    pub fn insert_user_header(&self) -> String {
        format!(
            "INSERT INTO {} \
             (orchestrator_id, initiator, user_login, status, created_datetime, \
             start_date, end_date, parameters, ttl) \
             VALUES ($1::bigint, 'user', $2, 'created', now(), $3::date, $4::date, $5::jsonb, $6::int) \
             RETURNING id::bigint AS id, created_datetime::timestamp AS created_datetime",
            self.qualified("ksk_report_header")
        )
    }

    /// `$1` channel, `$2` payload
    pub fn notify(&self) -> &'static str {
        "SELECT pg_notify($1, $2)"
    }

    /// `$1` header id, `$2` owner
    pub fn delete_user_header(&self) -> String {
        format!(
            "DELETE FROM {} \
             WHERE id = $1::bigint AND initiator::text = 'user' AND user_login = $2",
            self.qualified("ksk_report_header")
        )
    }

    // ========== Report data ==========

    /// Rows of a data query as JSON text, `$1` filter, `$2` limit, `$3` offset
    ///
    /// Header-keyed reads carry no ORDER BY; rows come back in storage order.
    pub fn data_rows(&self, query: &DataQuery) -> String {
        match query {
            DataQuery::TableByDate { table, .. } => format!(
                "SELECT row_to_json(t)::text FROM {} t \
                 WHERE t.report_date = $1 \
                 ORDER BY t.report_date DESC \
                 LIMIT $2 OFFSET $3",
                self.qualified(table)
            ),
            DataQuery::TableByHeader { table, .. } => format!(
                "SELECT row_to_json(t)::text FROM {} t \
                 WHERE t.report_header_id = $1::bigint \
                 LIMIT $2 OFFSET $3",
                self.qualified(table)
            ),
            DataQuery::FunctionByDate { function, .. } => format!(
                "SELECT row_to_json(r)::text FROM {}($1::date) r LIMIT $2 OFFSET $3",
                self.qualified(function)
            ),
        }
    }

    /// Total rows matching a data query, `$1` filter
    pub fn data_count(&self, query: &DataQuery) -> String {
        match query {
            DataQuery::TableByDate { table, .. } => format!(
                "SELECT COUNT(*) FROM {} WHERE report_date = $1",
                self.qualified(table)
            ),
            DataQuery::TableByHeader { table, .. } => format!(
                "SELECT COUNT(*) FROM {} WHERE report_header_id = $1::bigint",
                self.qualified(table)
            ),
            DataQuery::FunctionByDate { function, .. } => {
                format!("SELECT COUNT(*) FROM {}($1::date)", self.qualified(function))
            }
        }
    }
}
