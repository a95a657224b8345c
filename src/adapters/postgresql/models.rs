//! Row mapping between PostgreSQL and domain models

use crate::adapters::database::traits::Orchestrator;
use crate::domain::ids::HeaderId;
use crate::domain::page::Row;
use crate::domain::report::{Initiator, ReportHeader, ReportStatus};
use crate::domain::{KskError, Result};
use tokio_postgres::types::FromSql;

fn column<'a, T: FromSql<'a>>(row: &'a tokio_postgres::Row, name: &str) -> Result<T> {
    row.try_get(name)
        .map_err(|e| KskError::Database(format!("Failed to read column {name}: {e}")))
}

/// Map a joined header row, see `ReportQueries::header_by_id`
pub fn header_from_row(row: &tokio_postgres::Row) -> Result<ReportHeader> {
    let id: i64 = column(row, "id")?;
    let initiator: String = column(row, "initiator")?;
    let status: String = column(row, "status")?;

    Ok(ReportHeader {
        id: HeaderId::new(id).map_err(KskError::Database)?,
        orchestrator_id: column(row, "orchestrator_id")?,
        report_code: column(row, "report_code")?,
        initiator: initiator.parse::<Initiator>().map_err(KskError::Database)?,
        user_login: column(row, "user_login")?,
        status: status.parse::<ReportStatus>().map_err(KskError::Database)?,
        created_datetime: column(row, "created_datetime")?,
        finished_datetime: column(row, "finished_datetime")?,
        start_date: column(row, "start_date")?,
        end_date: column(row, "end_date")?,
        parameters: column(row, "parameters")?,
        error_message: column(row, "error_message")?,
    })
}

/// Map a catalog row
pub fn orchestrator_from_row(row: &tokio_postgres::Row) -> Result<Orchestrator> {
    Ok(Orchestrator {
        id: column(row, "id")?,
        report_code: column(row, "report_code")?,
        name: column(row, "name")?,
        system_ttl: column(row, "system_ttl")?,
        user_ttl: column(row, "user_ttl")?,
    })
}

/// Parse one `row_to_json(..)::text` value into a report row
///
/// Column order follows the table definition.
pub fn report_row_from_json(text: &str) -> Result<Row> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    Row::from_json_object(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_row_keeps_column_order() {
        let row = report_row_from_json(
            r#"{"report_header_id": 126, "report_date": "2025-10-25", "amount": 12.5, "client": null}"#,
        )
        .unwrap();

        let names: Vec<&str> = row.column_names().collect();
        assert_eq!(
            names,
            vec!["report_header_id", "report_date", "amount", "client"]
        );
        assert_eq!(row.get("amount"), Some(&json!(12.5)));
        assert_eq!(row.get("client"), Some(&serde_json::Value::Null));
    }

    #[test]
    fn test_report_row_rejects_non_object() {
        assert!(matches!(
            report_row_from_json("[1, 2]"),
            Err(KskError::Serialization(_))
        ));
        assert!(report_row_from_json("not json").is_err());
    }
}
