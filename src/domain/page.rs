//! Paging and row models
//!
//! Report rows have no fixed schema: the columns depend on which table or
//! function served them. A [`Row`] is therefore an ordered list of
//! column-name/value pairs that serializes as a JSON object in column order.

use crate::domain::errors::KskError;
use crate::domain::report::ReportStatusView;
use crate::domain::Result;
use chrono::NaiveDate;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A validated limit/offset pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: i64,
    pub offset: i64,
}

impl PageRequest {
    /// Creates a page request
    ///
    /// # Errors
    ///
    /// Returns a validation error if `limit < 1` or `offset < 0`.
    pub fn new(limit: i64, offset: i64) -> Result<Self> {
        if limit < 1 {
            return Err(KskError::Validation(format!(
                "limit must be at least 1, got {limit}"
            )));
        }
        if offset < 0 {
            return Err(KskError::Validation(format!(
                "offset must not be negative, got {offset}"
            )));
        }
        Ok(Self { limit, offset })
    }

    /// Creates a page request whose limit may not exceed `max_limit`
    pub fn bounded(limit: i64, offset: i64, max_limit: i64) -> Result<Self> {
        if limit > max_limit {
            return Err(KskError::Validation(format!(
                "limit must not exceed {max_limit}, got {limit}"
            )));
        }
        Self::new(limit, offset)
    }

    /// Whether more rows exist past this page given `total` rows overall
    ///
    /// `total` comes from a separate count query and may be slightly stale.
    pub fn has_more(&self, total: i64) -> bool {
        self.offset.saturating_add(self.limit) < total
    }
}

/// Pagination metadata attached to every page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total_records: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

impl Pagination {
    /// Computes pagination for `page` over `total` rows
    pub fn new(page: PageRequest, total: i64) -> Self {
        Self {
            total_records: total,
            limit: page.limit,
            offset: page.offset,
            has_more: page.has_more(total),
        }
    }
}

/// One schemaless report row
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    /// Creates a row from ordered column/value pairs
    pub fn new(columns: Vec<(String, Value)>) -> Self {
        Self { columns }
    }

    /// Builds a row from a JSON object, keeping its key order
    ///
    /// # Errors
    ///
    /// Returns a serialization error if `value` is not an object.
    pub fn from_json_object(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self {
                columns: map.into_iter().collect(),
            }),
            other => Err(KskError::Serialization(format!(
                "Expected a JSON object for a report row, got {other}"
            ))),
        }
    }

    /// Value of a column, if present
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Column names in order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Column/value pairs in order
    pub fn columns(&self) -> &[(String, Value)] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = Row;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of column names to values")
            }

            fn visit_map<A>(self, mut access: A) -> std::result::Result<Row, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut columns = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, value)) = access.next_entry::<String, Value>()? {
                    columns.push((name, value));
                }
                Ok(Row { columns })
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}

/// A page of report rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPage {
    pub report_code: String,
    /// Report date, when the page was resolved through a date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub data: Vec<Row>,
    pub pagination: Pagination,
}

impl ReportPage {
    /// An empty page, used when no report exists for a date
    pub fn empty(report_code: impl Into<String>, date: Option<NaiveDate>, page: PageRequest) -> Self {
        Self {
            report_code: report_code.into(),
            date,
            data: Vec::new(),
            pagination: Pagination::new(page, 0),
        }
    }
}

/// Range of dates for which system reports exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
    pub default_date: NaiveDate,
}

impl DateRange {
    /// A range collapsed onto a single day
    pub fn single(day: NaiveDate) -> Self {
        Self {
            min_date: day,
            max_date: day,
            default_date: day,
        }
    }
}

/// A page of user report headers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportList {
    pub reports: Vec<ReportStatusView>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(100, 0, 150 => true ; "first page of many")]
    #[test_case(100, 100, 150 => false ; "last partial page")]
    #[test_case(150, 0, 150 => false ; "limit equals total")]
    #[test_case(50, 150, 150 => false ; "offset equals total")]
    #[test_case(10, 0, 0 => false ; "empty source")]
    #[test_case(10, 0, 11 => true ; "one row left over")]
    fn test_has_more(limit: i64, offset: i64, total: i64) -> bool {
        PageRequest::new(limit, offset).unwrap().has_more(total)
    }

    #[test]
    fn test_page_request_validation() {
        assert!(PageRequest::new(0, 0).is_err());
        assert!(PageRequest::new(10, -1).is_err());
        assert!(PageRequest::bounded(101, 0, 100).is_err());
        assert!(PageRequest::bounded(100, 0, 100).is_ok());
    }

    #[test]
    fn test_has_more_does_not_overflow() {
        let page = PageRequest::new(i64::MAX, i64::MAX).unwrap();
        assert!(!page.has_more(10));
    }

    #[test]
    fn test_row_keeps_column_order() {
        let row = Row::new(vec![
            ("zeta".to_string(), json!(1)),
            ("alpha".to_string(), json!("a")),
        ]);
        let rendered = serde_json::to_string(&row).unwrap();
        assert_eq!(rendered, r#"{"zeta":1,"alpha":"a"}"#);

        let back: Row = serde_json::from_str(&rendered).unwrap();
        assert_eq!(back.column_names().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_row_from_json_object() {
        let row = Row::from_json_object(json!({"report_header_id": 126, "amount": 10.5})).unwrap();
        assert_eq!(row.get("report_header_id"), Some(&json!(126)));
        assert_eq!(row.len(), 2);
        assert!(Row::from_json_object(json!([1, 2])).is_err());
    }

    #[test]
    fn test_empty_page() {
        let page = ReportPage::empty("totals", None, PageRequest::new(100, 0).unwrap());
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total_records, 0);
        assert!(!page.pagination.has_more);
    }
}
