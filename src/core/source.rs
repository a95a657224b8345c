//! Report kind to data source resolution
//!
//! Every report code maps to exactly one data source. Known codes map to
//! their own table, `review` maps to the date-parameterized
//! `ksk_report_review` function, and anything else falls back to the totals
//! table.

use crate::domain::ids::HeaderId;
use chrono::NaiveDate;
use std::fmt;

/// Table served for report codes without a dedicated source
pub const DEFAULT_TABLE: &str = "ksk_report_totals_data";

/// Function that computes the review report for a date
pub const REVIEW_FUNCTION: &str = "ksk_report_review";

/// Report kinds with a known data source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Totals,
    TotalsByPaymentType,
    ListTotals,
    ListTotalsByPaymentType,
    Figurants,
    Review,
    /// Code without a dedicated source; served from [`DEFAULT_TABLE`]
    Unmapped,
}

impl ReportKind {
    /// Every kind with a dedicated source
    pub const KNOWN: [ReportKind; 6] = [
        ReportKind::Totals,
        ReportKind::TotalsByPaymentType,
        ReportKind::ListTotals,
        ReportKind::ListTotalsByPaymentType,
        ReportKind::Figurants,
        ReportKind::Review,
    ];

    /// Classifies a report code
    pub fn from_code(code: &str) -> Self {
        match code {
            "totals" => ReportKind::Totals,
            "totals_by_payment_type" => ReportKind::TotalsByPaymentType,
            "list_totals" => ReportKind::ListTotals,
            "list_totals_by_payment_type" => ReportKind::ListTotalsByPaymentType,
            "figurants" => ReportKind::Figurants,
            "review" => ReportKind::Review,
            _ => ReportKind::Unmapped,
        }
    }

    /// Canonical report code, `None` for unmapped codes
    pub fn code(self) -> Option<&'static str> {
        match self {
            ReportKind::Totals => Some("totals"),
            ReportKind::TotalsByPaymentType => Some("totals_by_payment_type"),
            ReportKind::ListTotals => Some("list_totals"),
            ReportKind::ListTotalsByPaymentType => Some("list_totals_by_payment_type"),
            ReportKind::Figurants => Some("figurants"),
            ReportKind::Review => Some("review"),
            ReportKind::Unmapped => None,
        }
    }

    /// The authoritative data source for this kind
    pub fn data_source(self) -> DataSource {
        match self {
            ReportKind::Totals | ReportKind::Unmapped => DataSource::Table(DEFAULT_TABLE),
            ReportKind::TotalsByPaymentType => {
                DataSource::Table("ksk_report_totals_by_payment_type_data")
            }
            ReportKind::ListTotals => DataSource::Table("ksk_report_list_totals_data"),
            ReportKind::ListTotalsByPaymentType => {
                DataSource::Table("ksk_report_list_totals_by_payment_type_data")
            }
            ReportKind::Figurants => DataSource::Table("ksk_report_figurants_data"),
            ReportKind::Review => DataSource::Function(REVIEW_FUNCTION),
        }
    }
}

/// Where the rows of a report live
///
/// Names are compile-time constants, so they are safe to splice into SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataSource {
    /// A data table carrying `report_date` and `report_header_id`
    Table(&'static str),
    /// A set-returning function taking a report date
    Function(&'static str),
}

impl DataSource {
    /// Resolves the source for a report code
    pub fn for_code(code: &str) -> Self {
        ReportKind::from_code(code).data_source()
    }

    /// Table or function name
    pub fn name(self) -> &'static str {
        match self {
            DataSource::Table(name) | DataSource::Function(name) => name,
        }
    }

    pub fn is_function(self) -> bool {
        matches!(self, DataSource::Function(_))
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Table(name) => write!(f, "table {name}"),
            DataSource::Function(name) => write!(f, "function {name}(date)"),
        }
    }
}

/// A fully resolved row query, ready for a data store
///
/// Functions only take a date, so there is no header-scoped function variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataQuery {
    /// Legacy access path: table rows filtered by `report_date`
    TableByDate {
        table: &'static str,
        date: NaiveDate,
    },
    /// Canonical access path: table rows filtered by `report_header_id`
    TableByHeader {
        table: &'static str,
        header_id: HeaderId,
    },
    /// Computed rows for a date
    FunctionByDate {
        function: &'static str,
        date: NaiveDate,
    },
}

impl DataQuery {
    /// Query for the rows of `source` on `date`
    pub fn by_date(source: DataSource, date: NaiveDate) -> Self {
        match source {
            DataSource::Table(table) => DataQuery::TableByDate { table, date },
            DataSource::Function(function) => DataQuery::FunctionByDate { function, date },
        }
    }

    /// Query for the rows of `source` belonging to a header
    ///
    /// `report_date` is used instead of the header id when the source is a
    /// function.
    pub fn by_header(source: DataSource, header_id: HeaderId, report_date: NaiveDate) -> Self {
        match source {
            DataSource::Table(table) => DataQuery::TableByHeader { table, header_id },
            DataSource::Function(function) => DataQuery::FunctionByDate {
                function,
                date: report_date,
            },
        }
    }

    /// The source this query reads
    pub fn source(&self) -> DataSource {
        match *self {
            DataQuery::TableByDate { table, .. } | DataQuery::TableByHeader { table, .. } => {
                DataSource::Table(table)
            }
            DataQuery::FunctionByDate { function, .. } => DataSource::Function(function),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use test_case::test_case;

    #[test_case("totals", "ksk_report_totals_data")]
    #[test_case("totals_by_payment_type", "ksk_report_totals_by_payment_type_data")]
    #[test_case("list_totals", "ksk_report_list_totals_data")]
    #[test_case("list_totals_by_payment_type", "ksk_report_list_totals_by_payment_type_data")]
    #[test_case("figurants", "ksk_report_figurants_data")]
    fn test_known_codes_map_to_tables(code: &str, table: &'static str) {
        assert_eq!(DataSource::for_code(code), DataSource::Table(table));
    }

    #[test]
    fn test_review_maps_to_function() {
        let source = DataSource::for_code("review");
        assert!(source.is_function());
        assert_eq!(source.name(), REVIEW_FUNCTION);
    }

    #[test_case("unknown_code")]
    #[test_case("TOTALS")]
    #[test_case("")]
    fn test_unknown_codes_fall_back_to_default_table(code: &str) {
        assert_eq!(ReportKind::from_code(code), ReportKind::Unmapped);
        assert_eq!(DataSource::for_code(code), DataSource::Table(DEFAULT_TABLE));
    }

    #[test]
    fn test_mapping_is_stable_and_distinct() {
        let mut seen = HashSet::new();
        for kind in ReportKind::KNOWN {
            let code = kind.code().unwrap();
            assert_eq!(ReportKind::from_code(code), kind);
            assert_eq!(DataSource::for_code(code), DataSource::for_code(code));
            assert!(seen.insert(kind.data_source()), "{code} shares a source");
        }
    }

    #[test]
    fn test_review_by_header_uses_report_date() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 25).unwrap();
        let header_id = HeaderId::new(126).unwrap();
        let query = DataQuery::by_header(DataSource::for_code("review"), header_id, date);
        assert_eq!(
            query,
            DataQuery::FunctionByDate {
                function: REVIEW_FUNCTION,
                date
            }
        );
    }

    #[test]
    fn test_table_by_header_filters_on_header() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 25).unwrap();
        let header_id = HeaderId::new(126).unwrap();
        let query = DataQuery::by_header(DataSource::for_code("figurants"), header_id, date);
        assert_eq!(
            query,
            DataQuery::TableByHeader {
                table: "ksk_report_figurants_data",
                header_id
            }
        );
        assert_eq!(query.source().name(), "ksk_report_figurants_data");
    }
}
