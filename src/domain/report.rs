//! Report catalog and header models
//!
//! These types mirror the `ksk_report_orchestrator` catalog and the
//! `ksk_report_header` control table, plus the request/response shapes of the
//! user report operations.

use crate::domain::ids::{HeaderId, ReportCode, Username};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Origin of a report instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Initiator {
    /// Produced by the scheduler
    System,
    /// Requested on demand by a user
    User,
}

impl Initiator {
    /// Database representation
    pub fn as_str(self) -> &'static str {
        match self {
            Initiator::System => "system",
            Initiator::User => "user",
        }
    }
}

impl FromStr for Initiator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Initiator::System),
            "user" => Ok(Initiator::User),
            other => Err(format!("Unknown report initiator: {other}")),
        }
    }
}

impl fmt::Display for Initiator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Report generation status
///
/// Transitions `Created -> InProgress -> {Done, Error}` are performed by the
/// external worker; this crate only reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Header inserted, waiting for a worker
    Created,
    /// A worker is populating the data rows
    InProgress,
    /// Rows are complete and immutable
    Done,
    /// Generation failed, see the header's error message
    Error,
}

impl ReportStatus {
    /// Database representation
    pub fn as_str(self) -> &'static str {
        match self {
            ReportStatus::Created => "created",
            ReportStatus::InProgress => "in_progress",
            ReportStatus::Done => "done",
            ReportStatus::Error => "error",
        }
    }

    /// Whether the worker has finished with this report
    pub fn is_finished(self) -> bool {
        matches!(self, ReportStatus::Done | ReportStatus::Error)
    }

    /// Human-readable status description
    pub fn message(self) -> &'static str {
        match self {
            ReportStatus::Created => "Report is queued for generation",
            ReportStatus::InProgress => "Report is being generated",
            ReportStatus::Done => "Report is ready",
            ReportStatus::Error => "Report generation failed",
        }
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(ReportStatus::Created),
            "in_progress" => Ok(ReportStatus::InProgress),
            "done" => Ok(ReportStatus::Done),
            "error" => Ok(ReportStatus::Error),
            other => Err(format!("Unknown report status: {other}")),
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status filter for listing user reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Every status
    #[default]
    All,
    /// Only reports in the given status
    Only(ReportStatus),
}

impl StatusFilter {
    /// The status to filter on, if any
    pub fn status(self) -> Option<ReportStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(status),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(StatusFilter::All),
            other => other.parse().map(StatusFilter::Only),
        }
    }
}

/// Catalog entry describing one report type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportType {
    /// Unique report code
    pub report_code: String,

    /// Display name
    pub name: String,

    /// Retention of system-generated instances, in days
    pub system_ttl: i32,

    /// Retention of user-requested instances, in days
    pub user_ttl: i32,
}

/// Catalog listing returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportTypes {
    pub report_types: Vec<ReportType>,
}

/// Control record for one report instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportHeader {
    pub id: HeaderId,
    pub orchestrator_id: i64,
    /// Report code of the orchestrator, joined in on load
    pub report_code: String,
    pub initiator: Initiator,
    /// Owner login, present only for user-initiated reports
    pub user_login: Option<String>,
    pub status: ReportStatus,
    pub created_datetime: NaiveDateTime,
    pub finished_datetime: Option<NaiveDateTime>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub parameters: Option<serde_json::Value>,
    pub error_message: Option<String>,
}

impl ReportHeader {
    /// Calendar date the report was created on
    pub fn report_date(&self) -> NaiveDate {
        self.created_datetime.date()
    }

    /// Whether `username` may read this header
    ///
    /// System reports are readable by everyone; user reports only by their
    /// owner.
    pub fn is_visible_to(&self, username: &Username) -> bool {
        match self.initiator {
            Initiator::System => true,
            Initiator::User => self.user_login.as_deref() == Some(username.as_str()),
        }
    }
}

/// Request to create a user report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReportRequest {
    pub report_code: ReportCode,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub parameters: Option<serde_json::Value>,
}

/// Newly created user report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedReport {
    pub id: HeaderId,
    pub report_code: String,
    pub status: ReportStatus,
    pub created_datetime: NaiveDateTime,
}

/// Status view of a user report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportStatusView {
    pub id: HeaderId,
    pub report_code: String,
    pub status: ReportStatus,
    pub message: String,
    pub created_datetime: NaiveDateTime,
    pub finished_datetime: Option<NaiveDateTime>,
    /// Wall time from creation to finish, for finished reports
    pub duration_seconds: Option<i64>,
    /// Number of data rows, filled in for `done` reports
    #[serde(default)]
    pub rows_count: Option<i64>,
    pub error_message: Option<String>,
}

impl From<&ReportHeader> for ReportStatusView {
    fn from(header: &ReportHeader) -> Self {
        let duration_seconds = header
            .finished_datetime
            .filter(|_| header.status.is_finished())
            .map(|finished| (finished - header.created_datetime).num_seconds());

        let message = match (&header.status, &header.error_message) {
            (ReportStatus::Error, Some(error)) => {
                format!("{}: {}", header.status.message(), error)
            }
            (status, _) => status.message().to_string(),
        };

        Self {
            id: header.id,
            report_code: header.report_code.clone(),
            status: header.status,
            message,
            created_datetime: header.created_datetime,
            finished_datetime: header.finished_datetime,
            duration_seconds,
            rows_count: None,
            error_message: header.error_message.clone(),
        }
    }
}

/// Confirmation of a deleted user report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedReport {
    pub message: String,
    pub report_id: HeaderId,
}
