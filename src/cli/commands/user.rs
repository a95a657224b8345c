//! User report commands
//!
//! `types`, `list`, `create`, `status`, `user-data` and `delete`. Every
//! command acts on behalf of `--user`, which defaults to `KSK_USER`.

use crate::cli::commands::{fail, finish, open_service};
use crate::domain::ids::{HeaderId, ReportCode, Username};
use crate::domain::report::{CreateReportRequest, StatusFilter};
use chrono::NaiveDate;
use clap::Args;

/// Arguments for the types command
#[derive(Args, Debug)]
pub struct TypesArgs {}

impl TypesArgs {
    /// Print the report type catalog
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let service = match open_service(config_path).await {
            Ok(s) => s,
            Err(code) => return Ok(code),
        };

        finish("Failed to load report types", service.report_types().await)
    }
}

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Login of the acting user
    #[arg(long, env = "KSK_USER")]
    pub user: Username,

    /// Status filter: all, created, in_progress, done, error
    #[arg(long, default_value = "all")]
    pub status: StatusFilter,

    /// Page size (at most 100)
    #[arg(long)]
    pub limit: Option<i64>,

    /// Reports to skip
    #[arg(long)]
    pub offset: Option<i64>,
}

impl ListArgs {
    /// Print one page of the user's reports
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let service = match open_service(config_path).await {
            Ok(s) => s,
            Err(code) => return Ok(code),
        };

        let page = match service.list_page(self.limit, self.offset) {
            Ok(p) => p,
            Err(e) => return Ok(fail("Invalid page request", &e)),
        };

        finish(
            "Failed to list reports",
            service.user_reports(&self.user, self.status, page).await,
        )
    }
}

/// Arguments for the create command
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Login of the acting user
    #[arg(long, env = "KSK_USER")]
    pub user: Username,

    /// Report type code
    #[arg(long)]
    pub report: ReportCode,

    /// First day of the period (YYYY-MM-DD)
    #[arg(long)]
    pub start: NaiveDate,

    /// Last day of the period (YYYY-MM-DD)
    #[arg(long)]
    pub end: NaiveDate,

    /// Extra report parameters as a JSON object
    #[arg(long)]
    pub parameters: Option<serde_json::Value>,
}

impl CreateArgs {
    fn request(&self) -> CreateReportRequest {
        CreateReportRequest {
            report_code: self.report.clone(),
            start_date: self.start,
            end_date: self.end,
            parameters: self.parameters.clone(),
        }
    }

    /// Create a user report and print its id and status
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(
            report_code = %self.report,
            username = %self.user,
            start_date = %self.start,
            end_date = %self.end,
            "Creating user report"
        );

        let service = match open_service(config_path).await {
            Ok(s) => s,
            Err(code) => return Ok(code),
        };

        finish(
            "Failed to create report",
            service.create_user_report(&self.user, &self.request()).await,
        )
    }
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Login of the acting user
    #[arg(long, env = "KSK_USER")]
    pub user: Username,

    /// Report id
    pub id: HeaderId,
}

impl StatusArgs {
    /// Print the status of one of the user's reports
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let service = match open_service(config_path).await {
            Ok(s) => s,
            Err(code) => return Ok(code),
        };

        finish(
            "Failed to load report status",
            service.user_report_status(&self.user, self.id).await,
        )
    }
}

/// Arguments for the user-data command
#[derive(Args, Debug)]
pub struct UserDataArgs {
    /// Login of the acting user
    #[arg(long, env = "KSK_USER")]
    pub user: Username,

    /// Report id
    pub id: HeaderId,

    /// Page size
    #[arg(long)]
    pub limit: Option<i64>,

    /// Rows to skip
    #[arg(long)]
    pub offset: Option<i64>,
}

impl UserDataArgs {
    /// Print one page of one of the user's reports
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let service = match open_service(config_path).await {
            Ok(s) => s,
            Err(code) => return Ok(code),
        };

        let page = match service.data_page(self.limit, self.offset) {
            Ok(p) => p,
            Err(e) => return Ok(fail("Invalid page request", &e)),
        };

        finish(
            "Failed to fetch report data",
            service.user_report_data(&self.user, self.id, page).await,
        )
    }
}

/// Arguments for the delete command
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Login of the acting user
    #[arg(long, env = "KSK_USER")]
    pub user: Username,

    /// Report id
    pub id: HeaderId,
}

impl DeleteArgs {
    /// Delete one of the user's reports
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(header_id = %self.id, username = %self.user, "Deleting user report");

        let service = match open_service(config_path).await {
            Ok(s) => s,
            Err(code) => return Ok(code),
        };

        finish(
            "Failed to delete report",
            service.delete_user_report(&self.user, self.id).await,
        )
    }
}
