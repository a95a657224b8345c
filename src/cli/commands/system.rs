//! System report commands
//!
//! `dates` and `system-data`: browsing scheduled reports by date.

use crate::cli::commands::{fail, finish, open_service, print_json};
use crate::domain::ids::ReportCode;
use chrono::NaiveDate;
use clap::Args;

/// Arguments for the dates command
#[derive(Args, Debug)]
pub struct DatesArgs {}

impl DatesArgs {
    /// Print the range of dates with finished system reports
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let service = match open_service(config_path).await {
            Ok(s) => s,
            Err(code) => return Ok(code),
        };

        print_json(&service.available_dates().await)
    }
}

/// Arguments for the system-data command
#[derive(Args, Debug)]
pub struct SystemDataArgs {
    /// Report type code (e.g. totals, figurants, review)
    #[arg(long)]
    pub report: ReportCode,

    /// Report date (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,

    /// Page size
    #[arg(long)]
    pub limit: Option<i64>,

    /// Rows to skip
    #[arg(long)]
    pub offset: Option<i64>,
}

impl SystemDataArgs {
    /// Print one page of a system report
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(report_code = %self.report, date = %self.date, "Fetching system report");

        let service = match open_service(config_path).await {
            Ok(s) => s,
            Err(code) => return Ok(code),
        };

        let page = match service.data_page(self.limit, self.offset) {
            Ok(p) => p,
            Err(e) => return Ok(fail("Invalid page request", &e)),
        };

        finish(
            "Failed to fetch system report",
            service.system_report_data(&self.report, self.date, page).await,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_system_data_args() {
        let cli = Cli::parse_from([
            "ksk-reports",
            "system-data",
            "--report",
            "totals",
            "--date",
            "2025-10-25",
            "--limit",
            "50",
        ]);
        match cli.command {
            Commands::SystemData(args) => {
                assert_eq!(args.report.as_str(), "totals");
                assert_eq!(args.date.to_string(), "2025-10-25");
                assert_eq!(args.limit, Some(50));
                assert_eq!(args.offset, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_system_data_rejects_bad_date() {
        let result = Cli::try_parse_from([
            "ksk-reports",
            "system-data",
            "--report",
            "totals",
            "--date",
            "25.10.2025",
        ]);
        assert!(result.is_err());
    }
}
