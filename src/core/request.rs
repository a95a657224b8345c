//! Validation of user report requests

use crate::domain::report::CreateReportRequest;
use crate::domain::{KskError, Result};
use chrono::NaiveDate;

/// Longest date range a user report may span, in days
pub const MAX_RANGE_DAYS: i64 = 365;

/// Check the date range of a request against `today`
///
/// The range must be ordered, must not end in the future and may span at
/// most [`MAX_RANGE_DAYS`] days.
pub fn validate_request(request: &CreateReportRequest, today: NaiveDate) -> Result<()> {
    if request.start_date > request.end_date {
        return Err(KskError::Validation(format!(
            "start_date {} is after end_date {}",
            request.start_date, request.end_date
        )));
    }

    if request.end_date > today {
        return Err(KskError::Validation(format!(
            "end_date {} is in the future",
            request.end_date
        )));
    }

    let span = (request.end_date - request.start_date).num_days();
    if span > MAX_RANGE_DAYS {
        return Err(KskError::Validation(format!(
            "date range spans {span} days, at most {MAX_RANGE_DAYS} allowed"
        )));
    }

    if let Some(parameters) = &request.parameters {
        if !parameters.is_object() {
            return Err(KskError::Validation(
                "parameters must be a JSON object".to_string(),
            ));
        }
    }

    Ok(())
}
