//! Export encoder interface
//!
//! Report pages are turned into downloadable files by an external encoder.
//! This module defines the format selector and the encoder contract; no
//! concrete encoder ships with the crate.

use crate::domain::page::ReportPage;
use crate::domain::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported export file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Pdf,
}

impl ExportFormat {
    /// File extension without the dot
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// MIME type of the encoded file
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "xlsx" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(ReportError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Encodes report pages into file bytes
pub trait ExportEncoder: Send + Sync {
    /// Encode every row of `page` in `format`
    ///
    /// # Errors
    ///
    /// Returns `ReportError::UnsupportedFormat` if this encoder cannot
    /// produce `format`.
    fn encode(&self, page: &ReportPage, format: ExportFormat) -> Result<Vec<u8>>;
}

/// An encoded export ready to be sent to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportPayload {
    /// Encode `page` and name the file after its report code and date
    pub fn encode(
        encoder: &dyn ExportEncoder,
        page: &ReportPage,
        format: ExportFormat,
    ) -> Result<Self> {
        let bytes = encoder.encode(page, format)?;
        let file_name = match page.date {
            Some(date) => format!("{}_{}.{}", page.report_code, date, format.extension()),
            None => format!("{}.{}", page.report_code, format.extension()),
        };

        tracing::info!(
            report_code = %page.report_code,
            format = %format,
            rows = page.data.len(),
            bytes = bytes.len(),
            "Report exported"
        );

        Ok(Self {
            file_name,
            content_type: format.content_type(),
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::page::PageRequest;
    use chrono::NaiveDate;
    use test_case::test_case;

    struct LengthEncoder;

    impl ExportEncoder for LengthEncoder {
        fn encode(&self, page: &ReportPage, format: ExportFormat) -> Result<Vec<u8>> {
            if format == ExportFormat::Pdf {
                return Err(ReportError::UnsupportedFormat("pdf".to_string()).into());
            }
            Ok(page.data.len().to_string().into_bytes())
        }
    }

    #[test_case("xlsx" => Some(ExportFormat::Xlsx))]
    #[test_case("CSV" => Some(ExportFormat::Csv))]
    #[test_case(" pdf " => Some(ExportFormat::Pdf))]
    #[test_case("docx" => None)]
    #[test_case("" => None)]
    fn test_parse_format(input: &str) -> Option<ExportFormat> {
        input.parse().ok()
    }

    #[test]
    fn test_unsupported_format_error() {
        let err = "json".parse::<ExportFormat>().unwrap_err();
        assert!(matches!(err, ReportError::UnsupportedFormat(ref f) if f == "json"));
    }

    #[test]
    fn test_payload_file_name_with_date() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 25).unwrap();
        let page = ReportPage::empty("totals", Some(date), PageRequest::new(10, 0).unwrap());
        let payload = ExportPayload::encode(&LengthEncoder, &page, ExportFormat::Csv).unwrap();
        assert_eq!(payload.file_name, "totals_2025-10-25.csv");
        assert_eq!(payload.content_type, "text/csv; charset=utf-8");
        assert_eq!(payload.bytes, b"0");
    }

    #[test]
    fn test_payload_propagates_encoder_error() {
        let page = ReportPage::empty("totals", None, PageRequest::new(10, 0).unwrap());
        assert!(ExportPayload::encode(&LengthEncoder, &page, ExportFormat::Pdf).is_err());
    }
}
