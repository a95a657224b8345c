//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers that cross the API: report header
//! ids, report codes and owner logins. Each type validates on construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Report header identifier
///
/// Primary key of `ksk_report_header`. Always positive.
///
/// # Examples
///
/// ```
/// use ksk_reports::domain::ids::HeaderId;
/// use std::str::FromStr;
///
/// let id = HeaderId::from_str("126").unwrap();
/// assert_eq!(id.get(), 126);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct HeaderId(i64);

impl HeaderId {
    /// Creates a new HeaderId
    ///
    /// Returns `Err` if the id is not positive.
    pub fn new(id: i64) -> Result<Self, String> {
        if id <= 0 {
            return Err(format!("Report header id must be positive, got {id}"));
        }
        Ok(Self(id))
    }

    /// Returns the raw id
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for HeaderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HeaderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .trim()
            .parse::<i64>()
            .map_err(|e| format!("Invalid report header id '{s}': {e}"))?;
        Self::new(id)
    }
}

impl TryFrom<i64> for HeaderId {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HeaderId> for i64 {
    fn from(id: HeaderId) -> Self {
        id.0
    }
}

/// Report type code, e.g. `totals` or `figurants`
///
/// Any non-empty code is accepted here. Whether it names a catalog entry is
/// decided by the report catalog, not by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReportCode(String);

impl ReportCode {
    /// Creates a new ReportCode, trimming surrounding whitespace
    pub fn new(code: impl Into<String>) -> Result<Self, String> {
        let code = code.into();
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err("Report code cannot be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReportCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ReportCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ReportCode> for String {
    fn from(code: ReportCode) -> Self {
        code.0
    }
}

impl AsRef<str> for ReportCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Login of the user who owns a user-initiated report
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// Creates a new Username
    pub fn new(login: impl Into<String>) -> Result<Self, String> {
        let login = login.into();
        if login.trim().is_empty() {
            return Err("Username cannot be empty".to_string());
        }
        Ok(Self(login))
    }

    /// Returns the login as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Username {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
