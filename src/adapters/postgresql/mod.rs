//! PostgreSQL report storage
//!
//! Reads the report catalog, headers and data tables of the report schema and
//! writes user report requests.

pub mod adapter;
pub mod client;
pub mod models;
pub mod queries;

pub use adapter::PostgreSQLAdapter;
pub use client::PostgreSQLClient;
pub use queries::ReportQueries;
