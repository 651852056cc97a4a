//! Stable DTOs and IDs used across the shut workspace.
//!
//! This crate is intentionally boring:
//! - check outcome types (status, result, subject)
//! - stable check IDs
//! - canonical project-relative path handling
//! - the JSON report envelope
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod path;
pub mod receipt;
pub mod result;

pub use explain::{Explanation, lookup_explanation};
pub use path::RepoPath;
pub use receipt::{CheckReport, ReportRecord, RunMeta, SCHEMA_CHECK_REPORT_V1, StatusCounts, ToolMeta};
pub use result::{CheckResult, CheckStatus, Subject};
