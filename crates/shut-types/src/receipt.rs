use crate::{CheckResult, CheckStatus};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for the `shut check` JSON report.
pub const SCHEMA_CHECK_REPORT_V1: &str = "shut.check.v1";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RunMeta {
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "Option<String>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(with = "time::serde::rfc3339::option")]
    pub ended_at: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

/// Number of results per status.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StatusCounts {
    pub ok: u32,
    pub recommendation: u32,
    pub warning: u32,
    pub error: u32,
    pub skipped: u32,
}

impl StatusCounts {
    pub fn record(&mut self, status: CheckStatus) {
        match status {
            CheckStatus::Ok => self.ok += 1,
            CheckStatus::Recommendation => self.recommendation += 1,
            CheckStatus::Warning => self.warning += 1,
            CheckStatus::Error => self.error += 1,
            CheckStatus::Skipped => self.skipped += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.ok + self.recommendation + self.warning + self.error + self.skipped
    }
}

/// One result as it appears in the report, tagged with the check that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReportRecord {
    pub checker: String,
    pub check_id: String,
    #[serde(flatten)]
    pub result: CheckResult,
    /// Set when the result was synthesized from a check that failed internally.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub internal: bool,
}

/// The `shut.check.v1` report envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CheckReport {
    pub schema: String,
    pub tool: ToolMeta,
    pub run: RunMeta,
    /// Maximum severity over all records, ignoring skipped ones.
    pub status: CheckStatus,
    pub passed: bool,
    pub counts: StatusCounts,
    pub records: Vec<ReportRecord>,
}
