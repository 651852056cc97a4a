use crate::RepoPath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single check result.
///
/// `Ok < Recommendation < Warning < Error` by severity. `Skipped` records that a
/// check did not apply and carries no severity at all.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    #[default]
    Ok,
    Recommendation,
    Warning,
    Error,
    Skipped,
}

impl CheckStatus {
    /// Severity rank used for aggregation; `None` for `Skipped`.
    pub fn severity(self) -> Option<u8> {
        match self {
            CheckStatus::Ok => Some(0),
            CheckStatus::Recommendation => Some(1),
            CheckStatus::Warning => Some(2),
            CheckStatus::Error => Some(3),
            CheckStatus::Skipped => None,
        }
    }

    /// The worse of two statuses. `Skipped` never wins over a severity.
    pub fn max_severity(self, other: CheckStatus) -> CheckStatus {
        match (self.severity(), other.severity()) {
            (None, _) => other,
            (_, None) => self,
            (Some(a), Some(b)) if b > a => other,
            _ => self,
        }
    }

    /// Aggregate status of a set of statuses: the maximum severity, ignoring
    /// `Skipped`. An empty (or all-skipped) set aggregates to `Ok`.
    pub fn aggregate<I: IntoIterator<Item = CheckStatus>>(statuses: I) -> CheckStatus {
        statuses
            .into_iter()
            .filter(|s| s.severity().is_some())
            .fold(CheckStatus::Ok, CheckStatus::max_severity)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CheckStatus::Ok => "ok",
            CheckStatus::Recommendation => "recommendation",
            CheckStatus::Warning => "warning",
            CheckStatus::Error => "error",
            CheckStatus::Skipped => "skipped",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The model entity a result is about.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Subject {
    Project,
    Monorepo {
        name: String,
    },
    Package {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        manifest: Option<RepoPath>,
    },
}

impl Subject {
    pub fn package(name: impl Into<String>, manifest: Option<RepoPath>) -> Self {
        Subject::Package {
            name: name.into(),
            manifest,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Subject::Project => None,
            Subject::Monorepo { name } | Subject::Package { name, .. } => Some(name),
        }
    }
}

/// One reported outcome of a check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CheckResult {
    pub status: CheckStatus,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<Subject>,
}

impl CheckResult {
    pub fn new(status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            subject: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Warning, message)
    }

    pub fn recommendation(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Recommendation, message)
    }

    /// The result recorded for a check that declared itself inapplicable.
    pub fn skipped() -> Self {
        Self::new(CheckStatus::Skipped, String::new())
    }

    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subject = Some(subject);
        self
    }
}
