use crate::engine::CheckRecord;
use crate::policy::FailOn;
use shut_types::{CheckStatus, StatusCounts};

/// Aggregate view over the records of a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub status: CheckStatus,
    pub counts: StatusCounts,
}

impl RunSummary {
    pub fn from_records(records: &[CheckRecord]) -> Self {
        let mut counts = StatusCounts::default();
        for r in records {
            counts.record(r.result.status);
        }
        let status = CheckStatus::aggregate(records.iter().map(|r| r.result.status));
        Self { status, counts }
    }

    /// False iff some result fails under `fail_on`.
    pub fn passed(&self, fail_on: FailOn) -> bool {
        let failing_warning = fail_on == FailOn::Warning && self.counts.warning > 0;
        self.counts.error == 0 && !failing_warning
    }
}

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub records: Vec<CheckRecord>,
    pub summary: RunSummary,
    pub passed: bool,
}
