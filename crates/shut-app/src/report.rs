use anyhow::Context;
use shut_render::{RenderableCounts, RenderableRecord, RenderableReport, RenderableStatus};
use shut_types::{CheckReport, CheckStatus, SCHEMA_CHECK_REPORT_V1, Subject};

/// Parse a `shut.check.v1` report previously written with `--report-out`.
pub fn parse_report_json(text: &str) -> anyhow::Result<CheckReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_CHECK_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema} (expected {SCHEMA_CHECK_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse shut check report")
}

pub fn serialize_report(report: &CheckReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize check report")
}

pub fn to_renderable(report: &CheckReport) -> RenderableReport {
    RenderableReport {
        status: renderable_status(report.status),
        passed: report.passed,
        records: report
            .records
            .iter()
            .map(|r| {
                let (subject, path) = subject_parts(r.result.subject.as_ref());
                RenderableRecord {
                    status: renderable_status(r.result.status),
                    checker: r.checker.clone(),
                    check_id: r.check_id.clone(),
                    message: r.result.message.clone(),
                    subject,
                    path,
                    internal: r.internal,
                }
            })
            .collect(),
        counts: RenderableCounts {
            ok: report.counts.ok,
            recommendation: report.counts.recommendation,
            warning: report.counts.warning,
            error: report.counts.error,
            skipped: report.counts.skipped,
        },
    }
}

fn renderable_status(status: CheckStatus) -> RenderableStatus {
    match status {
        CheckStatus::Ok => RenderableStatus::Ok,
        CheckStatus::Recommendation => RenderableStatus::Recommendation,
        CheckStatus::Warning => RenderableStatus::Warning,
        CheckStatus::Error => RenderableStatus::Error,
        CheckStatus::Skipped => RenderableStatus::Skipped,
    }
}

fn subject_parts(subject: Option<&Subject>) -> (Option<String>, Option<String>) {
    match subject {
        None => (None, None),
        Some(Subject::Project) => (Some("project".to_string()), None),
        Some(Subject::Monorepo { name }) => (Some(format!("monorepo {name}")), None),
        Some(Subject::Package { name, manifest }) => (
            Some(format!("package {name}")),
            manifest.as_ref().map(|m| m.as_str().to_string()),
        ),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use shut_types::{
        CheckResult, RepoPath, ReportRecord, RunMeta, StatusCounts, ToolMeta, ids,
    };
    use time::macros::datetime;

    pub(crate) fn sample_report() -> CheckReport {
        let foo = Subject::package("foo", Some(RepoPath::new("bar/pyproject.toml")));
        let records = vec![
            ReportRecord {
                checker: ids::CHECKER_MONOREPO.to_string(),
                check_id: ids::CHECK_BAD_PACKAGE_DIRECTORY.to_string(),
                result: CheckResult::error("package name is 'foo' but directory name is 'bar'")
                    .with_subject(foo.clone()),
                internal: false,
            },
            ReportRecord {
                checker: ids::CHECKER_MONOREPO.to_string(),
                check_id: ids::CHECK_INCONSISTENT_SINGLE_VERSION.to_string(),
                result: CheckResult::skipped(),
                internal: false,
            },
            ReportRecord {
                checker: ids::CHECKER_PACKAGE.to_string(),
                check_id: ids::CHECK_MISSING_LICENSE.to_string(),
                result: CheckResult::warning("no license specified").with_subject(foo),
                internal: false,
            },
        ];
        let mut counts = StatusCounts::default();
        for r in &records {
            counts.record(r.result.status);
        }
        CheckReport {
            schema: SCHEMA_CHECK_REPORT_V1.to_string(),
            tool: ToolMeta {
                name: "shut".to_string(),
                version: "0.1.0".to_string(),
            },
            run: RunMeta {
                started_at: datetime!(2024-01-01 00:00:00 UTC),
                ended_at: Some(datetime!(2024-01-01 00:00:01 UTC)),
                duration_ms: Some(1000),
            },
            status: CheckStatus::Error,
            passed: false,
            counts,
            records,
        }
    }

    #[test]
    fn report_survives_serialization() {
        let report = sample_report();
        let bytes = serialize_report(&report).expect("serialize");
        let text = String::from_utf8(bytes).expect("utf8");
        assert!(text.contains("\"schema\": \"shut.check.v1\""));
        assert!(text.contains("\"started_at\": \"2024-01-01T00:00:00Z\""));
        let back = parse_report_json(&text).expect("parse");
        assert_eq!(back, report);
    }

    #[test]
    fn wrong_schema_is_rejected() {
        let err = parse_report_json(r#"{"schema": "other.report.v1"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown report schema"));
    }

    #[test]
    fn skipped_record_has_empty_message_in_json() {
        let value = serde_json::to_value(sample_report()).expect("to value");
        let skipped = &value["records"][1];
        assert_eq!(skipped["status"], "skipped");
        assert_eq!(skipped["message"], "");
        assert!(skipped.get("internal").is_none());
    }

    #[test]
    fn renderable_carries_subject_and_path() {
        let renderable = to_renderable(&sample_report());
        let first = &renderable.records[0];
        assert_eq!(first.subject.as_deref(), Some("package foo"));
        assert_eq!(first.path.as_deref(), Some("bar/pyproject.toml"));
        assert_eq!(renderable.records[1].subject, None);
        assert_eq!(renderable.counts.skipped, 1);
    }
}
