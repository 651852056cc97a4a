//! The `check` use case: load the project, run every enabled check, produce a report.

use anyhow::Context;
use camino::Utf8Path;
use shut_domain::report::DomainReport;
use shut_domain::{Registry, build_default_registry, evaluate};
use shut_settings::{CheckConfigV1, Overrides, ResolvedConfig};
use shut_types::{CheckReport, ReportRecord, RunMeta, SCHEMA_CHECK_REPORT_V1, ToolMeta};
use time::OffsetDateTime;

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Project root path (directory containing the root `pyproject.toml`).
    pub repo_root: &'a Utf8Path,
    /// Root `pyproject.toml` contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    /// The generated report.
    pub report: CheckReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the check use case: parse config, load the project, evaluate checks, produce report.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Empty config is allowed; defaults apply.
    let cfg = if input.config_text.trim().is_empty() {
        CheckConfigV1::default()
    } else {
        shut_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let registry = build_default_registry().context("build check registry")?;
    let known: Vec<&str> = registry.catalog().iter().map(|e| e.check.id).collect();

    let resolved = shut_settings::resolve_config(cfg, input.overrides.clone(), &known)
        .context("resolve config")?;

    let project = shut_repo::build_project(input.repo_root).context("load project")?;
    tracing::info!(
        root = %project.root,
        monorepo = project.is_monorepo(),
        packages = project.packages.len(),
        invalid = project.invalid_packages.len(),
        "loaded project"
    );

    let domain_report = evaluate(&registry, &project, &resolved.effective);
    let finished_at = OffsetDateTime::now_utc();
    let duration_ms = u64::try_from((finished_at - started_at).whole_milliseconds()).unwrap_or(0);

    let report = build_report(domain_report, started_at, finished_at, duration_ms);
    tracing::info!(
        status = %report.status,
        passed = report.passed,
        records = report.records.len(),
        "check finished"
    );

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

fn build_report(
    domain: DomainReport,
    started_at: OffsetDateTime,
    finished_at: OffsetDateTime,
    duration_ms: u64,
) -> CheckReport {
    let DomainReport {
        records,
        summary,
        passed,
    } = domain;

    CheckReport {
        schema: SCHEMA_CHECK_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "shut".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        run: RunMeta {
            started_at,
            ended_at: Some(finished_at),
            duration_ms: Some(duration_ms),
        },
        status: summary.status,
        passed,
        counts: summary.counts,
        records: records
            .into_iter()
            .map(|r| ReportRecord {
                checker: r.checker.to_string(),
                check_id: r.check_id.to_string(),
                result: r.result,
                internal: r.internal,
            })
            .collect(),
    }
}

/// Map the pass/fail verdict to an exit code: 0 = pass, 2 = failed checks.
pub fn verdict_exit_code(passed: bool) -> i32 {
    if passed { 0 } else { 2 }
}

/// One line per registered check: `checker  check-id  [group]`.
pub fn format_catalog(registry: &Registry) -> String {
    let width = registry
        .catalog()
        .iter()
        .map(|e| e.checker.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for entry in registry.catalog() {
        out.push_str(&format!(
            "{:<width$}  {}",
            entry.checker,
            entry.check.id,
            width = width
        ));
        if let Some(group) = entry.check.group {
            out.push_str(&format!("  [{group}]"));
        }
        out.push('\n');
    }
    out
}
