use crate::model::CheckConfigV1;
use anyhow::Context;
use shut_domain::policy::{CheckSelection, EffectiveConfig, FailOn};

/// Values passed on the command line. They win over the file config.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub fail_on: Option<String>,
    /// Added to the file's `disable` list.
    pub disable: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: CheckConfigV1,
    overrides: Overrides,
    known_checks: &[&str],
) -> anyhow::Result<ResolvedConfig> {
    let mut effective = EffectiveConfig::default();

    if let Some(fail_on_s) = overrides.fail_on.as_deref().or(cfg.fail_on.as_deref()) {
        effective.fail_on = parse_fail_on(fail_on_s)?;
    }

    let mut selection = CheckSelection::all();

    if let Some(only) = &cfg.enable_only {
        validate_ids("enable-only", only, known_checks)?;
        selection = selection.only(only.iter().cloned());
    }

    validate_ids("disable", &cfg.disable, known_checks)?;
    validate_ids("--disable", &overrides.disable, known_checks)?;
    for id in cfg.disable.iter().chain(&overrides.disable) {
        selection = selection.disable(id.clone());
    }

    effective.selection = selection;
    Ok(ResolvedConfig { effective })
}

fn validate_ids(source: &str, ids: &[String], known_checks: &[&str]) -> anyhow::Result<()> {
    for id in ids {
        check_known(id, known_checks).with_context(|| format!("invalid {source} entry"))?;
    }
    Ok(())
}

fn check_known(id: &str, known_checks: &[&str]) -> anyhow::Result<()> {
    if known_checks.contains(&id) {
        return Ok(());
    }
    anyhow::bail!(
        "unknown check id: {id} (expected one of: {})",
        known_checks.join(", ")
    )
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "error" => Ok(FailOn::Error),
        "warning" | "warn" => Ok(FailOn::Warning),
        other => anyhow::bail!("unknown fail-on: {other} (expected error|warning)"),
    }
}
