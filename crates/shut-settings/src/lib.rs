//! Config parsing and check selection resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::CheckConfigV1;
pub use resolve::{Overrides, ResolvedConfig};

/// Parse the `[tool.shut.check]` table out of a `pyproject.toml` document.
///
/// A document without the table yields the default (empty) config.
pub fn parse_config_toml(input: &str) -> anyhow::Result<CheckConfigV1> {
    let doc: model::PyProjectDoc = toml::from_str(input)?;
    Ok(doc
        .tool
        .and_then(|t| t.shut)
        .and_then(|s| s.check)
        .unwrap_or_default())
}

/// Resolve the effective config used by the engine (file config + CLI overrides).
///
/// `known_checks` is the set of check ids a run can reference; anything else is rejected.
pub fn resolve_config(
    cfg: CheckConfigV1,
    overrides: Overrides,
    known_checks: &[&str],
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides, known_checks)
}
