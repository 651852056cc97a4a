//! Shared test utilities for the shut workspace.
//!
//! `xtask` needs `normalize_nondeterministic` at runtime (not behind `#[cfg(test)]`), so this
//! lives in its own crate.

use serde_json::Value;

const TIMESTAMP_KEYS: &[&str] = &["started_at", "ended_at"];

/// Normalize non-deterministic fields of a `shut.check.v1` report for golden comparison.
///
/// - `tool.version` becomes `"__VERSION__"`, only on a root object that looks like a report
///   (has `schema`, `tool`, `run` and `records`).
/// - `run.started_at` / `run.ended_at` become `"__TIMESTAMP__"` and `run.duration_ms` becomes `0`.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    let Some(obj) = value.as_object_mut() else {
        return value;
    };
    let is_report = ["schema", "tool", "run", "records"]
        .iter()
        .all(|k| obj.contains_key(*k));
    if !is_report {
        return value;
    }

    if let Some(tool) = obj.get_mut("tool").and_then(Value::as_object_mut)
        && tool.contains_key("version")
    {
        tool.insert(
            "version".to_string(),
            Value::String("__VERSION__".to_string()),
        );
    }

    if let Some(run) = obj.get_mut("run").and_then(Value::as_object_mut) {
        for key in TIMESTAMP_KEYS {
            if run.contains_key(*key) {
                run.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
            }
        }
        if run.contains_key("duration_ms") {
            run.insert("duration_ms".to_string(), Value::Number(0.into()));
        }
    }

    value
}

/// Parse report JSON text and normalize it.
pub fn normalized_report(text: &str) -> serde_json::Result<Value> {
    serde_json::from_str(text).map(normalize_nondeterministic)
}
