//! Developer tasks (schema generation, report validation, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .or_else(|_| std::env::current_dir())
        .unwrap_or_else(|_| PathBuf::from("."));

    if manifest_dir.ends_with("xtask")
        && let Some(parent) = manifest_dir.parent()
    {
        return parent.to_path_buf();
    }
    manifest_dir
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(shut_types::CheckReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(shut_settings::CheckConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "shut.check.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "shut.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {}", name);
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {}", name);
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

/// Validate a `shut.check.v1` report file against the generated report schema.
fn validate_report(path: &Path) -> anyhow::Result<()> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let instance: serde_json::Value =
        serde_json::from_str(&text).context("Failed to parse report as JSON")?;

    let schema = serde_json::to_value(generate_report_schema()).context("schema to json")?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile schema: {}", e))?;

    let errors: Vec<String> = validator
        .iter_errors(&instance)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        println!("✓ {} conforms to {}", path.display(), shut_types::SCHEMA_CHECK_REPORT_V1);
        return Ok(());
    }
    for error in &errors {
        eprintln!("  - {}", error);
    }
    bail!("{} schema violation(s) in {}", errors.len(), path.display())
}

/// Print a report with run timestamps and tool version replaced by placeholders.
fn normalize_report(path: &Path) -> anyhow::Result<()> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let value = shut_test_util::normalized_report(&text).context("Failed to parse report")?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

/// Validate that every registered check has an explanation, and vice versa.
fn explain_coverage() -> anyhow::Result<()> {
    let registry = shut_domain::build_default_registry().context("build check registry")?;
    let registered: Vec<&str> = registry.catalog().iter().map(|e| e.check.id).collect();
    let documented = shut_types::explain::all_check_ids();

    let mut errors = Vec::new();

    for check_id in &registered {
        match shut_types::lookup_explanation(check_id) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("Check ID '{}' has empty title", check_id));
                }
                if exp.description.is_empty() {
                    errors.push(format!("Check ID '{}' has empty description", check_id));
                }
                if exp.remediation.is_empty() {
                    errors.push(format!("Check ID '{}' has empty remediation", check_id));
                }
            }
            None => errors.push(format!("Check ID '{}' has no explanation", check_id)),
        }
    }

    for check_id in documented {
        if !registered.contains(check_id) {
            errors.push(format!("Check ID '{}' is documented but not registered", check_id));
        }
    }

    if errors.is_empty() {
        println!("✓ {} check IDs have explanations", registered.len());
        println!("\n✓ All explain coverage checks passed!");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        )
    }
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help                    Show this message");
    eprintln!("  emit-schemas            Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas        Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids        Print known schema IDs");
    eprintln!("  validate-report <FILE>  Validate a report JSON file against shut.check.v1");
    eprintln!("  normalize-report <FILE> Print a report with nondeterministic fields replaced");
    eprintln!("  explain-coverage        Validate all registered checks have explanations");
}

fn file_arg(args: &[String]) -> anyhow::Result<PathBuf> {
    args.get(2)
        .map(PathBuf::from)
        .context("missing <FILE> argument")
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "validate-report" => file_arg(&args).and_then(|p| validate_report(&p)),
        "normalize-report" => file_arg(&args).and_then(|p| normalize_report(&p)),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
