//! CLI entry point for shut.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging setup, and exit
//! codes. All business logic lives in the `shut-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use shut_app::{
    CheckInput, ExplainOutput, format_catalog, format_explanation, format_not_found,
    parse_report_json, render_annotations, render_markdown, render_text, run_check, run_explain,
    serialize_report, verdict_exit_code,
};
use shut_settings::Overrides;
use shut_types::CheckReport;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable that overrides the `-v`/`-q` log filter.
const LOG_ENV: &str = "SHUT_LOG";

/// Exit code for runtime errors (bad config, unreadable project, ...).
const EXIT_RUNTIME_ERROR: i32 = 1;

#[derive(Parser, Debug)]
#[command(
    name = "shut",
    version,
    about = "Project checks for Python packages and monorepos"
)]
struct Cli {
    /// Project root (directory containing the root pyproject.toml).
    #[arg(long, default_value = ".", global = true)]
    repo_root: Utf8PathBuf,

    /// More log output on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Markdown,
    Json,
    /// GitHub Actions workflow annotations.
    Github,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run all enabled checks against the project.
    Check {
        /// Output format on stdout.
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Also write the JSON report to this path.
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,

        /// Fail on `error` (default) or also on `warning`.
        #[arg(long)]
        fail_on: Option<String>,

        /// Disable a check by id (repeatable).
        #[arg(long = "disable", value_name = "ID")]
        disable: Vec<String>,

        /// List registered checks and exit.
        #[arg(long)]
        list: bool,
    },

    /// Render an existing JSON report.
    Render {
        /// Path to the JSON report file.
        #[arg(long)]
        report: Utf8PathBuf,

        #[arg(long, value_enum, default_value_t = Format::Markdown)]
        format: Format,

        /// Maximum number of annotations to emit with `--format github`.
        #[arg(long, default_value = "50")]
        max: usize,
    },

    /// Explain a check id with remediation guidance.
    Explain {
        /// The check id (e.g. "missing-license") to explain.
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    std::panic::set_hook(Box::new(report_panic));

    match cli.cmd {
        Commands::Check {
            format,
            ref report_out,
            ref fail_on,
            ref disable,
            list,
        } => {
            if list {
                return cmd_list();
            }
            let overrides = Overrides {
                fail_on: fail_on.clone(),
                disable: disable.clone(),
            };
            cmd_check(&cli.repo_root, format, report_out.as_deref(), overrides)
        }
        Commands::Render {
            ref report,
            format,
            max,
        } => cmd_render(report, format, max),
        Commands::Explain { ref identifier } => cmd_explain(identifier),
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    // Logs go to stderr so stdout stays machine-readable.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

/// Panic hook: a check that panics is recorded as an internal error by the engine, so the
/// panic itself is only logged, without the default stderr dump.
fn report_panic(info: &std::panic::PanicHookInfo<'_>) {
    let payload = info.payload();
    let message = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic payload");
    let location = info
        .location()
        .map(|l| format!("{}:{}", l.file(), l.line()))
        .unwrap_or_default();
    tracing::error!(location = %location, "panicked: {message}");
}

fn cmd_list() -> anyhow::Result<()> {
    let registry = shut_domain::build_default_registry().context("build check registry")?;
    print!("{}", format_catalog(&registry));
    Ok(())
}

fn cmd_check(
    repo_root: &Utf8Path,
    format: Format,
    report_out: Option<&Utf8Path>,
    overrides: Overrides,
) -> anyhow::Result<()> {
    let repo_root = repo_root
        .canonicalize_utf8()
        .unwrap_or_else(|_| repo_root.to_path_buf());

    let result = (|| -> anyhow::Result<i32> {
        if !repo_root.exists() {
            anyhow::bail!("repo root does not exist: {}", repo_root);
        }

        // The root manifest carries `[tool.shut.check]`; a missing file is reported by the
        // project loader.
        let cfg_path = repo_root.join("pyproject.toml");
        let cfg_text = std::fs::read_to_string(&cfg_path).unwrap_or_default();

        let input = CheckInput {
            repo_root: &repo_root,
            config_text: &cfg_text,
            overrides,
        };
        let output = run_check(input)?;

        if let Some(path) = report_out {
            write_report_file(path, &output.report).context("write report json")?;
        }
        print_report(&output.report, format, usize::MAX)?;

        Ok(verdict_exit_code(output.report.passed))
    })();

    match result {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "check aborted");
            eprintln!("shut error: {err:#}");
            std::process::exit(EXIT_RUNTIME_ERROR);
        }
    }
}

fn print_report(report: &CheckReport, format: Format, max: usize) -> anyhow::Result<()> {
    match format {
        Format::Text => print!("{}", render_text(report)),
        Format::Markdown => print!("{}", render_markdown(report)),
        Format::Json => {
            let data = serialize_report(report)?;
            println!("{}", String::from_utf8_lossy(&data));
        }
        Format::Github => {
            for annotation in render_annotations(report, max) {
                println!("{}", annotation);
            }
        }
    }
    Ok(())
}

fn write_report_file(path: &Utf8Path, report: &CheckReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn cmd_render(report_path: &Utf8Path, format: Format, max: usize) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    print_report(&report, format, max)
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
        } => {
            eprint!("{}", format_not_found(&identifier, available_check_ids));
            std::process::exit(EXIT_RUNTIME_ERROR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("lock log buffer").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn panics_are_logged_through_tracing() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(report_panic));
        let outcome = tracing::subscriber::with_default(subscriber, || {
            std::panic::catch_unwind(|| -> u8 { panic!("check blew up") })
        });
        std::panic::set_hook(previous);

        assert!(outcome.is_err());
        let logged = String::from_utf8(captured.0.lock().expect("lock log buffer").clone())
            .expect("utf8 log");
        assert!(logged.contains("panicked: check blew up"), "{logged}");
        assert!(logged.contains("main.rs"), "{logged}");
    }
}
