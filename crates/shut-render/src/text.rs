use crate::{RenderableRecord, RenderableReport, RenderableStatus};

/// Plain terminal output: one line per record, then a summary line.
pub fn render_text(report: &RenderableReport) -> String {
    let mut out = String::new();

    for r in &report.records {
        out.push_str(&record_line(r));
        out.push('\n');
    }

    if !report.records.is_empty() {
        out.push('\n');
    }

    let verdict = if report.passed { "PASS" } else { "FAIL" };
    out.push_str(&format!("shut check: {verdict} ({})\n", report.counts.line()));
    out
}

fn record_line(r: &RenderableRecord) -> String {
    let mut line = format!("[{}] {}/{}", r.status.tag(), r.checker, r.check_id);
    if let Some(subject) = &r.subject {
        line.push_str(&format!(" ({subject})"));
    }
    if r.status != RenderableStatus::Skipped || !r.message.is_empty() {
        line.push_str(": ");
        line.push_str(&r.message);
    }
    line
}
