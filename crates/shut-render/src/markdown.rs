use crate::{RenderableReport, RenderableStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Shut check report\n\n");
    let verdict = if report.passed { "PASS" } else { "FAIL" };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Results: {}\n\n",
        verdict,
        report.counts.line()
    ));

    let shown: Vec<_> = report
        .records
        .iter()
        .filter(|r| r.status != RenderableStatus::Ok)
        .collect();

    if shown.is_empty() {
        out.push_str("No results.\n");
        return out;
    }

    out.push_str("## Results\n\n");
    out.push_str("| Status | Check | Subject | Message |\n");
    out.push_str("|---|---|---|---|\n");

    for r in shown {
        let subject = match (&r.subject, &r.path) {
            (Some(s), Some(p)) => format!("{} (`{}`)", s, p),
            (Some(s), None) => s.clone(),
            (None, Some(p)) => format!("`{}`", p),
            (None, None) => String::new(),
        };
        let mut message = escape_cell(&r.message);
        if r.internal {
            message = format!("_{}_", message);
        }
        out.push_str(&format!(
            "| {} | `{}` / `{}` | {} | {} |\n",
            r.status.tag(),
            r.checker,
            r.check_id,
            escape_cell(&subject),
            message
        ));
    }

    out
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}
