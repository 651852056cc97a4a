use crate::{RenderableReport, RenderableStatus};

/// Render records as GitHub Actions workflow command annotations.
///
/// Format:
/// `::{level} file={path}::{message}`
///
/// `Ok` and `Skipped` records produce no annotation.
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    let mut out = Vec::new();

    for r in &report.records {
        let level = match r.status {
            RenderableStatus::Error => "error",
            RenderableStatus::Warning => "warning",
            RenderableStatus::Recommendation => "notice",
            RenderableStatus::Ok | RenderableStatus::Skipped => continue,
        };

        let message = escape_data(&format!("[{}/{}] {}", r.checker, r.check_id, r.message));

        match &r.path {
            Some(path) => out.push(format!(
                "::{} file={}::{}",
                level,
                escape_property(path),
                message
            )),
            None => out.push(format!("::{}::{}", level, message)),
        }
    }

    out
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Property values additionally escape the `:` and `,` delimiters.
fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
