//! Render use cases: text, Markdown, and GitHub annotations from in-memory reports.

use crate::report::to_renderable;
use shut_types::CheckReport;

pub fn render_text(report: &CheckReport) -> String {
    shut_render::render_text(&to_renderable(report))
}

pub fn render_markdown(report: &CheckReport) -> String {
    shut_render::render_markdown(&to_renderable(report))
}

pub fn render_annotations(report: &CheckReport, max: usize) -> Vec<String> {
    shut_render::render_github_annotations(&to_renderable(report))
        .into_iter()
        .take(max)
        .collect()
}
