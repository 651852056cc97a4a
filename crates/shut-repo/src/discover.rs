use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use shut_types::RepoPath;
use std::path::PathBuf;
use walkdir::{DirEntry, WalkDir};

pub(crate) const MANIFEST: &str = "pyproject.toml";

/// Directories never searched for member packages.
const SKIP_DIRS: &[&str] = &["node_modules", "__pycache__", "venv"];

/// Discover member package manifests of the monorepo rooted at `repo_root`.
///
/// A member is a directory matching one of `patterns` (relative to the root, `*` does not
/// cross `/`) that contains a `pyproject.toml`. The root manifest itself is never a member.
/// Hidden directories are skipped. The result is sorted.
pub fn discover_members(repo_root: &Utf8Path, patterns: &[String]) -> anyhow::Result<Vec<RepoPath>> {
    let set = build_globset(patterns).context("compile packages globset")?;

    let mut out: Vec<RepoPath> = WalkDir::new(repo_root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && e.file_name() == MANIFEST)
        .filter_map(|e| pathbuf_to_utf8(e.path().to_path_buf()))
        .filter_map(|abs| {
            let rel = abs
                .strip_prefix(repo_root)
                .unwrap_or(&abs)
                .as_str()
                .replace('\\', "/");
            let dir_rel = Utf8Path::new(&rel).parent().map(Utf8Path::as_str)?;
            if dir_rel.is_empty() || !set.is_match(dir_rel) {
                return None;
            }
            Some(RepoPath::new(&rel))
        })
        .collect();

    // Stable order.
    out.sort();
    out.dedup();

    tracing::debug!(count = out.len(), "discovered member packages");
    Ok(out)
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    // The predicate also sees the root, even below min_depth.
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIP_DIRS.contains(&name.as_ref())
}

fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut b = GlobSetBuilder::new();
    for p in patterns {
        let p = p.trim_end_matches('/');
        b.add(GlobBuilder::new(p).literal_separator(true).build()?);
    }
    Ok(b.build()?)
}

fn pathbuf_to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}
