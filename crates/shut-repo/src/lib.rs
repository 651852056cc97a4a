//! Repository adapters: discover member packages, read and parse `pyproject.toml` files.
//!
//! This crate is allowed to do filesystem IO. It never spawns external processes.

#![forbid(unsafe_code)]

mod discover;
mod parse;

use anyhow::Context;
use camino::Utf8Path;
use shut_domain::model::{InvalidPackage, MonorepoModel, PackageModel, Project};
use shut_types::RepoPath;

pub use discover::discover_members;

/// Build the in-memory project model used by the check engine.
///
/// `repo_root` is the directory containing the root `pyproject.toml`. Member packages that
/// fail to load are recorded in [`Project::invalid_packages`]; only a broken root manifest
/// fails the whole load.
pub fn build_project(repo_root: &Utf8Path) -> anyhow::Result<Project> {
    let root_manifest = RepoPath::new(discover::MANIFEST);
    let root_abs = repo_root.join(root_manifest.as_str());
    let root_text =
        std::fs::read_to_string(&root_abs).with_context(|| format!("read {root_abs}"))?;
    let root_doc = parse::parse_document(&root_text).context("parse root manifest")?;

    let mut project = Project {
        root: repo_root.to_path_buf(),
        ..Project::default()
    };

    let Some(section) = parse::parse_monorepo_section(&root_doc) else {
        let package = parse::parse_package(&root_manifest, &root_doc)
            .context("parse root manifest")?;
        project.packages.push(with_readme_fallback(repo_root, package));
        return Ok(project);
    };

    let name = section
        .name
        .or_else(|| repo_root.file_name().map(str::to_string))
        .unwrap_or_default();
    tracing::debug!(monorepo = %name, patterns = ?section.packages, "loading monorepo");

    for manifest in discover::discover_members(repo_root, &section.packages)
        .context("discover member packages")?
    {
        match load_member(repo_root, &manifest) {
            Ok(package) => project.packages.push(package),
            Err(err) => {
                let name = member_dir_name(&manifest);
                let error = format!("{err:#}");
                tracing::warn!(
                    package = %name,
                    manifest = manifest.as_str(),
                    error = %error,
                    "invalid package"
                );
                project.invalid_packages.push(InvalidPackage {
                    name,
                    manifest,
                    error,
                });
            }
        }
    }

    project.monorepo = Some(MonorepoModel {
        name,
        version: section.version,
        manifest: root_manifest,
        release: section.release,
    });
    Ok(project)
}

fn load_member(repo_root: &Utf8Path, manifest: &RepoPath) -> anyhow::Result<PackageModel> {
    let abs = repo_root.join(manifest.as_str());
    let text = std::fs::read_to_string(&abs).with_context(|| format!("read {abs}"))?;
    let doc = parse::parse_document(&text)?;
    let package = parse::parse_package(manifest, &doc)?;
    Ok(with_readme_fallback(repo_root, package))
}

fn member_dir_name(manifest: &RepoPath) -> String {
    Utf8Path::new(manifest.as_str())
        .parent()
        .and_then(Utf8Path::file_name)
        .unwrap_or(manifest.as_str())
        .to_string()
}

/// Use a `README*` file next to the manifest when the manifest declares no readme.
fn with_readme_fallback(repo_root: &Utf8Path, mut package: PackageModel) -> PackageModel {
    if package.readme.is_some() {
        return package;
    }
    let abs = repo_root.join(package.manifest.as_str());
    let Some(dir) = abs.parent() else {
        return package;
    };
    package.readme = find_readme(dir);
    package
}

fn find_readme(dir: &Utf8Path) -> Option<String> {
    let entries = dir.read_dir_utf8().ok()?;
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
        .map(|e| e.file_name().to_string())
        .filter(|n| n.to_ascii_uppercase().starts_with("README"))
        .collect();
    names.sort();
    names.into_iter().next()
}
