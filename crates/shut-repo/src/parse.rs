use anyhow::Context;
use shut_domain::model::{Author, PackageModel, ReleaseConfig};
use shut_types::RepoPath;
use toml_edit::{DocumentMut, Item, Table, TableLike};

/// Monorepo settings read from the root manifest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MonorepoSection {
    pub name: Option<String>,
    pub version: Option<String>,
    pub packages: Vec<String>,
    pub release: ReleaseConfig,
}

pub(crate) fn parse_document(text: &str) -> anyhow::Result<DocumentMut> {
    text.parse::<DocumentMut>().context("parse pyproject.toml")
}

/// `[tool.shut.monorepo]` and `[tool.shut.release]`, if the root declares a monorepo.
pub(crate) fn parse_monorepo_section(doc: &DocumentMut) -> Option<MonorepoSection> {
    let shut = tool_shut(doc)?;
    let mono = shut.get("monorepo")?.as_table_like()?;

    let packages = mono
        .get("packages")
        .and_then(Item::as_array)
        .map(|a| {
            a.iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect::<Vec<_>>()
        })
        .unwrap_or_else(|| vec!["*".to_string()]);

    let single_version = shut
        .get("release")
        .and_then(Item::as_table_like)
        .and_then(|r| r.get("single-version"))
        .and_then(Item::as_bool)
        .unwrap_or(false);

    Some(MonorepoSection {
        name: str_field(mono.get("name")),
        version: str_field(mono.get("version")),
        packages,
        release: ReleaseConfig { single_version },
    })
}

fn tool_shut(doc: &DocumentMut) -> Option<&Table> {
    doc.get("tool")?.as_table()?.get("shut")?.as_table()
}

/// Build a package model from the `[project]` table.
///
/// `readme` is left unset when the manifest does not declare one; the caller may fall back
/// to a file on disk.
pub(crate) fn parse_package(manifest: &RepoPath, doc: &DocumentMut) -> anyhow::Result<PackageModel> {
    let project = doc
        .get("project")
        .and_then(Item::as_table_like)
        .context("missing [project] table")?;
    let name = str_field(project.get("name")).context("missing project.name")?;

    Ok(PackageModel {
        name,
        version: str_field(project.get("version")),
        manifest: manifest.clone(),
        description: str_field(project.get("description")),
        license: text_or_file(project.get("license")),
        url: homepage(project.get("urls")),
        authors: authors(project.get("authors")),
        readme: text_or_file(project.get("readme")),
    })
}

fn str_field(item: Option<&Item>) -> Option<String> {
    item.and_then(Item::as_str).map(str::to_string)
}

/// A plain string, or an inline table with `text` or `file` (license and readme both allow this).
fn text_or_file(item: Option<&Item>) -> Option<String> {
    let item = item?;
    if let Some(s) = item.as_str() {
        return Some(s.to_string());
    }
    let t = item.as_table_like()?;
    str_field(t.get("text")).or_else(|| str_field(t.get("file")))
}

fn homepage(item: Option<&Item>) -> Option<String> {
    let urls = item?.as_table_like()?;
    urls.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("homepage"))
        .and_then(|(_, v)| v.as_str())
        .map(str::to_string)
}

/// `authors = [{ ... }]` or `[[project.authors]]`. Entries need a name or an email.
fn authors(item: Option<&Item>) -> Vec<Author> {
    let Some(item) = item else {
        return Vec::new();
    };
    let entries: Vec<&dyn TableLike> = if let Some(arr) = item.as_array() {
        arr.iter()
            .filter_map(|v| v.as_inline_table())
            .map(|t| t as &dyn TableLike)
            .collect()
    } else if let Some(tables) = item.as_array_of_tables() {
        tables.iter().map(|t| t as &dyn TableLike).collect()
    } else {
        Vec::new()
    };

    entries
        .into_iter()
        .filter_map(|t| {
            let name = str_field(t.get("name"));
            let email = str_field(t.get("email"));
            (name.is_some() || email.is_some()).then_some(Author { name, email })
        })
        .collect()
}
