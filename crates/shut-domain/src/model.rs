//! Read-only project models the checks inspect.
//!
//! Models are built by the surrounding application (see `shut-repo`); the
//! engine only ever borrows them.

use camino::{Utf8Path, Utf8PathBuf};
use shut_types::{RepoPath, Subject};

/// A type that checkers can be registered for.
pub trait Model: 'static {
    /// Human-readable model type name, used in logs and the check catalog.
    const KIND: &'static str;
}

/// Everything loaded from one project root.
#[derive(Clone, Debug, Default)]
pub struct Project {
    /// Absolute project root on disk.
    pub root: Utf8PathBuf,

    /// Present when the root declares `[tool.shut.monorepo]`.
    pub monorepo: Option<MonorepoModel>,

    /// Successfully loaded packages, ordered by manifest path.
    pub packages: Vec<PackageModel>,

    /// Packages whose manifest could not be loaded.
    pub invalid_packages: Vec<InvalidPackage>,
}

#[derive(Clone, Debug)]
pub struct InvalidPackage {
    pub name: String,
    pub manifest: RepoPath,
    pub error: String,
}

#[derive(Clone, Debug, Default)]
pub struct MonorepoModel {
    pub name: String,
    pub version: Option<String>,
    pub manifest: RepoPath,
    pub release: ReleaseConfig,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReleaseConfig {
    /// All packages are released together under the monorepo version.
    pub single_version: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PackageModel {
    pub name: String,
    pub version: Option<String>,
    /// Path of the package's `pyproject.toml`, relative to the project root.
    pub manifest: RepoPath,
    pub description: Option<String>,
    pub license: Option<String>,
    pub url: Option<String>,
    pub authors: Vec<Author>,
    pub readme: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Author {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Author {
    /// Neither a name nor an email is given.
    pub fn is_blank(&self) -> bool {
        let blank = |v: &Option<String>| v.as_deref().is_none_or(|s| s.trim().is_empty());
        blank(&self.name) && blank(&self.email)
    }
}

impl Model for MonorepoModel {
    const KIND: &'static str = "MonorepoModel";
}

impl Model for PackageModel {
    const KIND: &'static str = "PackageModel";
}

impl Project {
    pub fn is_monorepo(&self) -> bool {
        self.monorepo.is_some()
    }
}

impl MonorepoModel {
    pub fn subject(&self) -> Subject {
        Subject::Monorepo {
            name: self.name.clone(),
        }
    }
}

impl PackageModel {
    pub fn subject(&self) -> Subject {
        Subject::package(self.name.clone(), Some(self.manifest.clone()))
    }

    /// Name of the directory that contains the package manifest.
    ///
    /// For a package at the project root this is the root directory's own name.
    /// Empty when the path has no final component (e.g. `/`).
    pub fn directory_name(&self, project_root: &Utf8Path) -> String {
        let manifest = project_root.join(self.manifest.as_str());
        manifest
            .parent()
            .and_then(Utf8Path::file_name)
            .unwrap_or_default()
            .to_string()
    }
}
