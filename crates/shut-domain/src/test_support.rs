use crate::model::{Author, InvalidPackage, MonorepoModel, PackageModel, Project, ReleaseConfig};
use camino::Utf8PathBuf;
use shut_types::RepoPath;

/// A package living in `packages/<dir>/`, with every metadata field filled in.
pub fn package(name: &str, dir: &str, version: Option<&str>) -> PackageModel {
    PackageModel {
        name: name.to_string(),
        version: version.map(str::to_string),
        manifest: RepoPath::new(format!("packages/{dir}/pyproject.toml")),
        description: Some(format!("The {name} package")),
        license: Some("MIT".to_string()),
        url: Some(format!("https://example.org/{name}")),
        authors: vec![Author {
            name: Some("Jane Doe".to_string()),
            email: Some("jane@example.org".to_string()),
        }],
        readme: Some("README.md".to_string()),
    }
}

/// A package missing every optional metadata field.
pub fn bare_package(name: &str) -> PackageModel {
    PackageModel {
        name: name.to_string(),
        manifest: RepoPath::new(format!("packages/{name}/pyproject.toml")),
        ..PackageModel::default()
    }
}

pub fn monorepo(version: Option<&str>, single_version: bool) -> MonorepoModel {
    MonorepoModel {
        name: "mono".to_string(),
        version: version.map(str::to_string),
        manifest: RepoPath::new("pyproject.toml"),
        release: ReleaseConfig { single_version },
    }
}

pub fn project(monorepo: Option<MonorepoModel>, packages: Vec<PackageModel>) -> Project {
    Project {
        root: Utf8PathBuf::from("/work/mono"),
        monorepo,
        packages,
        invalid_packages: Vec::new(),
    }
}

pub fn invalid(name: &str, error: &str) -> InvalidPackage {
    InvalidPackage {
        name: name.to_string(),
        manifest: RepoPath::new(format!("packages/{name}/pyproject.toml")),
        error: error.to_string(),
    }
}
