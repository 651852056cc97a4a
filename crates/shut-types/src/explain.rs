//! Explain registry for checks.
//!
//! Maps check IDs to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Configuration that passes the check.
    pub example: &'static str,
}

/// Look up an explanation by check id.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        ids::CHECK_INVALID_PACKAGE => Some(explain_invalid_package()),
        ids::CHECK_BAD_PACKAGE_DIRECTORY => Some(explain_bad_package_directory()),
        ids::CHECK_INCONSISTENT_SINGLE_VERSION => Some(explain_inconsistent_single_version()),
        ids::CHECK_MISSING_LICENSE => Some(explain_missing_license()),
        ids::CHECK_MISSING_URL => Some(explain_missing_url()),
        ids::CHECK_MISSING_AUTHOR => Some(explain_missing_author()),
        ids::CHECK_MISSING_README => Some(explain_missing_readme()),
        _ => None,
    }
}

/// List all known check IDs, in evaluation order.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_INVALID_PACKAGE,
        ids::CHECK_BAD_PACKAGE_DIRECTORY,
        ids::CHECK_INCONSISTENT_SINGLE_VERSION,
        ids::CHECK_MISSING_LICENSE,
        ids::CHECK_MISSING_URL,
        ids::CHECK_MISSING_AUTHOR,
        ids::CHECK_MISSING_README,
    ]
}

fn explain_invalid_package() -> Explanation {
    Explanation {
        title: "Invalid Package",
        description: "\
Reports every package directory of the monorepo whose `pyproject.toml` could not
be loaded: the file is not valid TOML, or it lacks `[project] name`.

Invalid packages are left out of every other check, so problems in them would
otherwise go unnoticed.",
        remediation: "\
Run `shut check -v` to see the load error for the package, then fix the
manifest. Every package needs at least a `[project]` table with a `name`.",
        example: r#"[project]
name = "my-package"
version = "1.0.0""#,
    }
}

fn explain_bad_package_directory() -> Explanation {
    Explanation {
        title: "Package Directory Mismatch",
        description: "\
Detects packages whose declared name differs from the name of the directory
that contains their `pyproject.toml`.

Keeping directory and package names aligned makes it obvious where a package
lives in the monorepo and keeps tooling that derives names from paths correct.",
        remediation: "\
Rename the directory to match `[project] name`, or change the name so it
matches the directory.",
        example: r#"# packages/my-package/pyproject.toml
[project]
name = "my-package""#,
    }
}

fn explain_inconsistent_single_version() -> Explanation {
    Explanation {
        title: "Inconsistent Single Version",
        description: "\
In single-version release mode every package in the monorepo is released with
the monorepo's version. This check reports packages that declare a different
explicit version.

The check is skipped when the monorepo is not in single-version mode or has no
packages.",
        remediation: "\
Set each package version to the monorepo version, or drop the explicit version
from the package and let the release process stamp it.",
        example: r#"# pyproject.toml (monorepo root)
[tool.shut.monorepo]
name = "acme"
version = "1.2.0"

[tool.shut.release]
single-version = true

# packages/acme-core/pyproject.toml
[project]
name = "acme-core"
version = "1.2.0""#,
    }
}

fn explain_missing_license() -> Explanation {
    Explanation {
        title: "Missing License",
        description: "\
Detects packages that do not declare a license. Published packages without a
license cannot be safely reused by others.",
        remediation: "Add a `license` to the `[project]` table.",
        example: r#"[project]
name = "my-package"
license = "MIT""#,
    }
}

fn explain_missing_url() -> Explanation {
    Explanation {
        title: "Missing Project URL",
        description: "\
Detects packages that do not declare a homepage or repository URL. Package
indexes link to it from the project page.",
        remediation: "Add a `homepage` or `repository` entry to `[project.urls]`.",
        example: r#"[project.urls]
homepage = "https://github.com/acme/my-package""#,
    }
}

fn explain_missing_author() -> Explanation {
    Explanation {
        title: "Missing Author",
        description: "Detects packages that do not list at least one author.",
        remediation: "Add an entry to `[project] authors`.",
        example: r#"[project]
authors = [{ name = "Jane Doe", email = "jane@example.com" }]"#,
    }
}

fn explain_missing_readme() -> Explanation {
    Explanation {
        title: "Missing Readme",
        description: "\
Recommends a readme for packages that neither declare `[project] readme` nor
have a `README*` file next to their `pyproject.toml`. The readme becomes the
long description on the package index.",
        remediation: "Add a `README.md` next to the package manifest and reference it.",
        example: r#"[project]
readme = "README.md""#,
    }
}
