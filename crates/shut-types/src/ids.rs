//! Stable identifiers for checkers and checks.
//!
//! Check ids are kebab-case and unique within their checker. Config selection
//! (`disable`, `enable-only`) matches an id across every checker. Checker names are
//! PascalCase; the registry rejects two checker types with the same name.

// Checkers
pub const CHECKER_MONOREPO: &str = "MonorepoChecker";
pub const CHECKER_PACKAGE: &str = "PackageChecker";

// Checks: MonorepoChecker
pub const CHECK_INVALID_PACKAGE: &str = "invalid-package";
pub const CHECK_BAD_PACKAGE_DIRECTORY: &str = "bad-package-directory";
pub const CHECK_INCONSISTENT_SINGLE_VERSION: &str = "inconsistent-single-version";

// Checks: PackageChecker
pub const CHECK_MISSING_LICENSE: &str = "missing-license";
pub const CHECK_MISSING_URL: &str = "missing-url";
pub const CHECK_MISSING_AUTHOR: &str = "missing-author";
pub const CHECK_MISSING_README: &str = "missing-readme";

/// Prefix of the message synthesized when a check fails internally.
pub const INTERNAL_ERROR_PREFIX: &str = "internal error: ";
