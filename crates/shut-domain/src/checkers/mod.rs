//! Built-in checkers.

mod monorepo;
mod package;


pub use monorepo::MonorepoChecker;
pub use package::PackageChecker;
