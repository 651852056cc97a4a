//! Pure check evaluation (no IO).
//!
//! Input: a project model constructed elsewhere.
//! Output: check records + summary + pass/fail verdict.

#![forbid(unsafe_code)]

pub mod checker;
pub mod checkers;
pub mod model;
pub mod policy;
pub mod registry;
pub mod report;

mod engine;

pub use engine::{CheckOutput, CheckRecord, RunChecks, evaluate, run_checks, run_checks_with};
pub use registry::{Registry, RegistryError, build_default_registry};

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod proptest;
