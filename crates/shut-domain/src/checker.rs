//! The checker protocol: how checks are declared and what they produce.

use crate::model::{Model, Project};
use shut_types::CheckResult;

/// Signature of a single check.
///
/// A check writes its results into the [`Emitter`]. Returning `Err` marks the
/// check as failed internally; the runner replaces its output with one error
/// result.
pub type CheckFn<C, M> = fn(&C, &CheckContext<'_, M>, &mut Emitter) -> anyhow::Result<()>;

/// Uniform per-run context handed to every check of every checker.
pub struct CheckContext<'a, M> {
    pub project: &'a Project,
    pub model: &'a M,
}

impl<M> Clone for CheckContext<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for CheckContext<'_, M> {}

/// One entry of a checker's check table.
pub struct CheckDecl<C, M> {
    pub id: &'static str,
    pub group: Option<&'static str>,
    pub run: CheckFn<C, M>,
}

impl<C, M> CheckDecl<C, M> {
    pub const fn new(id: &'static str, run: CheckFn<C, M>) -> Self {
        Self {
            id,
            group: None,
            run,
        }
    }

    pub const fn grouped(mut self, group: &'static str) -> Self {
        self.group = Some(group);
        self
    }
}

impl<C, M> Clone for CheckDecl<C, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, M> Copy for CheckDecl<C, M> {}

/// A group of related checks for one model type.
///
/// Implementors expose a static, ordered check table; the registry reads it
/// without needing a model instance. A fresh instance is created per run.
pub trait Checker<M: Model>: Default + 'static {
    /// Stable checker name, unique within a registry.
    const NAME: &'static str;

    /// Declared checks in evaluation order. Ids must be unique.
    fn checks() -> Vec<CheckDecl<Self, M>>;
}

/// An item a check produces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Result(CheckResult),
    /// The check does not apply under the current conditions.
    Skip,
}

impl From<CheckResult> for Outcome {
    fn from(result: CheckResult) -> Self {
        Outcome::Result(result)
    }
}

/// Collects what a single check produces.
///
/// A skip is recorded as one `Skipped` result. Results emitted before the skip
/// are kept; anything emitted after it is ignored.
#[derive(Debug, Default)]
pub struct Emitter {
    results: Vec<CheckResult>,
    skipped: bool,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: impl Into<Outcome>) {
        if self.skipped {
            return;
        }
        match outcome.into() {
            Outcome::Result(result) => self.results.push(result),
            Outcome::Skip => {
                self.skipped = true;
                self.results.push(CheckResult::skipped());
            }
        }
    }

    pub fn emit(&mut self, result: CheckResult) {
        self.push(Outcome::Result(result));
    }

    pub fn skip(&mut self) {
        self.push(Outcome::Skip);
    }

    pub fn is_skipped(&self) -> bool {
        self.skipped
    }

    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<CheckResult> {
        self.results
    }
}
