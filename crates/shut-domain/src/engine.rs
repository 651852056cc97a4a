use crate::checker::{CheckContext, Emitter};
use crate::model::{Model, Project};
use crate::policy::{CheckSelection, EffectiveConfig};
use crate::registry::{LiveChecker, RegisteredChecker, Registry};
use crate::report::{DomainReport, RunSummary};
use shut_types::{CheckResult, ids};
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};

/// One result, tagged with the checker and check that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckRecord {
    pub checker: &'static str,
    pub check_id: &'static str,
    pub result: CheckResult,
    /// The result was synthesized because the check failed internally.
    pub internal: bool,
}

/// Output of one check after normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckOutput {
    pub results: Vec<CheckResult>,
    pub internal: bool,
}

impl<M: Model> LiveChecker<M> {
    /// Run the check named `check_id`. Returns `None` for an unknown id.
    pub fn run_check(&self, check_id: &str, ctx: &CheckContext<'_, M>) -> Option<CheckOutput> {
        let index = self.checks().iter().position(|c| c.id == check_id)?;
        Some(self.run_at(index, ctx))
    }

    pub(crate) fn run_at(&self, index: usize, ctx: &CheckContext<'_, M>) -> CheckOutput {
        let check_id = self.checks().get(index).map(|c| c.id).unwrap_or("?");
        let mut emitter = Emitter::new();

        // The process panic hook still runs before the unwind is caught here.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.run_index(index, ctx, &mut emitter)
        }));

        let failure = match outcome {
            Ok(Ok(())) => None,
            Ok(Err(err)) => Some(format!("{err:#}")),
            Err(payload) => Some(panic_message(payload.as_ref())),
        };

        match failure {
            None => CheckOutput {
                results: emitter.into_results(),
                internal: false,
            },
            Some(message) => {
                tracing::warn!(
                    checker = self.name(),
                    check = check_id,
                    model = M::KIND,
                    error = %message,
                    "check failed internally"
                );
                CheckOutput {
                    results: vec![CheckResult::error(format!(
                        "{}{}",
                        ids::INTERNAL_ERROR_PREFIX,
                        message
                    ))],
                    internal: true,
                }
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "check panicked".to_string()
    }
}

/// Lazily evaluates every registered check for one model.
///
/// Checks run one at a time as the iterator is drained. Dropping the iterator
/// early stops evaluation; records already yielded stay valid.
pub struct RunChecks<'a, M: Model> {
    ctx: CheckContext<'a, M>,
    selection: Option<&'a CheckSelection>,
    checkers: std::slice::Iter<'a, RegisteredChecker<M>>,
    current: Option<(LiveChecker<M>, usize)>,
    pending: VecDeque<CheckRecord>,
}

impl<M: Model> RunChecks<'_, M> {
    fn enabled(&self, id: &str) -> bool {
        self.selection.is_none_or(|s| s.is_enabled(id))
    }

    /// Evaluate the next check, buffering its records. Returns false when done.
    fn advance(&mut self) -> bool {
        loop {
            if let Some((live, next)) = self.current.as_mut() {
                let Some(info) = live.checks().get(*next).copied() else {
                    self.current = None;
                    continue;
                };
                let index = *next;
                *next += 1;

                let enabled = self.selection.is_none_or(|s| s.is_enabled(info.id));
                if !enabled {
                    tracing::debug!(checker = live.name(), check = info.id, "check disabled");
                    continue;
                }

                tracing::debug!(
                    checker = live.name(),
                    check = info.id,
                    model = M::KIND,
                    "running check"
                );
                let output = live.run_at(index, &self.ctx);
                let checker = live.name();
                self.pending
                    .extend(output.results.into_iter().map(|result| CheckRecord {
                        checker,
                        check_id: info.id,
                        result,
                        internal: output.internal,
                    }));
                return true;
            }

            let Some(registered) = self.checkers.next() else {
                return false;
            };
            if registered.checks().iter().any(|c| self.enabled(c.id)) {
                self.current = Some((registered.instantiate(), 0));
            }
        }
    }
}

impl<M: Model> Iterator for RunChecks<'_, M> {
    type Item = CheckRecord;

    fn next(&mut self) -> Option<CheckRecord> {
        loop {
            if let Some(record) = self.pending.pop_front() {
                return Some(record);
            }
            if !self.advance() {
                return None;
            }
        }
    }
}

/// Run every check registered for `M` against `model`.
///
/// Order: registration order across checkers, declaration order within a
/// checker, emission order within a check.
pub fn run_checks<'a, M: Model>(
    registry: &'a Registry,
    project: &'a Project,
    model: &'a M,
) -> RunChecks<'a, M> {
    build_run(registry, project, model, None)
}

/// Like [`run_checks`], but only for checks enabled by `selection`.
pub fn run_checks_with<'a, M: Model>(
    registry: &'a Registry,
    project: &'a Project,
    model: &'a M,
    selection: &'a CheckSelection,
) -> RunChecks<'a, M> {
    build_run(registry, project, model, Some(selection))
}

fn build_run<'a, M: Model>(
    registry: &'a Registry,
    project: &'a Project,
    model: &'a M,
    selection: Option<&'a CheckSelection>,
) -> RunChecks<'a, M> {
    RunChecks {
        ctx: CheckContext { project, model },
        selection,
        checkers: registry.checkers::<M>().iter(),
        current: None,
        pending: VecDeque::new(),
    }
}

/// Evaluate a whole project: monorepo checks first (if the project is a
/// monorepo), then package checks for each package in order.
pub fn evaluate(registry: &Registry, project: &Project, cfg: &EffectiveConfig) -> DomainReport {
    let mut records: Vec<CheckRecord> = Vec::new();

    if let Some(monorepo) = &project.monorepo {
        records.extend(run_checks_with(registry, project, monorepo, &cfg.selection));
    }
    for package in &project.packages {
        records.extend(run_checks_with(registry, project, package, &cfg.selection));
    }

    let summary = RunSummary::from_records(&records);
    let passed = summary.passed(cfg.fail_on);

    DomainReport {
        records,
        summary,
        passed,
    }
}
