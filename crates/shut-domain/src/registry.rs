//! Registry mapping model types to the checkers applicable to them.
//!
//! The registry is built once at startup (see [`build_default_registry`]) and
//! is read-only afterwards. It is `Send + Sync`, so independent runs can share
//! it.

use crate::checker::{CheckContext, CheckDecl, Checker, Emitter};
use crate::checkers::{MonorepoChecker, PackageChecker};
use crate::model::{Model, MonorepoModel, PackageModel};
use std::any::{Any, TypeId};
use std::collections::{BTreeSet, HashMap};
use std::marker::PhantomData;
use thiserror::Error;

/// Registration failures. These are programming errors and fatal at startup.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("checker {checker} is already registered for {model}")]
    DuplicateRegistration {
        model: &'static str,
        checker: &'static str,
    },
    #[error("another checker named {checker} is already registered")]
    DuplicateCheckerName { checker: &'static str },
    #[error("checker {checker} declares check id '{id}' more than once")]
    DuplicateCheckId {
        checker: &'static str,
        id: &'static str,
    },
}

/// Static description of one declared check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckInfo {
    pub id: &'static str,
    pub group: Option<&'static str>,
}

/// One row of the registry catalog, in registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub model: &'static str,
    pub checker: &'static str,
    pub check: CheckInfo,
}

/// A checker type as stored in the registry for model type `M`.
pub struct RegisteredChecker<M: Model> {
    name: &'static str,
    type_id: TypeId,
    checks: Vec<CheckInfo>,
    instantiate: fn() -> Box<dyn CheckerInstance<M>>,
}

impl<M: Model> RegisteredChecker<M> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn checks(&self) -> &[CheckInfo] {
        &self.checks
    }

    pub fn is<C: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<C>()
    }

    /// Create a fresh checker instance for one evaluation run.
    pub fn instantiate(&self) -> LiveChecker<M> {
        LiveChecker {
            name: self.name,
            checks: self.checks.clone(),
            instance: (self.instantiate)(),
        }
    }
}

/// Type-erased checker instance bound to its check table.
pub(crate) trait CheckerInstance<M> {
    fn run(&self, index: usize, ctx: &CheckContext<'_, M>, out: &mut Emitter)
    -> anyhow::Result<()>;
}

struct Instance<C, M> {
    checker: C,
    table: Vec<CheckDecl<C, M>>,
    _model: PhantomData<fn(&M)>,
}

impl<C, M> CheckerInstance<M> for Instance<C, M> {
    fn run(
        &self,
        index: usize,
        ctx: &CheckContext<'_, M>,
        out: &mut Emitter,
    ) -> anyhow::Result<()> {
        let decl = self
            .table
            .get(index)
            .ok_or_else(|| anyhow::anyhow!("check index {index} out of range"))?;
        (decl.run)(&self.checker, ctx, out)
    }
}

fn instantiate<M: Model, C: Checker<M>>() -> Box<dyn CheckerInstance<M>> {
    Box::new(Instance {
        checker: C::default(),
        table: C::checks(),
        _model: PhantomData,
    })
}

/// A checker instance created for one run.
pub struct LiveChecker<M> {
    name: &'static str,
    checks: Vec<CheckInfo>,
    instance: Box<dyn CheckerInstance<M>>,
}

impl<M> LiveChecker<M> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn checks(&self) -> &[CheckInfo] {
        &self.checks
    }

    pub(crate) fn run_index(
        &self,
        index: usize,
        ctx: &CheckContext<'_, M>,
        out: &mut Emitter,
    ) -> anyhow::Result<()> {
        self.instance.run(index, ctx, out)
    }
}

type CheckerList<M> = Vec<RegisteredChecker<M>>;

#[derive(Default)]
pub struct Registry {
    by_model: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
    /// Checker types by name, across all model types.
    names: HashMap<&'static str, TypeId>,
    catalog: Vec<CatalogEntry>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("catalog", &self.catalog)
            .finish()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register checker `C` for model type `M`.
    ///
    /// Fails if `C` is already registered for `M`, declares a check id twice, or
    /// shares its name with a different checker type. On failure the registry is
    /// left unchanged.
    pub fn register<M: Model, C: Checker<M>>(&mut self) -> Result<(), RegistryError> {
        let table = C::checks();
        let mut seen = BTreeSet::new();
        for decl in &table {
            if !seen.insert(decl.id) {
                return Err(RegistryError::DuplicateCheckId {
                    checker: C::NAME,
                    id: decl.id,
                });
            }
        }

        if self.checkers::<M>().iter().any(|c| c.is::<C>()) {
            return Err(RegistryError::DuplicateRegistration {
                model: M::KIND,
                checker: C::NAME,
            });
        }
        if self
            .names
            .get(C::NAME)
            .is_some_and(|id| *id != TypeId::of::<C>())
        {
            return Err(RegistryError::DuplicateCheckerName { checker: C::NAME });
        }

        let checks: Vec<CheckInfo> = table
            .iter()
            .map(|d| CheckInfo {
                id: d.id,
                group: d.group,
            })
            .collect();

        self.names.insert(C::NAME, TypeId::of::<C>());
        self.list_mut::<M>().push(RegisteredChecker {
            name: C::NAME,
            type_id: TypeId::of::<C>(),
            checks: checks.clone(),
            instantiate: instantiate::<M, C>,
        });

        self.catalog.extend(checks.into_iter().map(|check| CatalogEntry {
            model: M::KIND,
            checker: C::NAME,
            check,
        }));

        tracing::debug!(model = M::KIND, checker = C::NAME, "registered checker");
        Ok(())
    }

    /// Checkers registered for `M`, in registration order.
    pub fn checkers<M: Model>(&self) -> &[RegisteredChecker<M>] {
        self.by_model
            .get(&TypeId::of::<M>())
            .and_then(|list| list.downcast_ref::<CheckerList<M>>())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every declared check across all model types, in registration order.
    pub fn catalog(&self) -> &[CatalogEntry] {
        &self.catalog
    }

    pub fn knows_check(&self, id: &str) -> bool {
        self.catalog.iter().any(|e| e.check.id == id)
    }

    fn list_mut<M: Model>(&mut self) -> &mut CheckerList<M> {
        self.by_model
            .entry(TypeId::of::<M>())
            .or_insert_with(|| Box::new(CheckerList::<M>::new()))
            .downcast_mut::<CheckerList<M>>()
            .expect("registry entries are keyed by their model TypeId")
    }
}

/// The registry with all built-in checkers.
pub fn build_default_registry() -> Result<Registry, RegistryError> {
    let mut registry = Registry::new();
    registry.register::<MonorepoModel, MonorepoChecker>()?;
    registry.register::<PackageModel, PackageChecker>()?;
    Ok(registry)
}
