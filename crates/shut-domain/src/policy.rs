use shut_types::CheckStatus;
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailOn {
    #[default]
    Error,
    Warning,
}

impl FailOn {
    /// Whether a result with this status fails the run.
    pub fn fails(self, status: CheckStatus) -> bool {
        match status {
            CheckStatus::Error => true,
            CheckStatus::Warning => self == FailOn::Warning,
            _ => false,
        }
    }
}

/// Which check ids take part in a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckSelection {
    disabled: BTreeSet<String>,
    only: Option<BTreeSet<String>>,
}

impl CheckSelection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn disable(mut self, id: impl Into<String>) -> Self {
        self.disabled.insert(id.into());
        self
    }

    pub fn only<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        if self.disabled.contains(id) {
            return false;
        }
        self.only.as_ref().is_none_or(|only| only.contains(id))
    }

    pub fn disabled(&self) -> impl Iterator<Item = &str> {
        self.disabled.iter().map(String::as_str)
    }
}

#[derive(Clone, Debug, Default)]
pub struct EffectiveConfig {
    pub fail_on: FailOn,
    pub selection: CheckSelection,
}
