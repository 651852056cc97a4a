use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `[tool.shut.check]` schema v1.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CheckConfigV1 {
    /// When to fail the run: `error` (default) or `warning`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<String>,

    /// Check ids that never run.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disable: Vec<String>,

    /// When present, only these check ids run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_only: Option<Vec<String>>,
}

// The rest of pyproject.toml is ignored; only the path down to our table is typed.

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PyProjectDoc {
    #[serde(default)]
    pub tool: Option<ToolTable>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ToolTable {
    #[serde(default)]
    pub shut: Option<ShutTable>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ShutTable {
    #[serde(default)]
    pub check: Option<CheckConfigV1>,
}
