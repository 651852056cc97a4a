#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableStatus {
    Ok,
    Recommendation,
    Warning,
    Error,
    Skipped,
}

impl RenderableStatus {
    pub(crate) fn tag(self) -> &'static str {
        match self {
            RenderableStatus::Ok => "OK",
            RenderableStatus::Recommendation => "RECOMMEND",
            RenderableStatus::Warning => "WARN",
            RenderableStatus::Error => "ERROR",
            RenderableStatus::Skipped => "SKIP",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableRecord {
    pub status: RenderableStatus,
    pub checker: String,
    pub check_id: String,
    pub message: String,
    /// Human label of the subject, e.g. `package foo`.
    pub subject: Option<String>,
    /// Manifest path the record points at, if any.
    pub path: Option<String>,
    pub internal: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderableCounts {
    pub ok: u32,
    pub recommendation: u32,
    pub warning: u32,
    pub error: u32,
    pub skipped: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub status: RenderableStatus,
    pub passed: bool,
    pub records: Vec<RenderableRecord>,
    pub counts: RenderableCounts,
}

impl RenderableCounts {
    pub(crate) fn line(&self) -> String {
        format!(
            "{} error(s), {} warning(s), {} recommendation(s), {} skipped",
            self.error, self.warning, self.recommendation, self.skipped
        )
    }
}
