use crate::checker::{CheckContext, CheckDecl, Checker, Emitter};
use crate::model::{Author, PackageModel};
use shut_types::{CheckResult, ids};

/// Metadata completeness checks for a single package.
#[derive(Debug, Default)]
pub struct PackageChecker;

type Ctx<'a> = CheckContext<'a, PackageModel>;

impl Checker<PackageModel> for PackageChecker {
    const NAME: &'static str = ids::CHECKER_PACKAGE;

    fn checks() -> Vec<CheckDecl<Self, PackageModel>> {
        vec![
            CheckDecl::new(ids::CHECK_MISSING_LICENSE, Self::license).grouped("metadata"),
            CheckDecl::new(ids::CHECK_MISSING_URL, Self::url).grouped("metadata"),
            CheckDecl::new(ids::CHECK_MISSING_AUTHOR, Self::author).grouped("metadata"),
            CheckDecl::new(ids::CHECK_MISSING_README, Self::readme).grouped("metadata"),
        ]
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map(str::trim).is_none_or(str::is_empty)
}

impl PackageChecker {
    fn license(&self, ctx: &Ctx<'_>, out: &mut Emitter) -> anyhow::Result<()> {
        if is_blank(ctx.model.license.as_deref()) {
            out.emit(CheckResult::warning("no license specified").with_subject(ctx.model.subject()));
        }
        Ok(())
    }

    fn url(&self, ctx: &Ctx<'_>, out: &mut Emitter) -> anyhow::Result<()> {
        if is_blank(ctx.model.url.as_deref()) {
            out.emit(
                CheckResult::warning("no project url specified").with_subject(ctx.model.subject()),
            );
        }
        Ok(())
    }

    fn author(&self, ctx: &Ctx<'_>, out: &mut Emitter) -> anyhow::Result<()> {
        if ctx.model.authors.iter().all(Author::is_blank) {
            out.emit(CheckResult::warning("no author specified").with_subject(ctx.model.subject()));
        }
        Ok(())
    }

    fn readme(&self, ctx: &Ctx<'_>, out: &mut Emitter) -> anyhow::Result<()> {
        if is_blank(ctx.model.readme.as_deref()) {
            out.emit(
                CheckResult::recommendation("no readme file found")
                    .with_subject(ctx.model.subject()),
            );
        }
        Ok(())
    }
}
