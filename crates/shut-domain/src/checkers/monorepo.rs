use crate::checker::{CheckContext, CheckDecl, Checker, Emitter};
use crate::model::MonorepoModel;
use shut_types::{CheckResult, Subject, ids};

/// Structural checks over a monorepo and its member packages.
#[derive(Debug, Default)]
pub struct MonorepoChecker;

type Ctx<'a> = CheckContext<'a, MonorepoModel>;

impl Checker<MonorepoModel> for MonorepoChecker {
    const NAME: &'static str = ids::CHECKER_MONOREPO;

    fn checks() -> Vec<CheckDecl<Self, MonorepoModel>> {
        vec![
            CheckDecl::new(ids::CHECK_INVALID_PACKAGE, Self::no_invalid_packages),
            CheckDecl::new(ids::CHECK_BAD_PACKAGE_DIRECTORY, Self::bad_package_directory),
            CheckDecl::new(
                ids::CHECK_INCONSISTENT_SINGLE_VERSION,
                Self::consistent_single_version,
            )
            .grouped("release"),
        ]
    }
}

impl MonorepoChecker {
    fn no_invalid_packages(&self, ctx: &Ctx<'_>, out: &mut Emitter) -> anyhow::Result<()> {
        for invalid in &ctx.project.invalid_packages {
            out.emit(
                CheckResult::error(invalid.name.clone())
                    .with_subject(Subject::package(invalid.name.clone(), Some(invalid.manifest.clone()))),
            );
        }
        Ok(())
    }

    fn bad_package_directory(&self, ctx: &Ctx<'_>, out: &mut Emitter) -> anyhow::Result<()> {
        for package in &ctx.project.packages {
            let dirname = package.directory_name(&ctx.project.root);
            if dirname != package.name {
                out.emit(
                    CheckResult::error(format!(
                        "package name is '{}' but directory name is '{}'",
                        package.name, dirname
                    ))
                    .with_subject(package.subject()),
                );
            }
        }
        Ok(())
    }

    fn consistent_single_version(&self, ctx: &Ctx<'_>, out: &mut Emitter) -> anyhow::Result<()> {
        let monorepo = ctx.model;
        if !monorepo.release.single_version || ctx.project.packages.is_empty() {
            out.skip();
            return Ok(());
        }

        let expected = monorepo.version.as_deref();
        for package in &ctx.project.packages {
            let Some(version) = package.version.as_deref() else {
                continue;
            };
            if Some(version) != expected {
                out.emit(
                    CheckResult::error(format!(
                        "{} v{}, expected v{}",
                        package.name,
                        version,
                        expected.unwrap_or("<unset>")
                    ))
                    .with_subject(package.subject()),
                );
            }
        }
        Ok(())
    }
}
