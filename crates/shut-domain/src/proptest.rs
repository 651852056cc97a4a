//! Property-based tests for the domain crate.
//!
//! Covered invariants:
//! - aggregation is the maximum severity and ignores skips
//! - evaluation is deterministic for identical input
//! - every package contributes exactly the metadata checks it fails

use crate::engine::evaluate;
use crate::model::{Author, PackageModel};
use crate::policy::{CheckSelection, EffectiveConfig, FailOn};
use crate::registry::build_default_registry;
use crate::test_support::{monorepo, project};
use shut_types::{CheckStatus, RepoPath, ids};
use proptest::prelude::*;

fn arb_status() -> impl Strategy<Value = CheckStatus> {
    prop_oneof![
        Just(CheckStatus::Ok),
        Just(CheckStatus::Recommendation),
        Just(CheckStatus::Warning),
        Just(CheckStatus::Error),
        Just(CheckStatus::Skipped),
    ]
}

fn arb_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_-]{0,15}").unwrap()
}

fn arb_version() -> impl Strategy<Value = Option<String>> {
    prop::option::of((0u32..3, 0u32..3, 0u32..3).prop_map(|(a, b, c)| format!("{a}.{b}.{c}")))
}

prop_compose! {
    fn arb_package()(
        name in arb_name(),
        dir in arb_name(),
        version in arb_version(),
        license in prop::option::of("[A-Z]{0,4}"),
        url in prop::option::of(Just("https://example.org".to_string())),
        has_author in any::<bool>(),
        readme in prop::option::of(Just("README.md".to_string())),
    ) -> PackageModel {
        PackageModel {
            manifest: RepoPath::new(format!("packages/{dir}/pyproject.toml")),
            name,
            version,
            description: None,
            license,
            url,
            authors: if has_author {
                vec![Author { name: Some("someone".to_string()), email: None }]
            } else {
                Vec::new()
            },
            readme,
        }
    }
}

fn expected_package_failures(pkg: &PackageModel) -> usize {
    let blank = |v: &Option<String>| v.as_deref().is_none_or(|s| s.trim().is_empty());
    usize::from(blank(&pkg.license))
        + usize::from(blank(&pkg.url))
        + usize::from(pkg.authors.is_empty())
        + usize::from(blank(&pkg.readme))
}

proptest! {
    #[test]
    fn aggregate_is_max_non_skipped_severity(statuses in prop::collection::vec(arb_status(), 0..20)) {
        let agg = CheckStatus::aggregate(statuses.iter().copied());
        prop_assert_ne!(agg, CheckStatus::Skipped);
        let expected = statuses
            .iter()
            .filter_map(|s| s.severity())
            .max()
            .unwrap_or(0);
        prop_assert_eq!(agg.severity(), Some(expected));
    }

    #[test]
    fn evaluation_is_deterministic(
        packages in prop::collection::vec(arb_package(), 0..6),
        mono_version in arb_version(),
        single_version in any::<bool>(),
    ) {
        let registry = build_default_registry().unwrap();
        let project = project(
            Some(monorepo(mono_version.as_deref(), single_version)),
            packages,
        );
        let cfg = EffectiveConfig::default();
        let first = evaluate(&registry, &project, &cfg);
        let second = evaluate(&registry, &project, &cfg);
        prop_assert_eq!(first.records, second.records);
        prop_assert_eq!(first.summary, second.summary);
    }

    #[test]
    fn package_records_match_missing_metadata(packages in prop::collection::vec(arb_package(), 0..6)) {
        let registry = build_default_registry().unwrap();
        let project = project(None, packages.clone());
        let report = evaluate(&registry, &project, &EffectiveConfig::default());
        let expected: usize = packages.iter().map(expected_package_failures).sum();
        prop_assert_eq!(report.records.len(), expected);
        prop_assert!(report.records.iter().all(|r| r.checker == ids::CHECKER_PACKAGE));
        prop_assert!(report.records.iter().all(|r| !r.internal));
    }

    #[test]
    fn passed_agrees_with_fail_on(
        packages in prop::collection::vec(arb_package(), 0..6),
        strict in any::<bool>(),
    ) {
        let registry = build_default_registry().unwrap();
        let project = project(None, packages);
        let fail_on = if strict { FailOn::Warning } else { FailOn::Error };
        let cfg = EffectiveConfig { fail_on, selection: CheckSelection::all() };
        let report = evaluate(&registry, &project, &cfg);
        let any_fails = report.records.iter().any(|r| fail_on.fails(r.result.status));
        prop_assert_eq!(report.passed, !any_fails);
    }
}
