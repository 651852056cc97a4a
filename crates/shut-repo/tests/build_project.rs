use camino::{Utf8Path, Utf8PathBuf};
use shut_repo::build_project;
use tempfile::TempDir;

fn write_file(path: &Utf8Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dirs");
    }
    std::fs::write(path, content).expect("write file");
}

fn setup_monorepo() -> (TempDir, Utf8PathBuf) {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8 path");

    let root_manifest = r#"[tool.shut.monorepo]
name = "mono"
version = "1.2.0"
packages = ["packages/*"]

[tool.shut.release]
single-version = true
"#;
    write_file(&root.join("pyproject.toml"), root_manifest);

    let pkg_b = r#"[project]
name = "pkg-b"
version = "1.2.0"
license = "MIT"
authors = [{ name = "Jane Doe" }]

[project.urls]
homepage = "https://example.org/b"
"#;
    write_file(&root.join("packages").join("pkg-b").join("pyproject.toml"), pkg_b);
    write_file(&root.join("packages").join("pkg-b").join("README.md"), "# b\n");

    let pkg_a = r#"[project]
name = "renamed"
version = "1.1.0"
"#;
    write_file(&root.join("packages").join("pkg-a").join("pyproject.toml"), pkg_a);

    write_file(
        &root.join("packages").join("broken").join("pyproject.toml"),
        "[project]\nversion = \"1.0\"\n",
    );

    (temp, root)
}

#[test]
fn monorepo_members_are_loaded_in_manifest_order() {
    let (_temp, root) = setup_monorepo();
    let project = build_project(&root).expect("build project");

    let mono = project.monorepo.as_ref().expect("monorepo");
    assert_eq!(mono.name, "mono");
    assert_eq!(mono.version.as_deref(), Some("1.2.0"));
    assert!(mono.release.single_version);

    let manifests: Vec<&str> = project.packages.iter().map(|p| p.manifest.as_str()).collect();
    assert_eq!(
        manifests,
        vec!["packages/pkg-a/pyproject.toml", "packages/pkg-b/pyproject.toml"]
    );

    let b = &project.packages[1];
    assert_eq!(b.license.as_deref(), Some("MIT"));
    assert_eq!(b.url.as_deref(), Some("https://example.org/b"));
    assert_eq!(b.readme.as_deref(), Some("README.md"));
    assert_eq!(b.authors[0].name.as_deref(), Some("Jane Doe"));
}

#[test]
fn member_without_name_is_invalid() {
    let (_temp, root) = setup_monorepo();
    let project = build_project(&root).expect("build project");

    assert_eq!(project.invalid_packages.len(), 1);
    let invalid = &project.invalid_packages[0];
    assert_eq!(invalid.name, "broken");
    assert_eq!(invalid.manifest.as_str(), "packages/broken/pyproject.toml");
    assert!(invalid.error.contains("project.name"), "{}", invalid.error);
}

#[test]
fn directory_names_come_from_disk_layout() {
    let (_temp, root) = setup_monorepo();
    let project = build_project(&root).expect("build project");
    let dirs: Vec<String> = project
        .packages
        .iter()
        .map(|p| p.directory_name(&project.root))
        .collect();
    assert_eq!(dirs, vec!["pkg-a".to_string(), "pkg-b".to_string()]);
}
