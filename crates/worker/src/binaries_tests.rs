// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, b"\x7fELF").unwrap();
}

fn spec(module: &str, version: &str, suffix: &str) -> BinarySpec {
    BinarySpec { module: module.into(), version: version.into(), suffix: suffix.into() }
}

#[test]
fn lists_files_as_module_version_suffix() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "golang.org/x/tools@v0.5.0/cmd/stringer");
    touch(dir.path(), "example.com/app@v1.2.3/app");
    touch(dir.path(), "example.com/single@v0.1.0");
    touch(dir.path(), "README");

    let got = DirBinaryStore::new(dir.path()).list().unwrap();
    assert_eq!(
        got,
        vec![
            spec("example.com/app", "v1.2.3", "app"),
            spec("example.com/single", "v0.1.0", ""),
            spec("golang.org/x/tools", "v0.5.0", "cmd/stringer"),
        ]
    );
}

#[test]
fn missing_root_lists_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = DirBinaryStore::new(dir.path().join("absent"));
    assert!(store.list().unwrap().is_empty());
}

#[yare::parameterized(
    no_at = { "example.com/app/v1/app" },
    empty_module = { "@v1/app" },
    empty_version = { "example.com/app@/app" },
)]
fn rejects_bad_layout(rel: &str) {
    assert_eq!(parse_relative(rel), None);
}

#[tokio::test]
async fn snapshot_matches_listing() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "example.com/app@v1.2.3/app");
    let store = DirBinaryStore::new(dir.path());

    let snapshot = store.snapshot().await.unwrap();
    assert_eq!(snapshot, vec![spec("example.com/app", "v1.2.3", "app")]);
    assert_eq!(BinaryStore::list(&snapshot).unwrap(), store.list().unwrap());
}
