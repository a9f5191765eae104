mod common;

use std::fs;

use common::{read, write};
use take_flight::error::Error;
use take_flight::ignore::parse_ignore_file;
use take_flight::template::{
    copy_template, copy_tree, create_target, resolve_template_dir, write_vcs_ignore_file,
    TemplateKind,
};
use tempfile::TempDir;

#[test]
fn test_copy_skips_dependency_cache_and_ignore_file() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("react");
    write(source.join("package.json"), "{}\n");
    write(source.join("src/App.jsx"), "export default 1\n");
    write(source.join("node_modules/react/index.js"), "\n");
    write(source.join("packages/ui/node_modules/x/index.js"), "\n");
    write(source.join("dist/bundle.js"), "\n");
    write(source.join("debug.log"), "\n");
    write(source.join(".takeflightignore"), "# build\ndist\n\n*.log\n");

    let target = temp_dir.path().join("out");
    create_target(&target).unwrap();
    let copied = copy_template(&source, &target).unwrap();

    assert_eq!(copied, 2);
    assert!(target.join("package.json").is_file());
    assert_eq!(read(target.join("src/App.jsx")), "export default 1\n");
    assert!(!target.join("node_modules").exists());
    assert!(!target.join("packages/ui/node_modules").exists());
    assert!(!target.join("dist").exists());
    assert!(!target.join("debug.log").exists());
    assert!(!target.join(".takeflightignore").exists());
}

#[test]
fn test_create_existing_target_fails_untouched() {
    let temp_dir = TempDir::new().unwrap();

    let target = temp_dir.path().join("taken");
    let pristine = temp_dir.path().join("pristine");
    for dir in [&target, &pristine] {
        write(dir.join("mine.txt"), "mine\n");
    }

    let result = create_target(&target);
    assert!(matches!(result, Err(Error::DirectoryExists { .. })));
    assert!(!dir_diff::is_different(&target, &pristine).unwrap());
}

#[test]
fn test_copy_tree_overwrites() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("fragment");
    write(source.join("auth.js"), "new\n");
    let target = temp_dir.path().join("project/src/auth");
    write(target.join("auth.js"), "old\n");
    write(target.join("keep.js"), "keep\n");

    let ignored = parse_ignore_file(&source).unwrap();
    let mut created = Vec::new();
    assert_eq!(copy_tree(&source, &target, &ignored, &mut created).unwrap(), 1);
    assert_eq!(read(target.join("auth.js")), "new\n");
    assert_eq!(read(target.join("keep.js")), "keep\n");
    assert!(created.is_empty());
}

#[test]
fn test_copy_tree_records_created_paths() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("fragment");
    write(source.join("db.js"), "db\n");
    write(source.join("models/user.js"), "user\n");
    let project = temp_dir.path().join("project");
    write(project.join("src/db/existing.js"), "mine\n");
    write(project.join("src/db/db.js"), "old\n");

    let ignored = parse_ignore_file(&source).unwrap();
    let mut created = Vec::new();
    let target = project.join("src/db");
    copy_tree(&source, &target, &ignored, &mut created).unwrap();

    assert_eq!(
        created,
        vec![target.join("models"), target.join("models/user.js")]
    );

    let fresh = project.join("src/auth/deep");
    let mut created = Vec::new();
    copy_tree(&source, &fresh, &ignored, &mut created).unwrap();
    assert_eq!(created[0], project.join("src/auth"));
    assert_eq!(created[1], fresh);
    assert!(created.contains(&fresh.join("db.js")));
}

#[test]
fn test_invalid_ignore_pattern() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path().join(".takeflightignore"), "src/[\n");
    assert!(matches!(
        parse_ignore_file(temp_dir.path()),
        Err(Error::IgnoreError(_))
    ));
}

#[test]
fn test_resolve_template_dir() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("express")).unwrap();

    assert_eq!(
        resolve_template_dir(temp_dir.path(), TemplateKind::Express).unwrap(),
        temp_dir.path().join("express")
    );
    match resolve_template_dir(temp_dir.path(), TemplateKind::React) {
        Err(Error::TemplateNotFound { template, path }) => {
            assert_eq!(template, "react");
            assert_eq!(path, temp_dir.path().join("react"));
        }
        other => panic!("Expected TemplateNotFound, got {other:?}"),
    }
}

#[test]
fn test_vcs_ignore_file() {
    let temp_dir = TempDir::new().unwrap();
    assert!(write_vcs_ignore_file(temp_dir.path()).unwrap());
    let content = read(temp_dir.path().join(".gitignore"));
    for entry in ["node_modules/", ".env", ".env.local"] {
        assert!(content.lines().any(|line| line == entry), "missing {entry}");
    }

    write(temp_dir.path().join(".gitignore"), "custom\n");
    assert!(!write_vcs_ignore_file(temp_dir.path()).unwrap());
    assert_eq!(read(temp_dir.path().join(".gitignore")), "custom\n");
}
