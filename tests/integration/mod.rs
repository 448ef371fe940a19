//! End-to-end pipeline tests over temporary skills trees.
//!
//! These exercise the same code paths as the binary (the command entry
//! points return the process exit code) without spawning a process.

use rudder::commands::{build, validate};
use rudder::router::router_path;
use rudder::validator::{scan, ViolationKind};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write a SKILL.md with the given frontmatter lines under `root/dir/`
fn write_skill(root: &Path, dir: &str, frontmatter: &str) {
    let skill_dir = root.join(dir);
    fs::create_dir_all(&skill_dir).unwrap();
    let content = format!("---\n{frontmatter}\n---\n\n# Instructions\n\nBody text.\n");
    fs::write(skill_dir.join("SKILL.md"), content).unwrap();
}

fn read_router(root: &Path) -> String {
    fs::read_to_string(router_path(root)).unwrap()
}

#[test]
fn test_build_writes_sorted_route_table() {
    let temp = TempDir::new().unwrap();
    write_skill(temp.path(), "zeta", "name: zeta\ndescription: Z things.");
    write_skill(temp.path(), "alpha", "name: alpha\ndescription: A things.");

    let code = build::execute(temp.path(), false, false).unwrap();

    assert_eq!(code, 0);
    assert_eq!(
        read_router(temp.path()),
        "# Skill Router\n\nalpha: alpha/SKILL.md\nzeta: zeta/SKILL.md\n"
    );
}

#[test]
fn test_repeated_builds_are_byte_identical() {
    let temp = TempDir::new().unwrap();
    write_skill(temp.path(), "foo", "name: foo\ndescription: Does foo.");
    write_skill(temp.path(), "nested/bar", "name: bar\ndescription: Does bar.");

    build::execute(temp.path(), false, false).unwrap();
    let first = read_router(temp.path());
    build::execute(temp.path(), false, false).unwrap();
    let second = read_router(temp.path());

    assert_eq!(first, second);
}

#[test]
fn test_invalid_entry_excluded_without_blocking_others() {
    // The worked example: foo is valid, Bar's directory case mismatches
    let temp = TempDir::new().unwrap();
    write_skill(temp.path(), "foo", "name: foo\ndescription: Does foo.");
    write_skill(temp.path(), "Bar", "name: bar\ndescription: Does bar.");

    let code = build::execute(temp.path(), false, false).unwrap();

    assert_eq!(code, 1);
    let router = read_router(temp.path());
    assert!(router.contains("foo: foo/SKILL.md"));
    assert!(!router.contains("bar"));

    let report = scan(temp.path()).unwrap();
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].path, Path::new("Bar/SKILL.md"));
    assert!(matches!(
        report.violations[0].kind,
        ViolationKind::DirectoryMismatch { .. }
    ));
}

#[test]
fn test_malformed_header_is_isolated() {
    let temp = TempDir::new().unwrap();
    write_skill(temp.path(), "good", "name: good\ndescription: Fine.");
    let bad_dir = temp.path().join("broken");
    fs::create_dir_all(&bad_dir).unwrap();
    fs::write(bad_dir.join("SKILL.md"), "no frontmatter here").unwrap();

    let code = build::execute(temp.path(), false, false).unwrap();

    assert_eq!(code, 1);
    assert!(read_router(temp.path()).contains("good: good/SKILL.md"));
}

#[cfg(unix)]
#[test]
fn test_symlink_loop_is_skipped_not_fatal() {
    let temp = TempDir::new().unwrap();
    write_skill(temp.path(), "good", "name: good\ndescription: Fine.");

    // a cycle back to the root next to a valid skill
    let loop_dir = temp.path().join("loopy");
    fs::create_dir_all(&loop_dir).unwrap();
    std::os::unix::fs::symlink(temp.path(), loop_dir.join("back")).unwrap();

    let code = build::execute(temp.path(), false, false).unwrap();

    assert_eq!(code, 0);
    assert!(read_router(temp.path()).contains("good: good/SKILL.md"));
}

#[test]
fn test_duplicate_names_all_excluded() {
    let temp = TempDir::new().unwrap();
    write_skill(
        temp.path(),
        "group-a/tools",
        "name: tools\ndescription: A tools.",
    );
    write_skill(
        temp.path(),
        "group-b/tools",
        "name: tools\ndescription: B tools.",
    );
    write_skill(temp.path(), "solo", "name: solo\ndescription: Solo.");

    let code = build::execute(temp.path(), false, false).unwrap();

    assert_eq!(code, 1);
    let router = read_router(temp.path());
    assert!(!router.contains("tools"));
    assert!(router.contains("solo: solo/SKILL.md"));

    let report = scan(temp.path()).unwrap();
    let duplicates: Vec<_> = report
        .violations
        .iter()
        .filter(|v| matches!(v.kind, ViolationKind::DuplicateName { .. }))
        .collect();
    assert_eq!(duplicates.len(), 2);
}

#[test]
fn test_dry_run_never_touches_the_filesystem() {
    let temp = TempDir::new().unwrap();
    write_skill(temp.path(), "foo", "name: foo\ndescription: Does foo.");

    // no prior router: dry run must not create one
    let code = build::execute(temp.path(), true, false).unwrap();
    assert_eq!(code, 0);
    assert!(!router_path(temp.path()).exists());

    // existing router: dry run must leave it byte-identical
    build::execute(temp.path(), false, false).unwrap();
    write_skill(temp.path(), "bar", "name: bar\ndescription: Does bar.");
    let before = read_router(temp.path());
    build::execute(temp.path(), true, false).unwrap();
    assert_eq!(read_router(temp.path()), before);
}

#[test]
fn test_backup_preserves_prior_content() {
    let temp = TempDir::new().unwrap();
    write_skill(temp.path(), "foo", "name: foo\ndescription: Does foo.");
    build::execute(temp.path(), false, false).unwrap();
    let old_content = read_router(temp.path());

    write_skill(temp.path(), "bar", "name: bar\ndescription: Does bar.");
    let code = build::execute(temp.path(), false, true).unwrap();
    assert_eq!(code, 0);

    let router_dir = temp.path().join("_router");
    let backup_file = fs::read_dir(&router_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .find(|p| p.extension().is_some_and(|ext| ext == "bak"))
        .expect("a .bak file exists");

    assert_ne!(backup_file, router_path(temp.path()));
    assert_eq!(fs::read_to_string(backup_file).unwrap(), old_content);
    assert!(read_router(temp.path()).contains("bar: bar/SKILL.md"));
}

#[test]
fn test_backup_without_prior_router_still_builds() {
    let temp = TempDir::new().unwrap();
    write_skill(temp.path(), "foo", "name: foo\ndescription: Does foo.");

    let code = build::execute(temp.path(), false, true).unwrap();

    assert_eq!(code, 0);
    assert!(read_router(temp.path()).contains("foo: foo/SKILL.md"));
}

#[test]
fn test_empty_root_builds_empty_table_with_success() {
    let temp = TempDir::new().unwrap();

    let code = build::execute(temp.path(), false, false).unwrap();

    assert_eq!(code, 0);
    assert_eq!(read_router(temp.path()), "# Skill Router\n\n");
}

#[test]
fn test_missing_root_is_an_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("absent");
    assert!(build::execute(&missing, false, false).is_err());
}

#[test]
fn test_router_dir_is_not_self_indexed() {
    let temp = TempDir::new().unwrap();
    write_skill(temp.path(), "foo", "name: foo\ndescription: Does foo.");
    build::execute(temp.path(), false, false).unwrap();

    // the generated _router/SKILL.md must not appear in a rebuild
    let code = build::execute(temp.path(), false, false).unwrap();
    assert_eq!(code, 0);
    let report = scan(temp.path()).unwrap();
    assert_eq!(report.scanned, 1);
}

#[test]
fn test_validate_mode_writes_nothing() {
    let temp = TempDir::new().unwrap();
    write_skill(temp.path(), "foo", "name: foo\ndescription: Does foo.");
    write_skill(temp.path(), "Bad", "name: bad\ndescription: Mismatch.");

    let code = validate::execute(temp.path()).unwrap();

    assert_eq!(code, 1);
    assert!(!router_path(temp.path()).exists());
}

#[test]
fn test_validate_mode_clean_tree_exits_zero() {
    let temp = TempDir::new().unwrap();
    write_skill(temp.path(), "foo", "name: foo\ndescription: Does foo.");

    assert_eq!(validate::execute(temp.path()).unwrap(), 0);
}

#[test]
fn test_optional_fields_pass_through() {
    let temp = TempDir::new().unwrap();
    write_skill(
        temp.path(),
        "foo",
        "name: foo\ndescription: Does foo.\nlicense: MIT\nallowed-tools: [Bash]\nmetadata:\n  owner: infra",
    );

    let report = scan(temp.path()).unwrap();
    assert!(report.is_clean());
    let entry = &report.entries[0];
    assert!(entry.extra.contains_key("license"));
    assert!(entry.extra.contains_key("allowed-tools"));
    assert!(entry.extra.contains_key("metadata"));
}

#[test]
fn test_helpers_detected() {
    let temp = TempDir::new().unwrap();
    write_skill(temp.path(), "foo", "name: foo\ndescription: Does foo.");
    fs::create_dir_all(temp.path().join("foo/scripts")).unwrap();
    fs::create_dir_all(temp.path().join("foo/references")).unwrap();

    let report = scan(temp.path()).unwrap();
    assert_eq!(report.entries[0].helpers, vec!["references", "scripts"]);
}
