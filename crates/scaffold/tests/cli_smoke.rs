use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn scaffold(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("scaffold").expect("binary exists");
    cmd.current_dir(root)
        .env("XDG_CONFIG_HOME", root.join(".no-global-config"))
        .env_remove("SCAFFOLD_PROJECT_NAME");
    cmd
}

fn messages(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| {
            let (_, message) = line.split_once("]: ").expect("timestamped log line");
            message.to_owned()
        })
        .collect()
}

#[test]
fn help_displays_usage() {
    Command::cargo_bin("scaffold")
        .expect("binary exists")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn creates_layout_and_logs_four_lines_in_order() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(
        temp.path().join("scaffold.toml"),
        r#"
[layout]
files = [".github/workflows/.gitkeep", "src/pkg/__init__.py"]
"#,
    )
    .unwrap();

    let output = scaffold(temp.path()).assert().success().get_output().clone();

    assert_eq!(
        messages(&output.stdout),
        vec![
            "Creating directory: .github/workflows for file: .gitkeep",
            "Creating empty file: .github/workflows/.gitkeep",
            "Creating directory: src/pkg for file: __init__.py",
            "Creating empty file: src/pkg/__init__.py",
        ]
    );
    assert!(temp.path().join(".github/workflows/.gitkeep").is_file());
    assert!(temp.path().join("src/pkg/__init__.py").is_file());
}

#[test]
fn second_run_preserves_content_and_state() {
    let temp = tempfile::tempdir().unwrap();
    let project = temp.path().join("project");
    fs::create_dir_all(&project).unwrap();
    let config = temp.path().join("layout.toml");
    fs::write(&config, "[layout]\nfiles = [\"a/b/c.txt\", \"top.txt\"]\n").unwrap();

    let run = || {
        scaffold(temp.path())
            .arg("--root")
            .arg(&project)
            .arg("--config")
            .arg(&config)
            .assert()
            .success()
            .get_output()
            .clone()
    };

    run();
    fs::write(project.join("a/b/c.txt"), "keep me").unwrap();
    let output = run();

    // Zero-byte files count as missing, so top.txt is rewritten (still empty).
    assert_eq!(
        messages(&output.stdout),
        vec![
            "Creating directory: a/b for file: c.txt",
            "File already exists: a/b/c.txt, skipping creation.",
            "Creating empty file: top.txt",
        ]
    );
    assert_eq!(
        fs::read_to_string(project.join("a/b/c.txt")).unwrap(),
        "keep me"
    );
    assert_eq!(fs::metadata(project.join("top.txt")).unwrap().len(), 0);
}

#[test]
fn dry_run_leaves_directory_empty() {
    let temp = tempfile::tempdir().unwrap();

    scaffold(temp.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Creating empty file: src/cnnClassifier/__init__.py",
        ));
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn invalid_entry_fails_before_touching_disk() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(
        temp.path().join("scaffold.toml"),
        "[layout]\nfiles = [\"ok/file.txt\", \"../escape.txt\"]\n",
    )
    .unwrap();

    scaffold(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("escapes the project root"));
    assert!(!temp.path().join("ok").exists());
}

#[test]
fn missing_explicit_config_fails() {
    let temp = tempfile::tempdir().unwrap();
    scaffold(temp.path())
        .arg("--config")
        .arg(temp.path().join("missing.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn quiet_suppresses_info_lines() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(
        temp.path().join("scaffold.toml"),
        "[layout]\nfiles = [\"src/pkg/__init__.py\"]\n",
    )
    .unwrap();

    scaffold(temp.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert!(temp.path().join("src/pkg/__init__.py").is_file());
}
