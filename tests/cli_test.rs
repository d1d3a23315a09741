// tests/cli_test.rs
use serial_test::serial;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const SAMPLE_MAKEFILE: &str = "\
PKG_NAME:=golang
GO_VERSION_MAJOR_MINOR:=1.24
GO_VERSION_PATCH:=3
PKG_HASH:=0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef
";

// sha256 of the ASCII bytes "hello world"
const HELLO_WORLD_SHA256: &str =
    "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

/// Writes a Makefile and a config pointing at it, returning the config path.
fn setup_workspace(dir: &TempDir, archive_url: Option<&str>) -> std::path::PathBuf {
    let makefile = dir.path().join("Makefile");
    fs::write(&makefile, SAMPLE_MAKEFILE).unwrap();

    let mut config = format!("makefile = \"{}\"\n", makefile.display());
    if let Some(url) = archive_url {
        config.push_str(&format!("archive_url = \"{}\"\n", url));
    }
    let config_path = dir.path().join("gobump.toml");
    fs::write(&config_path, config).unwrap();
    config_path
}

fn init_repo_on_branch(dir: &Path, branch: &str) {
    let repo = git2::Repository::init(dir).unwrap();
    let sig = git2::Signature::now("tester", "tester@example.com").unwrap();
    let tree_id = {
        let mut index = repo.index().unwrap();
        index.write_tree().unwrap()
    };
    let tree = repo.find_tree(tree_id).unwrap();
    let commit_id = repo
        .commit(Some("HEAD"), &sig, &sig, "init", &tree, &[])
        .unwrap();
    let commit = repo.find_commit(commit_id).unwrap();
    repo.branch(branch, &commit, true).unwrap();
    repo.set_head(&format!("refs/heads/{}", branch)).unwrap();
}

fn go_bump() -> Command {
    Command::new(env!("CARGO_BIN_EXE_go-bump"))
}

#[test]
#[serial]
fn cli_help_describes_the_tool() {
    let output = Command::new("cargo")
        .args(["run", "--bin", "go-bump", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("go-bump"));
    assert!(stdout.contains("dry-run"));
}

#[test]
fn cli_version_flag_prints_version() {
    let output = go_bump().arg("--version").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("go-bump "));
}

#[test]
fn up_to_date_target_is_a_successful_no_op() {
    let dir = TempDir::new().unwrap();
    let config_path = setup_workspace(&dir, None);

    let output = go_bump()
        .args(["1.24.3", "--config"])
        .arg(&config_path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Already up to date"));

    // file untouched, no backup written
    let makefile = dir.path().join("Makefile");
    assert_eq!(fs::read_to_string(&makefile).unwrap(), SAMPLE_MAKEFILE);
    assert!(!dir.path().join("Makefile.bak").exists());
}

#[test]
fn unexpected_branch_name_aborts_before_any_network_call() {
    let dir = TempDir::new().unwrap();
    // unroutable endpoints: reaching them would fail differently than the
    // branch-shape abort we expect
    let config_path = setup_workspace(&dir, Some("http://127.0.0.1:1/go{version}.tar.gz"));
    init_repo_on_branch(dir.path(), "feature-branch");

    let output = go_bump()
        .arg("--config")
        .arg(&config_path)
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("does not match the expected format"));
}

#[test]
fn dry_run_reports_changes_without_mutating() {
    let mut server = mockito::Server::new();
    let _probe = server
        .mock("HEAD", "/go/go1.24.7.src.tar.gz")
        .with_status(200)
        .create();
    let _archive = server
        .mock("GET", "/go/go1.24.7.src.tar.gz")
        .with_status(200)
        .with_body("hello world")
        .create();

    let dir = TempDir::new().unwrap();
    let archive_url = format!("{}/go/go{{version}}.src.tar.gz", server.url());
    let config_path = setup_workspace(&dir, Some(&archive_url));

    let output = go_bump()
        .args(["1.24.7", "--dry-run", "--config"])
        .arg(&config_path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("[DRY RUN]"));
    assert!(stdout.contains("GO_VERSION_PATCH: 7"));
    assert!(stdout.contains(HELLO_WORLD_SHA256));

    let makefile = dir.path().join("Makefile");
    assert_eq!(fs::read_to_string(&makefile).unwrap(), SAMPLE_MAKEFILE);
    assert!(!dir.path().join("Makefile.bak").exists());
}

#[test]
fn apply_rewrites_the_makefile_and_keeps_a_backup() {
    let mut server = mockito::Server::new();
    let _probe = server
        .mock("HEAD", "/go/go1.24.7.src.tar.gz")
        .with_status(200)
        .create();
    let _archive = server
        .mock("GET", "/go/go1.24.7.src.tar.gz")
        .with_status(200)
        .with_body("hello world")
        .create();

    let dir = TempDir::new().unwrap();
    let archive_url = format!("{}/go/go{{version}}.src.tar.gz", server.url());
    let config_path = setup_workspace(&dir, Some(&archive_url));

    let output = go_bump()
        .args(["1.24.7", "--config"])
        .arg(&config_path)
        .output()
        .unwrap();

    assert!(output.status.success());

    let makefile = dir.path().join("Makefile");
    let content = fs::read_to_string(&makefile).unwrap();
    assert!(content.contains("GO_VERSION_MAJOR_MINOR:=1.24"));
    assert!(content.contains("GO_VERSION_PATCH:=7"));
    assert!(content.contains(&format!("PKG_HASH:={}", HELLO_WORLD_SHA256)));

    let backup = fs::read_to_string(dir.path().join("Makefile.bak")).unwrap();
    assert_eq!(backup, SAMPLE_MAKEFILE);
}

#[test]
fn missing_archive_aborts_with_failure() {
    let mut server = mockito::Server::new();
    let _probe = server
        .mock("HEAD", "/go/go1.24.9.src.tar.gz")
        .with_status(404)
        .create();

    let dir = TempDir::new().unwrap();
    let archive_url = format!("{}/go/go{{version}}.src.tar.gz", server.url());
    let config_path = setup_workspace(&dir, Some(&archive_url));

    let output = go_bump()
        .args(["1.24.9", "--config"])
        .arg(&config_path)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let makefile = dir.path().join("Makefile");
    assert_eq!(fs::read_to_string(&makefile).unwrap(), SAMPLE_MAKEFILE);
}
