//! End-to-end CLI tests driving the compiled `gitvitae` binary.

use std::path::Path;
use std::process::{Command, Stdio};

use assert_cmd::Command as CliCommand;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command with its data directory and git identity pinned to temp
/// state, so nothing on the host machine leaks into the test.
fn gitvitae(data_dir: &Path, git_config: &Path) -> CliCommand {
    let mut cmd = CliCommand::cargo_bin("gitvitae").unwrap();
    cmd.env("GITVITAE_DATA_DIR", data_dir);
    cmd.env("GIT_CONFIG_GLOBAL", git_config);
    cmd.env("GIT_CONFIG_NOSYSTEM", "1");
    cmd
}

fn write_git_identity(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("gitconfig");
    std::fs::write(
        &path,
        "[user]\n\tname = Test User\n\temail = test@example.com\n",
    )
    .unwrap();
    path
}

fn git(repo: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(repo)
        .env("GIT_CONFIG_GLOBAL", "/dev/null")
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .unwrap();
    assert!(status.success(), "git {args:?} failed");
}

fn commit_file(repo: &Path, file: &str, message: &str) {
    std::fs::write(repo.join(file), "content\n").unwrap();
    git(repo, &["add", "."]);
    git(
        repo,
        &[
            "-c",
            "user.name=Test User",
            "-c",
            "user.email=test@example.com",
            "commit",
            "-m",
            message,
        ],
    );
}

#[test]
fn help_lists_subcommands() {
    CliCommand::cargo_bin("gitvitae")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("seed"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("ai"));
}

#[test]
fn seed_without_init_fails() {
    let dir = TempDir::new().unwrap();
    let gitconfig = write_git_identity(&dir);
    gitvitae(dir.path(), &gitconfig)
        .arg("seed")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn serve_without_init_fails() {
    let dir = TempDir::new().unwrap();
    let gitconfig = write_git_identity(&dir);
    gitvitae(dir.path(), &gitconfig)
        .arg("serve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn unknown_store_backend_fails() {
    let dir = TempDir::new().unwrap();
    let gitconfig = write_git_identity(&dir);
    gitvitae(dir.path(), &gitconfig)
        .args(["--store", "postgres", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown store backend"));
}

#[test]
fn init_reports_git_identity() {
    if which::which("git").is_err() {
        return;
    }
    let dir = TempDir::new().unwrap();
    let gitconfig = write_git_identity(&dir);
    gitvitae(dir.path(), &gitconfig)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Initialized gitvitae for Test User <test@example.com>",
        ));

    // Re-running is idempotent.
    gitvitae(dir.path(), &gitconfig)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Already initialized"));
}

#[test]
fn init_without_identity_fails() {
    if which::which("git").is_err() {
        return;
    }
    let dir = TempDir::new().unwrap();
    let empty = dir.path().join("gitconfig");
    std::fs::write(&empty, "").unwrap();
    gitvitae(dir.path(), &empty)
        .arg("init")
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("git user"));
}

#[test]
fn init_seed_reseed_flow() {
    if which::which("git").is_err() {
        return;
    }
    let data = TempDir::new().unwrap();
    let gitconfig = write_git_identity(&data);
    let repo = TempDir::new().unwrap();
    git(repo.path(), &["init"]);
    commit_file(repo.path(), "main.rs", "feat: add parser");
    commit_file(repo.path(), "lib.rs", "fix: handle empty input");

    gitvitae(data.path(), &gitconfig)
        .arg("init")
        .assert()
        .success();

    gitvitae(data.path(), &gitconfig)
        .arg("seed")
        .current_dir(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Fetched 2 commits"));

    // Nothing new: the store is already caught up.
    gitvitae(data.path(), &gitconfig)
        .arg("seed")
        .current_dir(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No new commits to update"));

    commit_file(repo.path(), "sync.rs", "feat: incremental sync");
    gitvitae(data.path(), &gitconfig)
        .arg("seed")
        .current_dir(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Fetched 1 new commit"));
}

#[test]
fn seed_outside_repository_fails() {
    if which::which("git").is_err() {
        return;
    }
    let data = TempDir::new().unwrap();
    let gitconfig = write_git_identity(&data);
    gitvitae(data.path(), &gitconfig)
        .arg("init")
        .assert()
        .success();

    let not_a_repo = TempDir::new().unwrap();
    gitvitae(data.path(), &gitconfig)
        .arg("seed")
        .current_dir(not_a_repo.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a git repository"));
}

#[test]
fn redb_backend_init_and_seed() {
    if which::which("git").is_err() {
        return;
    }
    let data = TempDir::new().unwrap();
    let gitconfig = write_git_identity(&data);
    let repo = TempDir::new().unwrap();
    git(repo.path(), &["init"]);
    commit_file(repo.path(), "main.rs", "feat: redb backend");

    gitvitae(data.path(), &gitconfig)
        .args(["--store", "redb", "init"])
        .assert()
        .success();
    gitvitae(data.path(), &gitconfig)
        .args(["--store", "redb", "seed"])
        .current_dir(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Fetched 1 commit"));
}
