//! Git subprocess invocation and log parsing.
//!
//! Commit history is read with `git log --pretty=format:%h=%s`, filtered to
//! one author, optionally bounded below by a revision marker
//! (`<since>..HEAD`). Every invocation runs with a kill-on-timeout guard
//! since a hung subprocess is the only way this module can stall.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::error::{Result, VitaeError};
use crate::model::NewCommit;

const GIT_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// LogSource
// ---------------------------------------------------------------------------

/// History access as the sync engine sees it. `GitRepo` is the real
/// implementation; tests drive the engine with a canned source.
pub trait LogSource {
    /// Commits authored by `author`, most-recent-first, merge commits
    /// excluded. With `since`, only commits strictly newer than that
    /// revision (modulo the boundary-overlap artifact the sync engine
    /// compensates for).
    fn commits(&self, author: &str, since: Option<&str>) -> Result<Vec<NewCommit>>;

    /// Every file path touched by commits authored by `author`.
    fn touched_files(&self, author: &str) -> Result<Vec<String>>;
}

// ---------------------------------------------------------------------------
// GitRepo
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct GitRepo {
    dir: PathBuf,
}

impl GitRepo {
    /// Open `dir` as a git repository. Fails when `dir` has no `.git`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.join(".git").is_dir() {
            return Err(VitaeError::NotARepository(dir.display().to_string()));
        }
        Ok(Self { dir })
    }

    /// Repo-local `user.name` / `user.email`, if configured.
    pub fn user_identity(&self) -> Result<(Option<String>, Option<String>)> {
        let name = self.config_value("user.name")?;
        let email = self.config_value("user.email")?;
        Ok((name, email))
    }

    fn config_value(&self, key: &str) -> Result<Option<String>> {
        match run_git(&self.dir, &["config", key]) {
            Ok(out) => {
                let v = out.trim();
                Ok(if v.is_empty() { None } else { Some(v.to_string()) })
            }
            // `git config <key>` exits 1 when the key is unset
            Err(VitaeError::Git(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl LogSource for GitRepo {
    fn commits(&self, author: &str, since: Option<&str>) -> Result<Vec<NewCommit>> {
        let mut args = vec![
            "log".to_string(),
            "--pretty=format:%h=%s".to_string(),
            "--author".to_string(),
            author.to_string(),
        ];
        if let Some(marker) = since {
            args.push(format!("{marker}..HEAD"));
        }
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        let raw = run_git(&self.dir, &arg_refs)?;
        Ok(parse_log(&raw))
    }

    fn touched_files(&self, author: &str) -> Result<Vec<String>> {
        let raw = run_git(
            &self.dir,
            &["log", "--name-only", "--pretty=format:", "--author", author],
        )?;
        Ok(raw
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse `%h=%s` log output into commit records.
///
/// Lines without a `=` separator are dropped, as are messages containing
/// the literal `Merge`. A stray `--author` token echoed into the message is
/// stripped.
pub fn parse_log(raw: &str) -> Vec<NewCommit> {
    raw.lines()
        .filter_map(|line| {
            let (hash, message) = line.split_once('=')?;
            if message.contains("Merge") {
                return None;
            }
            let hash = hash.trim();
            let message = message.replacen("--author", "", 1);
            let message = message.trim();
            if hash.is_empty() || message.is_empty() {
                return None;
            }
            Some(NewCommit {
                hash: hash.to_string(),
                message: message.to_string(),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Subprocess runner
// ---------------------------------------------------------------------------

/// Read the user identity from the global git config, as `(name, email)`.
/// A missing or unreadable global config yields `(None, None)`.
pub fn global_identity() -> (Option<String>, Option<String>) {
    let out = match run_git(Path::new("."), &["config", "--global", "--list"]) {
        Ok(out) => out,
        Err(_) => return (None, None),
    };
    let mut name = None;
    let mut email = None;
    for line in out.lines() {
        if let Some((key, value)) = line.split_once('=') {
            match key.trim() {
                "user.name" => name = Some(value.trim().to_string()),
                "user.email" => email = Some(value.trim().to_string()),
                _ => {}
            }
        }
    }
    (name, email)
}

/// Run git in `dir`, capturing stdout+stderr. Non-zero exit yields
/// `VitaeError::Git` with the combined output; exceeding the timeout kills
/// the child.
fn run_git(dir: &Path, args: &[&str]) -> Result<String> {
    let mut child = Command::new("git")
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| VitaeError::Git(format!("failed to spawn git: {e}")))?;

    // Drain pipes on threads so a chatty subprocess can't deadlock the
    // try_wait poll below.
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let out_reader = std::thread::spawn(move || drain(stdout));
    let err_reader = std::thread::spawn(move || drain(stderr));

    let deadline = Instant::now() + GIT_TIMEOUT;
    let status = loop {
        match child.try_wait()? {
            Some(status) => break status,
            None if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(VitaeError::GitTimeout(GIT_TIMEOUT.as_secs()));
            }
            None => std::thread::sleep(Duration::from_millis(20)),
        }
    };

    let stdout = out_reader.join().unwrap_or_default();
    let stderr = err_reader.join().unwrap_or_default();

    if !status.success() {
        let mut combined = stdout;
        combined.push_str(&stderr);
        return Err(VitaeError::Git(combined.trim().to_string()));
    }
    Ok(stdout)
}

fn drain<R: Read>(reader: Option<R>) -> String {
    let mut buf = String::new();
    if let Some(mut r) = reader {
        let _ = r.read_to_string(&mut buf);
    }
    buf
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_first_equals() {
        let commits = parse_log("a1b2c3d=feat: add x=y parsing");
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].hash, "a1b2c3d");
        assert_eq!(commits[0].message, "feat: add x=y parsing");
    }

    #[test]
    fn parse_drops_lines_without_separator() {
        let commits = parse_log("no separator here\nabc=real commit");
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].hash, "abc");
    }

    #[test]
    fn parse_excludes_merge_commits() {
        let raw = "a4=feat: new endpoint\nm1=Merge branch 'main' into dev\na3=fix: typo";
        let commits = parse_log(raw);
        assert_eq!(commits.len(), 2);
        assert!(commits.iter().all(|c| !c.message.contains("Merge")));
    }

    #[test]
    fn parse_strips_author_artifact() {
        let commits = parse_log("abc=--author fix: cleanup");
        assert_eq!(commits[0].message, "fix: cleanup");
    }

    #[test]
    fn parse_empty_output_is_empty_vec() {
        assert!(parse_log("").is_empty());
    }

    #[test]
    fn parse_preserves_newest_first_order() {
        let commits = parse_log("a4=fourth\na3=third\na2=second");
        let hashes: Vec<&str> = commits.iter().map(|c| c.hash.as_str()).collect();
        assert_eq!(hashes, ["a4", "a3", "a2"]);
    }

    #[test]
    fn open_rejects_non_repository() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = GitRepo::open(dir.path()).unwrap_err();
        assert!(matches!(err, VitaeError::NotARepository(_)));
    }

    #[test]
    fn real_repo_roundtrip() {
        if which::which("git").is_err() {
            return;
        }
        let dir = tempfile::TempDir::new().unwrap();
        let run = |args: &[&str]| {
            let status = Command::new("git")
                .args(args)
                .current_dir(dir.path())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .unwrap();
            assert!(status.success(), "git {args:?} failed");
        };
        run(&["init"]);
        run(&["config", "user.name", "Test User"]);
        run(&["config", "user.email", "test@example.com"]);
        std::fs::write(dir.path().join("main.go"), "package main\n").unwrap();
        run(&["add", "."]);
        run(&["commit", "-m", "feat: initial commit"]);

        let repo = GitRepo::open(dir.path()).unwrap();
        let commits = repo.commits("test@example.com", None).unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].message, "feat: initial commit");

        let files = repo.touched_files("test@example.com").unwrap();
        assert!(files.contains(&"main.go".to_string()));

        let (name, email) = repo.user_identity().unwrap();
        assert_eq!(name.as_deref(), Some("Test User"));
        assert_eq!(email.as_deref(), Some("test@example.com"));
    }
}
