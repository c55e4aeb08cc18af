//! Incremental sync engine.
//!
//! Pure orchestration over a [`LogSource`] and a [`Store`] for one
//! invocation: figure out which commits are new since the last sync, persist
//! them without duplication, and refresh the project's technology snapshot.
//!
//! Commits are stored oldest-first, so the last stored commit is the newest
//! and its hash is the "since" marker for the next fetch. Fetched batches
//! arrive newest-first and are reversed before persisting, which keeps the
//! stored sequence chronological across any number of syncs.

use crate::error::{Result, VitaeError};
use crate::git::LogSource;
use crate::model::NewProject;
use crate::store::Store;
use crate::tech;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Nothing new upstream; the store was not touched.
    UpToDate,
    Synced {
        new_commits: u64,
        first_sync: bool,
    },
}

/// Sync one project's commit history for `author` into the store.
///
/// First run inserts the project with its full history; later runs append
/// only commits newer than the last stored one. An empty history on first
/// run is an error (`NoCommits`); an empty delta on a later run is
/// `UpToDate`, not an error.
pub fn sync_project(
    store: &dyn Store,
    source: &dyn LogSource,
    name: &str,
    path: &str,
    author: &str,
) -> Result<SyncOutcome> {
    match store.get_project_by_name(name)? {
        None => {
            let mut fetched = source.commits(author, None)?;
            if fetched.is_empty() {
                return Err(VitaeError::NoCommits);
            }
            let tech = tech::detect_for_author(source, author)?;
            fetched.reverse();
            let count = fetched.len() as u64;
            store.create_project(&NewProject {
                name: name.to_string(),
                path: path.to_string(),
                technologies: serde_json::to_string(&tech)?,
                commits: fetched,
            })?;
            Ok(SyncOutcome::Synced {
                new_commits: count,
                first_sync: true,
            })
        }
        Some(project) => {
            let marker = project.commits.last().map(|c| c.hash.clone());
            let mut fetched = source.commits(author, marker.as_deref())?;

            // The boundary query can echo the marker commit itself back as
            // the newest entry; drop that one duplicate.
            if let (Some(first), Some(marker)) = (fetched.first(), marker.as_deref()) {
                if first.hash == marker {
                    fetched.remove(0);
                }
            }
            if fetched.is_empty() {
                return Ok(SyncOutcome::UpToDate);
            }

            let tech = tech::detect_for_author(source, author)?;
            fetched.reverse();
            // append_commits skips hashes already stored, so any remaining
            // overlap in the fetched batch is harmless.
            let inserted = store.append_commits(project.id, &fetched)?;
            store.set_project_technologies(project.id, &serde_json::to_string(&tech)?)?;
            Ok(SyncOutcome::Synced {
                new_commits: inserted,
                first_sync: false,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewCommit;
    use crate::store::{RedbStore, SqliteStore};
    use tempfile::TempDir;

    /// Canned history, newest-first like real git log output. A `since`
    /// marker cuts the list to entries strictly newer than the marker.
    struct StubSource {
        log: Vec<NewCommit>,
        files: Vec<String>,
    }

    impl StubSource {
        fn new(hashes: &[&str], files: &[&str]) -> Self {
            Self {
                log: hashes
                    .iter()
                    .map(|h| NewCommit {
                        hash: h.to_string(),
                        message: format!("feat: change {h}"),
                    })
                    .collect(),
                files: files.iter().map(|f| f.to_string()).collect(),
            }
        }
    }

    impl LogSource for StubSource {
        fn commits(&self, _author: &str, since: Option<&str>) -> Result<Vec<NewCommit>> {
            match since {
                None => Ok(self.log.clone()),
                Some(marker) => match self.log.iter().position(|c| c.hash == marker) {
                    Some(pos) => Ok(self.log[..pos].to_vec()),
                    None => Ok(self.log.clone()),
                },
            }
        }

        fn touched_files(&self, _author: &str) -> Result<Vec<String>> {
            Ok(self.files.clone())
        }
    }

    /// Like `StubSource` but echoes the marker commit back as the newest
    /// entry of an incremental fetch.
    struct OverlappingSource(StubSource);

    impl LogSource for OverlappingSource {
        fn commits(&self, author: &str, since: Option<&str>) -> Result<Vec<NewCommit>> {
            let mut commits = self.0.commits(author, since)?;
            if let Some(marker) = since {
                if let Some(boundary) = self.0.log.iter().find(|c| c.hash == marker) {
                    commits.insert(0, boundary.clone());
                }
            }
            Ok(commits)
        }

        fn touched_files(&self, author: &str) -> Result<Vec<String>> {
            self.0.touched_files(author)
        }
    }

    fn backends() -> Vec<(TempDir, Box<dyn Store>)> {
        let sqlite_dir = TempDir::new().unwrap();
        let sqlite: Box<dyn Store> =
            Box::new(SqliteStore::open(&sqlite_dir.path().join("t.db")).unwrap());
        let redb_dir = TempDir::new().unwrap();
        let redb: Box<dyn Store> =
            Box::new(RedbStore::open(&redb_dir.path().join("t.redb")).unwrap());
        let pairs = vec![(sqlite_dir, sqlite), (redb_dir, redb)];
        for (_, store) in &pairs {
            store.migrate().unwrap();
        }
        pairs
    }

    fn stored_hashes(store: &dyn Store, name: &str) -> Vec<String> {
        store
            .get_project_by_name(name)
            .unwrap()
            .unwrap()
            .commits
            .into_iter()
            .map(|c| c.hash)
            .collect()
    }

    #[test]
    fn first_sync_ingests_full_history() {
        for (_dir, store) in backends() {
            let source = StubSource::new(&["a3", "a2", "a1"], &["main.go", "go.mod"]);
            let outcome =
                sync_project(store.as_ref(), &source, "api", "/work/api", "ada@example.com")
                    .unwrap();
            assert_eq!(
                outcome,
                SyncOutcome::Synced {
                    new_commits: 3,
                    first_sync: true
                }
            );
            assert_eq!(stored_hashes(store.as_ref(), "api"), ["a1", "a2", "a3"]);

            let project = store.get_project_by_name("api").unwrap().unwrap();
            assert!(project.technologies.contains("Go"));
        }
    }

    #[test]
    fn first_sync_with_empty_history_errors() {
        for (_dir, store) in backends() {
            let source = StubSource::new(&[], &[]);
            let err = sync_project(store.as_ref(), &source, "api", "/work/api", "a@b.c")
                .unwrap_err();
            assert!(matches!(err, VitaeError::NoCommits));
            assert!(store.get_project_by_name("api").unwrap().is_none());
        }
    }

    #[test]
    fn second_sync_appends_only_newer_commits() {
        for (_dir, store) in backends() {
            let source = StubSource::new(&["a3", "a2", "a1"], &["main.go"]);
            sync_project(store.as_ref(), &source, "api", "/work/api", "a@b.c").unwrap();

            let source = StubSource::new(&["a4", "a3", "a2", "a1"], &["main.go"]);
            let outcome =
                sync_project(store.as_ref(), &source, "api", "/work/api", "a@b.c").unwrap();
            assert_eq!(
                outcome,
                SyncOutcome::Synced {
                    new_commits: 1,
                    first_sync: false
                }
            );
            assert_eq!(stored_hashes(store.as_ref(), "api"), ["a1", "a2", "a3", "a4"]);
        }
    }

    #[test]
    fn resync_without_changes_is_up_to_date() {
        for (_dir, store) in backends() {
            let source = StubSource::new(&["a2", "a1"], &["main.go"]);
            sync_project(store.as_ref(), &source, "api", "/work/api", "a@b.c").unwrap();
            let before = stored_hashes(store.as_ref(), "api");

            let outcome =
                sync_project(store.as_ref(), &source, "api", "/work/api", "a@b.c").unwrap();
            assert_eq!(outcome, SyncOutcome::UpToDate);
            assert_eq!(stored_hashes(store.as_ref(), "api"), before);
        }
    }

    #[test]
    fn boundary_echo_is_dropped() {
        for (_dir, store) in backends() {
            let source =
                OverlappingSource(StubSource::new(&["a2", "a1"], &["main.go"]));
            sync_project(store.as_ref(), &source, "api", "/work/api", "a@b.c").unwrap();

            // nothing new upstream, but the fetch echoes a2 back
            let outcome =
                sync_project(store.as_ref(), &source, "api", "/work/api", "a@b.c").unwrap();
            assert_eq!(outcome, SyncOutcome::UpToDate);
            assert_eq!(stored_hashes(store.as_ref(), "api"), ["a1", "a2"]);
        }
    }

    #[test]
    fn overlapping_fetch_still_converges() {
        for (_dir, store) in backends() {
            let source =
                OverlappingSource(StubSource::new(&["a2", "a1"], &["main.go"]));
            sync_project(store.as_ref(), &source, "api", "/work/api", "a@b.c").unwrap();

            let source = OverlappingSource(StubSource::new(
                &["a4", "a3", "a2", "a1"],
                &["main.go"],
            ));
            let outcome =
                sync_project(store.as_ref(), &source, "api", "/work/api", "a@b.c").unwrap();
            assert_eq!(
                outcome,
                SyncOutcome::Synced {
                    new_commits: 2,
                    first_sync: false
                }
            );
            assert_eq!(stored_hashes(store.as_ref(), "api"), ["a1", "a2", "a3", "a4"]);
        }
    }

    #[test]
    fn split_syncs_converge_to_full_history() {
        for (_dir, store) in backends() {
            let full = ["a5", "a4", "a3", "a2", "a1"];
            sync_project(
                store.as_ref(),
                &StubSource::new(&full[3..], &["main.go"]),
                "api",
                "/work/api",
                "a@b.c",
            )
            .unwrap();
            sync_project(
                store.as_ref(),
                &StubSource::new(&full[1..], &["main.go"]),
                "api",
                "/work/api",
                "a@b.c",
            )
            .unwrap();
            sync_project(
                store.as_ref(),
                &StubSource::new(&full, &["main.go"]),
                "api",
                "/work/api",
                "a@b.c",
            )
            .unwrap();

            let hashes = stored_hashes(store.as_ref(), "api");
            assert_eq!(hashes, ["a1", "a2", "a3", "a4", "a5"]);
            let unique: std::collections::HashSet<&String> = hashes.iter().collect();
            assert_eq!(unique.len(), hashes.len());
        }
    }

    #[test]
    fn sync_refreshes_technology_snapshot() {
        for (_dir, store) in backends() {
            let source = StubSource::new(&["a1"], &["main.go"]);
            sync_project(store.as_ref(), &source, "api", "/work/api", "a@b.c").unwrap();

            let source = StubSource::new(&["a2", "a1"], &["main.go", "app.py"]);
            sync_project(store.as_ref(), &source, "api", "/work/api", "a@b.c").unwrap();

            let project = store.get_project_by_name("api").unwrap().unwrap();
            assert!(project.technologies.contains("Python"));
        }
    }
}
