//! Persistence behind one narrow interface with two interchangeable
//! backends: a relational store (rusqlite) and an embedded key-value store
//! (redb).
//!
//! # Conventions
//! - Reads return `Ok(None)` / empty collections when nothing matches;
//!   absence is only an error for updates, where the `*NotFound` variants
//!   are surfaced.
//! - List-valued fields are JSON strings on disk in both backends.
//! - Sub-entity upserts treat id 0 as "insert" and any other id as "update
//!   if it exists for this resume, insert otherwise".

mod redb;
mod sqlite;

pub use self::redb::RedbStore;
pub use self::sqlite::SqliteStore;

use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, VitaeError};
use crate::model::{
    Commit, CommitSummary, Education, NewCommit, NewProject, NewResume, NewUser, Project,
    ProjectWorkedOn, Resume, SummaryUpsert, User, Volunteer, WorkExperience,
};
use crate::paths;
use crate::prompts::PromptConfig;

// ---------------------------------------------------------------------------
// Store trait
// ---------------------------------------------------------------------------

pub trait Store: Send + Sync {
    /// Create schema / tables. Idempotent.
    fn migrate(&self) -> Result<()>;

    // -- projects ----------------------------------------------------------

    /// Insert a project plus its commit batch in one transaction.
    /// Returns the new project id.
    fn create_project(&self, project: &NewProject) -> Result<i64>;

    fn get_project_by_name(&self, name: &str) -> Result<Option<Project>>;

    /// All projects with their commits, oldest project first.
    /// `limit` of 0 means no limit.
    fn get_all_projects(&self, limit: u32, offset: u32) -> Result<Vec<Project>>;

    /// Append commits to an existing project, skipping any whose hash is
    /// already stored for it. Returns the number actually inserted.
    fn append_commits(&self, project_id: i64, commits: &[NewCommit]) -> Result<u64>;

    fn set_project_technologies(&self, project_id: i64, technologies: &str) -> Result<()>;

    /// Cascading delete of the project, its commits, and their summaries.
    fn delete_project(&self, project_id: i64) -> Result<()>;

    // -- commit summaries ---------------------------------------------------

    /// Idempotent per (project, commit) pair. When the batch's lead element
    /// has no commit id, prior unassociated summaries for that project are
    /// cleared first (regenerate-draft semantics).
    fn upsert_commit_summaries(&self, batch: &[SummaryUpsert]) -> Result<()>;

    fn get_commit_summaries(&self, project_id: i64) -> Result<Vec<CommitSummary>>;

    // -- users ---------------------------------------------------------------

    fn create_user(&self, user: &NewUser) -> Result<i64>;
    fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    fn get_user(&self, id: i64) -> Result<Option<User>>;
    /// Full-row update by id. `UserNotFound` when no row matches.
    fn update_user(&self, user: &User) -> Result<()>;

    // -- resumes --------------------------------------------------------------

    fn create_resume(&self, resume: &NewResume) -> Result<i64>;
    /// The resume with its profile and sub-entities joined in.
    fn get_resume(&self, id: i64) -> Result<Option<Resume>>;
    /// Resume headers only (no profile or sub-entities).
    fn get_resumes(&self) -> Result<Vec<Resume>>;
    /// Partial update. `ResumeNotFound` when no row matches.
    fn update_resume(&self, id: i64, title: Option<&str>, skills: Option<&[String]>)
        -> Result<()>;
    fn delete_resume(&self, id: i64) -> Result<()>;

    // -- resume sub-entities ---------------------------------------------------

    fn upsert_work_experiences(
        &self,
        resume_id: i64,
        items: &[WorkExperience],
    ) -> Result<Vec<i64>>;
    fn upsert_educations(&self, resume_id: i64, items: &[Education]) -> Result<Vec<i64>>;
    fn upsert_volunteers(&self, resume_id: i64, items: &[Volunteer]) -> Result<Vec<i64>>;
    fn upsert_projects_worked_on(
        &self,
        resume_id: i64,
        items: &[ProjectWorkedOn],
    ) -> Result<Vec<i64>>;

    fn delete_work_experience(&self, id: i64) -> Result<()>;
    fn delete_education(&self, id: i64) -> Result<()>;
    fn delete_volunteer(&self, id: i64) -> Result<()>;
    fn delete_project_worked_on(&self, id: i64) -> Result<()>;

    // -- prompts -----------------------------------------------------------------

    fn upsert_prompt(&self, prompt: &PromptConfig) -> Result<()>;
    fn get_prompts(&self) -> Result<Vec<PromptConfig>>;
    fn get_prompt(&self, title: &str) -> Result<Option<PromptConfig>>;
}

// ---------------------------------------------------------------------------
// Backend selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    Redb,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Sqlite => "sqlite",
            Backend::Redb => "redb",
        }
    }
}

impl FromStr for Backend {
    type Err = VitaeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sqlite" => Ok(Backend::Sqlite),
            "redb" => Ok(Backend::Redb),
            other => Err(VitaeError::InvalidInput(format!(
                "unknown store backend '{other}' (expected sqlite or redb)"
            ))),
        }
    }
}

/// Open the selected backend under `data_dir`, creating the directory if
/// needed. Does not migrate; `gitvitae init` does that once.
pub fn open(backend: Backend, data_dir: &Path) -> Result<Box<dyn Store>> {
    crate::io::ensure_dir(data_dir)?;
    match backend {
        Backend::Sqlite => Ok(Box::new(SqliteStore::open(&paths::sqlite_path(data_dir))?)),
        Backend::Redb => Ok(Box::new(RedbStore::open(&paths::redb_path(data_dir))?)),
    }
}

/// Store-assigned timestamp, second resolution, lexicographically ordered.
pub(crate) fn now() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

// ---------------------------------------------------------------------------
// Backend-conformance tests
// ---------------------------------------------------------------------------
