//! Persisted record types shared by the stores, the sync engine, and the
//! dashboard API.
//!
//! List-valued fields (skills, links, work-experience projects) are stored as
//! JSON strings in both backends; the structs here carry them decoded.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Projects and commits
// ---------------------------------------------------------------------------

/// A commit as parsed from the git log, before it has a store identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCommit {
    pub hash: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    pub id: i64,
    pub project_id: i64,
    pub hash: String,
    pub message: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A project plus its commit batch, inserted in one transaction on first sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub path: String,
    /// Serialized `TechStack` snapshot.
    pub technologies: String,
    /// Oldest-first, matching stored order.
    pub commits: Vec<NewCommit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub path: String,
    pub technologies: String,
    /// Oldest-first; the last element is the most recently synced commit.
    pub commits: Vec<Commit>,
    pub created_at: String,
}

// ---------------------------------------------------------------------------
// Commit summaries
// ---------------------------------------------------------------------------

/// An AI-generated summary tied to a project and optionally to one commit.
/// `commit_id` of `None` means the summary is a draft not yet associated
/// with a synced commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitSummary {
    pub id: i64,
    pub project_id: i64,
    pub commit_id: Option<i64>,
    pub summary: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryUpsert {
    pub project_id: i64,
    #[serde(default)]
    pub commit_id: Option<i64>,
    pub summary: String,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub professional_summary: String,
    #[serde(default)]
    pub links: Vec<Link>,
}

// ---------------------------------------------------------------------------
// Resumes and sub-entities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewResume {
    pub user_id: i64,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resume {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<User>,
    #[serde(default)]
    pub educations: Vec<Education>,
    #[serde(default)]
    pub work_experiences: Vec<WorkExperience>,
    #[serde(default)]
    pub volunteers: Vec<Volunteer>,
    #[serde(default)]
    pub projects_worked_on: Vec<ProjectWorkedOn>,
    #[serde(default)]
    pub created_at: String,
}

/// Sub-entity ids of 0 mean "not yet stored"; upserts insert those and
/// update the rest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub resume_id: i64,
    pub school: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field_of_study: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkExperience {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub resume_id: i64,
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    /// Bullet text shown on the resume, usually AI-generated.
    #[serde(default)]
    pub responsibilities: String,
    #[serde(default)]
    pub projects: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Volunteer {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub resume_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectWorkedOn {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub resume_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: String,
    #[serde(default)]
    pub link: String,
}
