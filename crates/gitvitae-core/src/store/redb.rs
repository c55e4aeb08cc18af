//! redb backend. One table per collection, JSON-encoded values keyed by a
//! store-assigned id; a sequences table hands out the next id per
//! collection. Lookups other than by id are table scans, which is fine at
//! the scale of one developer's project history.

use std::path::Path;

use redb::{Database, ReadableTable, Table, TableDefinition};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VitaeError};
use crate::model::{
    Commit, CommitSummary, Education, NewCommit, NewProject, NewResume, NewUser, Project,
    ProjectWorkedOn, Resume, SummaryUpsert, User, Volunteer, WorkExperience,
};
use crate::prompts::PromptConfig;

use super::{now, Store};

const PROJECTS: TableDefinition<u64, &[u8]> = TableDefinition::new("projects");
const COMMITS: TableDefinition<u64, &[u8]> = TableDefinition::new("commits");
const SUMMARIES: TableDefinition<u64, &[u8]> = TableDefinition::new("commit_summaries");
const USERS: TableDefinition<u64, &[u8]> = TableDefinition::new("users");
const RESUMES: TableDefinition<u64, &[u8]> = TableDefinition::new("resumes");
const EDUCATIONS: TableDefinition<u64, &[u8]> = TableDefinition::new("educations");
const WORK_EXPERIENCES: TableDefinition<u64, &[u8]> = TableDefinition::new("work_experiences");
const VOLUNTEERS: TableDefinition<u64, &[u8]> = TableDefinition::new("volunteers");
const RESUME_PROJECTS: TableDefinition<u64, &[u8]> = TableDefinition::new("resume_projects");
const PROMPTS: TableDefinition<&str, &[u8]> = TableDefinition::new("prompts");
const SEQUENCES: TableDefinition<&str, u64> = TableDefinition::new("sequences");

fn err<E: std::fmt::Display>(e: E) -> VitaeError {
    VitaeError::Store(e.to_string())
}

fn next_id(seq: &mut Table<'_, &str, u64>, name: &str) -> Result<i64> {
    let current = seq.get(name).map_err(err)?.map(|v| v.value()).unwrap_or(0);
    let next = current + 1;
    seq.insert(name, next).map_err(err)?;
    Ok(next as i64)
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Project header without its commits; commits live in their own table.
#[derive(Serialize, Deserialize)]
struct ProjectRecord {
    id: i64,
    name: String,
    path: String,
    technologies: String,
    created_at: String,
}

impl ProjectRecord {
    fn into_project(self, commits: Vec<Commit>) -> Project {
        Project {
            id: self.id,
            name: self.name,
            path: self.path,
            technologies: self.technologies,
            commits,
            created_at: self.created_at,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ResumeRecord {
    id: i64,
    user_id: i64,
    title: String,
    skills: Vec<String>,
    created_at: String,
}

/// Shared shape of the four resume sub-entity collections.
trait ResumeItem: Serialize + DeserializeOwned + Clone {
    const TABLE: TableDefinition<'static, u64, &'static [u8]>;
    const SEQUENCE: &'static str;

    fn id(&self) -> i64;
    fn resume_id(&self) -> i64;
    fn set_ids(&mut self, id: i64, resume_id: i64);
}

macro_rules! resume_item {
    ($ty:ty, $table:ident, $seq:literal) => {
        impl ResumeItem for $ty {
            const TABLE: TableDefinition<'static, u64, &'static [u8]> = $table;
            const SEQUENCE: &'static str = $seq;

            fn id(&self) -> i64 {
                self.id
            }

            fn resume_id(&self) -> i64 {
                self.resume_id
            }

            fn set_ids(&mut self, id: i64, resume_id: i64) {
                self.id = id;
                self.resume_id = resume_id;
            }
        }
    };
}

resume_item!(Education, EDUCATIONS, "educations");
resume_item!(WorkExperience, WORK_EXPERIENCES, "work_experiences");
resume_item!(Volunteer, VOLUNTEERS, "volunteers");
resume_item!(ProjectWorkedOn, RESUME_PROJECTS, "resume_projects");

pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Open (or create) the database file and ensure all tables exist.
    pub fn open(path: &Path) -> Result<Self> {
        let db = Database::create(path).map_err(err)?;
        let store = Self { db };
        store.migrate()?;
        Ok(store)
    }

    fn commits_for_project(
        &self,
        table: &impl ReadableTable<u64, &'static [u8]>,
        project_id: i64,
    ) -> Result<Vec<Commit>> {
        let mut commits = Vec::new();
        for entry in table.iter().map_err(err)? {
            let (_, value) = entry.map_err(err)?;
            let commit: Commit = decode(value.value())?;
            if commit.project_id == project_id {
                commits.push(commit);
            }
        }
        Ok(commits)
    }

    fn upsert_items<T: ResumeItem>(&self, resume_id: i64, items: &[T]) -> Result<Vec<i64>> {
        let txn = self.db.begin_write().map_err(err)?;
        let mut ids = Vec::with_capacity(items.len());
        {
            let mut table = txn.open_table(T::TABLE).map_err(err)?;
            let mut seq = txn.open_table(SEQUENCES).map_err(err)?;
            for item in items {
                let existing = if item.id() > 0 {
                    table
                        .get(item.id() as u64)
                        .map_err(err)?
                        .map(|v| decode::<T>(v.value()))
                        .transpose()?
                        .filter(|stored| stored.resume_id() == resume_id)
                } else {
                    None
                };
                let id = match existing {
                    Some(_) => item.id(),
                    None => next_id(&mut seq, T::SEQUENCE)?,
                };
                let mut record = item.clone();
                record.set_ids(id, resume_id);
                table.insert(id as u64, encode(&record)?.as_slice()).map_err(err)?;
                ids.push(id);
            }
        }
        txn.commit().map_err(err)?;
        Ok(ids)
    }

    fn delete_item<T: ResumeItem>(&self, id: i64) -> Result<()> {
        let txn = self.db.begin_write().map_err(err)?;
        {
            let mut table = txn.open_table(T::TABLE).map_err(err)?;
            table.remove(id as u64).map_err(err)?;
        }
        txn.commit().map_err(err)?;
        Ok(())
    }

    fn items_for_resume<T: ResumeItem>(&self, resume_id: i64) -> Result<Vec<T>> {
        let txn = self.db.begin_read().map_err(err)?;
        let table = txn.open_table(T::TABLE).map_err(err)?;
        let mut items = Vec::new();
        for entry in table.iter().map_err(err)? {
            let (_, value) = entry.map_err(err)?;
            let item: T = decode(value.value())?;
            if item.resume_id() == resume_id {
                items.push(item);
            }
        }
        Ok(items)
    }

    fn cascade_delete<T: ResumeItem>(
        txn: &redb::WriteTransaction,
        resume_id: i64,
    ) -> Result<()> {
        let mut table = txn.open_table(T::TABLE).map_err(err)?;
        let mut doomed = Vec::new();
        for entry in table.iter().map_err(err)? {
            let (key, value) = entry.map_err(err)?;
            let item: T = decode(value.value())?;
            if item.resume_id() == resume_id {
                doomed.push(key.value());
            }
        }
        for key in doomed {
            table.remove(key).map_err(err)?;
        }
        Ok(())
    }

    fn user_by_key(
        table: &impl ReadableTable<u64, &'static [u8]>,
        id: i64,
    ) -> Result<Option<User>> {
        table
            .get(id as u64)
            .map_err(err)?
            .map(|v| decode(v.value()))
            .transpose()
    }
}

impl Store for RedbStore {
    fn migrate(&self) -> Result<()> {
        let txn = self.db.begin_write().map_err(err)?;
        txn.open_table(PROJECTS).map_err(err)?;
        txn.open_table(COMMITS).map_err(err)?;
        txn.open_table(SUMMARIES).map_err(err)?;
        txn.open_table(USERS).map_err(err)?;
        txn.open_table(RESUMES).map_err(err)?;
        txn.open_table(EDUCATIONS).map_err(err)?;
        txn.open_table(WORK_EXPERIENCES).map_err(err)?;
        txn.open_table(VOLUNTEERS).map_err(err)?;
        txn.open_table(RESUME_PROJECTS).map_err(err)?;
        txn.open_table(PROMPTS).map_err(err)?;
        txn.open_table(SEQUENCES).map_err(err)?;
        txn.commit().map_err(err)?;
        Ok(())
    }

    // -- projects ----------------------------------------------------------

    fn create_project(&self, project: &NewProject) -> Result<i64> {
        let txn = self.db.begin_write().map_err(err)?;
        let project_id;
        {
            let mut projects = txn.open_table(PROJECTS).map_err(err)?;
            let mut commits = txn.open_table(COMMITS).map_err(err)?;
            let mut seq = txn.open_table(SEQUENCES).map_err(err)?;

            project_id = next_id(&mut seq, "projects")?;
            let ts = now();
            let record = ProjectRecord {
                id: project_id,
                name: project.name.clone(),
                path: project.path.clone(),
                technologies: project.technologies.clone(),
                created_at: ts.clone(),
            };
            projects
                .insert(project_id as u64, encode(&record)?.as_slice())
                .map_err(err)?;

            for commit in &project.commits {
                let commit_id = next_id(&mut seq, "commits")?;
                let record = Commit {
                    id: commit_id,
                    project_id,
                    hash: commit.hash.clone(),
                    message: commit.message.clone(),
                    created_at: ts.clone(),
                    updated_at: ts.clone(),
                };
                commits
                    .insert(commit_id as u64, encode(&record)?.as_slice())
                    .map_err(err)?;
            }
        }
        txn.commit().map_err(err)?;
        Ok(project_id)
    }

    fn get_project_by_name(&self, name: &str) -> Result<Option<Project>> {
        let txn = self.db.begin_read().map_err(err)?;
        let projects = txn.open_table(PROJECTS).map_err(err)?;
        for entry in projects.iter().map_err(err)? {
            let (_, value) = entry.map_err(err)?;
            let record: ProjectRecord = decode(value.value())?;
            if record.name == name {
                let commits_table = txn.open_table(COMMITS).map_err(err)?;
                let commits = self.commits_for_project(&commits_table, record.id)?;
                return Ok(Some(record.into_project(commits)));
            }
        }
        Ok(None)
    }

    fn get_all_projects(&self, limit: u32, offset: u32) -> Result<Vec<Project>> {
        let txn = self.db.begin_read().map_err(err)?;
        let projects = txn.open_table(PROJECTS).map_err(err)?;
        let commits_table = txn.open_table(COMMITS).map_err(err)?;
        let mut out = Vec::new();
        let mut skipped = 0u32;
        for entry in projects.iter().map_err(err)? {
            let (_, value) = entry.map_err(err)?;
            if skipped < offset {
                skipped += 1;
                continue;
            }
            if limit > 0 && out.len() as u32 >= limit {
                break;
            }
            let record: ProjectRecord = decode(value.value())?;
            let commits = self.commits_for_project(&commits_table, record.id)?;
            out.push(record.into_project(commits));
        }
        Ok(out)
    }

    fn append_commits(&self, project_id: i64, new_commits: &[NewCommit]) -> Result<u64> {
        let txn = self.db.begin_write().map_err(err)?;
        let mut inserted = 0u64;
        {
            let mut commits = txn.open_table(COMMITS).map_err(err)?;
            let mut seq = txn.open_table(SEQUENCES).map_err(err)?;

            let mut known = std::collections::HashSet::new();
            for entry in commits.iter().map_err(err)? {
                let (_, value) = entry.map_err(err)?;
                let commit: Commit = decode(value.value())?;
                if commit.project_id == project_id {
                    known.insert(commit.hash);
                }
            }

            let ts = now();
            for commit in new_commits {
                if known.contains(&commit.hash) {
                    continue;
                }
                let commit_id = next_id(&mut seq, "commits")?;
                let record = Commit {
                    id: commit_id,
                    project_id,
                    hash: commit.hash.clone(),
                    message: commit.message.clone(),
                    created_at: ts.clone(),
                    updated_at: ts.clone(),
                };
                commits
                    .insert(commit_id as u64, encode(&record)?.as_slice())
                    .map_err(err)?;
                known.insert(commit.hash.clone());
                inserted += 1;
            }
        }
        txn.commit().map_err(err)?;
        Ok(inserted)
    }

    fn set_project_technologies(&self, project_id: i64, technologies: &str) -> Result<()> {
        let txn = self.db.begin_write().map_err(err)?;
        {
            let mut projects = txn.open_table(PROJECTS).map_err(err)?;
            let record = projects
                .get(project_id as u64)
                .map_err(err)?
                .map(|v| decode::<ProjectRecord>(v.value()))
                .transpose()?;
            if let Some(mut record) = record {
                record.technologies = technologies.to_string();
                projects
                    .insert(project_id as u64, encode(&record)?.as_slice())
                    .map_err(err)?;
            }
        }
        txn.commit().map_err(err)?;
        Ok(())
    }

    fn delete_project(&self, project_id: i64) -> Result<()> {
        let txn = self.db.begin_write().map_err(err)?;
        {
            let mut projects = txn.open_table(PROJECTS).map_err(err)?;
            projects.remove(project_id as u64).map_err(err)?;

            let mut commits = txn.open_table(COMMITS).map_err(err)?;
            let mut doomed = Vec::new();
            for entry in commits.iter().map_err(err)? {
                let (key, value) = entry.map_err(err)?;
                let commit: Commit = decode(value.value())?;
                if commit.project_id == project_id {
                    doomed.push(key.value());
                }
            }
            for key in doomed {
                commits.remove(key).map_err(err)?;
            }

            let mut summaries = txn.open_table(SUMMARIES).map_err(err)?;
            let mut doomed = Vec::new();
            for entry in summaries.iter().map_err(err)? {
                let (key, value) = entry.map_err(err)?;
                let summary: CommitSummary = decode(value.value())?;
                if summary.project_id == project_id {
                    doomed.push(key.value());
                }
            }
            for key in doomed {
                summaries.remove(key).map_err(err)?;
            }
        }
        txn.commit().map_err(err)?;
        Ok(())
    }

    // -- commit summaries ---------------------------------------------------

    fn upsert_commit_summaries(&self, batch: &[SummaryUpsert]) -> Result<()> {
        let Some(lead) = batch.first() else {
            return Ok(());
        };
        let txn = self.db.begin_write().map_err(err)?;
        {
            let mut summaries = txn.open_table(SUMMARIES).map_err(err)?;
            let mut seq = txn.open_table(SEQUENCES).map_err(err)?;

            if lead.commit_id.is_none() {
                let mut doomed = Vec::new();
                for entry in summaries.iter().map_err(err)? {
                    let (key, value) = entry.map_err(err)?;
                    let summary: CommitSummary = decode(value.value())?;
                    if summary.project_id == lead.project_id && summary.commit_id.is_none() {
                        doomed.push(key.value());
                    }
                }
                for key in doomed {
                    summaries.remove(key).map_err(err)?;
                }
            }

            let ts = now();
            for item in batch {
                let existing = match item.commit_id {
                    Some(commit_id) => {
                        let mut found = None;
                        for entry in summaries.iter().map_err(err)? {
                            let (_, value) = entry.map_err(err)?;
                            let summary: CommitSummary = decode(value.value())?;
                            if summary.project_id == item.project_id
                                && summary.commit_id == Some(commit_id)
                            {
                                found = Some(summary);
                                break;
                            }
                        }
                        found
                    }
                    None => None,
                };
                let record = match existing {
                    Some(mut summary) => {
                        summary.summary = item.summary.clone();
                        summary.updated_at = ts.clone();
                        summary
                    }
                    None => CommitSummary {
                        id: next_id(&mut seq, "commit_summaries")?,
                        project_id: item.project_id,
                        commit_id: item.commit_id,
                        summary: item.summary.clone(),
                        created_at: ts.clone(),
                        updated_at: ts.clone(),
                    },
                };
                summaries
                    .insert(record.id as u64, encode(&record)?.as_slice())
                    .map_err(err)?;
            }
        }
        txn.commit().map_err(err)?;
        Ok(())
    }

    fn get_commit_summaries(&self, project_id: i64) -> Result<Vec<CommitSummary>> {
        let txn = self.db.begin_read().map_err(err)?;
        let summaries = txn.open_table(SUMMARIES).map_err(err)?;
        let mut out = Vec::new();
        for entry in summaries.iter().map_err(err)? {
            let (_, value) = entry.map_err(err)?;
            let summary: CommitSummary = decode(value.value())?;
            if summary.project_id == project_id {
                out.push(summary);
            }
        }
        Ok(out)
    }

    // -- users ---------------------------------------------------------------

    fn create_user(&self, user: &NewUser) -> Result<i64> {
        let txn = self.db.begin_write().map_err(err)?;
        let id;
        {
            let mut users = txn.open_table(USERS).map_err(err)?;
            let mut seq = txn.open_table(SEQUENCES).map_err(err)?;
            id = next_id(&mut seq, "users")?;
            let record = User {
                id,
                name: user.name.clone(),
                email: user.email.clone(),
                phone: String::new(),
                location: String::new(),
                professional_summary: String::new(),
                links: Vec::new(),
            };
            users.insert(id as u64, encode(&record)?.as_slice()).map_err(err)?;
        }
        txn.commit().map_err(err)?;
        Ok(id)
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let txn = self.db.begin_read().map_err(err)?;
        let users = txn.open_table(USERS).map_err(err)?;
        for entry in users.iter().map_err(err)? {
            let (_, value) = entry.map_err(err)?;
            let user: User = decode(value.value())?;
            if user.email == email {
                return Ok(Some(user));
            }
        }
        Ok(None)
    }

    fn get_user(&self, id: i64) -> Result<Option<User>> {
        let txn = self.db.begin_read().map_err(err)?;
        let users = txn.open_table(USERS).map_err(err)?;
        Self::user_by_key(&users, id)
    }

    fn update_user(&self, user: &User) -> Result<()> {
        let txn = self.db.begin_write().map_err(err)?;
        {
            let mut users = txn.open_table(USERS).map_err(err)?;
            if users.get(user.id as u64).map_err(err)?.is_none() {
                return Err(VitaeError::UserNotFound(user.id));
            }
            users
                .insert(user.id as u64, encode(user)?.as_slice())
                .map_err(err)?;
        }
        txn.commit().map_err(err)?;
        Ok(())
    }

    // -- resumes --------------------------------------------------------------

    fn create_resume(&self, resume: &NewResume) -> Result<i64> {
        let txn = self.db.begin_write().map_err(err)?;
        let id;
        {
            let mut resumes = txn.open_table(RESUMES).map_err(err)?;
            let mut seq = txn.open_table(SEQUENCES).map_err(err)?;
            id = next_id(&mut seq, "resumes")?;
            let record = ResumeRecord {
                id,
                user_id: resume.user_id,
                title: resume.title.clone(),
                skills: Vec::new(),
                created_at: now(),
            };
            resumes.insert(id as u64, encode(&record)?.as_slice()).map_err(err)?;
        }
        txn.commit().map_err(err)?;
        Ok(id)
    }

    fn get_resume(&self, id: i64) -> Result<Option<Resume>> {
        let record = {
            let txn = self.db.begin_read().map_err(err)?;
            let resumes = txn.open_table(RESUMES).map_err(err)?;
            let record = resumes
                .get(id as u64)
                .map_err(err)?
                .map(|v| decode::<ResumeRecord>(v.value()))
                .transpose()?;
            let Some(record) = record else {
                return Ok(None);
            };
            record
        };

        let profile = self.get_user(record.user_id)?;
        Ok(Some(Resume {
            id: record.id,
            user_id: record.user_id,
            title: record.title,
            skills: record.skills,
            profile,
            educations: self.items_for_resume(id)?,
            work_experiences: self.items_for_resume(id)?,
            volunteers: self.items_for_resume(id)?,
            projects_worked_on: self.items_for_resume(id)?,
            created_at: record.created_at,
        }))
    }

    fn get_resumes(&self) -> Result<Vec<Resume>> {
        let txn = self.db.begin_read().map_err(err)?;
        let resumes = txn.open_table(RESUMES).map_err(err)?;
        let mut out = Vec::new();
        for entry in resumes.iter().map_err(err)? {
            let (_, value) = entry.map_err(err)?;
            let record: ResumeRecord = decode(value.value())?;
            out.push(Resume {
                id: record.id,
                user_id: record.user_id,
                title: record.title,
                skills: record.skills,
                profile: None,
                educations: Vec::new(),
                work_experiences: Vec::new(),
                volunteers: Vec::new(),
                projects_worked_on: Vec::new(),
                created_at: record.created_at,
            });
        }
        Ok(out)
    }

    fn update_resume(
        &self,
        id: i64,
        title: Option<&str>,
        skills: Option<&[String]>,
    ) -> Result<()> {
        let txn = self.db.begin_write().map_err(err)?;
        {
            let mut resumes = txn.open_table(RESUMES).map_err(err)?;
            let record = resumes
                .get(id as u64)
                .map_err(err)?
                .map(|v| decode::<ResumeRecord>(v.value()))
                .transpose()?;
            let Some(mut record) = record else {
                return Err(VitaeError::ResumeNotFound(id));
            };
            if let Some(title) = title {
                record.title = title.to_string();
            }
            if let Some(skills) = skills {
                record.skills = skills.to_vec();
            }
            resumes.insert(id as u64, encode(&record)?.as_slice()).map_err(err)?;
        }
        txn.commit().map_err(err)?;
        Ok(())
    }

    fn delete_resume(&self, id: i64) -> Result<()> {
        let txn = self.db.begin_write().map_err(err)?;
        {
            let mut resumes = txn.open_table(RESUMES).map_err(err)?;
            resumes.remove(id as u64).map_err(err)?;
        }
        Self::cascade_delete::<Education>(&txn, id)?;
        Self::cascade_delete::<WorkExperience>(&txn, id)?;
        Self::cascade_delete::<Volunteer>(&txn, id)?;
        Self::cascade_delete::<ProjectWorkedOn>(&txn, id)?;
        txn.commit().map_err(err)?;
        Ok(())
    }

    // -- resume sub-entities ---------------------------------------------------

    fn upsert_work_experiences(
        &self,
        resume_id: i64,
        items: &[WorkExperience],
    ) -> Result<Vec<i64>> {
        self.upsert_items(resume_id, items)
    }

    fn upsert_educations(&self, resume_id: i64, items: &[Education]) -> Result<Vec<i64>> {
        self.upsert_items(resume_id, items)
    }

    fn upsert_volunteers(&self, resume_id: i64, items: &[Volunteer]) -> Result<Vec<i64>> {
        self.upsert_items(resume_id, items)
    }

    fn upsert_projects_worked_on(
        &self,
        resume_id: i64,
        items: &[ProjectWorkedOn],
    ) -> Result<Vec<i64>> {
        self.upsert_items(resume_id, items)
    }

    fn delete_work_experience(&self, id: i64) -> Result<()> {
        self.delete_item::<WorkExperience>(id)
    }

    fn delete_education(&self, id: i64) -> Result<()> {
        self.delete_item::<Education>(id)
    }

    fn delete_volunteer(&self, id: i64) -> Result<()> {
        self.delete_item::<Volunteer>(id)
    }

    fn delete_project_worked_on(&self, id: i64) -> Result<()> {
        self.delete_item::<ProjectWorkedOn>(id)
    }

    // -- prompts -----------------------------------------------------------------

    fn upsert_prompt(&self, prompt: &PromptConfig) -> Result<()> {
        let txn = self.db.begin_write().map_err(err)?;
        {
            let mut prompts = txn.open_table(PROMPTS).map_err(err)?;
            prompts
                .insert(prompt.title.as_str(), encode(prompt)?.as_slice())
                .map_err(err)?;
        }
        txn.commit().map_err(err)?;
        Ok(())
    }

    fn get_prompts(&self) -> Result<Vec<PromptConfig>> {
        let txn = self.db.begin_read().map_err(err)?;
        let prompts = txn.open_table(PROMPTS).map_err(err)?;
        let mut out = Vec::new();
        for entry in prompts.iter().map_err(err)? {
            let (_, value) = entry.map_err(err)?;
            out.push(decode(value.value())?);
        }
        Ok(out)
    }

    fn get_prompt(&self, title: &str) -> Result<Option<PromptConfig>> {
        let txn = self.db.begin_read().map_err(err)?;
        let prompts = txn.open_table(PROMPTS).map_err(err)?;
        prompts
            .get(title)
            .map_err(err)?
            .map(|v| decode(v.value()))
            .transpose()
    }
}
