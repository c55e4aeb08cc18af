//! SQLite backend. One connection behind a mutex; list-valued fields are
//! JSON text columns.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension, Transaction};

use crate::error::{Result, VitaeError};
use crate::model::{
    Commit, CommitSummary, Education, Link, NewCommit, NewProject, NewResume, NewUser, Project,
    ProjectWorkedOn, Resume, SummaryUpsert, User, Volunteer, WorkExperience,
};
use crate::prompts::{PromptConfig, PromptMessage};

use super::{now, Store};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS projects (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL UNIQUE,
    path          TEXT NOT NULL,
    technologies  TEXT NOT NULL DEFAULT '',
    created_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS commits (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id  INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
    hash        TEXT NOT NULL,
    message     TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL,
    UNIQUE(project_id, hash)
);

CREATE TABLE IF NOT EXISTS commit_summaries (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id  INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
    commit_id   INTEGER REFERENCES commits(id) ON DELETE CASCADE,
    summary     TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL,
    UNIQUE(project_id, commit_id)
);

CREATE TABLE IF NOT EXISTS users (
    id                    INTEGER PRIMARY KEY AUTOINCREMENT,
    name                  TEXT NOT NULL,
    email                 TEXT NOT NULL UNIQUE,
    phone                 TEXT NOT NULL DEFAULT '',
    location              TEXT NOT NULL DEFAULT '',
    professional_summary  TEXT NOT NULL DEFAULT '',
    links                 TEXT NOT NULL DEFAULT '[]'
);

CREATE TABLE IF NOT EXISTS resumes (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    title       TEXT NOT NULL,
    skills      TEXT NOT NULL DEFAULT '[]',
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS educations (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    resume_id       INTEGER NOT NULL REFERENCES resumes(id) ON DELETE CASCADE,
    school          TEXT NOT NULL,
    degree          TEXT NOT NULL DEFAULT '',
    field_of_study  TEXT NOT NULL DEFAULT '',
    start_date      TEXT NOT NULL DEFAULT '',
    end_date        TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS work_experiences (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    resume_id         INTEGER NOT NULL REFERENCES resumes(id) ON DELETE CASCADE,
    company           TEXT NOT NULL,
    role              TEXT NOT NULL,
    location          TEXT NOT NULL DEFAULT '',
    start_date        TEXT NOT NULL DEFAULT '',
    end_date          TEXT NOT NULL DEFAULT '',
    responsibilities  TEXT NOT NULL DEFAULT '',
    projects          TEXT NOT NULL DEFAULT '[]'
);

CREATE TABLE IF NOT EXISTS volunteers (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    resume_id    INTEGER NOT NULL REFERENCES resumes(id) ON DELETE CASCADE,
    title        TEXT NOT NULL,
    description  TEXT NOT NULL DEFAULT '',
    link         TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS resume_projects (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    resume_id     INTEGER NOT NULL REFERENCES resumes(id) ON DELETE CASCADE,
    title         TEXT NOT NULL,
    description   TEXT NOT NULL DEFAULT '',
    technologies  TEXT NOT NULL DEFAULT '',
    link          TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS prompts (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    title        TEXT NOT NULL UNIQUE,
    temperature  REAL NOT NULL,
    max_tokens   INTEGER NOT NULL,
    messages     TEXT NOT NULL
);
";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| VitaeError::Store("sqlite connection lock poisoned".to_string()))
    }
}

fn insert_commits(tx: &Transaction<'_>, project_id: i64, commits: &[NewCommit]) -> Result<u64> {
    let ts = now();
    let mut stmt = tx.prepare(
        "INSERT OR IGNORE INTO commits (project_id, hash, message, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    let mut inserted = 0u64;
    for commit in commits {
        inserted += stmt.execute(params![project_id, commit.hash, commit.message, ts, ts])? as u64;
    }
    Ok(inserted)
}

fn commits_for_project(conn: &Connection, project_id: i64) -> Result<Vec<Commit>> {
    let mut stmt = conn.prepare(
        "SELECT id, project_id, hash, message, created_at, updated_at
         FROM commits WHERE project_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map([project_id], |row| {
        Ok(Commit {
            id: row.get(0)?,
            project_id: row.get(1)?,
            hash: row.get(2)?,
            message: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    })?;
    let mut commits = Vec::new();
    for row in rows {
        commits.push(row?);
    }
    Ok(commits)
}

fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<(User, String)> {
    Ok((
        User {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            phone: row.get(3)?,
            location: row.get(4)?,
            professional_summary: row.get(5)?,
            links: Vec::new(),
        },
        row.get(6)?,
    ))
}

fn decode_user((mut user, links_json): (User, String)) -> Result<User> {
    user.links = serde_json::from_str::<Vec<Link>>(&links_json)?;
    Ok(user)
}

const USER_COLUMNS: &str = "id, name, email, phone, location, professional_summary, links";

impl Store for SqliteStore {
    fn migrate(&self) -> Result<()> {
        self.conn()?.execute_batch(SCHEMA)?;
        Ok(())
    }

    // -- projects ----------------------------------------------------------

    fn create_project(&self, project: &NewProject) -> Result<i64> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO projects (name, path, technologies, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![project.name, project.path, project.technologies, now()],
        )?;
        let id = tx.last_insert_rowid();
        insert_commits(&tx, id, &project.commits)?;
        tx.commit()?;
        Ok(id)
    }

    fn get_project_by_name(&self, name: &str) -> Result<Option<Project>> {
        let conn = self.conn()?;
        let header = conn
            .query_row(
                "SELECT id, name, path, technologies, created_at FROM projects WHERE name = ?1",
                [name],
                |row| {
                    Ok(Project {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        path: row.get(2)?,
                        technologies: row.get(3)?,
                        commits: Vec::new(),
                        created_at: row.get(4)?,
                    })
                },
            )
            .optional()?;
        match header {
            Some(mut project) => {
                project.commits = commits_for_project(&conn, project.id)?;
                Ok(Some(project))
            }
            None => Ok(None),
        }
    }

    fn get_all_projects(&self, limit: u32, offset: u32) -> Result<Vec<Project>> {
        let conn = self.conn()?;
        let limit = if limit == 0 { -1 } else { limit as i64 };
        let mut stmt = conn.prepare(
            "SELECT id, name, path, technologies, created_at FROM projects
             ORDER BY id LIMIT ?1 OFFSET ?2",
        )?;
        let rows = stmt.query_map(params![limit, offset as i64], |row| {
            Ok(Project {
                id: row.get(0)?,
                name: row.get(1)?,
                path: row.get(2)?,
                technologies: row.get(3)?,
                commits: Vec::new(),
                created_at: row.get(4)?,
            })
        })?;
        let mut projects = Vec::new();
        for row in rows {
            projects.push(row?);
        }
        for project in &mut projects {
            project.commits = commits_for_project(&conn, project.id)?;
        }
        Ok(projects)
    }

    fn append_commits(&self, project_id: i64, commits: &[NewCommit]) -> Result<u64> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let inserted = insert_commits(&tx, project_id, commits)?;
        tx.commit()?;
        Ok(inserted)
    }

    fn set_project_technologies(&self, project_id: i64, technologies: &str) -> Result<()> {
        self.conn()?.execute(
            "UPDATE projects SET technologies = ?1 WHERE id = ?2",
            params![technologies, project_id],
        )?;
        Ok(())
    }

    fn delete_project(&self, project_id: i64) -> Result<()> {
        self.conn()?
            .execute("DELETE FROM projects WHERE id = ?1", [project_id])?;
        Ok(())
    }

    // -- commit summaries ---------------------------------------------------

    fn upsert_commit_summaries(&self, batch: &[SummaryUpsert]) -> Result<()> {
        let Some(lead) = batch.first() else {
            return Ok(());
        };
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        if lead.commit_id.is_none() {
            tx.execute(
                "DELETE FROM commit_summaries WHERE project_id = ?1 AND commit_id IS NULL",
                [lead.project_id],
            )?;
        }
        let ts = now();
        for item in batch {
            match item.commit_id {
                Some(commit_id) => {
                    tx.execute(
                        "INSERT INTO commit_summaries
                             (project_id, commit_id, summary, created_at, updated_at)
                         VALUES (?1, ?2, ?3, ?4, ?5)
                         ON CONFLICT(project_id, commit_id) DO UPDATE SET
                             summary = excluded.summary,
                             updated_at = excluded.updated_at",
                        params![item.project_id, commit_id, item.summary, ts, ts],
                    )?;
                }
                None => {
                    tx.execute(
                        "INSERT INTO commit_summaries
                             (project_id, commit_id, summary, created_at, updated_at)
                         VALUES (?1, NULL, ?2, ?3, ?4)",
                        params![item.project_id, item.summary, ts, ts],
                    )?;
                }
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn get_commit_summaries(&self, project_id: i64) -> Result<Vec<CommitSummary>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, project_id, commit_id, summary, created_at, updated_at
             FROM commit_summaries WHERE project_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map([project_id], |row| {
            Ok(CommitSummary {
                id: row.get(0)?,
                project_id: row.get(1)?,
                commit_id: row.get(2)?,
                summary: row.get(3)?,
                created_at: row.get(4)?,
                updated_at: row.get(5)?,
            })
        })?;
        let mut summaries = Vec::new();
        for row in rows {
            summaries.push(row?);
        }
        Ok(summaries)
    }

    // -- users ---------------------------------------------------------------

    fn create_user(&self, user: &NewUser) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO users (name, email) VALUES (?1, ?2)",
            params![user.name, user.email],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = self
            .conn()?
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
                [email],
                user_from_row,
            )
            .optional()?;
        row.map(decode_user).transpose()
    }

    fn get_user(&self, id: i64) -> Result<Option<User>> {
        let row = self
            .conn()?
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                [id],
                user_from_row,
            )
            .optional()?;
        row.map(decode_user).transpose()
    }

    fn update_user(&self, user: &User) -> Result<()> {
        let links = serde_json::to_string(&user.links)?;
        let affected = self.conn()?.execute(
            "UPDATE users SET name = ?1, email = ?2, phone = ?3, location = ?4,
                 professional_summary = ?5, links = ?6
             WHERE id = ?7",
            params![
                user.name,
                user.email,
                user.phone,
                user.location,
                user.professional_summary,
                links,
                user.id
            ],
        )?;
        if affected == 0 {
            return Err(VitaeError::UserNotFound(user.id));
        }
        Ok(())
    }

    // -- resumes --------------------------------------------------------------

    fn create_resume(&self, resume: &NewResume) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO resumes (user_id, title, created_at) VALUES (?1, ?2, ?3)",
            params![resume.user_id, resume.title, now()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn get_resume(&self, id: i64) -> Result<Option<Resume>> {
        let conn = self.conn()?;
        let header = conn
            .query_row(
                "SELECT id, user_id, title, skills, created_at FROM resumes WHERE id = ?1",
                [id],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;
        let Some((id, user_id, title, skills_json, created_at)) = header else {
            return Ok(None);
        };

        let profile = conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                [user_id],
                user_from_row,
            )
            .optional()?
            .map(decode_user)
            .transpose()?;

        let mut educations = Vec::new();
        let mut stmt = conn.prepare(
            "SELECT id, resume_id, school, degree, field_of_study, start_date, end_date
             FROM educations WHERE resume_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map([id], |row| {
            Ok(Education {
                id: row.get(0)?,
                resume_id: row.get(1)?,
                school: row.get(2)?,
                degree: row.get(3)?,
                field_of_study: row.get(4)?,
                start_date: row.get(5)?,
                end_date: row.get(6)?,
            })
        })?;
        for row in rows {
            educations.push(row?);
        }

        let mut work_experiences = Vec::new();
        let mut stmt = conn.prepare(
            "SELECT id, resume_id, company, role, location, start_date, end_date,
                    responsibilities, projects
             FROM work_experiences WHERE resume_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map([id], |row| {
            Ok((
                WorkExperience {
                    id: row.get(0)?,
                    resume_id: row.get(1)?,
                    company: row.get(2)?,
                    role: row.get(3)?,
                    location: row.get(4)?,
                    start_date: row.get(5)?,
                    end_date: row.get(6)?,
                    responsibilities: row.get(7)?,
                    projects: Vec::new(),
                },
                row.get::<_, String>(8)?,
            ))
        })?;
        for row in rows {
            let (mut work, projects_json) = row?;
            work.projects = serde_json::from_str(&projects_json)?;
            work_experiences.push(work);
        }

        let mut volunteers = Vec::new();
        let mut stmt = conn.prepare(
            "SELECT id, resume_id, title, description, link
             FROM volunteers WHERE resume_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map([id], |row| {
            Ok(Volunteer {
                id: row.get(0)?,
                resume_id: row.get(1)?,
                title: row.get(2)?,
                description: row.get(3)?,
                link: row.get(4)?,
            })
        })?;
        for row in rows {
            volunteers.push(row?);
        }

        let mut projects_worked_on = Vec::new();
        let mut stmt = conn.prepare(
            "SELECT id, resume_id, title, description, technologies, link
             FROM resume_projects WHERE resume_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map([id], |row| {
            Ok(ProjectWorkedOn {
                id: row.get(0)?,
                resume_id: row.get(1)?,
                title: row.get(2)?,
                description: row.get(3)?,
                technologies: row.get(4)?,
                link: row.get(5)?,
            })
        })?;
        for row in rows {
            projects_worked_on.push(row?);
        }

        Ok(Some(Resume {
            id,
            user_id,
            title,
            skills: serde_json::from_str(&skills_json)?,
            profile,
            educations,
            work_experiences,
            volunteers,
            projects_worked_on,
            created_at,
        }))
    }

    fn get_resumes(&self) -> Result<Vec<Resume>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, title, skills, created_at FROM resumes ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                Resume {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    title: row.get(2)?,
                    skills: Vec::new(),
                    profile: None,
                    educations: Vec::new(),
                    work_experiences: Vec::new(),
                    volunteers: Vec::new(),
                    projects_worked_on: Vec::new(),
                    created_at: row.get(4)?,
                },
                row.get::<_, String>(3)?,
            ))
        })?;
        let mut resumes = Vec::new();
        for row in rows {
            let (mut resume, skills_json) = row?;
            resume.skills = serde_json::from_str(&skills_json)?;
            resumes.push(resume);
        }
        Ok(resumes)
    }

    fn update_resume(
        &self,
        id: i64,
        title: Option<&str>,
        skills: Option<&[String]>,
    ) -> Result<()> {
        let skills_json = skills.map(serde_json::to_string).transpose()?;
        let affected = self.conn()?.execute(
            "UPDATE resumes SET title = COALESCE(?1, title), skills = COALESCE(?2, skills)
             WHERE id = ?3",
            params![title, skills_json, id],
        )?;
        if affected == 0 {
            return Err(VitaeError::ResumeNotFound(id));
        }
        Ok(())
    }

    fn delete_resume(&self, id: i64) -> Result<()> {
        self.conn()?
            .execute("DELETE FROM resumes WHERE id = ?1", [id])?;
        Ok(())
    }

    // -- resume sub-entities ---------------------------------------------------

    fn upsert_work_experiences(
        &self,
        resume_id: i64,
        items: &[WorkExperience],
    ) -> Result<Vec<i64>> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let mut ids = Vec::with_capacity(items.len());
        for item in items {
            let projects = serde_json::to_string(&item.projects)?;
            let existing: Option<i64> = tx
                .query_row(
                    "SELECT id FROM work_experiences WHERE id = ?1 AND resume_id = ?2",
                    params![item.id, resume_id],
                    |row| row.get(0),
                )
                .optional()?;
            match existing {
                Some(id) => {
                    tx.execute(
                        "UPDATE work_experiences SET company = ?1, role = ?2, location = ?3,
                             start_date = ?4, end_date = ?5, responsibilities = ?6, projects = ?7
                         WHERE id = ?8",
                        params![
                            item.company,
                            item.role,
                            item.location,
                            item.start_date,
                            item.end_date,
                            item.responsibilities,
                            projects,
                            id
                        ],
                    )?;
                    ids.push(id);
                }
                None => {
                    tx.execute(
                        "INSERT INTO work_experiences
                             (resume_id, company, role, location, start_date, end_date,
                              responsibilities, projects)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                        params![
                            resume_id,
                            item.company,
                            item.role,
                            item.location,
                            item.start_date,
                            item.end_date,
                            item.responsibilities,
                            projects
                        ],
                    )?;
                    ids.push(tx.last_insert_rowid());
                }
            }
        }
        tx.commit()?;
        Ok(ids)
    }

    fn upsert_educations(&self, resume_id: i64, items: &[Education]) -> Result<Vec<i64>> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let mut ids = Vec::with_capacity(items.len());
        for item in items {
            let existing: Option<i64> = tx
                .query_row(
                    "SELECT id FROM educations WHERE id = ?1 AND resume_id = ?2",
                    params![item.id, resume_id],
                    |row| row.get(0),
                )
                .optional()?;
            match existing {
                Some(id) => {
                    tx.execute(
                        "UPDATE educations SET school = ?1, degree = ?2, field_of_study = ?3,
                             start_date = ?4, end_date = ?5
                         WHERE id = ?6",
                        params![
                            item.school,
                            item.degree,
                            item.field_of_study,
                            item.start_date,
                            item.end_date,
                            id
                        ],
                    )?;
                    ids.push(id);
                }
                None => {
                    tx.execute(
                        "INSERT INTO educations
                             (resume_id, school, degree, field_of_study, start_date, end_date)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                        params![
                            resume_id,
                            item.school,
                            item.degree,
                            item.field_of_study,
                            item.start_date,
                            item.end_date
                        ],
                    )?;
                    ids.push(tx.last_insert_rowid());
                }
            }
        }
        tx.commit()?;
        Ok(ids)
    }

    fn upsert_volunteers(&self, resume_id: i64, items: &[Volunteer]) -> Result<Vec<i64>> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let mut ids = Vec::with_capacity(items.len());
        for item in items {
            let existing: Option<i64> = tx
                .query_row(
                    "SELECT id FROM volunteers WHERE id = ?1 AND resume_id = ?2",
                    params![item.id, resume_id],
                    |row| row.get(0),
                )
                .optional()?;
            match existing {
                Some(id) => {
                    tx.execute(
                        "UPDATE volunteers SET title = ?1, description = ?2, link = ?3
                         WHERE id = ?4",
                        params![item.title, item.description, item.link, id],
                    )?;
                    ids.push(id);
                }
                None => {
                    tx.execute(
                        "INSERT INTO volunteers (resume_id, title, description, link)
                         VALUES (?1, ?2, ?3, ?4)",
                        params![resume_id, item.title, item.description, item.link],
                    )?;
                    ids.push(tx.last_insert_rowid());
                }
            }
        }
        tx.commit()?;
        Ok(ids)
    }

    fn upsert_projects_worked_on(
        &self,
        resume_id: i64,
        items: &[ProjectWorkedOn],
    ) -> Result<Vec<i64>> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let mut ids = Vec::with_capacity(items.len());
        for item in items {
            let existing: Option<i64> = tx
                .query_row(
                    "SELECT id FROM resume_projects WHERE id = ?1 AND resume_id = ?2",
                    params![item.id, resume_id],
                    |row| row.get(0),
                )
                .optional()?;
            match existing {
                Some(id) => {
                    tx.execute(
                        "UPDATE resume_projects SET title = ?1, description = ?2,
                             technologies = ?3, link = ?4
                         WHERE id = ?5",
                        params![item.title, item.description, item.technologies, item.link, id],
                    )?;
                    ids.push(id);
                }
                None => {
                    tx.execute(
                        "INSERT INTO resume_projects
                             (resume_id, title, description, technologies, link)
                         VALUES (?1, ?2, ?3, ?4, ?5)",
                        params![
                            resume_id,
                            item.title,
                            item.description,
                            item.technologies,
                            item.link
                        ],
                    )?;
                    ids.push(tx.last_insert_rowid());
                }
            }
        }
        tx.commit()?;
        Ok(ids)
    }

    fn delete_work_experience(&self, id: i64) -> Result<()> {
        self.conn()?
            .execute("DELETE FROM work_experiences WHERE id = ?1", [id])?;
        Ok(())
    }

    fn delete_education(&self, id: i64) -> Result<()> {
        self.conn()?
            .execute("DELETE FROM educations WHERE id = ?1", [id])?;
        Ok(())
    }

    fn delete_volunteer(&self, id: i64) -> Result<()> {
        self.conn()?
            .execute("DELETE FROM volunteers WHERE id = ?1", [id])?;
        Ok(())
    }

    fn delete_project_worked_on(&self, id: i64) -> Result<()> {
        self.conn()?
            .execute("DELETE FROM resume_projects WHERE id = ?1", [id])?;
        Ok(())
    }

    // -- prompts -----------------------------------------------------------------

    fn upsert_prompt(&self, prompt: &PromptConfig) -> Result<()> {
        let messages = serde_json::to_string(&prompt.messages)?;
        self.conn()?.execute(
            "INSERT INTO prompts (title, temperature, max_tokens, messages)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(title) DO UPDATE SET
                 temperature = excluded.temperature,
                 max_tokens = excluded.max_tokens,
                 messages = excluded.messages",
            params![prompt.title, prompt.temperature, prompt.max_tokens, messages],
        )?;
        Ok(())
    }

    fn get_prompts(&self) -> Result<Vec<PromptConfig>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT title, temperature, max_tokens, messages FROM prompts ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, f32>(1)?,
                row.get::<_, u32>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;
        let mut prompts = Vec::new();
        for row in rows {
            let (title, temperature, max_tokens, messages_json) = row?;
            prompts.push(PromptConfig {
                title,
                temperature,
                max_tokens,
                messages: serde_json::from_str::<Vec<PromptMessage>>(&messages_json)?,
            });
        }
        Ok(prompts)
    }

    fn get_prompt(&self, title: &str) -> Result<Option<PromptConfig>> {
        let row = self
            .conn()?
            .query_row(
                "SELECT title, temperature, max_tokens, messages FROM prompts WHERE title = ?1",
                [title],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, f32>(1)?,
                        row.get::<_, u32>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()?;
        row.map(|(title, temperature, max_tokens, messages_json)| {
            Ok(PromptConfig {
                title,
                temperature,
                max_tokens,
                messages: serde_json::from_str::<Vec<PromptMessage>>(&messages_json)?,
            })
        })
        .transpose()
    }
}
