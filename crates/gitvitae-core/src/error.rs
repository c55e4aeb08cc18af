use thiserror::Error;

#[derive(Debug, Error)]
pub enum VitaeError {
    #[error("not initialized: run 'gitvitae init'")]
    NotInitialized,

    #[error("not a git repository: {0}")]
    NotARepository(String),

    #[error("no commits available")]
    NoCommits,

    #[error("project not found: {0}")]
    ProjectNotFound(String),

    #[error("user not found: {0}")]
    UserNotFound(i64),

    #[error("resume not found: {0}")]
    ResumeNotFound(i64),

    #[error("prompt config not found: {0}")]
    PromptNotFound(String),

    #[error("git user not configured: set user.name and user.email")]
    GitUserMissing,

    #[error("git failed: {0}")]
    Git(String),

    #[error("git timed out after {0}s")]
    GitTimeout(u64),

    #[error("store error: {0}")]
    Store(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("required tool not found: {0}")]
    MissingTool(String),

    #[error("export failed: {0}")]
    Export(String),

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for VitaeError {
    fn from(e: rusqlite::Error) -> Self {
        VitaeError::Store(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VitaeError>;
