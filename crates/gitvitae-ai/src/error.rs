use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("{0} api key is missing")]
    MissingApiKey(&'static str),

    #[error("unknown ai provider: {0}")]
    UnknownProvider(String),

    #[error("no prompt supplied")]
    EmptyPrompt,

    #[error("{provider} api error: {message}")]
    Api {
        provider: &'static str,
        message: String,
    },

    #[error("no completion returned from {0}")]
    EmptyResponse(&'static str),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AiError>;
