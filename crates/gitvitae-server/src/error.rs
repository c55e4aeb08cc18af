use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gitvitae_ai::AiError;
use gitvitae_core::VitaeError;

// ---------------------------------------------------------------------------
// Internal sentinel for explicit 404 Not Found errors
// ---------------------------------------------------------------------------

/// Private sentinel error type used to carry an explicit HTTP 404 through
/// the `anyhow::Error` chain without touching the `VitaeError` enum.
#[derive(Debug)]
struct NotFoundError(String);

impl std::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for NotFoundError {}

// ---------------------------------------------------------------------------
// AppError — unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 400 Bad Request error with the given message.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(VitaeError::InvalidInput(msg.into()).into())
    }

    /// Construct a 404 Not Found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self(NotFoundError(msg.into()).into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(n) = self.0.downcast_ref::<NotFoundError>() {
            let body = serde_json::json!({ "error": n.0.clone() });
            return (StatusCode::NOT_FOUND, axum::Json(body)).into_response();
        }

        let status = if let Some(e) = self.0.downcast_ref::<VitaeError>() {
            match e {
                VitaeError::ProjectNotFound(_)
                | VitaeError::UserNotFound(_)
                | VitaeError::ResumeNotFound(_)
                | VitaeError::PromptNotFound(_) => StatusCode::NOT_FOUND,
                VitaeError::NotInitialized
                | VitaeError::NotARepository(_)
                | VitaeError::NoCommits
                | VitaeError::GitUserMissing
                | VitaeError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                VitaeError::MissingTool(_) => StatusCode::SERVICE_UNAVAILABLE,
                VitaeError::GitTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
                VitaeError::Git(_)
                | VitaeError::Store(_)
                | VitaeError::Export(_)
                | VitaeError::HomeNotFound
                | VitaeError::Io(_)
                | VitaeError::Yaml(_)
                | VitaeError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        } else if let Some(e) = self.0.downcast_ref::<AiError>() {
            match e {
                AiError::MissingApiKey(_)
                | AiError::UnknownProvider(_)
                | AiError::EmptyPrompt => StatusCode::BAD_REQUEST,
                AiError::Api { .. } | AiError::EmptyResponse(_) | AiError::Http(_) => {
                    StatusCode::BAD_GATEWAY
                }
                AiError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_not_found_maps_to_404() {
        let err = AppError(VitaeError::ProjectNotFound("api".into()).into());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn resume_not_found_maps_to_404() {
        let err = AppError(VitaeError::ResumeNotFound(7).into());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn not_initialized_maps_to_400() {
        let err = AppError(VitaeError::NotInitialized.into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_input_maps_to_400() {
        let err = AppError::bad_request("limit must be a number");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_tool_maps_to_503() {
        let err = AppError(VitaeError::MissingTool("pandoc".into()).into());
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn git_timeout_maps_to_504() {
        let err = AppError(VitaeError::GitTimeout(30).into());
        assert_eq!(err.into_response().status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn store_error_maps_to_500() {
        let err = AppError(VitaeError::Store("lock poisoned".into()).into());
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_api_key_maps_to_400() {
        let err = AppError(AiError::MissingApiKey("openai").into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn provider_api_error_maps_to_502() {
        let err = AppError(
            AiError::Api {
                provider: "gemini",
                message: "quota exceeded".into(),
            }
            .into(),
        );
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn not_found_constructor_maps_to_404() {
        let err = AppError::not_found("no such record");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unknown_error_maps_to_500() {
        let err = AppError(anyhow::anyhow!("something unexpected"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn response_body_is_json_error_object() {
        let err = AppError(VitaeError::ProjectNotFound("api".into()).into());
        let response = err.into_response();
        let ct = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .expect("should have content-type");
        assert!(ct.to_str().unwrap().contains("application/json"));
    }
}
