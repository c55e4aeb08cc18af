use axum::extract::Query;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::AppError;
use crate::export::{export_html, ExportFormat};

#[derive(serde::Deserialize)]
pub struct ExportParams {
    pub format: String,
}

#[derive(serde::Deserialize)]
pub struct ExportBody {
    /// Rendered resume HTML from the dashboard.
    pub content: String,
}

/// POST /api/export?format=md|pdf|docx — convert resume HTML for download.
pub async fn export_resume(
    Query(params): Query<ExportParams>,
    Json(body): Json<ExportBody>,
) -> Result<Response, AppError> {
    if body.content.is_empty() {
        return Err(AppError::bad_request("no content to export"));
    }
    let format: ExportFormat = params.format.parse()?;

    let bytes = tokio::task::spawn_blocking(move || export_html(format, &body.content))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", format.filename()),
            ),
        ],
        bytes,
    )
        .into_response())
}
