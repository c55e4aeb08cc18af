pub mod embed;
pub mod error;
pub mod export;
pub mod routes;
pub mod state;

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

/// Ports probed in order when the caller does not pin one.
const PORT_RANGE: std::ops::RangeInclusive<u16> = 4000..=4100;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Projects and commits
        .route("/api/projects", get(routes::projects::list_projects))
        .route(
            "/api/projects/{name}",
            get(routes::projects::get_project).delete(routes::projects::delete_project),
        )
        .route(
            "/api/projects/{name}/summaries",
            get(routes::projects::list_summaries),
        )
        .route("/api/commits", put(routes::projects::bulk_upsert_summaries))
        // AI
        .route("/api/ai", post(routes::ai::generate))
        // Resumes
        .route("/api/resumes", post(routes::resumes::create_resume))
        .route("/api/resumes", get(routes::resumes::list_resumes))
        .route("/api/resumes/{id}", get(routes::resumes::get_resume))
        .route("/api/resumes/{id}", put(routes::resumes::update_resume))
        .route("/api/resumes/{id}", delete(routes::resumes::delete_resume))
        .route(
            "/api/resumes/{id}/work-experiences",
            put(routes::resumes::upsert_work_experiences),
        )
        .route(
            "/api/resumes/{id}/educations",
            put(routes::resumes::upsert_educations),
        )
        .route(
            "/api/resumes/{id}/volunteers",
            put(routes::resumes::upsert_volunteers),
        )
        .route(
            "/api/resumes/{id}/projects",
            put(routes::resumes::upsert_projects_worked_on),
        )
        .route(
            "/api/work-experiences/{id}",
            delete(routes::resumes::delete_work_experience),
        )
        .route(
            "/api/educations/{id}",
            delete(routes::resumes::delete_education),
        )
        .route(
            "/api/volunteers/{id}",
            delete(routes::resumes::delete_volunteer),
        )
        .route(
            "/api/resume-projects/{id}",
            delete(routes::resumes::delete_project_worked_on),
        )
        // Users
        .route("/api/users", post(routes::users::create_user))
        .route("/api/users", put(routes::users::update_user))
        .route("/api/users/{id}", get(routes::users::get_user))
        // Config
        .route("/api/config/ai", get(routes::config::get_ai_config))
        .route("/api/config/ai", put(routes::config::update_ai_config))
        // Export
        .route("/api/export", post(routes::export::export_resume))
        .fallback(embed::static_handler)
        .layer(cors)
        .with_state(state)
}

/// Start the dashboard server.
///
/// With an explicit port, bind it or fail; without one, probe 4000-4100 and
/// take the first free port.
pub async fn serve(state: AppState, port: Option<u16>, open_browser: bool) -> anyhow::Result<()> {
    let listener = bind(port).await?;
    serve_on(state, listener, open_browser).await
}

/// Start the dashboard server on a pre-bound listener.
pub async fn serve_on(
    state: AppState,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let port = listener.local_addr()?.port();
    let app = build_router(state);

    tracing::info!("gitvitae dashboard listening on http://localhost:{port}");

    if open_browser {
        let url = format!("http://localhost:{port}");
        let _ = open::that(&url);
    }

    axum::serve(listener, app).await?;
    Ok(())
}

async fn bind(port: Option<u16>) -> anyhow::Result<tokio::net::TcpListener> {
    match port {
        Some(port) => Ok(tokio::net::TcpListener::bind(("127.0.0.1", port)).await?),
        None => {
            for candidate in PORT_RANGE {
                if let Ok(listener) =
                    tokio::net::TcpListener::bind(("127.0.0.1", candidate)).await
                {
                    return Ok(listener);
                }
            }
            anyhow::bail!(
                "no free port between {} and {}",
                PORT_RANGE.start(),
                PORT_RANGE.end()
            )
        }
    }
}
