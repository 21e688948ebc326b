//! JSON endpoints over the catalog.
//!
//! Lookups that miss return 404 with
//! `{"error": {"category": "not_found", "message": "..."}}`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use changelog_core::{Project, Version};
use serde::Serialize;

use crate::routes::SearchParams;
use crate::state::AppState;

/// Health check response.
#[derive(Clone, Debug, Serialize)]
pub struct HealthResponse {
    /// Always "healthy" while the process serves requests.
    pub status: String,
    /// Number of loaded projects.
    pub projects: usize,
    /// Seconds since the state was built.
    pub uptime_secs: u64,
    /// Crate version.
    pub version: String,
}

/// Latest release in a project summary.
#[derive(Clone, Debug, Serialize)]
pub struct LatestRelease {
    pub version: String,
    pub date: String,
}

/// One row of `/api/projects`.
#[derive(Clone, Debug, Serialize)]
pub struct ProjectSummary {
    pub slug: String,
    pub name: String,
    pub latest: Option<LatestRelease>,
    pub releases: usize,
}

impl From<&Project> for ProjectSummary {
    fn from(project: &Project) -> Self {
        Self {
            slug: project.slug.clone(),
            name: project.name.clone(),
            latest: project.latest_version().map(|v| LatestRelease {
                version: v.version.clone(),
                date: v.date.clone(),
            }),
            releases: project.release_count(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    category: &'static str,
    message: String,
}

fn not_found(message: String) -> Response {
    let body = ErrorBody {
        error: ErrorDetail {
            category: "not_found",
            message,
        },
    };
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

fn project_missing(slug: &str) -> Response {
    not_found(format!("project '{slug}' not found"))
}

/// `/api/...` routes. State is applied by the caller.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/projects", get(list_projects))
        .route("/api/projects/{slug}", get(get_project))
        .route("/api/projects/{slug}/versions", get(list_versions))
        .route("/api/projects/{slug}/latest", get(latest_version))
        .route("/api/projects/{slug}/versions/{version}", get(get_version))
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        projects: state.catalog.len(),
        uptime_secs: state.started_at.elapsed().as_secs(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn list_projects(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<ProjectSummary>> {
    let summaries = state
        .catalog
        .search(&params.q)
        .into_iter()
        .map(ProjectSummary::from)
        .collect();
    Json(summaries)
}

async fn get_project(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match state.catalog.get_project(&slug) {
        Some(project) => Json(project).into_response(),
        None => project_missing(&slug),
    }
}

/// Empty list for an unknown project, same as the catalog.
async fn list_versions(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let versions: &[Version] = state.catalog.list_versions(&slug);
    Json(versions).into_response()
}

async fn latest_version(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let Some(project) = state.catalog.get_project(&slug) else {
        return project_missing(&slug);
    };
    match project.latest_version() {
        Some(version) => Json(version).into_response(),
        None => not_found(format!("project '{slug}' has no releases")),
    }
}

async fn get_version(
    State(state): State<AppState>,
    Path((slug, version)): Path<(String, String)>,
) -> Response {
    match state.catalog.get_version(&slug, &version) {
        Some(found) => Json(found).into_response(),
        None => not_found(format!("version '{version}' of project '{slug}' not found")),
    }
}
