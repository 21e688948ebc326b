//! HTML routes.
//!
//! - `/` project list, filtered by `?q=`
//! - `/projects/{slug}` version list
//! - `/projects/{slug}/changelogs/{version}` version detail, lightbox via `?media=N`
//!
//! Unknown projects and versions render a 404 placeholder page.

use askama::Template;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use serde::Deserialize;

use crate::Result;
use crate::api;
use crate::assets;
use crate::lightbox::Lightbox;
use crate::state::AppState;
use crate::views::{HomeTemplate, NotFoundTemplate, ProjectTemplate, VersionTemplate};

/// `?q=` on the home page.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// `?media=` on the version page. Kept as a string so a bad value closes
/// the lightbox instead of failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct MediaParams {
    pub media: Option<String>,
}

/// All routes, with state applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/projects/{slug}", get(project_page))
        .route("/projects/{slug}/changelogs/{version}", get(version_page))
        .route("/health", get(api::health))
        .route("/assets/style.css", get(assets::style))
        .route("/assets/app.js", get(assets::script))
        .merge(api::routes())
        .fallback(fallback)
        .with_state(state)
}

fn render<T: Template>(status: StatusCode, template: &T) -> Result<Response> {
    Ok((status, Html(template.render()?)).into_response())
}

async fn home(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response> {
    let page = HomeTemplate::build(&state.catalog, &params.q, state.site.search_debounce_ms);
    render(StatusCode::OK, &page)
}

async fn project_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response> {
    match state.catalog.get_project(&slug) {
        Some(project) => render(StatusCode::OK, &ProjectTemplate::build(project)),
        None => {
            tracing::debug!(%slug, "project not found");
            render(StatusCode::NOT_FOUND, &NotFoundTemplate::project(&slug))
        }
    }
}

async fn version_page(
    State(state): State<AppState>,
    Path((slug, version)): Path<(String, String)>,
    Query(params): Query<MediaParams>,
) -> Result<Response> {
    let project = state.catalog.get_project(&slug);
    let found = project.and_then(|p| p.find_version(&version).map(|v| (p, v)));

    match found {
        Some((project, v)) => {
            let lightbox = Lightbox::from_param(params.media.as_deref(), project.media.len());
            render(StatusCode::OK, &VersionTemplate::build(project, v, lightbox))
        }
        None => {
            tracing::debug!(%slug, %version, "version not found");
            let name = project.map_or(slug.as_str(), |p| p.name.as_str());
            render(StatusCode::NOT_FOUND, &NotFoundTemplate::version(name, &version))
        }
    }
}

async fn fallback() -> Result<Response> {
    render(StatusCode::NOT_FOUND, &NotFoundTemplate::page())
}
