use crate::{
    projects::{Project, ProjectCatalog},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use utoipa::IntoParams;

/// Create a router to serve the project gallery.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects))
        .route("/categories", get(list_categories))
        .route("/:id", get(get_project))
}

#[derive(Debug, serde::Deserialize, IntoParams)]
pub struct ProjectFilter {
    /// Only return projects in this category. `all` disables filtering.
    category: Option<String>,
}

/// List the projects in the gallery, optionally filtered by category.
#[tracing::instrument(skip(catalog))]
#[utoipa::path(
    get,
    path = "/projects",
    params(ProjectFilter),
    responses((status = OK, description = "Projects matching the filter", body = [Project]))
)]
pub async fn list_projects(
    State(catalog): State<Arc<ProjectCatalog>>,
    Query(filter): Query<ProjectFilter>,
) -> Json<Vec<Project>> {
    Json(
        catalog
            .filter(filter.category.as_deref())
            .into_iter()
            .cloned()
            .collect(),
    )
}

/// The categories offered as gallery filters, in display order.
#[tracing::instrument(skip(catalog))]
#[utoipa::path(
    get,
    path = "/projects/categories",
    responses((status = OK, description = "Distinct project categories", body = [String]))
)]
pub async fn list_categories(State(catalog): State<Arc<ProjectCatalog>>) -> Json<Vec<String>> {
    Json(catalog.categories().into_iter().map(String::from).collect())
}

/// Get the details of a single project.
#[tracing::instrument(skip(catalog))]
#[utoipa::path(
    get,
    path = "/projects/{id}",
    params(("id" = u32, Path, description = "Project id")),
    responses(
        (status = OK, description = "The project", body = Project),
        (status = NOT_FOUND, description = "No project with that id"),
    )
)]
pub async fn get_project(
    State(catalog): State<Arc<ProjectCatalog>>,
    Path(id): Path<u32>,
) -> Result<Json<Project>, StatusCode> {
    catalog
        .get(id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}
