use crate::routes::*;
use axum::{response::IntoResponse, routing::get, Router};
use http::{
    header::{self, ACCEPT},
    HeaderMap, StatusCode,
};
use utoipa::OpenApi;

/// Documentation for the service. Can be converted into JSON or YAML.
#[derive(OpenApi)]
#[openapi(
    paths(
        health::is_alive,
        health::build_info,
        send_email::send_email,
        projects::list_projects,
        projects::list_categories,
        projects::get_project,
        crate::metrics::metrics_endpoint,
    ),
    components(schemas(
        health::BuildInfo,
        crate::domain::ContactForm,
        send_email::SendEmailResponse,
        send_email::ErrorResponse,
        crate::projects::Project,
    ))
)]
struct ApiDoc;

pub fn create_router() -> Router {
    Router::new()
        .route("/openapi", get(serve_openapi_docs))
        .route("/openapi.json", get(serve_openapi_docs_as_json))
        .route("/openapi.yaml", get(serve_openapi_docs_as_yaml))
}

/// Serve OpenApi docs based on the `Accept` header.
#[tracing::instrument(skip(headers))]
pub async fn serve_openapi_docs(headers: HeaderMap) -> impl IntoResponse {
    match headers.get(ACCEPT).and_then(|x| x.to_str().ok()) {
        Some("application/yaml") => serve_openapi_docs_as_yaml().await.into_response(),
        _ => serve_openapi_docs_as_json().await.into_response(),
    }
}

/// Endpoint to serve OpenApi docs as JSON.
#[tracing::instrument]
pub async fn serve_openapi_docs_as_json() -> impl IntoResponse {
    match ApiDoc::openapi().to_json() {
        Ok(json) => ([(header::CONTENT_TYPE, "application/json")], json).into_response(),
        Err(e) => {
            tracing::error!("Failed to serialize OpenApi docs: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Endpoint to serve OpenApi docs as YAML.
#[tracing::instrument]
pub async fn serve_openapi_docs_as_yaml() -> impl IntoResponse {
    match ApiDoc::openapi().to_yaml() {
        Ok(yaml) => ([(header::CONTENT_TYPE, "application/yaml")], yaml).into_response(),
        Err(e) => {
            tracing::error!("Failed to serialize OpenApi docs: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
