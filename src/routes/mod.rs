use crate::{metrics::metrics_endpoint, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};

pub mod docs;
pub mod health;
pub mod projects;
pub mod send_email;

/// Build every API route. Anything not matched here is left for the static
/// site fallback.
pub fn build_router(app_state: &AppState) -> Router {
    Router::new()
        .route("/send-email", post(send_email::send_email))
        .route("/metrics", get(metrics_endpoint))
        .nest("/projects", projects::create_router())
        .with_state(app_state.clone())
        .nest("/health", health::create_router())
        .nest("/docs", docs::create_router())
}
