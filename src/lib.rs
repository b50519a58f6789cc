pub mod client;
pub mod configuration;
pub mod domain;
pub mod email_client;
mod error;
pub mod metrics;
pub mod projects;
mod routes;
pub mod state;
pub mod telemetry;

use anyhow::Context;
use axum::{Router, Server};
use configuration::Settings;
use http::{header::CONTENT_TYPE, HeaderValue, Method};
use metrics::ContactMetrics;
use projects::ProjectCatalog;
use state::AppState;
use std::{net::TcpListener, path::Path};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
};

#[derive(Debug)]
pub struct App {
    listener: TcpListener,
    router: Router,
}

impl App {
    /// Bind the listener and wire every dependency described by `config`.
    pub fn build(config: Settings) -> anyhow::Result<Self> {
        let owner = config
            .email
            .owner_address()
            .map_err(anyhow::Error::msg)?;
        let email_transport = email_client::build_transport(&config.email)?;
        let metrics = ContactMetrics::new()?;
        let projects =
            ProjectCatalog::embedded().context("Failed to load the embedded project gallery")?;

        let app_state = AppState::create(owner, email_transport, metrics, projects);
        let router = Self::build_router(
            &app_state,
            &config.application.static_dir,
            &config.application.allowed_origins,
        )?;

        let listener = TcpListener::bind(config.application.address())
            .with_context(|| format!("Failed to bind {}", config.application.address()))?;

        Ok(Self { listener, router })
    }

    /// The port the app is listening on. Useful when binding to port 0.
    pub fn port(&self) -> u16 {
        self.listener
            .local_addr()
            .map(|addr| addr.port())
            .unwrap_or_default()
    }

    /// Serve requests until the process is stopped.
    pub async fn run_until_stopped(self) -> anyhow::Result<()> {
        tracing::info!("Server running at {}", self.listener.local_addr()?);
        Server::from_tcp(self.listener)?
            .serve(self.router.into_make_service())
            .await?;
        Ok(())
    }

    /// Build the router for the application.
    fn build_router(
        app_state: &AppState,
        static_dir: &Path,
        allowed_origins: &[String],
    ) -> anyhow::Result<Router> {
        use tower_http::{
            request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
            trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
        };
        use tracing::Level;

        let router = routes::build_router(app_state)
            .fallback_service(ServeDir::new(static_dir).append_index_html_on_directories(true))
            .layer(cors_layer(allowed_origins)?)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(
                        DefaultMakeSpan::new()
                            .level(Level::INFO)
                            .include_headers(false),
                    )
                    .on_request(DefaultOnRequest::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

        Ok(router)
    }
}

/// Allow the listed origins, or any origin when the list is empty.
fn cors_layer(allowed_origins: &[String]) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }

    let origins = allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("`{origin}` is not a valid origin"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}
