use anyhow::Context;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

/// How a single contact submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Sent,
    Invalid,
    TransportError,
    UnexpectedError,
}

impl SubmissionOutcome {
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Invalid => "invalid",
            Self::TransportError => "transport_error",
            Self::UnexpectedError => "unexpected_error",
        }
    }
}

/// Prometheus registry holding the contact relay's counters.
#[derive(Debug, Clone)]
pub struct ContactMetrics {
    registry: Registry,
    submissions: IntCounterVec,
}

impl ContactMetrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();
        let submissions = IntCounterVec::new(
            Opts::new(
                "contact_submissions_total",
                "Number of contact form submissions by outcome",
            ),
            &["outcome"],
        )
        .context("Failed to create `contact_submissions_total` counter")?;
        registry
            .register(Box::new(submissions.clone()))
            .context("Failed to register `contact_submissions_total` metric")?;

        Ok(Self {
            registry,
            submissions,
        })
    }

    pub fn record(&self, outcome: SubmissionOutcome) {
        self.submissions
            .with_label_values(&[outcome.as_label()])
            .inc();
    }

    pub fn submissions(&self, outcome: SubmissionOutcome) -> u64 {
        self.submissions
            .with_label_values(&[outcome.as_label()])
            .get()
    }

    /// Render every registered metric in the Prometheus text format.
    pub fn encode(&self) -> anyhow::Result<String> {
        let mut buffer = vec![];
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .context("Failed to encode metrics")?;

        String::from_utf8(buffer).context("Failed to convert metrics to a valid string")
    }
}

/// Expose the collected metrics for scraping.
#[tracing::instrument(skip(metrics))]
#[utoipa::path(
    get,
    path = "/metrics",
    responses((status = OK, description = "Prometheus metrics in text format", body = String))
)]
pub async fn metrics_endpoint(
    State(metrics): State<Arc<ContactMetrics>>,
) -> Result<String, MetricsError> {
    metrics.encode().map_err(MetricsError::UnexpectedError)
}

#[derive(thiserror::Error)]
pub enum MetricsError {
    #[error("Unexpected error when generating metrics")]
    UnexpectedError(#[source] anyhow::Error),
}

impl IntoResponse for MetricsError {
    fn into_response(self) -> Response {
        tracing::error!(error.cause_chain = ?self, "Failed to serve metrics");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
