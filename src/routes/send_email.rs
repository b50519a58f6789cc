use crate::{
    domain::{ContactForm, ContactSubmission, FieldErrors},
    email_client::{EmailTransport, OutgoingEmail, TransportError},
    metrics::{ContactMetrics, SubmissionOutcome},
    state::OwnerAddress,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, serde::Serialize, serde::Deserialize, ToSchema)]
pub struct SendEmailResponse {
    pub success: bool,
    pub message: String,
}

/// JSON envelope for every failure of the endpoint.
#[derive(Debug, serde::Serialize, serde::Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Relay a contact form submission to the site owner's mailbox.
#[tracing::instrument(
    name = "Relaying a contact submission",
    skip(owner, transport, metrics, payload),
    fields(
        contact_email = tracing::field::Empty,
        contact_name = tracing::field::Empty,
    )
)]
#[utoipa::path(
    post,
    path = "/send-email",
    request_body = ContactForm,
    responses(
        (status = OK, description = "The message was handed to the email provider", body = SendEmailResponse),
        (status = BAD_REQUEST, description = "Invalid submission, or the email provider refused the message", body = ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Unexpected failure while sending", body = ErrorResponse),
    )
)]
pub async fn send_email(
    State(owner): State<Arc<OwnerAddress>>,
    State(transport): State<Arc<dyn EmailTransport>>,
    State(metrics): State<Arc<ContactMetrics>>,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> Result<Json<SendEmailResponse>, SendEmailError> {
    let outcome = relay(&owner, transport.as_ref(), payload).await;

    match &outcome {
        Ok(_) => {
            tracing::info!("Contact submission has been relayed");
            metrics.record(SubmissionOutcome::Sent);
        }
        Err(e) => {
            match e {
                SendEmailError::UnexpectedError(_) => {
                    tracing::error!(error.cause_chain = ?e, "Failed to relay contact submission")
                }
                _ => tracing::warn!(error.cause_chain = ?e, "Contact submission was not relayed"),
            }
            metrics.record(e.outcome());
        }
    }

    outcome.map(|_| {
        Json(SendEmailResponse {
            success: true,
            message: "Message sent successfully.".to_string(),
        })
    })
}

/// Validate the payload and hand it to the transport exactly once.
async fn relay(
    owner: &OwnerAddress,
    transport: &dyn EmailTransport,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> Result<(), SendEmailError> {
    let Json(form) = payload.map_err(SendEmailError::MalformedBody)?;
    let submission: ContactSubmission = form.try_into()?;

    let span = tracing::Span::current();
    span.record(
        "contact_email",
        &tracing::field::display(&submission.email),
    );
    span.record("contact_name", submission.name.as_ref());

    let email = OutgoingEmail::contact_form(owner.0.clone(), &submission);
    transport.send(&email).await?;

    Ok(())
}

/// Every way a submission can fail to be relayed.
#[derive(thiserror::Error)]
pub enum SendEmailError {
    #[error("{0}")]
    ValidationError(#[from] FieldErrors),
    #[error("Request body must be a JSON object with name, email, subject and message.")]
    MalformedBody(#[source] JsonRejection),
    #[error("Failed to send email.")]
    TransportError(String),
    #[error("Failed to send email.")]
    UnexpectedError(#[source] anyhow::Error),
}

impl SendEmailError {
    fn outcome(&self) -> SubmissionOutcome {
        match self {
            Self::ValidationError(_) | Self::MalformedBody(_) => SubmissionOutcome::Invalid,
            Self::TransportError(_) => SubmissionOutcome::TransportError,
            Self::UnexpectedError(_) => SubmissionOutcome::UnexpectedError,
        }
    }
}

impl From<TransportError> for SendEmailError {
    fn from(value: TransportError) -> Self {
        match value {
            TransportError::Rejected(details) => Self::TransportError(details),
            TransportError::Unexpected(e) => Self::UnexpectedError(e),
        }
    }
}

impl IntoResponse for SendEmailError {
    fn into_response(self) -> Response {
        let (status, details) = match &self {
            Self::ValidationError(_) | Self::MalformedBody(_) => (StatusCode::BAD_REQUEST, None),
            Self::TransportError(details) => (StatusCode::BAD_REQUEST, Some(details.clone())),
            Self::UnexpectedError(e) => (StatusCode::INTERNAL_SERVER_ERROR, Some(format!("{e:#}"))),
        };

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
                details,
            }),
        )
            .into_response()
    }
}
