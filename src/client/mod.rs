//! The browser side of the contact pipeline: posting a validated submission
//! to the relay, and the form's view state around that round trip.

mod form;

pub use form::{ContactFormState, Notification, NotificationKind, NOTIFICATION_LIFETIME};

use crate::domain::{ContactForm, ContactSubmission};
use reqwest::{Client, Url};

/// What came back from one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    /// The relay accepted and sent the message.
    Sent,
    /// The relay answered but reported a failure, with its detail message if any.
    Rejected { details: Option<String> },
    /// The request never produced a usable answer.
    Network(String),
}

#[derive(Debug, serde::Deserialize)]
struct RelayReply {
    #[serde(default)]
    success: bool,
    details: Option<String>,
}

/// HTTP client for the `/send-email` endpoint.
#[derive(Debug, Clone)]
pub struct ContactClient {
    endpoint: Url,
    http_client: Client,
}

impl ContactClient {
    pub fn new(base_url: &Url) -> Result<Self, url::ParseError> {
        Ok(Self {
            endpoint: base_url.join("send-email")?,
            http_client: Client::new(),
        })
    }

    /// Post `submission` as JSON and interpret the relay's answer.
    #[tracing::instrument(name = "Submitting contact form", skip(self, submission))]
    pub async fn send(&self, submission: &ContactSubmission) -> SubmissionResult {
        let response = match self
            .http_client
            .post(self.endpoint.clone())
            .json(&ContactForm::from(submission))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return SubmissionResult::Network(e.to_string()),
        };

        match response.json::<RelayReply>().await {
            Ok(reply) if reply.success => SubmissionResult::Sent,
            Ok(reply) => SubmissionResult::Rejected {
                details: reply.details,
            },
            Err(e) => SubmissionResult::Network(e.to_string()),
        }
    }
}
