//! Outbound email transports used to relay contact submissions to the
//! site owner. Two implementations are available, selected by configuration:
//! a transactional email HTTP API and an SMTP relay.

use crate::{
    configuration::{ApiSettings, EmailSettings, SmtpSettings, TransportSettings},
    domain::{ContactEmail, ContactSubmission},
};
use anyhow::Context;
use axum::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};
use std::{sync::Arc, time::Duration};

/// A fully composed email ready to be handed to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub recipient: ContactEmail,
    pub reply_to: ContactEmail,
    pub subject: String,
    pub text_body: String,
}

impl OutgoingEmail {
    /// Compose the notification the site owner receives for a submission.
    /// Replying to it goes straight back to the visitor.
    pub fn contact_form(owner: ContactEmail, submission: &ContactSubmission) -> Self {
        Self {
            recipient: owner,
            reply_to: submission.email.clone(),
            subject: format!("Contact Form: {}", submission.subject.as_ref()),
            text_body: format!(
                "From: {} <{}>\n\n{}",
                submission.name.as_ref(),
                submission.email.as_ref(),
                submission.message.as_ref()
            ),
        }
    }
}

/// Errors a transport can report when relaying an email.
#[derive(thiserror::Error)]
pub enum TransportError {
    /// The provider received the email but refused to deliver it.
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

#[async_trait]
pub trait EmailTransport: std::fmt::Debug + Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), TransportError>;
}

/// Build the transport described by the configuration.
pub fn build_transport(settings: &EmailSettings) -> anyhow::Result<Arc<dyn EmailTransport>> {
    let sender = settings.sender_address().map_err(anyhow::Error::msg)?;
    let transport: Arc<dyn EmailTransport> = match settings.transport() {
        TransportSettings::Api(api) => Arc::new(ApiEmailClient::try_from((api, sender))?),
        TransportSettings::Smtp(smtp) => {
            let owner = settings.owner_address().map_err(anyhow::Error::msg)?;
            parse_mailbox(&owner).context("Invalid owner address for SMTP")?;
            Arc::new(SmtpEmailClient::try_from((smtp, sender))?)
        }
    };
    Ok(transport)
}

/// Client for a Postmark-style transactional email API.
#[derive(Debug)]
pub struct ApiEmailClient {
    base_url: Url,
    sender: ContactEmail,
    http_client: Client,
    authorization_token: Secret<String>,
}

impl ApiEmailClient {
    /// Create a new email client.
    pub fn new(
        base_url: Url,
        sender: ContactEmail,
        authorization_token: Secret<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            base_url,
            sender,
            http_client: Client::builder().timeout(timeout).build()?,
            authorization_token,
        })
    }
}

#[async_trait]
impl EmailTransport for ApiEmailClient {
    #[tracing::instrument(name = "Sending email through API", skip(self, email))]
    async fn send(&self, email: &OutgoingEmail) -> Result<(), TransportError> {
        let url = self
            .base_url
            .join("email")
            .context("Failed to build the email endpoint url")?;
        let request_body = SendEmailRequest {
            from: self.sender.as_ref(),
            to: email.recipient.as_ref(),
            reply_to: email.reply_to.as_ref(),
            subject: &email.subject,
            text_body: &email.text_body,
        };

        let response = self
            .http_client
            .post(url)
            .header(
                "X-Postmark-Server-Token",
                self.authorization_token.expose_secret(),
            )
            .json(&request_body)
            .send()
            .await
            .context("Failed to reach the email API")?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let details = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|e| e.message)
            .unwrap_or_else(|_| {
                if body.trim().is_empty() {
                    format!("Email API responded with {status}")
                } else {
                    body
                }
            });
        tracing::warn!(%status, details = %details, "Email API refused to send email");

        Err(TransportError::Rejected(details))
    }
}

impl TryFrom<(&ApiSettings, ContactEmail)> for ApiEmailClient {
    type Error = anyhow::Error;

    fn try_from((config, sender): (&ApiSettings, ContactEmail)) -> Result<Self, Self::Error> {
        let base_url = config.parsed_base_url().map_err(|e| {
            tracing::error!("Unable to parse email client's base url: {e}");
            anyhow::anyhow!("Email base url is invalid")
        })?;
        Self::new(
            base_url,
            sender,
            config.authorization_token().clone(),
            config.timeout(),
        )
        .context("Failed to build HTTP client for the email API")
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    reply_to: &'a str,
    subject: &'a str,
    text_body: &'a str,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiErrorBody {
    message: String,
}

/// Relay through an SMTP account, e.g. a Gmail app password.
#[derive(Debug, Clone)]
pub struct SmtpEmailClient {
    sender: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailClient {
    pub fn new(
        url: &str,
        sender: ContactEmail,
        username: String,
        password: &Secret<String>,
    ) -> anyhow::Result<Self> {
        let sender = parse_mailbox(&sender).context("Invalid SMTP sender")?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)
            .with_context(|| format!("Invalid SMTP url `{url}`"))?
            .credentials(Credentials::new(
                username,
                password.expose_secret().to_owned(),
            ))
            .build();

        Ok(Self { sender, transport })
    }

    /// The reply-to address comes from the visitor. When it cannot be put in
    /// a header the email is refused; any other failure is ours.
    fn build_message(&self, email: &OutgoingEmail) -> Result<Message, TransportError> {
        let reply_to = parse_mailbox(&email.reply_to)
            .map_err(|e| TransportError::Rejected(format!("{e:#}")))?;

        let message = Message::builder()
            .from(self.sender.clone())
            .reply_to(reply_to)
            .to(parse_mailbox(&email.recipient)?)
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(email.text_body.clone())
            .context("Failed to build email message")?;
        Ok(message)
    }
}

fn parse_mailbox(address: &ContactEmail) -> anyhow::Result<Mailbox> {
    address
        .as_ref()
        .parse()
        .with_context(|| format!("`{address}` is not a deliverable address"))
}

#[async_trait]
impl EmailTransport for SmtpEmailClient {
    #[tracing::instrument(name = "Sending email through SMTP", skip(self, email))]
    async fn send(&self, email: &OutgoingEmail) -> Result<(), TransportError> {
        let message = self.build_message(email)?;

        match self.transport.send(message).await {
            Ok(response) if response.is_positive() => Ok(()),
            Ok(response) => Err(TransportError::Rejected(
                response
                    .first_line()
                    .unwrap_or("SMTP server refused the message")
                    .to_string(),
            )),
            Err(e) if e.is_permanent() || e.is_transient() => {
                tracing::warn!(error = %e, "SMTP server refused to send email");
                Err(TransportError::Rejected(e.to_string()))
            }
            Err(e) => Err(TransportError::Unexpected(
                anyhow::Error::new(e).context("Failed to talk to the SMTP server"),
            )),
        }
    }
}

impl TryFrom<(&SmtpSettings, ContactEmail)> for SmtpEmailClient {
    type Error = anyhow::Error;

    fn try_from((config, sender): (&SmtpSettings, ContactEmail)) -> Result<Self, Self::Error> {
        Self::new(
            config.url(),
            sender,
            config.username().clone(),
            config.password(),
        )
    }
}
