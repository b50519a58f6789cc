use super::{ContactClient, SubmissionResult};
use crate::domain::{validate_field, ContactForm, ContactSubmission, Field, FieldError};
use std::{
    collections::BTreeMap,
    time::{Duration, Instant},
};

/// How long a notification stays on screen.
pub const NOTIFICATION_LIFETIME: Duration = Duration::from_secs(5);

const SUBMIT_LABEL: &str = "Send Message";
const SENDING_LABEL: &str = "Sending...";
const SENT_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";
const REJECTED_MESSAGE: &str = "Failed to send message. Please try again later.";
const NETWORK_MESSAGE: &str =
    "Failed to send message. Please check your connection or try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

/// A transient toast shown to the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    shown_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= NOTIFICATION_LIFETIME
    }
}

/// View state of the contact form: the typed values, inline field errors,
/// the submit control and the current notification.
#[derive(Debug, Clone, Default)]
pub struct ContactFormState {
    form: ContactForm,
    errors: BTreeMap<Field, FieldError>,
    sending: bool,
    notification: Option<Notification>,
}

impl ContactFormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn field_error(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Label of the submit button; it is disabled while sending.
    pub fn submit_label(&self) -> &'static str {
        if self.sending {
            SENDING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Update a field as the visitor types. A field already marked invalid
    /// is re-checked on every keystroke so the error clears as soon as it is
    /// fixed.
    pub fn on_input(&mut self, field: Field, value: impl Into<String>) {
        *self.form.value_mut(field) = value.into();
        if self.errors.contains_key(&field) {
            self.check_field(field);
        }
    }

    /// Check a field when it loses focus.
    pub fn on_blur(&mut self, field: Field) {
        self.check_field(field);
    }

    fn check_field(&mut self, field: Field) {
        match validate_field(field, self.form.value(field)) {
            Ok(()) => {
                self.errors.remove(&field);
            }
            Err(error) => {
                self.errors.insert(field, error);
            }
        }
    }

    /// Validate the whole form. On success the submit control switches to its
    /// sending state and the submission to post is returned. Nothing is
    /// returned while a previous submission is still in flight.
    pub fn begin_submit(&mut self) -> Option<ContactSubmission> {
        if self.sending {
            return None;
        }

        self.errors.clear();
        match ContactSubmission::parse(self.form.clone()) {
            Ok(submission) => {
                self.sending = true;
                Some(submission)
            }
            Err(errors) => {
                self.errors = errors.into_iter().map(|e| (e.field(), e)).collect();
                None
            }
        }
    }

    /// Apply the result of a submission. The submit control is always
    /// re-enabled, whatever the outcome.
    pub fn finish_submit(&mut self, result: SubmissionResult, now: Instant) {
        self.sending = false;

        match result {
            SubmissionResult::Sent => {
                self.form = ContactForm::default();
                self.show_notification(NotificationKind::Success, SENT_MESSAGE, now);
            }
            SubmissionResult::Rejected { details } => {
                let message = match details {
                    Some(details) => format!("{REJECTED_MESSAGE}\nError: {details}"),
                    None => REJECTED_MESSAGE.to_string(),
                };
                self.show_notification(NotificationKind::Error, message, now);
            }
            SubmissionResult::Network(error) => {
                self.show_notification(
                    NotificationKind::Error,
                    format!("{NETWORK_MESSAGE}\nError: {error}"),
                    now,
                );
            }
        }
    }

    /// Validate, post and apply the result in one go.
    pub async fn submit(&mut self, client: &ContactClient) -> Option<SubmissionResult> {
        let submission = self.begin_submit()?;
        let result = client.send(&submission).await;
        self.finish_submit(result.clone(), Instant::now());
        Some(result)
    }

    /// Show a notification, replacing any previous one.
    pub fn show_notification(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        now: Instant,
    ) {
        self.notification = Some(Notification {
            kind,
            message: message.into(),
            shown_at: now,
        });
    }

    /// Drop the notification once its lifetime has elapsed.
    pub fn dismiss_expired(&mut self, now: Instant) {
        if self
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired(now))
        {
            self.notification = None;
        }
    }
}
