use crate::helpers::spawn_app;
use axum::http::StatusCode;
use portfolio_contact::{
    client::{ContactClient, ContactFormState, NotificationKind, SubmissionResult},
    domain::Field,
};
use pretty_assertions::assert_eq;
use reqwest::Url;
use wiremock::{matchers::any, Mock, ResponseTemplate};

fn filled_form() -> ContactFormState {
    let mut state = ContactFormState::new();
    state.on_input(Field::Name, "Jane");
    state.on_input(Field::Email, "jane@example.com");
    state.on_input(Field::Subject, "Hi");
    state.on_input(Field::Message, "Hello there, this is long enough.");
    state
}

#[tokio::test]
async fn a_valid_form_is_relayed_and_reset() {
    // Arrange
    let app = spawn_app().await;
    app.mock_send_email_endpoint_to_ok().await;
    let client = ContactClient::new(&Url::parse(app.address()).unwrap()).unwrap();
    let mut state = filled_form();

    // Act
    let result = state.submit(&client).await;

    // Assert
    assert_eq!(result, Some(SubmissionResult::Sent));
    assert!(!state.is_sending());
    assert_eq!(state.form().name, "");
    assert_eq!(
        state.notification().map(|n| n.kind),
        Some(NotificationKind::Success)
    );
    assert_eq!(app.sent_emails().await.len(), 1);
}

#[tokio::test]
async fn an_invalid_form_never_reaches_the_relay() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(StatusCode::OK))
        .expect(0)
        .mount(app.email_server())
        .await;
    let client = ContactClient::new(&Url::parse(app.address()).unwrap()).unwrap();
    let mut state = filled_form();
    state.on_input(Field::Email, "jane");

    // Act
    let result = state.submit(&client).await;

    // Assert
    assert_eq!(result, None);
    assert!(state.field_error(Field::Email).is_some());
    assert!(state.notification().is_none());
}

#[tokio::test]
async fn a_refused_send_shows_the_provider_details() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(StatusCode::UNPROCESSABLE_ENTITY)
                .set_body_json(serde_json::json!({ "Message": "Inactive recipient" })),
        )
        .mount(app.email_server())
        .await;
    let client = ContactClient::new(&Url::parse(app.address()).unwrap()).unwrap();
    let mut state = filled_form();

    // Act
    state.submit(&client).await;

    // Assert
    let notification = state.notification().expect("A notification to be shown");
    assert_eq!(notification.kind, NotificationKind::Error);
    assert_eq!(
        notification.message,
        "Failed to send message. Please try again later.\nError: Inactive recipient"
    );
    assert_eq!(state.form().name, "Jane");
    assert!(!state.is_sending());
}
