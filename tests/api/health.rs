use crate::helpers::spawn_app;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn health_check_works() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.get("/health").await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn build_info_reports_the_crate_version() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.get("/health/info").await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["build_timestamp"].is_string());
}
