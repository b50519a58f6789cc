use crate::helpers::{spawn_app, spawn_app_with_origins, INDEX_HTML};
use axum::http::{
    header::{ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN},
    Method, StatusCode,
};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn root_serves_the_site_index() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.get("/").await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), INDEX_HTML);
}

#[tokio::test]
async fn other_site_assets_are_served_from_the_bundle() {
    // Arrange
    let app = spawn_app().await;
    std::fs::write(app.site().path().join("styles.css"), "body {}").unwrap();

    // Act
    let response = app.get("/styles.css").await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "body {}");
}

#[tokio::test]
async fn missing_assets_are_not_found() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.get("/resume.pdf").await;

    // Assert
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn any_origin_is_allowed_by_default() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app
        .api_client()
        .request(Method::OPTIONS, app.at_url("/send-email"))
        .header(ORIGIN, "https://someone.example")
        .header(ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert_eq!(
        response
            .headers()
            .get(ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|x| x.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn only_configured_origins_are_allowed() {
    // Arrange
    let app = spawn_app_with_origins(vec!["https://portfolio.example".into()]).await;

    // Act
    let allowed = app
        .api_client()
        .request(Method::OPTIONS, app.at_url("/send-email"))
        .header(ORIGIN, "https://portfolio.example")
        .header(ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .send()
        .await
        .expect("Failed to execute request.");
    let refused = app
        .api_client()
        .request(Method::OPTIONS, app.at_url("/send-email"))
        .header(ORIGIN, "https://elsewhere.example")
        .header(ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert_eq!(
        allowed
            .headers()
            .get(ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|x| x.to_str().ok()),
        Some("https://portfolio.example")
    );
    assert!(refused.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
