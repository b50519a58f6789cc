use derive_getters::Getters;
use once_cell::sync::Lazy;
use portfolio_contact::{
    configuration::{get_configuration, ApiSettings, TransportSettings},
    telemetry::{get_subscriber, init_subscriber},
    App,
};
use reqwest::{Client, Response};
use secrecy::Secret;
use tempfile::TempDir;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, Request, ResponseTemplate,
};

pub const OWNER: &str = "owner@example.com";
pub const INDEX_HTML: &str = "<!DOCTYPE html><html><body>Portfolio</body></html>";

static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber("test".into(), std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber("test".into(), std::io::sink);
        init_subscriber(subscriber);
    };
});

#[derive(Getters)]
pub struct TestApp {
    address: String,
    email_server: MockServer,
    api_client: Client,
    site: TempDir,
}

/// Spawn a instance of the app on a random port, relaying through a mock
/// email API.
pub async fn spawn_app() -> TestApp {
    spawn_app_with_origins(vec![]).await
}

pub async fn spawn_app_with_origins(allowed_origins: Vec<String>) -> TestApp {
    Lazy::force(&TRACING);

    let email_server = MockServer::start().await;
    let site = tempfile::tempdir().expect("Failed to create site directory");
    std::fs::write(site.path().join("index.html"), INDEX_HTML).expect("Failed to write index");

    let config = {
        let mut c = get_configuration().expect("Failed to read configuration");

        // Make OS choose random port
        c.application.host = "127.0.0.1".into();
        c.application.port = 0;
        c.application.static_dir = site.path().to_path_buf();
        c.application.allowed_origins = allowed_origins;
        c.email.owner = OWNER.into();
        c.email.transport = TransportSettings::Api(ApiSettings {
            base_url: email_server.uri(),
            authorization_token: Secret::new("test-token".into()),
            timeout_milliseconds: 500,
        });

        c
    };

    let app = App::build(config).expect("Failed to build app");
    let application_port = app.port();
    let _ = tokio::spawn(app.run_until_stopped());

    TestApp {
        address: format!("http://127.0.0.1:{application_port}"),
        email_server,
        api_client: Client::new(),
        site,
    }
}

impl TestApp {
    pub fn at_url(&self, path: &str) -> String {
        format!("{}{path}", self.address)
    }

    pub async fn post_send_email(&self, body: &serde_json::Value) -> Response {
        self.api_client
            .post(self.at_url("/send-email"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, path: &str) -> Response {
        self.api_client
            .get(self.at_url(path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn mock_send_email_endpoint_to_ok(&self) {
        Mock::given(path("/email"))
            .and(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&self.email_server)
            .await;
    }

    /// Requests the email API received, decoded as JSON.
    pub async fn sent_emails(&self) -> Vec<serde_json::Value> {
        self.email_server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r: &Request| serde_json::from_slice(&r.body).expect("Email body to be JSON"))
            .collect()
    }
}

pub fn valid_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Jane",
        "email": "jane@example.com",
        "subject": "Hi",
        "message": "Hello there, this is long enough.",
    })
}
