use crate::domain::ContactEmail;
use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::{path::PathBuf, time::Duration};
use url::Url;

/// Retrive the configuration for the application.
///
/// Layers, from lowest to highest precedence: `configuration/base.yaml`,
/// `configuration/{APP_ENVIRONMENT}.yaml` and `APP_`-prefixed environment
/// variables, e.g. `APP_APPLICATION__PORT=5001`.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(e.to_string()))?
        .join("configuration");

    let environment: AppEnvironment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    Config::builder()
        .add_source(File::new(
            base_path.join("base.yaml").to_string_lossy().as_ref(),
            FileFormat::Yaml,
        ))
        .add_source(File::new(
            base_path
                .join(format!("{}.yaml", environment.as_str()))
                .to_string_lossy()
                .as_ref(),
            FileFormat::Yaml,
        ))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("application.allowed_origins")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

#[derive(Debug, Clone, serde::Deserialize, Getters)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email: EmailSettings,
}

#[derive(Debug, Clone, serde::Deserialize, Getters)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    /// Directory holding the prebuilt site bundle.
    pub static_dir: PathBuf,
    /// Origins allowed to call the API cross-origin. Empty means any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, serde::Deserialize, Getters)]
pub struct EmailSettings {
    /// Mailbox every contact submission is delivered to.
    pub owner: String,
    /// Address the relay account sends as.
    pub sender: String,
    pub transport: TransportSettings,
}

impl EmailSettings {
    pub fn owner_address(&self) -> Result<ContactEmail, String> {
        ContactEmail::parse(self.owner.clone())
            .map_err(|e| format!("Invalid owner address `{}`: {e}", self.owner))
    }

    pub fn sender_address(&self) -> Result<ContactEmail, String> {
        ContactEmail::parse(self.sender.clone())
            .map_err(|e| format!("Invalid sender address `{}`: {e}", self.sender))
    }
}

/// Which outbound email transport to relay submissions through.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransportSettings {
    Smtp(SmtpSettings),
    Api(ApiSettings),
}

#[derive(Debug, Clone, serde::Deserialize, Getters)]
pub struct SmtpSettings {
    /// E.g. `smtps://smtp.gmail.com:465`.
    pub url: String,
    pub username: String,
    pub password: Secret<String>,
}

#[derive(Debug, Clone, serde::Deserialize, Getters)]
pub struct ApiSettings {
    pub base_url: String,
    pub authorization_token: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl ApiSettings {
    pub fn parsed_base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.base_url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

/// The possible runtime environment for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Local,
    Production,
}

impl AppEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppEnvironment::Local => "local",
            AppEnvironment::Production => "production",
        }
    }
}

impl TryFrom<String> for AppEnvironment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{other} is not a supported environment. Use either `local` or `production`."
            )),
        }
    }
}
