use std::time::Duration;

use anyhow::Context;
use secrecy::SecretString;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::domain::NotificationRouting;
use crate::email_client::EmailClient;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Settings {
    pub app: ApplicationSettings,
    pub email_client: EmailClientSettings,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub api_key: SecretString,
    pub sender: Option<String>,
    pub recipient: Option<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_ms: u64,
}

impl EmailClientSettings {
    pub fn client(&self) -> Result<EmailClient, anyhow::Error> {
        EmailClient::new(&self.base_url, self.api_key.clone(), self.timeout())
            .context("Failed to build the email client.")
    }

    /// Sender and recipient of the operator notification. Unset or blank
    /// values fall back to the built-in defaults.
    pub fn routing(&self) -> NotificationRouting {
        NotificationRouting::new(self.sender.clone(), self.recipient.clone())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            other => Err(format!(
                "{other} is not supported environment. Try to use `local` or `production`",
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
    let conf_dir = base_path.join("configuration");
    let env: Environment = std::env::var("APP_ENV")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    let settings = config::Config::builder()
        .add_source(
            config::File::with_name(&conf_dir.join("base").to_string_lossy()).required(true),
        )
        .add_source(
            config::File::with_name(&conf_dir.join(env.as_str()).to_string_lossy())
                .required(true),
        )
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .prefix_separator("_"),
        )
        // Names used by the provider's own tooling win over everything else.
        .set_override_option("email_client.api_key", std::env::var("RESEND_API_KEY").ok())?
        .set_override_option("email_client.sender", std::env::var("RESEND_FROM").ok())?
        .set_override_option("email_client.recipient", std::env::var("RESEND_TO").ok())?
        .build()?;

    settings.try_deserialize::<Settings>()
}
