use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::domain::NotificationMessage;

#[derive(thiserror::Error, Debug)]
pub enum SendEmailError {
    #[error("Email provider rejected the message with status {status}: {body}")]
    Rejected { status: StatusCode, body: String },
    #[error("Failed to reach the email provider.")]
    Transport(#[from] reqwest::Error),
}

impl SendEmailError {
    /// The provider answered with a failure, or did not answer in time.
    pub fn is_delivery_failure(&self) -> bool {
        match self {
            SendEmailError::Rejected { .. } => true,
            SendEmailError::Transport(e) => e.is_timeout(),
        }
    }
}

/// Delivers a single transactional email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(&self, message: NotificationMessage) -> Result<(), SendEmailError>;
}

#[derive(Clone, Debug)]
pub struct EmailClient {
    http_client: Client,
    endpoint: Url,
    api_key: SecretString,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    reply_to: &'a str,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

impl EmailClient {
    /// Messages are posted to `{base_url}/emails`. A path on `base_url` is
    /// kept whether or not it ends with a slash.
    pub fn new(
        base_url: &str,
        api_key: SecretString,
        timeout: Duration,
    ) -> Result<Self, anyhow::Error> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let endpoint = base_url.join("emails")?;
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl EmailSender for EmailClient {
    #[tracing::instrument(
        name = "Sending an email through the provider",
        skip(self, message),
        fields(reply_to = %message.reply_to)
    )]
    async fn send_email(&self, message: NotificationMessage) -> Result<(), SendEmailError> {
        let body = SendEmailRequest {
            from: &message.from,
            to: vec![&message.to],
            reply_to: message.reply_to.as_ref(),
            subject: &message.subject,
            html: &message.html,
            text: &message.text,
        };

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SendEmailError::Rejected { status, body });
        }

        Ok(())
    }
}
