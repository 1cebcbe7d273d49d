//! Postmark email service implementation

use async_trait::async_trait;
use clap::Parser;
use tracing::{debug, info};

use crate::domain::communication::mailer::{message::Message, Mailer};

mod client;
mod errors;

pub use client::{
    PostmarkApi, PostmarkClient, SendEmailRequest, SendEmailResponse, DEFAULT_BASE_URL,
};
pub use errors::{MailerError, PostmarkError};

/// Postmark configuration
#[derive(Clone, Debug, Parser)]
pub struct PostmarkConfig {
    /// The Postmark server API token
    #[clap(long = "postmark-api-key", env = "POSTMARK_API_KEY")]
    pub api_key: Option<String>,

    /// The Postmark API base URL
    #[clap(long = "postmark-base-url", env = "POSTMARK_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

/// Postmark mailer
///
/// Sends each message with a single Postmark API call. Failures are returned
/// to the caller as they are; nothing is retried.
#[derive(Debug, Clone)]
pub struct PostmarkMailer<A = PostmarkClient>
where
    A: PostmarkApi,
{
    api_key: Option<String>,
    api: A,
}

impl PostmarkMailer {
    /// Create a new Postmark mailer
    pub fn new(config: PostmarkConfig) -> Self {
        Self::with_api(config.api_key, PostmarkClient::new(config.base_url))
    }
}

impl<A> PostmarkMailer<A>
where
    A: PostmarkApi,
{
    /// Create a Postmark mailer that sends through `api`
    pub fn with_api(api_key: Option<String>, api: A) -> Self {
        Self { api_key, api }
    }

    fn server_token(&self) -> Result<&str, MailerError> {
        match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(MailerError::Configuration(
                "postmark server token is missing".to_string(),
            )),
        }
    }
}

#[async_trait]
impl<A> Mailer for PostmarkMailer<A>
where
    A: PostmarkApi,
{
    type Message = Message;
    type Receipt = SendEmailResponse;
    type Error = MailerError;

    fn compose(&self) -> Message {
        Message::new()
    }

    async fn send(&self, message: Message) -> Result<SendEmailResponse, MailerError> {
        let server_token = self.server_token()?;

        let request = SendEmailRequest::from(message);

        debug!(
            to = ?request.to,
            subject = ?request.subject,
            attachments = request.attachments.len(),
            "sending email via postmark"
        );

        let response = self.api.send_email(server_token, &request).await?;

        info!(message_id = ?response.message_id, "postmark accepted email");

        Ok(response)
    }
}
