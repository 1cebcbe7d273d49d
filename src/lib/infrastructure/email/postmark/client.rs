//! Postmark API client

use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client};
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::mailer::{message::Message, Attachment, MailMessage};

use super::errors::PostmarkError;

/// The production Postmark API
pub const DEFAULT_BASE_URL: &str = "https://api.postmarkapp.com";

const SERVER_TOKEN_HEADER: &str = "X-Postmark-Server-Token";

/// The body of a Postmark "send email" call
///
/// Fields are declared, and serialized, in the order Postmark's send call
/// takes them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendEmailRequest {
    /// Sender
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    /// Recipients
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    /// Subject line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// HTML body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_body: Option<String>,

    /// Plain text body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_body: Option<String>,

    /// Tag used to categorize the message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Whether Postmark records opens
    pub track_opens: bool,

    /// Reply-to address(es)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,

    /// Carbon copy recipients
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,

    /// Blind carbon copy recipients
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<String>,

    /// Raw `Name: Value` headers
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_headers"
    )]
    pub headers: Option<Vec<String>>,

    /// Attachments
    pub attachments: Vec<Attachment>,
}

impl From<Message> for SendEmailRequest {
    fn from(message: Message) -> Self {
        Self {
            from: message.from(),
            to: message.to(),
            subject: message.subject().map(str::to_string),
            html_body: message.html_body().map(str::to_string),
            text_body: message.text_body().map(str::to_string),
            tag: message.tag().map(str::to_string),
            track_opens: true,
            reply_to: message.reply_to(),
            cc: message.cc(),
            bcc: message.bcc(),
            headers: message.headers().map(<[String]>::to_vec),
            attachments: message.into_attachments(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Header<'a> {
    name: &'a str,
    value: &'a str,
}

impl<'a> From<&'a str> for Header<'a> {
    fn from(raw: &'a str) -> Self {
        match raw.split_once(':') {
            Some((name, value)) => Header {
                name: name.trim(),
                value: value.trim(),
            },
            None => Header {
                name: raw.trim(),
                value: "",
            },
        }
    }
}

fn serialize_headers<S: Serializer>(
    headers: &Option<Vec<String>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let headers: Option<Vec<Header<'_>>> = headers
        .as_ref()
        .map(|headers| headers.iter().map(|raw| Header::from(raw.as_str())).collect());

    headers.serialize(serializer)
}

/// Postmark's reply to a "send email" call, as returned by the API
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendEmailResponse {
    /// The recipients Postmark accepted
    pub to: Option<String>,

    /// When Postmark accepted the message
    pub submitted_at: Option<String>,

    /// Postmark's ID for the message
    #[serde(rename = "MessageID")]
    pub message_id: Option<String>,

    /// Postmark's error code, `0` on success
    #[serde(default)]
    pub error_code: i64,

    /// Postmark's status message
    #[serde(default)]
    pub message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ErrorBody {
    error_code: i64,
    message: String,
}

/// The Postmark "send email" operation
#[async_trait]
pub trait PostmarkApi: Clone + Send + Sync + 'static {
    /// Sends one email
    ///
    /// # Arguments
    /// * `server_token` - The Postmark server API token.
    /// * `request` - The email to send.
    ///
    /// # Returns
    /// Postmark's response, or the [`PostmarkError`] describing why the call
    /// failed.
    async fn send_email(
        &self,
        server_token: &str,
        request: &SendEmailRequest,
    ) -> Result<SendEmailResponse, PostmarkError>;
}

#[cfg(test)]
mock! {
    pub PostmarkApi {}

    impl Clone for PostmarkApi {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl PostmarkApi for PostmarkApi {
        async fn send_email(&self, server_token: &str, request: &SendEmailRequest) -> Result<SendEmailResponse, PostmarkError>;
    }
}

/// HTTP client for the Postmark API
#[derive(Debug, Clone)]
pub struct PostmarkClient {
    http: Client,
    base_url: String,
}

impl PostmarkClient {
    /// Creates a client for the API at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl PostmarkApi for PostmarkClient {
    async fn send_email(
        &self,
        server_token: &str,
        request: &SendEmailRequest,
    ) -> Result<SendEmailResponse, PostmarkError> {
        let url = format!("{}/email", self.base_url.trim_end_matches('/'));

        debug!(%url, "posting email to postmark");

        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .header(SERVER_TOKEN_HEADER, server_token)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        debug!(status = status.as_u16(), "postmark responded");

        let unexpected = |body: String| PostmarkError::UnexpectedResponse {
            status: status.as_u16(),
            body,
        };

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|_| unexpected(body));
        }

        match serde_json::from_str::<ErrorBody>(&body) {
            Ok(error) => Err(PostmarkError::Api {
                status: status.as_u16(),
                error_code: error.error_code,
                message: error.message,
            }),
            Err(_) => Err(unexpected(body)),
        }
    }
}
