//! Mailer and message traits

use std::{error::Error, path::Path};

use async_trait::async_trait;

use super::addresses::Addresses;

mod attachment;
mod errors;
pub mod message;

pub use attachment::{AttachOptions, Attachment};
pub use errors::MessageError;

/// An email message that can be composed independently of the provider it
/// will be sent through
///
/// Setters return `&mut Self` so they can be chained, and may be called in
/// any order.
pub trait MailMessage {
    /// The character set of the message
    fn charset(&self) -> &str;

    /// Changes the character set of the message
    fn set_charset(&mut self, charset: &str) -> Result<&mut Self, MessageError>;

    /// The formatted sender address(es)
    fn from(&self) -> Option<String>;

    /// Sets the sender address(es)
    fn set_from(&mut self, from: impl Into<Addresses>) -> &mut Self;

    /// The formatted recipient address(es)
    fn to(&self) -> Option<String>;

    /// Sets the recipient address(es)
    fn set_to(&mut self, to: impl Into<Addresses>) -> &mut Self;

    /// The formatted reply-to address(es)
    fn reply_to(&self) -> Option<String>;

    /// Sets the reply-to address(es)
    fn set_reply_to(&mut self, reply_to: impl Into<Addresses>) -> &mut Self;

    /// The formatted carbon copy address(es)
    fn cc(&self) -> Option<String>;

    /// Sets the carbon copy address(es)
    fn set_cc(&mut self, cc: impl Into<Addresses>) -> &mut Self;

    /// The formatted blind carbon copy address(es)
    fn bcc(&self) -> Option<String>;

    /// Sets the blind carbon copy address(es)
    fn set_bcc(&mut self, bcc: impl Into<Addresses>) -> &mut Self;

    /// The subject line
    fn subject(&self) -> Option<&str>;

    /// Sets the subject line
    fn set_subject(&mut self, subject: impl Into<String>) -> &mut Self;

    /// The plain text body
    fn text_body(&self) -> Option<&str>;

    /// Sets the plain text body
    fn set_text_body(&mut self, text: impl Into<String>) -> &mut Self;

    /// The HTML body
    fn html_body(&self) -> Option<&str>;

    /// Sets the HTML body
    fn set_html_body(&mut self, html: impl Into<String>) -> &mut Self;

    /// Attaches the file at `path`
    fn attach(
        &mut self,
        path: impl AsRef<Path>,
        options: AttachOptions,
    ) -> Result<&mut Self, MessageError>;

    /// Attaches in-memory content
    fn attach_content(
        &mut self,
        content: impl Into<Vec<u8>>,
        options: AttachOptions,
    ) -> Result<&mut Self, MessageError>;

    /// Embeds the file at `path` inline, returning its content ID
    fn embed(
        &mut self,
        path: impl AsRef<Path>,
        options: AttachOptions,
    ) -> Result<String, MessageError>;

    /// Embeds in-memory content inline, returning its content ID
    fn embed_content(
        &mut self,
        content: impl Into<Vec<u8>>,
        options: AttachOptions,
    ) -> Result<String, MessageError>;

    /// Renders the complete message as raw text
    fn to_string(&self) -> Result<String, MessageError>;
}

/// Email delivery service
#[async_trait]
pub trait Mailer: Clone + Send + Sync + 'static {
    /// The message type this mailer sends
    type Message: MailMessage + Send + 'static;

    /// What the provider returns for a sent message
    type Receipt: Send;

    /// Errors raised while sending
    type Error: Error + Send + Sync + 'static;

    /// Creates an empty message for this mailer
    fn compose(&self) -> Self::Message;

    /// Sends a message
    ///
    /// # Arguments
    /// * `message` - The message to send. It is consumed by the call.
    ///
    /// # Returns
    /// The provider's receipt, or the error that prevented delivery. Nothing
    /// is retried; retry policy belongs to the caller.
    async fn send(&self, message: Self::Message) -> Result<Self::Receipt, Self::Error>;
}
