//! Email message

use std::path::Path;

use crate::domain::communication::addresses::{stringify_emails, Addresses};

use super::{AttachOptions, Attachment, MailMessage, MessageError};

/// The only character set a [`Message`] can use
pub const CHARSET: &str = "utf-8";

/// Email message
///
/// Besides the usual fields a message carries a Postmark [tag](Message::set_tag),
/// a list of raw headers and its attachments. Messages cannot be rendered to
/// raw text and do not support inline content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Message {
    from: Option<Addresses>,
    to: Option<Addresses>,
    reply_to: Option<Addresses>,
    cc: Option<Addresses>,
    bcc: Option<Addresses>,
    subject: Option<String>,
    text_body: Option<String>,
    html_body: Option<String>,
    attachments: Vec<Attachment>,
    tag: Option<String>,
    headers: Vec<String>,
}

impl Message {
    /// Creates an empty message
    pub fn new() -> Self {
        Self::default()
    }

    /// The Postmark tag
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Sets the Postmark tag used to categorize the message
    pub fn set_tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.tag = Some(tag.into());
        self
    }

    /// Adds a raw header such as `X-Campaign: spring`
    pub fn add_header(&mut self, header: impl Into<String>) -> &mut Self {
        self.headers.push(header.into());
        self
    }

    /// The headers in the order they were added, or [`None`] if there are none
    pub fn headers(&self) -> Option<&[String]> {
        if self.headers.is_empty() {
            None
        } else {
            Some(&self.headers)
        }
    }

    /// The attachments in the order they were added
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Consumes the message, returning its attachments
    pub fn into_attachments(self) -> Vec<Attachment> {
        self.attachments
    }
}

impl MailMessage for Message {
    fn charset(&self) -> &str {
        CHARSET
    }

    fn set_charset(&mut self, _charset: &str) -> Result<&mut Self, MessageError> {
        Err(MessageError::NotSupported("changing the charset"))
    }

    fn from(&self) -> Option<String> {
        stringify_emails(self.from.as_ref())
    }

    fn set_from(&mut self, from: impl Into<Addresses>) -> &mut Self {
        self.from = Some(from.into());
        self
    }

    fn to(&self) -> Option<String> {
        stringify_emails(self.to.as_ref())
    }

    fn set_to(&mut self, to: impl Into<Addresses>) -> &mut Self {
        self.to = Some(to.into());
        self
    }

    fn reply_to(&self) -> Option<String> {
        stringify_emails(self.reply_to.as_ref())
    }

    fn set_reply_to(&mut self, reply_to: impl Into<Addresses>) -> &mut Self {
        self.reply_to = Some(reply_to.into());
        self
    }

    fn cc(&self) -> Option<String> {
        stringify_emails(self.cc.as_ref())
    }

    fn set_cc(&mut self, cc: impl Into<Addresses>) -> &mut Self {
        self.cc = Some(cc.into());
        self
    }

    fn bcc(&self) -> Option<String> {
        stringify_emails(self.bcc.as_ref())
    }

    fn set_bcc(&mut self, bcc: impl Into<Addresses>) -> &mut Self {
        self.bcc = Some(bcc.into());
        self
    }

    fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    fn set_subject(&mut self, subject: impl Into<String>) -> &mut Self {
        self.subject = Some(subject.into());
        self
    }

    fn text_body(&self) -> Option<&str> {
        self.text_body.as_deref()
    }

    fn set_text_body(&mut self, text: impl Into<String>) -> &mut Self {
        self.text_body = Some(text.into());
        self
    }

    fn html_body(&self) -> Option<&str> {
        self.html_body.as_deref()
    }

    fn set_html_body(&mut self, html: impl Into<String>) -> &mut Self {
        self.html_body = Some(html.into());
        self
    }

    fn attach(
        &mut self,
        path: impl AsRef<Path>,
        options: AttachOptions,
    ) -> Result<&mut Self, MessageError> {
        self.attachments.push(Attachment::from_file(path, options)?);
        Ok(self)
    }

    fn attach_content(
        &mut self,
        content: impl Into<Vec<u8>>,
        options: AttachOptions,
    ) -> Result<&mut Self, MessageError> {
        self.attachments
            .push(Attachment::from_content(content, options));
        Ok(self)
    }

    fn embed(
        &mut self,
        _path: impl AsRef<Path>,
        _options: AttachOptions,
    ) -> Result<String, MessageError> {
        Err(MessageError::NotSupported("embedding inline content"))
    }

    fn embed_content(
        &mut self,
        _content: impl Into<Vec<u8>>,
        _options: AttachOptions,
    ) -> Result<String, MessageError> {
        Err(MessageError::NotSupported("embedding inline content"))
    }

    fn to_string(&self) -> Result<String, MessageError> {
        Err(MessageError::NotSupported("rendering a message to raw text"))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::communication::addresses::Mailbox;

    use super::*;

    #[test]
    fn test_new_message_is_empty() {
        let message = Message::new();

        assert_eq!(message.from(), None);
        assert_eq!(message.to(), None);
        assert_eq!(message.subject(), None);
        assert_eq!(message.text_body(), None);
        assert_eq!(message.html_body(), None);
        assert_eq!(message.tag(), None);
        assert_eq!(message.headers(), None);
        assert!(message.attachments().is_empty());
        assert_eq!(message.charset(), "utf-8");
    }

    #[test]
    fn test_setters_chain_in_any_order() {
        let mut message = Message::new();

        message
            .set_subject("Hi")
            .set_tag("welcome")
            .set_to("b@example.com")
            .set_text_body("hello")
            .set_from("a@example.com")
            .set_html_body("<p>hello</p>");

        assert_eq!(message.from().as_deref(), Some("a@example.com"));
        assert_eq!(message.to().as_deref(), Some("b@example.com"));
        assert_eq!(message.subject(), Some("Hi"));
        assert_eq!(message.text_body(), Some("hello"));
        assert_eq!(message.html_body(), Some("<p>hello</p>"));
        assert_eq!(message.tag(), Some("welcome"));
    }

    #[test]
    fn test_address_getters_format_lists() {
        let mut message = Message::new();

        message
            .set_from(vec![("Support, Inc.", "support@example.com")])
            .set_reply_to(vec![Mailbox::named("Help Desk", "help@example.com")])
            .set_cc(vec!["c1@example.com", "c2@example.com"])
            .set_bcc("audit@example.com");

        assert_eq!(
            message.from().as_deref(),
            Some("\"Support, Inc.\" <support@example.com>")
        );
        assert_eq!(
            message.reply_to().as_deref(),
            Some("Help Desk <help@example.com>")
        );
        assert_eq!(
            message.cc().as_deref(),
            Some("c1@example.com, c2@example.com")
        );
        assert_eq!(message.bcc().as_deref(), Some("audit@example.com"));
    }

    #[test]
    fn test_headers_keep_order() {
        let mut message = Message::new();

        message
            .add_header("X-First: 1")
            .add_header("X-Second: 2");

        assert_eq!(
            message.headers(),
            Some(&["X-First: 1".to_string(), "X-Second: 2".to_string()][..])
        );
    }

    #[test]
    fn test_attachments_keep_order() -> TestResult {
        let mut message = Message::new();

        message
            .attach_content("one", AttachOptions::default().file_name("one.txt"))?
            .attach_content(vec![0u8, 1, 2], AttachOptions::default())?;

        let names: Vec<&str> = message
            .attachments()
            .iter()
            .map(Attachment::file_name)
            .collect();

        assert_eq!(names, vec!["one.txt", "no-name"]);
        assert_eq!(message.into_attachments().len(), 2);

        Ok(())
    }

    #[test]
    fn test_attach_missing_file_fails() {
        let mut message = Message::new();

        let result = message.attach("/does/not/exist.pdf", AttachOptions::default());

        assert!(matches!(result, Err(MessageError::Attachment { .. })));
        assert!(message.attachments().is_empty());
    }

    #[test]
    fn test_set_charset_is_not_supported() {
        let mut message = Message::new();

        assert!(matches!(
            message.set_charset("iso-8859-1"),
            Err(MessageError::NotSupported(_))
        ));
        assert!(matches!(
            message.set_charset("utf-8"),
            Err(MessageError::NotSupported(_))
        ));
        assert_eq!(message.charset(), "utf-8");
    }

    #[test]
    fn test_unsupported_operations() {
        let mut message = Message::new();
        message
            .set_from("a@example.com")
            .set_to("b@example.com")
            .set_text_body("hello");

        assert!(matches!(
            message.embed("logo.png", AttachOptions::default()),
            Err(MessageError::NotSupported(_))
        ));
        assert!(matches!(
            message.embed_content(b"png".to_vec(), AttachOptions::default()),
            Err(MessageError::NotSupported(_))
        ));
        assert!(matches!(
            MailMessage::to_string(&message),
            Err(MessageError::NotSupported(_))
        ));
    }
}
