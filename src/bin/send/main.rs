#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Send one email through Postmark

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use postmark_mailer::{
    domain::communication::{
        mailer::{message::Message, AttachOptions, MailMessage, Mailer},
        recipients::{prepare_recipients, RecipientList, Recipients},
        validation::{is_valid, EmailPackage},
    },
    infrastructure::email::postmark::{PostmarkConfig, PostmarkMailer},
};
use tracing::debug;

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The Postmark configuration
    #[clap(flatten)]
    pub postmark: PostmarkConfig,

    /// Sender address
    #[clap(long)]
    pub from: String,

    /// Recipient address, may be repeated
    #[clap(long, required = true)]
    pub to: Vec<String>,

    /// Carbon copy address, may be repeated
    #[clap(long)]
    pub cc: Vec<String>,

    /// Blind carbon copy address, may be repeated
    #[clap(long)]
    pub bcc: Vec<String>,

    /// Reply-to address
    #[clap(long)]
    pub reply_to: Option<String>,

    /// Subject line
    #[clap(long)]
    pub subject: Option<String>,

    /// Plain text body
    #[clap(long)]
    pub text: Option<String>,

    /// HTML body
    #[clap(long)]
    pub html: Option<String>,

    /// Postmark tag
    #[clap(long)]
    pub tag: Option<String>,

    /// Raw header such as `X-Campaign: spring`, may be repeated
    #[clap(long = "header")]
    pub headers: Vec<String>,

    /// File to attach, may be repeated
    #[clap(long = "attach")]
    pub attachments: Vec<PathBuf>,

    /// Send without checking the message first
    #[clap(long)]
    pub skip_validation: bool,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mailer = PostmarkMailer::new(args.postmark.clone());
    let message = compose(&mailer, &args)?;

    if args.skip_validation {
        debug!("skipping validation");
    } else {
        is_valid(&EmailPackage::from(&message))?;
    }

    let response = mailer.send(message).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

fn recipient_list(addresses: &[String]) -> Option<RecipientList> {
    if addresses.is_empty() {
        None
    } else {
        Some(RecipientList::List(addresses.to_vec()))
    }
}

fn compose<M>(mailer: &M, args: &Args) -> Result<Message>
where
    M: Mailer<Message = Message>,
{
    let (to, cc, bcc) = prepare_recipients(Recipients {
        to: recipient_list(&args.to),
        cc: recipient_list(&args.cc),
        bcc: recipient_list(&args.bcc),
    });

    let mut message = mailer.compose();
    message.set_from(args.from.as_str());

    if let Some(to) = to {
        message.set_to(to);
    }
    if let Some(cc) = cc {
        message.set_cc(cc);
    }
    if let Some(bcc) = bcc {
        message.set_bcc(bcc);
    }
    if let Some(reply_to) = &args.reply_to {
        message.set_reply_to(reply_to.as_str());
    }
    if let Some(subject) = &args.subject {
        message.set_subject(subject.as_str());
    }
    if let Some(text) = &args.text {
        message.set_text_body(text.as_str());
    }
    if let Some(html) = &args.html {
        message.set_html_body(html.as_str());
    }
    if let Some(tag) = &args.tag {
        message.set_tag(tag.as_str());
    }

    for header in &args.headers {
        message.add_header(header.as_str());
    }

    for path in &args.attachments {
        message.attach(path, AttachOptions::default())?;
    }

    Ok(message)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn mailer() -> PostmarkMailer {
        PostmarkMailer::new(PostmarkConfig {
            api_key: Some("server-token".to_string()),
            base_url: "http://localhost".to_string(),
        })
    }

    #[test]
    fn test_compose_joins_repeated_recipients() -> TestResult {
        let args = Args::try_parse_from([
            "postmark-send",
            "--from",
            "a@example.com",
            "--to",
            "b@example.com",
            "--to",
            "c@example.com",
            "--bcc",
            "d@example.com",
            "--subject",
            "Hi",
            "--text",
            "hello",
            "--header",
            "X-Campaign: spring",
        ])?;

        let message = compose(&mailer(), &args)?;

        assert_eq!(message.from().as_deref(), Some("a@example.com"));
        assert_eq!(message.to().as_deref(), Some("b@example.com, c@example.com"));
        assert_eq!(message.cc(), None);
        assert_eq!(message.bcc().as_deref(), Some("d@example.com"));
        assert_eq!(message.subject(), Some("Hi"));
        assert_eq!(message.headers(), Some(&["X-Campaign: spring".to_string()][..]));
        assert!(is_valid(&EmailPackage::from(&message)).is_ok());

        Ok(())
    }

    #[test]
    fn test_compose_without_body_fails_validation() -> TestResult {
        let args = Args::try_parse_from([
            "postmark-send",
            "--from",
            "a@example.com",
            "--to",
            "b@example.com",
        ])?;

        let message = compose(&mailer(), &args)?;

        assert!(is_valid(&EmailPackage::from(&message)).is_err());

        Ok(())
    }

    #[test]
    fn test_compose_with_missing_attachment_fails() -> TestResult {
        let args = Args::try_parse_from([
            "postmark-send",
            "--from",
            "a@example.com",
            "--to",
            "b@example.com",
            "--attach",
            "/does/not/exist.pdf",
        ])?;

        assert!(compose(&mailer(), &args).is_err());

        Ok(())
    }
}
