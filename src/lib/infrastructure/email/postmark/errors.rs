//! Postmark errors

use thiserror::Error;

/// Errors returned by the Postmark API client
#[derive(Debug, Error)]
pub enum PostmarkError {
    /// Postmark rejected the request
    #[error("postmark returned {status} (error code {error_code}): {message}")]
    Api {
        /// HTTP status code
        status: u16,

        /// Postmark's numeric error code
        error_code: i64,

        /// Postmark's error message
        message: String,
    },

    /// The response was not one Postmark documents
    #[error("unexpected response from postmark ({status}): {body}")]
    UnexpectedResponse {
        /// HTTP status code
        status: u16,

        /// The raw response body
        body: String,
    },

    /// The request could not be sent or its response read
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors raised by [`super::PostmarkMailer`]
#[derive(Debug, Error)]
pub enum MailerError {
    /// Required configuration is missing
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The provider call failed
    #[error(transparent)]
    Provider(#[from] PostmarkError),
}
