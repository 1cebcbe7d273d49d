//! Advisory pre-flight validation of email messages
//!
//! Nothing in the send path calls [`is_valid`]. Applications decide whether
//! and when a message should be checked before it is handed to a mailer.

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use super::mailer::{message::Message, MailMessage};

/// The fields of a message that [`is_valid`] inspects
///
/// All four keys are required when deserializing; the bodies may be `null`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmailPackage {
    /// Formatted `to` addresses
    pub to: String,

    /// Formatted `from` addresses
    pub from: String,

    /// HTML body
    #[serde(deserialize_with = "required_nullable")]
    pub html_body: Option<String>,

    /// Plain text body
    #[serde(deserialize_with = "required_nullable")]
    pub text_body: Option<String>,
}

// Using `deserialize_with` stops serde from treating a missing key as `None`.
fn required_nullable<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

impl From<&Message> for EmailPackage {
    fn from(message: &Message) -> Self {
        Self {
            to: message.to().unwrap_or_default(),
            from: message.from().unwrap_or_default(),
            html_body: message.html_body().map(str::to_string),
            text_body: message.text_body().map(str::to_string),
        }
    }
}

/// Why a message failed validation
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    /// No `to` address
    #[error("`to` address not supplied. Other data: from={from:?}")]
    MissingTo {
        /// The `from` address, for context
        from: String,
    },

    /// No `from` address
    #[error("`from` address not supplied. Other data: to={to:?}")]
    MissingFrom {
        /// The `to` address, for context
        to: String,
    },

    /// Neither body has content
    #[error("both `html_body` and `text_body` were empty. Other data: to={to:?}, from={from:?}")]
    MissingBody {
        /// The `to` address, for context
        to: String,

        /// The `from` address, for context
        from: String,
    },
}

/// Checks that a message has recipients, a sender and a body
///
/// # Returns
/// - [`Ok`] if `to`, `from` and at least one body are non-empty.
/// - [`Err`] with a [`ValidationFailure`] describing the first problem found.
pub fn is_valid(package: &EmailPackage) -> Result<(), ValidationFailure> {
    let is_blank = |body: &Option<String>| body.as_deref().map_or(true, str::is_empty);

    if package.to.is_empty() {
        return Err(ValidationFailure::MissingTo {
            from: package.from.clone(),
        });
    }

    if package.from.is_empty() {
        return Err(ValidationFailure::MissingFrom {
            to: package.to.clone(),
        });
    }

    if is_blank(&package.html_body) && is_blank(&package.text_body) {
        return Err(ValidationFailure::MissingBody {
            to: package.to.clone(),
            from: package.from.clone(),
        });
    }

    Ok(())
}
