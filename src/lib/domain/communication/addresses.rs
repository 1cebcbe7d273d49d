//! Email address collections and their Postmark string form

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref QUOTED_NAME_REGEX: Regex = Regex::new(r"[.,:]").unwrap();
}

/// A single entry in an address list
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mailbox {
    /// An address with no display name
    Bare(String),

    /// An address with a display name
    Named {
        /// The display name
        name: String,

        /// The email address
        address: String,
    },
}

impl Mailbox {
    /// Creates an entry with a display name
    pub fn named(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            address: address.into(),
        }
    }
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bare(address) => write!(f, "{address}"),
            Self::Named { name, address } if QUOTED_NAME_REGEX.is_match(name) => {
                write!(f, "\"{name}\" <{address}>")
            }
            Self::Named { name, address } => write!(f, "{name} <{address}>"),
        }
    }
}

impl From<&str> for Mailbox {
    fn from(address: &str) -> Self {
        Self::Bare(address.to_string())
    }
}

impl From<String> for Mailbox {
    fn from(address: String) -> Self {
        Self::Bare(address)
    }
}

impl<N: Into<String>, A: Into<String>> From<(N, A)> for Mailbox {
    fn from((name, address): (N, A)) -> Self {
        Self::named(name, address)
    }
}

/// One or more email addresses
///
/// Either a string the caller has already formatted, or an ordered list of
/// entries that is rendered by [`stringify_emails`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Addresses {
    /// A pre-formatted address string, passed through unchanged
    Raw(String),

    /// An ordered list of entries
    List(Vec<Mailbox>),
}

impl Addresses {
    /// Whether there are no addresses at all
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Raw(raw) => raw.is_empty(),
            Self::List(entries) => entries.is_empty(),
        }
    }
}

impl From<&str> for Addresses {
    fn from(raw: &str) -> Self {
        Self::Raw(raw.to_string())
    }
}

impl From<String> for Addresses {
    fn from(raw: String) -> Self {
        Self::Raw(raw)
    }
}

impl From<Mailbox> for Addresses {
    fn from(mailbox: Mailbox) -> Self {
        Self::List(vec![mailbox])
    }
}

impl<M: Into<Mailbox>> From<Vec<M>> for Addresses {
    fn from(entries: Vec<M>) -> Self {
        Self::List(entries.into_iter().map(Into::into).collect())
    }
}

impl<M: Into<Mailbox>> FromIterator<M> for Addresses {
    fn from_iter<I: IntoIterator<Item = M>>(iter: I) -> Self {
        Self::List(iter.into_iter().map(Into::into).collect())
    }
}

/// Renders addresses in the form accepted by Postmark
///
/// Raw strings are returned as they are. List entries are rendered as
/// `address` or `name <address>` and joined with `", "`, quoting display
/// names that contain `.`, `,` or `:`. Returns [`None`] when there is
/// nothing to render.
pub fn stringify_emails(addresses: Option<&Addresses>) -> Option<String> {
    match addresses {
        None => None,
        Some(addresses) if addresses.is_empty() => None,
        Some(Addresses::Raw(raw)) => Some(raw.clone()),
        Some(Addresses::List(entries)) => Some(
            entries
                .iter()
                .map(Mailbox::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        ),
    }
}
