//! Recipient list normalization

/// A recipient field before normalization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecipientList {
    /// Addresses already joined into one string
    Joined(String),

    /// Individual addresses
    List(Vec<String>),
}

impl RecipientList {
    /// Joins the list with `", "`, leaving an already joined string as is
    pub fn join(self) -> String {
        match self {
            Self::Joined(joined) => joined,
            Self::List(addresses) => addresses.join(", "),
        }
    }
}

impl From<&str> for RecipientList {
    fn from(joined: &str) -> Self {
        Self::Joined(joined.to_string())
    }
}

impl From<String> for RecipientList {
    fn from(joined: String) -> Self {
        Self::Joined(joined)
    }
}

impl From<Vec<String>> for RecipientList {
    fn from(addresses: Vec<String>) -> Self {
        Self::List(addresses)
    }
}

impl From<Vec<&str>> for RecipientList {
    fn from(addresses: Vec<&str>) -> Self {
        Self::List(addresses.into_iter().map(str::to_string).collect())
    }
}

/// The `to`, `cc` and `bcc` recipients of a message
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Recipients {
    /// Primary recipients
    pub to: Option<RecipientList>,

    /// Carbon copy recipients
    pub cc: Option<RecipientList>,

    /// Blind carbon copy recipients
    pub bcc: Option<RecipientList>,
}

/// Joins each recipient list into a single comma separated string
///
/// Returns `(to, cc, bcc)`. Absent fields stay [`None`].
pub fn prepare_recipients(
    recipients: Recipients,
) -> (Option<String>, Option<String>, Option<String>) {
    let Recipients { to, cc, bcc } = recipients;

    (
        to.map(RecipientList::join),
        cc.map(RecipientList::join),
        bcc.map(RecipientList::join),
    )
}
