//! Message errors

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while composing a message
#[derive(Debug, Error)]
pub enum MessageError {
    /// The operation is not supported by this message type
    #[error("{0} is not supported")]
    NotSupported(&'static str),

    /// An attachment file could not be read
    #[error("could not read attachment {path}")]
    Attachment {
        /// The path that was attached
        path: PathBuf,

        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}
