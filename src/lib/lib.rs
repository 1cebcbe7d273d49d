#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Send transactional email through the Postmark API
//!
//! The [`domain`] module holds the provider-agnostic message model, address
//! formatting and advisory validation. The [`infrastructure`] module holds the
//! Postmark implementation of [`domain::communication::mailer::Mailer`].

pub mod domain;
pub mod infrastructure;
