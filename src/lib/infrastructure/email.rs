//! Email delivery providers

pub mod postmark;
