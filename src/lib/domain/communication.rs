//! Email composition and delivery

pub mod addresses;
pub mod mailer;
pub mod recipients;
pub mod validation;
