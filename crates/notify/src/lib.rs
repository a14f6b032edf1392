//! Outbound notification transports.
//!
//! - [`SmtpMailer`] sends through an SMTP relay using `lettre`.
//! - [`LogMailer`] logs the envelope and discards the message; used when
//!   SMTP is not configured.

pub mod delivery;

pub use delivery::email::{EmailError, SmtpMailer, SmtpSettings};
pub use delivery::log::LogMailer;
