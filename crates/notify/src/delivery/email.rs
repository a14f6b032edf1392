//! Email delivery via SMTP.
//!
//! [`SmtpMailer`] wraps the `lettre` async SMTP transport. Every connection
//! and command is bounded by [`SmtpSettings::timeout`].

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use yacc_core::mailer::{EmailBody, MailError, Mailer, OutgoingEmail};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for SMTP transport setup.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The configured sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),
}

// ---------------------------------------------------------------------------
// SmtpSettings
// ---------------------------------------------------------------------------

/// Relay connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Credentials are only sent when both are present.
    pub user: Option<String>,
    pub password: Option<String>,
    /// Per-operation network timeout applied by the transport.
    pub timeout: Duration,
}

// ---------------------------------------------------------------------------
// SmtpMailer
// ---------------------------------------------------------------------------

/// Sends registration mail through an SMTP relay.
pub struct SmtpMailer {
    from: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Build the relay transport. No connection is opened until the first send.
    pub fn new(settings: &SmtpSettings) -> Result<Self, EmailError> {
        let from: Mailbox = settings.from_address.parse()?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            .port(settings.port)
            .timeout(Some(settings.timeout));
        if let (Some(user), Some(pass)) = (&settings.user, &settings.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            from,
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        let to = email.to.clone();
        let subject = email.subject.clone();
        let message = build_message(self.from.clone(), email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        tracing::info!(to = %to, subject = %subject, "Email sent");
        Ok(())
    }
}

/// Assemble a MIME message. An empty cc or bcc is omitted.
fn build_message(from: Mailbox, email: OutgoingEmail) -> Result<Message, MailError> {
    let mut builder = Message::builder()
        .from(from)
        .to(parse_mailbox(&email.to)?)
        .subject(email.subject);

    if let Some(cc) = email.cc.as_deref().filter(|s| !s.trim().is_empty()) {
        builder = builder.cc(parse_mailbox(cc)?);
    }
    if let Some(bcc) = email.bcc.as_deref().filter(|s| !s.trim().is_empty()) {
        builder = builder.bcc(parse_mailbox(bcc)?);
    }

    let (content_type, body) = match email.body {
        EmailBody::Plain(text) => (ContentType::TEXT_PLAIN, text),
        EmailBody::Html(html) => (ContentType::TEXT_HTML, html),
    };

    builder
        .header(content_type)
        .body(body)
        .map_err(|e| MailError::Build(e.to_string()))
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address.trim().parse().map_err(|e: lettre::address::AddressError| MailError::Address {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
