//! Notification collaborator.

use async_trait::async_trait;

/// Message body, either plain text or HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailBody {
    Plain(String),
    Html(String),
}

/// A fully addressed outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub cc: Option<String>,
    pub bcc: Option<String>,
    pub subject: String,
    pub body: EmailBody,
}

impl OutgoingEmail {
    pub fn plain(to: impl Into<String>, subject: impl Into<String>, body: String) -> Self {
        Self {
            to: to.into(),
            cc: None,
            bcc: None,
            subject: subject.into(),
            body: EmailBody::Plain(body),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid address '{address}': {reason}")]
    Address { address: String, reason: String },

    #[error("Mail transport error: {0}")]
    Transport(String),

    #[error("Message build error: {0}")]
    Build(String),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError>;
}
