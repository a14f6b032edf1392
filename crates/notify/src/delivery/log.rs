//! Log-only mail delivery.

use async_trait::async_trait;
use yacc_core::mailer::{EmailBody, MailError, Mailer, OutgoingEmail};

/// Records the envelope in the log instead of sending.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        let kind = match email.body {
            EmailBody::Plain(_) => "plain",
            EmailBody::Html(_) => "html",
        };
        tracing::info!(
            to = %email.to,
            cc = email.cc.as_deref().unwrap_or(""),
            bcc = email.bcc.as_deref().unwrap_or(""),
            subject = %email.subject,
            kind,
            "SMTP not configured, email logged only"
        );
        Ok(())
    }
}
