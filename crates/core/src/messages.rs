//! Outbound message templates.
//!
//! Builds the four messages the allocator sends: the submitter confirmation
//! (HTML) and the operator's registration, waitlist, and error alerts
//! (plain text).

use askama::Template;

use crate::config::EventConfig;
use crate::mailer::{EmailBody, OutgoingEmail};
use crate::registration::{Registration, WaitlistEntry};
use crate::types::{Slot, Timestamp, TIMESTAMP_FORMAT};

/// Event title used in subjects and headings.
pub const EVENT_TITLE: &str = "YACC 2025";

/// Setup time allowed per band, in minutes.
pub const SETUP_LIMIT_MINUTES: u32 = 2;

/// Performance time allowed per band, in minutes.
pub const PERFORMANCE_LIMIT_MINUTES: u32 = 5;

// ---------------------------------------------------------------------------
// Submitter confirmation
// ---------------------------------------------------------------------------

#[derive(Template)]
#[template(path = "confirmation.html")]
struct ConfirmationTemplate<'a> {
    title: &'a str,
    pastor: &'a str,
    band: &'a str,
    number: &'a str,
    church: &'a str,
    order: Slot,
    hymn: &'a str,
    time: &'a str,
    max_slots: u32,
    setup: u32,
    perform: u32,
    contact: &'a str,
}

/// Confirmation to the band leader, cc the church contact, bcc the operator.
///
/// Submitted text is HTML-escaped by the template.
pub fn confirmation(
    registration: &Registration,
    config: &EventConfig,
) -> Result<OutgoingEmail, askama::Error> {
    let html = ConfirmationTemplate {
        title: EVENT_TITLE,
        pastor: &registration.pastor_name,
        band: &registration.band_name,
        number: &registration.registration_number,
        church: &registration.church_name,
        order: registration.performance_order,
        hymn: &registration.primary_hymn,
        time: &registration.performance_time,
        max_slots: config.max_slots,
        setup: SETUP_LIMIT_MINUTES,
        perform: PERFORMANCE_LIMIT_MINUTES,
        contact: &config.contact_email,
    }
    .render()?;

    Ok(    OutgoingEmail {
        to: registration.leader_email.clone(),
        cc: non_empty(&registration.church_email),
        bcc: Some(config.operator_email.clone()),
        subject: format!(
            "{EVENT_TITLE} Registration Confirmation: {}",
            registration.registration_number
        ),
        body: EmailBody::Html(html),
    })
}

// ---------------------------------------------------------------------------
// Operator alerts
// ---------------------------------------------------------------------------

/// Operator summary of a new confirmed registration.
pub fn registration_alert(
    registration: &Registration,
    config: &EventConfig,
    sent_at: Timestamp,
) -> OutgoingEmail {
    let body = format!(
        "New Registration Notification\n\
         ===================\n\
         Band: {band}\n\
         Church: {church}\n\
         Registration #: {number}\n\
         Slot: {order}/{max_slots}\n\
         Leader: {leader}\n\
         Email: {email}\n\
         Time: {time}\n\
         ===================\n\
         View Store: {link}\n",
        band = registration.band_name,
        church = registration.church_name,
        number = registration.registration_number,
        order = registration.performance_order,
        max_slots = config.max_slots,
        leader = registration.leader_name,
        email = registration.leader_email,
        time = sent_at.format(TIMESTAMP_FORMAT),
        link = config.store_link(),
    );

    OutgoingEmail::plain(
        config.operator_email.clone(),
        format!("[{EVENT_TITLE}] New Registration: {}", registration.band_name),
        body,
    )
}

/// Operator notice that a submission went to the waitlist.
pub fn waitlist_alert(entry: &WaitlistEntry, config: &EventConfig) -> OutgoingEmail {
    let body = format!(
        "New waitlist entry:\nBand: {}\nEmail: {}\nChurch: {}\nTime: {}\n",
        entry.band_name,
        entry.leader_email,
        entry.church_name,
        entry.created_at.format(TIMESTAMP_FORMAT),
    );
    OutgoingEmail::plain(
        config.operator_email.clone(),
        "New Waitlist Registration",
        body,
    )
}

/// Operator diagnostic for a failed submission. Carries the raw error text.
pub fn error_alert(
    config: &EventConfig,
    transaction_id: &str,
    error: &str,
    band_name: &str,
    at: Timestamp,
) -> OutgoingEmail {
    let band = if band_name.is_empty() {
        "Unknown"
    } else {
        band_name
    };
    let body = format!(
        "Error: {error}\nTransaction: {transaction_id}\nTime: {}\nBand: {band}\n",
        at.format(TIMESTAMP_FORMAT),
    );
    OutgoingEmail::plain(
        config.operator_email.clone(),
        "YACC Registration Error",
        body,
    )
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::form::RegistrationForm;

    fn registration() -> Registration {
        let form = RegistrationForm {
            church_name: "Grace Chapel".into(),
            church_email: "office@grace.example".into(),
            pastor_name: "Pastor Obi".into(),
            band_name: "Living <Waters>".into(),
            leader_name: "Ruth".into(),
            leader_email: "ruth@example.org".into(),
            primary_hymn: "Amazing Grace".into(),
            performance_time: "evening".into(),
            ..RegistrationForm::default()
        };
        let ts = chrono::Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        Registration::from_form(&form, 4, ts)
    }

    #[test]
    fn confirmation_is_addressed_and_escaped() {
        let email = confirmation(&registration(), &EventConfig::default()).unwrap();

        assert_eq!(email.to, "ruth@example.org");
        assert_eq!(email.cc.as_deref(), Some("office@grace.example"));
        assert_eq!(email.bcc.as_deref(), Some("operator@yacc.local"));
        assert_eq!(email.subject, "YACC 2025 Registration Confirmation: YACC-004");

        let EmailBody::Html(html) = email.body else {
            panic!("confirmation should be HTML");
        };
        assert!(html.contains("Living &lt;Waters&gt;"));
        assert!(html.contains("4 of 7 slots"));
        assert!(html.contains("Traditional hymns ONLY"));
        assert!(html.contains("Setup: 2 minutes maximum, Performance: 5 minutes maximum"));
        assert!(html.contains("mailto:events@yacc.local"));
        assert!(!html.contains("<Waters>"));
    }

    #[test]
    fn confirmation_without_church_email_has_no_cc() {
        let mut reg = registration();
        reg.church_email = "  ".into();
        let email = confirmation(&reg, &EventConfig::default()).unwrap();
        assert!(email.cc.is_none());
    }

    #[test]
    fn registration_alert_links_store() {
        let config = EventConfig {
            store_link: Some("https://store.example/yacc".into()),
            ..EventConfig::default()
        };
        let ts = chrono::Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 5).unwrap();
        let email = registration_alert(&registration(), &config, ts);

        assert_eq!(email.to, "operator@yacc.local");
        assert_eq!(email.subject, "[YACC 2025] New Registration: Living <Waters>");
        let EmailBody::Plain(body) = email.body else {
            panic!("alert should be plain text");
        };
        assert!(body.contains("Slot: 4/7"));
        assert!(body.contains("View Store: https://store.example/yacc"));
    }

    #[test]
    fn error_alert_names_unknown_band() {
        let ts = chrono::Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let email = error_alert(
            &EventConfig::default(),
            "TX-ABC123XYZ",
            "disk full",
            "",
            ts,
        );
        let EmailBody::Plain(body) = email.body else {
            panic!("alert should be plain text");
        };
        assert!(body.contains("Error: disk full"));
        assert!(body.contains("Transaction: TX-ABC123XYZ"));
        assert!(body.contains("Band: Unknown"));
    }
}
