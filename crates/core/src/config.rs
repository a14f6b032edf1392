//! Deployment-wide event configuration.
//!
//! [`EventConfig`] is resolved once at startup and handed to the
//! [`Allocator`](crate::allocator::Allocator) by value; nothing in the crate
//! reads configuration from ambient global state.

use std::time::Duration;

use crate::error::CoreError;

/// Default number of confirmed performance slots.
pub const DEFAULT_MAX_SLOTS: u32 = 7;

/// Default operator (alerts, bcc on confirmations) address.
const DEFAULT_OPERATOR_EMAIL: &str = "operator@yacc.local";

/// Default public contact address quoted in confirmation emails.
const DEFAULT_CONTACT_EMAIL: &str = "events@yacc.local";

/// Default per-message notification budget, in seconds.
pub const DEFAULT_NOTIFY_TIMEOUT_SECS: u64 = 10;

/// Default store identifier when `STORE_ID` is not set.
const DEFAULT_STORE_ID: &str = "yacc-registrations";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventConfig {
    /// Identifier of the tabular store holding both collections.
    pub store_id: String,
    /// Link to the store quoted in operator alerts. Falls back to `store_id`.
    pub store_link: Option<String>,
    /// Receives operator alerts and is bcc'd on confirmations.
    pub operator_email: String,
    /// Public contact address shown to submitters.
    pub contact_email: String,
    /// Size of the confirmed slot pool.
    pub max_slots: u32,
    /// Longest a single notification send may hold up a submission.
    pub notify_timeout: Duration,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            store_id: DEFAULT_STORE_ID.to_string(),
            store_link: None,
            operator_email: DEFAULT_OPERATOR_EMAIL.to_string(),
            contact_email: DEFAULT_CONTACT_EMAIL.to_string(),
            max_slots: DEFAULT_MAX_SLOTS,
            notify_timeout: Duration::from_secs(DEFAULT_NOTIFY_TIMEOUT_SECS),
        }
    }
}

impl EventConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default               |
    /// |-----------------------|-----------------------|
    /// | `STORE_ID`            | `yacc-registrations`  |
    /// | `STORE_LINK`          | -                     |
    /// | `OPERATOR_EMAIL`      | `operator@yacc.local` |
    /// | `CONTACT_EMAIL`       | `events@yacc.local`   |
    /// | `MAX_SLOTS`           | `7`                   |
    /// | `NOTIFY_TIMEOUT_SECS` | `10`                  |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through `var`, which returns the raw value of a key.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let defaults = Self::default();

        let max_slots = match var("MAX_SLOTS") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
                CoreError::Validation(format!("MAX_SLOTS must be a positive integer, got '{raw}'"))
            })?,
            None => defaults.max_slots,
        };

        let notify_timeout = match var("NOTIFY_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map(Duration::from_secs).map_err(|_| {
                CoreError::Validation(format!(
                    "NOTIFY_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'"
                ))
            })?,
            None => defaults.notify_timeout,
        };

        let config = Self {
            store_id: var("STORE_ID").unwrap_or(defaults.store_id),
            store_link: var("STORE_LINK").filter(|s| !s.is_empty()),
            operator_email: var("OPERATOR_EMAIL").unwrap_or(defaults.operator_email),
            contact_email: var("CONTACT_EMAIL").unwrap_or(defaults.contact_email),
            max_slots,
            notify_timeout,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the allocator cannot operate with.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.max_slots == 0 {
            return Err(CoreError::Validation("MAX_SLOTS must be at least 1".into()));
        }
        if self.notify_timeout.is_zero() {
            return Err(CoreError::Validation(
                "NOTIFY_TIMEOUT_SECS must be at least 1".into(),
            ));
        }
        if self.operator_email.trim().is_empty() {
            return Err(CoreError::Validation("OPERATOR_EMAIL must not be empty".into()));
        }
        Ok(())
    }

    /// Link quoted in operator alerts.
    pub fn store_link(&self) -> &str {
        self.store_link.as_deref().unwrap_or(&self.store_id)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn lookup_overrides_defaults() {
        let config = EventConfig::from_lookup(lookup(&[
            ("MAX_SLOTS", " 12 "),
            ("NOTIFY_TIMEOUT_SECS", "4"),
            ("STORE_LINK", ""),
            ("OPERATOR_EMAIL", "ops@church.example"),
        ]))
        .unwrap();

        assert_eq!(config.max_slots, 12);
        assert_eq!(config.notify_timeout, Duration::from_secs(4));
        assert_eq!(config.store_link, None);
        assert_eq!(config.operator_email, "ops@church.example");
        assert_eq!(config.contact_email, "events@yacc.local");
    }

    #[test]
    fn malformed_max_slots_is_validation_error() {
        let err = EventConfig::from_lookup(lookup(&[("MAX_SLOTS", "seven")])).unwrap_err();
        assert!(matches!(err, CoreError::Validation(msg) if msg.contains("MAX_SLOTS")));
    }

    #[test]
    fn defaults_are_valid() {
        let config = EventConfig::default();
        assert_eq!(config.max_slots, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_slots_rejected() {
        let config = EventConfig {
            max_slots: 0,
            ..EventConfig::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn zero_notify_timeout_rejected() {
        let config = EventConfig {
            notify_timeout: Duration::ZERO,
            ..EventConfig::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn store_link_falls_back_to_store_id() {
        let mut config = EventConfig::default();
        assert_eq!(config.store_link(), "yacc-registrations");

        config.store_link = Some("https://sheets.example/yacc".into());
        assert_eq!(config.store_link(), "https://sheets.example/yacc");
    }
}
