use std::time::Duration;

use yacc_core::config::EventConfig;
use yacc_core::error::CoreError;
use yacc_notify::SmtpSettings;

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_SMTP_FROM: &str = "noreply@yacc.local";

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Store database URL (default: `sqlite://yacc.db?mode=rwc`).
    pub database_url: String,
    /// Event settings handed to the allocator.
    pub event: EventConfig,
    /// SMTP relay; `None` when `SMTP_HOST` is unset and mail is only logged.
    pub smtp: Option<SmtpSettings>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                     |
    /// |------------------------|-----------------------------|
    /// | `HOST`                 | `0.0.0.0`                   |
    /// | `PORT`                 | `3000`                      |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`     |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                        |
    /// | `DATABASE_URL`         | `sqlite://yacc.db?mode=rwc` |
    /// | `SMTP_HOST`            | unset (mail is logged)      |
    /// | `SMTP_PORT`            | `587`                       |
    /// | `SMTP_FROM`            | `noreply@yacc.local`        |
    /// | `SMTP_USER`            | unset                       |
    /// | `SMTP_PASSWORD`        | unset                       |
    ///
    /// Event settings are read by [`EventConfig::from_lookup`].
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through `var`, which returns the raw value of a key.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port: u16 = parse_var(&var, "PORT", 3000)?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = parse_var(&var, "REQUEST_TIMEOUT_SECS", 30)?;

        let database_url =
            var("DATABASE_URL").unwrap_or_else(|| "sqlite://yacc.db?mode=rwc".into());

        let event = EventConfig::from_lookup(&var)?;

        // A confirmation waits on at most one notify budget; it must still
        // answer before the request timeout fires.
        if event.notify_timeout >= Duration::from_secs(request_timeout_secs) {
            return Err(CoreError::Validation(format!(
                "NOTIFY_TIMEOUT_SECS ({}) must be less than REQUEST_TIMEOUT_SECS ({request_timeout_secs})",
                event.notify_timeout.as_secs()
            )));
        }

        let smtp = match var("SMTP_HOST").filter(|h| !h.trim().is_empty()) {
            Some(smtp_host) => Some(SmtpSettings {
                host: smtp_host,
                port: parse_var(&var, "SMTP_PORT", DEFAULT_SMTP_PORT)?,
                from_address: var("SMTP_FROM").unwrap_or_else(|| DEFAULT_SMTP_FROM.into()),
                user: var("SMTP_USER"),
                password: var("SMTP_PASSWORD"),
                timeout: event.notify_timeout,
            }),
            None => None,
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            event,
            smtp,
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    var: impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, CoreError> {
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| CoreError::Validation(format!("{key} is not valid: '{raw}'"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_smtp() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
        assert!(config.smtp.is_none());
    }

    #[test]
    fn smtp_settings_inherit_notify_timeout() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("SMTP_HOST", "smtp.example.org"),
            ("SMTP_PORT", "2525"),
            ("SMTP_USER", "yacc"),
            ("NOTIFY_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        let smtp = config.smtp.unwrap();
        assert_eq!(smtp.host, "smtp.example.org");
        assert_eq!(smtp.port, 2525);
        assert_eq!(smtp.from_address, "noreply@yacc.local");
        assert_eq!(smtp.user.as_deref(), Some("yacc"));
        assert_eq!(smtp.password, None);
        assert_eq!(smtp.timeout, Duration::from_secs(5));
    }

    #[test]
    fn blank_smtp_host_disables_smtp() {
        let config = ServerConfig::from_lookup(lookup(&[("SMTP_HOST", "  ")])).unwrap();
        assert!(config.smtp.is_none());
    }

    #[test]
    fn notify_timeout_must_fit_in_request_timeout() {
        let err = ServerConfig::from_lookup(lookup(&[
            ("REQUEST_TIMEOUT_SECS", "10"),
            ("NOTIFY_TIMEOUT_SECS", "10"),
        ]))
        .unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("NOTIFY_TIMEOUT_SECS"));
    }

    #[test]
    fn malformed_port_is_validation_error() {
        let err = ServerConfig::from_lookup(lookup(&[("SMTP_HOST", "relay"), ("SMTP_PORT", "x")]))
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("SMTP_PORT"));
    }
}
