//! Application configuration management.
//!
//! Settings are read once at startup and handed to the services that need them.
//! Mail settings are deliberately lenient here: missing credentials only surface
//! when a message is actually sent.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

/// Environment variables used by earlier deployments, mapped to their config keys.
///
/// These are applied as defaults, so `PRINTRELAY__*` variables and config files win.
const LEGACY_ENV_ALIASES: &[(&str, &str)] = &[
    ("mail.sendgrid.api_key", "SENDGRID_API_KEY"),
    ("mail.from_email", "FROM_EMAIL"),
    ("mail.smtp.username", "EMAIL_USER"),
    ("mail.smtp.password", "EMAIL_PASS"),
    ("mail.smtp.host", "SMTP_HOST"),
    ("mail.smtp.port", "SMTP_PORT"),
];

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Outbound mail configuration.
    #[serde(default)]
    pub mail: MailConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Largest accepted request body, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// Mounts the `/test-email` diagnostic route.
    #[serde(default = "default_true")]
    pub diagnostics_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
            diagnostics_enabled: true,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_true() -> bool {
    true
}

/// Which outbound transport delivers mail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    /// SendGrid v3 HTTP API.
    #[default]
    Sendgrid,
    /// Authenticated SMTP relay (host, port, login, password).
    SmtpRelay,
    /// Gmail submission endpoint with account credentials.
    Gmail,
}

impl TransportKind {
    /// Returns the configuration name of this transport.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sendgrid => "sendgrid",
            Self::SmtpRelay => "smtp_relay",
            Self::Gmail => "gmail",
        }
    }
}

/// Outbound mail configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    /// Selected transport.
    #[serde(default)]
    pub transport: TransportKind,
    /// Sender address.
    #[serde(default)]
    pub from_email: Option<String>,
    /// Optional display name for the sender.
    #[serde(default)]
    pub from_name: Option<String>,
    /// Inbox that receives print requests.
    #[serde(default)]
    pub to_email: Option<String>,
    /// Inbox that receives diagnostic probe messages. Falls back to `to_email`.
    #[serde(default)]
    pub probe_email: Option<String>,
    /// Upper bound for a single delivery attempt, in seconds.
    #[serde(default = "default_mail_timeout")]
    pub timeout_secs: u64,
    /// SendGrid settings.
    #[serde(default)]
    pub sendgrid: SendGridConfig,
    /// SMTP settings, shared by the relay and Gmail transports.
    #[serde(default)]
    pub smtp: SmtpConfig,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            transport: TransportKind::default(),
            from_email: None,
            from_name: None,
            to_email: None,
            probe_email: None,
            timeout_secs: default_mail_timeout(),
            sendgrid: SendGridConfig::default(),
            smtp: SmtpConfig::default(),
        }
    }
}

fn default_mail_timeout() -> u64 {
    30
}

impl MailConfig {
    /// Delivery timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Configured sender address, ignoring placeholders.
    #[must_use]
    pub fn sender(&self) -> Option<&str> {
        configured_value(self.from_email.as_deref())
    }

    /// Configured destination inbox, ignoring placeholders.
    #[must_use]
    pub fn destination(&self) -> Option<&str> {
        configured_value(self.to_email.as_deref())
    }

    /// Configured probe inbox, falling back to the destination.
    #[must_use]
    pub fn probe_destination(&self) -> Option<&str> {
        configured_value(self.probe_email.as_deref()).or_else(|| self.destination())
    }
}

/// SendGrid API settings.
#[derive(Clone, Deserialize)]
pub struct SendGridConfig {
    /// API key.
    #[serde(default)]
    pub api_key: Option<String>,
    /// API base URL.
    #[serde(default = "default_sendgrid_base_url")]
    pub base_url: String,
}

impl Default for SendGridConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_sendgrid_base_url(),
        }
    }
}

impl fmt::Debug for SendGridConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendGridConfig")
            .field("api_key", &redacted(self.api_key.as_deref()))
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn default_sendgrid_base_url() -> String {
    "https://api.sendgrid.com".to_string()
}

/// SMTP settings.
#[derive(Clone, Default, Deserialize)]
pub struct SmtpConfig {
    /// Server hostname. Required for the relay transport.
    #[serde(default)]
    pub host: Option<String>,
    /// Submission port, 587 when unset. Kept as text and parsed on send.
    #[serde(default)]
    pub port: Option<String>,
    /// Login name.
    #[serde(default)]
    pub username: Option<String>,
    /// Password or app password.
    #[serde(default)]
    pub password: Option<String>,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &redacted(self.password.as_deref()))
            .finish()
    }
}

fn redacted(value: Option<&str>) -> Option<&'static str> {
    value.map(|_| "<redacted>")
}

/// Returns true if `value` is unset in practice: blank, or a template placeholder
/// such as `your_sendgrid_verified_email@example.com`.
#[must_use]
pub fn is_placeholder(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return true;
    }
    let lower = value.to_ascii_lowercase();
    lower.starts_with("your_") || lower.starts_with("your-") || lower == "changeme"
}

/// Returns the trimmed value when it is present and not a placeholder.
#[must_use]
pub fn configured_value(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !is_placeholder(v)).map(str::trim)
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = ::config::Config::builder();
        for (key, var) in LEGACY_ENV_ALIASES {
            if let Ok(value) = std::env::var(var) {
                builder = builder.set_default(*key, value)?;
            }
        }

        builder = builder
            .add_source(::config::File::with_name("config/default").required(false))
            .add_source(::config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(::config::Environment::with_prefix("PRINTRELAY").separator("__"));

        // Hosting platforms inject PORT and expect it to be honoured.
        if let Ok(port) = std::env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
