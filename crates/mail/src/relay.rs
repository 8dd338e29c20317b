//! Print relay service: compose, then send with a bounded timeout.

use std::sync::Arc;
use std::time::Duration;

use printrelay_shared::MailConfig;
use tracing::{error, info};

use crate::error::MailError;
use crate::message::OutboundEmail;
use crate::request::PrintRequest;
use crate::transport::MailTransport;

const PROBE_SUBJECT: &str = "Test Email from Print Relay Backend";
const PROBE_BODY: &str = "<p>This is a test email sent from the Print Relay backend.</p>";

/// Relays print requests to the configured inbox.
///
/// Holds no per-request state; one instance is shared by all handlers.
pub struct PrintRelay {
    transport: Arc<dyn MailTransport>,
    sender: Option<String>,
    sender_name: Option<String>,
    destination: Option<String>,
    probe_destination: Option<String>,
    timeout: Duration,
}

impl PrintRelay {
    /// Creates a relay over `transport`, taking addresses and timeout from `config`.
    #[must_use]
    pub fn new(transport: Arc<dyn MailTransport>, config: &MailConfig) -> Self {
        Self {
            transport,
            sender: config.sender().map(str::to_string),
            sender_name: config.from_name.clone(),
            destination: config.destination().map(str::to_string),
            probe_destination: config.probe_destination().map(str::to_string),
            timeout: config.timeout(),
        }
    }

    /// Name of the underlying transport.
    #[must_use]
    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    /// Emails the uploaded PDF to the destination inbox.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::NotConfigured`] without calling the transport if the
    /// sender or destination is unset, otherwise whatever the transport reports.
    pub async fn submit(&self, request: PrintRequest) -> Result<(), MailError> {
        let from = self.sender()?;
        let to = self
            .destination
            .as_deref()
            .ok_or_else(|| MailError::not_configured("Destination address (mail.to_email)"))?;

        info!(
            recipient_name = %request.recipient_name(),
            filename = %request.filename(),
            "Relaying print request"
        );
        self.dispatch(self.brand(request.into_email(from, to))).await
    }

    /// Sends the canned diagnostic message to the probe inbox.
    ///
    /// # Errors
    ///
    /// Same as [`PrintRelay::submit`].
    pub async fn send_probe(&self) -> Result<(), MailError> {
        let from = self.sender()?;
        let to = self
            .probe_destination
            .as_deref()
            .ok_or_else(|| MailError::not_configured("Probe address (mail.probe_email)"))?;

        self.dispatch(self.brand(OutboundEmail::new(from, to, PROBE_SUBJECT, PROBE_BODY)))
            .await
    }

    fn sender(&self) -> Result<&str, MailError> {
        self.sender
            .as_deref()
            .ok_or_else(|| MailError::not_configured("Sender address (mail.from_email)"))
    }

    fn brand(&self, email: OutboundEmail) -> OutboundEmail {
        match &self.sender_name {
            Some(name) if !name.trim().is_empty() => email.with_sender_name(name.trim()),
            _ => email,
        }
    }

    async fn dispatch(&self, email: OutboundEmail) -> Result<(), MailError> {
        let transport = self.transport.name();
        let outcome = tokio::time::timeout(self.timeout, self.transport.send(&email))
            .await
            .unwrap_or(Err(MailError::Timeout(self.timeout)));

        match &outcome {
            Ok(()) => info!(
                transport,
                to = %email.to,
                attachment_bytes = email.attachment_len(),
                "Email sent"
            ),
            Err(e) => error!(transport, to = %email.to, error = %e, "Email not sent"),
        }
        outcome
    }
}
