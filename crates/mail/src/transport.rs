//! The delivery capability every mail backend implements.

use std::sync::Arc;

use async_trait::async_trait;
use printrelay_shared::{MailConfig, TransportKind};

use crate::error::MailError;
use crate::message::OutboundEmail;
use crate::sendgrid::SendGridTransport;
use crate::smtp::SmtpTransport;

/// Sends a fully built message.
///
/// Implementations must check their own settings before touching the network and
/// report missing ones as [`MailError::NotConfigured`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Deliver one message.
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;

    /// Short transport name for logs.
    fn name(&self) -> &'static str;
}

/// Builds the transport selected by `config.transport`.
///
/// # Errors
///
/// Returns an error only if the HTTP client for the SendGrid transport cannot be
/// created. Missing credentials are reported later, on send.
pub fn build_transport(config: &MailConfig) -> Result<Arc<dyn MailTransport>, MailError> {
    let transport: Arc<dyn MailTransport> = match config.transport {
        TransportKind::Sendgrid => Arc::new(SendGridTransport::new(
            config.sendgrid.clone(),
            config.timeout(),
        )?),
        TransportKind::SmtpRelay => Arc::new(SmtpTransport::relay(
            config.smtp.clone(),
            config.timeout(),
        )),
        TransportKind::Gmail => Arc::new(SmtpTransport::gmail(config.smtp.clone(), config.timeout())),
    };

    tracing::info!(transport = transport.name(), "Mail transport selected");
    Ok(transport)
}
