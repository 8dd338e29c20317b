//! SMTP transports.
//!
//! Uses `lettre` with STARTTLS, so credentials are only sent over an encrypted channel.

use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Attachment as AttachmentPart, Mailbox, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use printrelay_shared::{SmtpConfig, configured_value};

use crate::error::MailError;
use crate::message::OutboundEmail;
use crate::transport::MailTransport;

const DEFAULT_SUBMISSION_PORT: u16 = 587;
const GMAIL_HOST: &str = "smtp.gmail.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flavor {
    Relay,
    Gmail,
}

/// Sends mail over authenticated SMTP.
#[derive(Debug, Clone)]
pub struct SmtpTransport {
    config: SmtpConfig,
    flavor: Flavor,
    timeout: Duration,
}

/// Settings checked before any connection is opened.
struct Resolved<'a> {
    host: &'a str,
    port: u16,
    username: &'a str,
    password: &'a str,
}

impl SmtpTransport {
    /// SMTP relay provider: host, port, login and password all come from config.
    #[must_use]
    pub const fn relay(config: SmtpConfig, timeout: Duration) -> Self {
        Self {
            config,
            flavor: Flavor::Relay,
            timeout,
        }
    }

    /// Gmail submission endpoint; only the account credentials come from config.
    #[must_use]
    pub const fn gmail(config: SmtpConfig, timeout: Duration) -> Self {
        Self {
            config,
            flavor: Flavor::Gmail,
            timeout,
        }
    }

    fn resolve(&self) -> Result<Resolved<'_>, MailError> {
        let host = match self.flavor {
            Flavor::Gmail => GMAIL_HOST,
            Flavor::Relay => configured_value(self.config.host.as_deref())
                .ok_or_else(|| MailError::not_configured("SMTP host"))?,
        };
        let port = match self.flavor {
            Flavor::Gmail => DEFAULT_SUBMISSION_PORT,
            Flavor::Relay => match configured_value(self.config.port.as_deref()) {
                None => DEFAULT_SUBMISSION_PORT,
                Some(port) => port
                    .parse()
                    .map_err(|_| MailError::not_configured("SMTP port"))?,
            },
        };
        let username = configured_value(self.config.username.as_deref())
            .ok_or_else(|| MailError::not_configured("SMTP username"))?;
        let password = configured_value(self.config.password.as_deref())
            .ok_or_else(|| MailError::not_configured("SMTP password"))?;

        Ok(Resolved {
            host,
            port,
            username,
            password,
        })
    }

    /// Creates an SMTP transport.
    fn create_transport(
        &self,
        settings: &Resolved<'_>,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        let creds = Credentials::new(settings.username.to_string(), settings.password.to_string());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(settings.host)
            .map_err(|e| MailError::rejected(e.to_string()))?
            .port(settings.port)
            .credentials(creds)
            .timeout(Some(self.timeout))
            .build();

        Ok(transport)
    }
}

/// Builds the MIME message: HTML body plus optional attachment.
fn build_message(email: &OutboundEmail) -> Result<Message, MailError> {
    let sender: Address = email
        .from
        .parse()
        .map_err(|e| MailError::InvalidMessage(format!("sender address: {e}")))?;

    let builder = Message::builder()
        .from(Mailbox::new(email.from_name.clone(), sender))
        .to(email
            .to
            .parse()
            .map_err(|e| MailError::InvalidMessage(format!("recipient address: {e}")))?)
        .subject(email.subject.as_str());

    let html = SinglePart::html(email.html_body.clone());

    let message = match &email.attachment {
        None => builder.singlepart(html),
        Some(attachment) => {
            let content_type = ContentType::parse(&attachment.content_type)
                .map_err(|e| MailError::InvalidMessage(format!("content type: {e}")))?;
            let part = AttachmentPart::new(attachment.filename.clone())
                .body(attachment.content.to_vec(), content_type);
            builder.multipart(MultiPart::mixed().singlepart(html).singlepart(part))
        }
    };

    message.map_err(|e| MailError::InvalidMessage(e.to_string()))
}

#[async_trait]
impl MailTransport for SmtpTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let settings = self.resolve()?;
        let message = build_message(email)?;

        let transport = self.create_transport(&settings)?;
        transport
            .send(message)
            .await
            .map_err(|e| MailError::rejected(e.to_string()))?;

        Ok(())
    }

    fn name(&self) -> &'static str {
        match self.flavor {
            Flavor::Relay => "smtp_relay",
            Flavor::Gmail => "gmail",
        }
    }
}
