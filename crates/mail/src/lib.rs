//! Print request handling and outbound mail delivery.
//!
//! A [`PrintRelay`] turns a validated [`PrintRequest`] into an [`OutboundEmail`]
//! and hands it to whichever [`MailTransport`] was configured at startup:
//!
//! | Transport | Config value | Protocol |
//! |-----------|--------------|----------|
//! | [`SendGridTransport`] | `sendgrid` | SendGrid v3 HTTP API |
//! | [`SmtpTransport::relay`] | `smtp_relay` | SMTP relay, STARTTLS + login |
//! | [`SmtpTransport::gmail`] | `gmail` | `smtp.gmail.com:587`, STARTTLS + login |
//!
//! Every transport reports through the same [`MailError`], so callers never branch on
//! provider-specific status codes.

mod error;
mod message;
mod relay;
mod request;
mod sendgrid;
mod smtp;
mod transport;

#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use error::{MailError, MailErrorKind};
pub use message::{Attachment, OutboundEmail, PDF_MEDIA_TYPE};
pub use relay::PrintRelay;
pub use request::{PrintRequest, RequestError, UploadedFile};
pub use sendgrid::SendGridTransport;
pub use smtp::SmtpTransport;
pub use transport::{MailTransport, build_transport};
