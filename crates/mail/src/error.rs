//! Mail delivery error types.

use std::time::Duration;

use printrelay_shared::AppError;
use thiserror::Error;

/// Broad classification of a [`MailError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailErrorKind {
    /// Settings are missing; retrying will not help until the operator fixes them.
    Configuration,
    /// The transport was tried and the message did not go out.
    Delivery,
    /// The transport itself could not be set up.
    Internal,
}

/// Outcome of a failed send, shared by every transport.
#[derive(Debug, Error)]
pub enum MailError {
    /// A required setting is absent or still a placeholder.
    #[error("{0} is not configured")]
    NotConfigured(String),

    /// The message could not be assembled (bad address, bad header).
    #[error("Failed to build email: {0}")]
    InvalidMessage(String),

    /// The provider refused or failed the send.
    #[error("Failed to send email: {0}")]
    Rejected(String),

    /// The underlying client could not be created.
    #[error("Failed to set up mail client: {0}")]
    ClientSetup(String),

    /// No answer from the provider within the delivery timeout.
    #[error("Failed to send email: timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl MailError {
    /// Create a not configured error.
    #[must_use]
    pub fn not_configured(setting: impl Into<String>) -> Self {
        Self::NotConfigured(setting.into())
    }

    /// Create a rejected error.
    #[must_use]
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    /// Returns the classification used to pick an HTTP status.
    #[must_use]
    pub const fn kind(&self) -> MailErrorKind {
        match self {
            Self::NotConfigured(_) => MailErrorKind::Configuration,
            Self::InvalidMessage(_) | Self::Rejected(_) | Self::Timeout(_) => {
                MailErrorKind::Delivery
            }
            Self::ClientSetup(_) => MailErrorKind::Internal,
        }
    }
}

impl From<MailError> for AppError {
    fn from(err: MailError) -> Self {
        match err.kind() {
            MailErrorKind::Configuration => Self::Configuration(err.to_string()),
            MailErrorKind::Delivery => Self::Delivery(err.to_string()),
            MailErrorKind::Internal => Self::Internal(err.to_string()),
        }
    }
}
