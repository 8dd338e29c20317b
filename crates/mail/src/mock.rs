//! In-memory transport for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::MailError;
use crate::message::OutboundEmail;
use crate::transport::MailTransport;

#[derive(Debug, Clone)]
enum Outcome {
    Accept,
    Reject(String),
    Unconfigured(String),
}

/// Records every message it is asked to send and answers with a scripted outcome.
#[derive(Debug)]
pub struct RecordingTransport {
    outcome: Outcome,
    delay: Option<Duration>,
    calls: AtomicUsize,
    sent: Mutex<Vec<OutboundEmail>>,
}

impl RecordingTransport {
    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            delay: None,
            calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Accepts every message.
    #[must_use]
    pub fn accepting() -> Self {
        Self::with_outcome(Outcome::Accept)
    }

    /// Fails every send with [`MailError::Rejected`] carrying `reason`.
    #[must_use]
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Reject(reason.into()))
    }

    /// Fails every send with [`MailError::NotConfigured`].
    #[must_use]
    pub fn unconfigured(setting: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Unconfigured(setting.into()))
    }

    /// Waits this long before answering.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of `send` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Messages passed to `send`, in call order.
    pub async fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().await.push(email.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.outcome {
            Outcome::Accept => Ok(()),
            Outcome::Reject(reason) => Err(MailError::rejected(reason.clone())),
            Outcome::Unconfigured(setting) => Err(MailError::not_configured(setting.clone())),
        }
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
