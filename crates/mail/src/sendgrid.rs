//! SendGrid v3 HTTP API transport.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use printrelay_shared::{SendGridConfig, configured_value};
use serde::Serialize;

use crate::error::MailError;
use crate::message::OutboundEmail;
use crate::transport::MailTransport;

const SEND_PATH: &str = "/v3/mail/send";

#[derive(Serialize)]
struct SendRequest<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    subject: &'a str,
    content: [Content<'a>; 1],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<AttachmentPayload<'a>>,
}

#[derive(Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Serialize)]
struct Address<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    value: &'a str,
}

#[derive(Serialize)]
struct AttachmentPayload<'a> {
    content: String,
    #[serde(rename = "type")]
    kind: &'a str,
    filename: &'a str,
    disposition: &'static str,
}

impl<'a> SendRequest<'a> {
    fn from_email(email: &'a OutboundEmail) -> Self {
        let attachments = email
            .attachment
            .iter()
            .map(|a| AttachmentPayload {
                content: STANDARD.encode(&a.content),
                kind: &a.content_type,
                filename: &a.filename,
                disposition: "attachment",
            })
            .collect();

        Self {
            personalizations: [Personalization {
                to: [Address {
                    email: &email.to,
                    name: None,
                }],
            }],
            from: Address {
                email: &email.from,
                name: email.from_name.as_deref(),
            },
            subject: &email.subject,
            content: [Content {
                kind: "text/html",
                value: &email.html_body,
            }],
            attachments,
        }
    }
}

/// Sends mail through the SendGrid API.
#[derive(Debug, Clone)]
pub struct SendGridTransport {
    config: SendGridConfig,
    client: reqwest::Client,
}

impl SendGridTransport {
    /// Creates a new SendGrid transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: SendGridConfig, timeout: Duration) -> Result<Self, MailError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MailError::ClientSetup(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!("{}{SEND_PATH}", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl MailTransport for SendGridTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let api_key = configured_value(self.config.api_key.as_deref())
            .ok_or_else(|| MailError::not_configured("SendGrid API key"))?;

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&SendRequest::from_email(email))
            .send()
            .await
            .map_err(|e| MailError::rejected(format!("SendGrid request failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = %status, body = %body, "SendGrid rejected message");
        Err(MailError::rejected(format!(
            "SendGrid returned {}: {body}",
            status.as_u16()
        )))
    }

    fn name(&self) -> &'static str {
        "sendgrid"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Attachment, PDF_MEDIA_TYPE};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport(base_url: &str, api_key: Option<&str>) -> SendGridTransport {
        SendGridTransport::new(
            SendGridConfig {
                api_key: api_key.map(str::to_string),
                base_url: base_url.to_string(),
            },
            Duration::from_secs(5),
        )
        .expect("client")
    }

    fn email_with_pdf(content: Vec<u8>) -> OutboundEmail {
        OutboundEmail::new(
            "print@example.org",
            "desk@example.org",
            "New Print Request from Jane Doe",
            "<p>Hello</p>",
        )
        .with_attachment(Attachment::new("doc.pdf", PDF_MEDIA_TYPE, content))
    }

    #[tokio::test]
    async fn test_send_accepted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/mail/send"))
            .and(header("authorization", "Bearer SG.test"))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let result = transport(&server.uri(), Some("SG.test"))
            .send(&email_with_pdf(b"%PDF".to_vec()))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_attachment_round_trips_through_base64() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/mail/send"))
            .respond_with(ResponseTemplate::new(202))
            .mount(&server)
            .await;

        let content: Vec<u8> = (0..=255).cycle().take(4099).collect();
        transport(&server.uri(), Some("SG.test"))
            .send(&email_with_pdf(content.clone()))
            .await
            .expect("send");

        let requests = server.received_requests().await.expect("recording enabled");
        assert_eq!(requests.len(), 1);

        let payload: serde_json::Value =
            serde_json::from_slice(&requests[0].body).expect("json body");
        assert_eq!(payload["personalizations"][0]["to"][0]["email"], "desk@example.org");
        assert_eq!(payload["from"]["email"], "print@example.org");
        assert_eq!(payload["content"][0]["type"], "text/html");

        let attachment = &payload["attachments"][0];
        assert_eq!(attachment["filename"], "doc.pdf");
        assert_eq!(attachment["type"], "application/pdf");
        assert_eq!(attachment["disposition"], "attachment");

        let encoded = attachment["content"].as_str().expect("content string");
        assert_eq!(STANDARD.decode(encoded).expect("base64"), content);
    }

    #[tokio::test]
    async fn test_probe_without_attachment_omits_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(202))
            .mount(&server)
            .await;

        let email = OutboundEmail::new("a@example.org", "b@example.org", "Test", "<p>t</p>")
            .with_sender_name("Print Relay");
        transport(&server.uri(), Some("SG.test"))
            .send(&email)
            .await
            .expect("send");

        let requests = server.received_requests().await.expect("recording enabled");
        let payload: serde_json::Value =
            serde_json::from_slice(&requests[0].body).expect("json body");
        assert!(payload.get("attachments").is_none());
        assert_eq!(payload["from"]["name"], "Print Relay");
    }

    #[tokio::test]
    async fn test_rejection_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_string(r#"{"errors":[{"message":"sender not verified"}]}"#),
            )
            .mount(&server)
            .await;

        let err = transport(&server.uri(), Some("SG.test"))
            .send(&email_with_pdf(b"%PDF".to_vec()))
            .await
            .unwrap_err();

        let text = err.to_string();
        assert!(matches!(err, MailError::Rejected(_)));
        assert!(text.contains("403"));
        assert!(text.contains("sender not verified"));
    }

    #[tokio::test]
    async fn test_missing_api_key_never_calls_api() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(202))
            .expect(0)
            .mount(&server)
            .await;

        for key in [None, Some(""), Some("your_sendgrid_api_key")] {
            let err = transport(&server.uri(), key)
                .send(&email_with_pdf(b"%PDF".to_vec()))
                .await
                .unwrap_err();
            assert!(matches!(err, MailError::NotConfigured(_)));
        }
    }
}
