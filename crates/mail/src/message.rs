//! Transport-neutral email message.

use bytes::Bytes;

/// Media type accepted for print uploads.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// A binary file carried by an email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// File name shown to the recipient.
    pub filename: String,
    /// MIME type of the content.
    pub content_type: String,
    /// Raw file bytes.
    pub content: Bytes,
}

impl Attachment {
    /// Create an attachment.
    #[must_use]
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            content: content.into(),
        }
    }
}

/// A fully addressed message, ready for any [`crate::MailTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    /// Sender address.
    pub from: String,
    /// Sender display name.
    pub from_name: Option<String>,
    /// Single recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html_body: String,
    /// Optional attachment.
    pub attachment: Option<Attachment>,
}

impl OutboundEmail {
    /// Create a message without attachment.
    #[must_use]
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        html_body: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            from_name: None,
            to: to.into(),
            subject: subject.into(),
            html_body: html_body.into(),
            attachment: None,
        }
    }

    /// Set the sender display name.
    #[must_use]
    pub fn with_sender_name(mut self, name: impl Into<String>) -> Self {
        self.from_name = Some(name.into());
        self
    }

    /// Attach a file.
    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Size of the attachment in bytes, zero when there is none.
    #[must_use]
    pub fn attachment_len(&self) -> usize {
        self.attachment.as_ref().map_or(0, |a| a.content.len())
    }
}

/// Escapes text for inclusion in an HTML body.
pub(crate) fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Jane Doe"), "Jane Doe");
        assert_eq!(
            escape_html("<b>Tom & \"Jerry\"</b>"),
            "&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;"
        );
        assert_eq!(escape_html("O'Neil"), "O&#39;Neil");
    }

    #[test]
    fn test_attachment_len() {
        let email = OutboundEmail::new("a@example.org", "b@example.org", "s", "<p>b</p>");
        assert_eq!(email.attachment_len(), 0);

        let email = email.with_attachment(Attachment::new(
            "doc.pdf",
            PDF_MEDIA_TYPE,
            vec![0_u8; 42],
        ));
        assert_eq!(email.attachment_len(), 42);
    }
}
