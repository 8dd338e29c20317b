//! Print request validation.

use bytes::Bytes;
use printrelay_shared::AppError;
use thiserror::Error;

use crate::message::{Attachment, OutboundEmail, PDF_MEDIA_TYPE, escape_html};

/// Why an upload was refused before anything was sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// Recipient name missing or blank.
    #[error("Recipient name is required.")]
    MissingRecipientName,

    /// No file part in the form.
    #[error("No PDF file uploaded.")]
    MissingFile,

    /// Wrong extension or wrong declared content type.
    #[error("Only PDF files are allowed.")]
    NotPdf,
}

impl From<RequestError> for AppError {
    fn from(err: RequestError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// A file part as received from the client.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client supplied file name.
    pub filename: String,
    /// Declared content type, if any.
    pub content_type: Option<String>,
    /// File bytes.
    pub content: Bytes,
}

impl UploadedFile {
    /// True when the name ends in `.pdf` (any case) and the declared type is exactly
    /// `application/pdf`.
    #[must_use]
    pub fn is_pdf(&self) -> bool {
        self.filename.to_ascii_lowercase().ends_with(".pdf")
            && self.content_type.as_deref() == Some(PDF_MEDIA_TYPE)
    }
}

/// A validated print request.
#[derive(Debug, Clone)]
pub struct PrintRequest {
    recipient_name: String,
    file: UploadedFile,
}

impl PrintRequest {
    /// Validates the form contents.
    ///
    /// # Errors
    ///
    /// Returns a [`RequestError`] if the name is blank, the file is missing, or the
    /// file is not a PDF.
    pub fn new(recipient_name: Option<&str>, file: Option<UploadedFile>) -> Result<Self, RequestError> {
        let recipient_name = recipient_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(RequestError::MissingRecipientName)?;

        let file = file.ok_or(RequestError::MissingFile)?;
        if !file.is_pdf() {
            return Err(RequestError::NotPdf);
        }

        Ok(Self {
            recipient_name: recipient_name.to_string(),
            file,
        })
    }

    /// Trimmed recipient name.
    #[must_use]
    pub fn recipient_name(&self) -> &str {
        &self.recipient_name
    }

    /// Uploaded file name.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.file.filename
    }

    /// Builds the notification email carrying the PDF.
    #[must_use]
    pub fn into_email(self, from: &str, to: &str) -> OutboundEmail {
        let subject = format!("New Print Request from {}", self.recipient_name);
        let body = format!(
            "<p>Hello,</p>\n\
             <p>A new print request has been submitted.</p>\n\
             <p><strong>Recipient Name:</strong> {}</p>\n\
             <p>Please find the PDF file attached.</p>",
            escape_html(&self.recipient_name)
        );

        OutboundEmail::new(from, to, subject, body).with_attachment(Attachment::new(
            self.file.filename,
            PDF_MEDIA_TYPE,
            self.file.content,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn file(name: &str, content_type: Option<&str>) -> UploadedFile {
        UploadedFile {
            filename: name.to_string(),
            content_type: content_type.map(str::to_string),
            content: Bytes::from_static(b"%PDF-1.7 test"),
        }
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    #[case(Some("\t\n"))]
    fn test_blank_recipient_name_rejected(#[case] name: Option<&str>) {
        let result = PrintRequest::new(name, Some(file("doc.pdf", Some(PDF_MEDIA_TYPE))));
        assert_eq!(result.unwrap_err(), RequestError::MissingRecipientName);
    }

    #[test]
    fn test_missing_file_rejected() {
        let result = PrintRequest::new(Some("Jane Doe"), None);
        assert_eq!(result.unwrap_err(), RequestError::MissingFile);
    }

    #[rstest]
    #[case("doc.txt", Some(PDF_MEDIA_TYPE))]
    #[case("doc.pdf.exe", Some(PDF_MEDIA_TYPE))]
    #[case("pdf", Some(PDF_MEDIA_TYPE))]
    #[case("doc.pdf", Some("application/octet-stream"))]
    #[case("doc.pdf", Some("Application/PDF"))]
    #[case("doc.pdf", Some("application/pdf; charset=binary"))]
    #[case("doc.pdf", None)]
    fn test_non_pdf_rejected(#[case] name: &str, #[case] content_type: Option<&str>) {
        let result = PrintRequest::new(Some("Jane Doe"), Some(file(name, content_type)));
        assert_eq!(result.unwrap_err(), RequestError::NotPdf);
    }

    #[rstest]
    #[case("doc.pdf")]
    #[case("REPORT.PDF")]
    #[case("Scan.Pdf")]
    fn test_pdf_accepted(#[case] name: &str) {
        let request = PrintRequest::new(Some("  Jane Doe "), Some(file(name, Some(PDF_MEDIA_TYPE))))
            .expect("should validate");
        assert_eq!(request.recipient_name(), "Jane Doe");
        assert_eq!(request.filename(), name);
    }

    #[test]
    fn test_into_email_carries_exact_bytes() {
        let content = Bytes::from(vec![0_u8, 255, 1, 254, 37, 80, 68, 70]);
        let request = PrintRequest::new(
            Some("Jane <Doe>"),
            Some(UploadedFile {
                filename: "doc.pdf".into(),
                content_type: Some(PDF_MEDIA_TYPE.into()),
                content: content.clone(),
            }),
        )
        .expect("should validate");

        let email = request.into_email("print@example.org", "desk@example.org");
        assert_eq!(email.from, "print@example.org");
        assert_eq!(email.to, "desk@example.org");
        assert_eq!(email.subject, "New Print Request from Jane <Doe>");
        assert!(email.html_body.contains("Jane &lt;Doe&gt;"));

        let attachment = email.attachment.expect("attachment");
        assert_eq!(attachment.filename, "doc.pdf");
        assert_eq!(attachment.content_type, PDF_MEDIA_TYPE);
        assert_eq!(attachment.content, content);
    }

    #[test]
    fn test_request_error_maps_to_validation() {
        let app: AppError = RequestError::NotPdf.into();
        assert_eq!(app.status_code(), 400);
        assert_eq!(app.message(), "Only PDF files are allowed.");
    }
}
