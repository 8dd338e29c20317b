//! Print upload route.

use axum::{
    Json, Router,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
    routing::post,
};
use printrelay_mail::{PrintRequest, UploadedFile};
use printrelay_shared::AppError;
use tracing::warn;

use crate::AppState;
use crate::error::{ApiError, MessageBody, message};

/// Accepted names for the file part.
const FILE_FIELDS: [&str; 2] = ["pdf_file", "pdfFile"];
/// Accepted names for the recipient name part.
const NAME_FIELDS: [&str; 2] = ["recipient_name", "recipientName"];

/// Creates the upload routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/upload", post(upload))
}

/// Raw form contents, before validation.
#[derive(Debug, Default)]
struct UploadForm {
    recipient_name: Option<String>,
    file: Option<UploadedFile>,
}

/// POST `/upload`
/// Validate the form and email the PDF to the print desk.
async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<MessageBody>), ApiError> {
    let multipart = multipart.map_err(|e| AppError::Validation(e.body_text()))?;
    let form = read_form(multipart).await?;

    let request = PrintRequest::new(form.recipient_name.as_deref(), form.file)
        .inspect_err(|e| warn!(error = %e, "Upload rejected"))?;

    state.relay.submit(request).await?;
    Ok(message("PDF uploaded and email sent successfully!"))
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if FILE_FIELDS.contains(&name.as_str()) {
            let filename = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_string);
            let content = field.bytes().await.map_err(multipart_error)?;
            form.file = Some(UploadedFile {
                filename,
                content_type,
                content,
            });
        } else if NAME_FIELDS.contains(&name.as_str()) {
            form.recipient_name = Some(field.text().await.map_err(multipart_error)?);
        }
    }

    Ok(form)
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(err.body_text())
    }
}
