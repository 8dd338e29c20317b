use super::*;

#[test]
fn test_app_error_status_codes() {
    assert_eq!(AppError::Validation("test".into()).status_code(), 400);
    assert_eq!(AppError::PayloadTooLarge("test".into()).status_code(), 413);
    assert_eq!(AppError::Configuration("test".into()).status_code(), 500);
    assert_eq!(AppError::Delivery("test".into()).status_code(), 500);
    assert_eq!(AppError::Internal("test".into()).status_code(), 500);
}

#[test]
fn test_app_error_error_codes() {
    assert_eq!(
        AppError::Validation("test".into()).error_code(),
        "VALIDATION_ERROR"
    );
    assert_eq!(
        AppError::PayloadTooLarge("test".into()).error_code(),
        "PAYLOAD_TOO_LARGE"
    );
    assert_eq!(
        AppError::Configuration("test".into()).error_code(),
        "CONFIGURATION_ERROR"
    );
    assert_eq!(
        AppError::Delivery("test".into()).error_code(),
        "DELIVERY_FAILED"
    );
    assert_eq!(
        AppError::Internal("test".into()).error_code(),
        "INTERNAL_ERROR"
    );
}

#[test]
fn test_app_error_display() {
    assert_eq!(
        format!("{}", AppError::Validation("msg".into())),
        "Validation error: msg"
    );
    assert_eq!(
        format!("{}", AppError::Configuration("msg".into())),
        "Configuration error: msg"
    );
    assert_eq!(
        format!("{}", AppError::Delivery("msg".into())),
        "Delivery failed: msg"
    );
}

#[test]
fn test_app_error_message_strips_prefix() {
    assert_eq!(
        AppError::Delivery("SMTP 550 mailbox unavailable".into()).message(),
        "SMTP 550 mailbox unavailable"
    );
    assert_eq!(
        AppError::Validation("Only PDF files are allowed.".into()).message(),
        "Only PDF files are allowed."
    );
}
