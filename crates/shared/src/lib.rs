//! Shared configuration and error types for Print Relay.
//!
//! This crate provides common types used across all other crates:
//! - Layered configuration for the HTTP server and the mail transport
//! - Application-wide error types with their HTTP status mapping

pub mod config;
pub mod error;

pub use crate::config::{
    AppConfig, MailConfig, SendGridConfig, ServerConfig, SmtpConfig, TransportKind,
    configured_value, is_placeholder,
};
pub use crate::error::AppError;
