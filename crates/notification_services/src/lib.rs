//! # Notification Services
//!
//! This crate provides the email delivery capability used to send availability alerts.
//! It includes the `EmailService` abstraction, an AWS SES implementation and a stdout
//! implementation for dry runs.

/// Email service implementations.
pub mod service;
/// Types and errors shared by the notification services.
pub mod types;

pub use service::{EmailService, SesEmailService, StdoutEmailService};
pub use types::{EmailMessage, NotificationError};
