/// Errors raised while rendering or delivering a notification.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    /// Simple email service (SES) errors.
    #[error("AWS SES error: {0}")]
    SesError(String),

    /// The notification document could not be rendered.
    #[error("Render error: {0}")]
    Render(String),

    /// Missing or invalid notification settings.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// An email as handed to an [`crate::EmailService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// HTML body
    pub html_body: String,
}
