use std::sync::Arc;

use notification_services::{EmailMessage, EmailService, NotificationError};
use tracing::info;

use crate::render::Renderer;
use crate::scan_types::{FilteredCenter, SlotError};

/// Subject used when none is configured
pub const DEFAULT_SUBJECT: &str = "Vaccine Available";

/// Where and how availability emails are sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    /// Default recipient
    pub recipient: String,
    /// Subject line
    pub subject: String,
}

impl NotifierConfig {
    /// Config sending to `recipient` with the default subject
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            subject: DEFAULT_SUBJECT.to_string(),
        }
    }

    /// Read `NOTIFY_EMAIL` (falling back to `FROM_EMAIL`) and `EMAIL_SUBJECT`.
    pub fn from_env() -> Result<Self, NotificationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`NotifierConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, NotificationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let recipient = non_empty("NOTIFY_EMAIL")
            .or_else(|| non_empty("FROM_EMAIL"))
            .ok_or_else(|| {
                NotificationError::Config(
                    "NOTIFY_EMAIL or FROM_EMAIL environment variable not set".to_string(),
                )
            })?;

        let subject = non_empty("EMAIL_SUBJECT").unwrap_or_else(|| DEFAULT_SUBJECT.to_string());

        Ok(Self { recipient, subject })
    }
}

/// Renders eligible centers and emails them
pub struct SlotNotifier {
    renderer: Arc<dyn Renderer>,
    email_service: Arc<dyn EmailService>,
    config: NotifierConfig,
}

impl SlotNotifier {
    /// Create a notifier from its collaborators
    pub fn new(
        renderer: Arc<dyn Renderer>,
        email_service: Arc<dyn EmailService>,
        config: NotifierConfig,
    ) -> Self {
        Self {
            renderer,
            email_service,
            config,
        }
    }

    /// Render `centers` and send the document. `recipient` overrides the configured one.
    /// Returns the message id reported by the email service.
    pub async fn notify(
        &self,
        centers: &[FilteredCenter],
        recipient: Option<&str>,
    ) -> Result<String, SlotError> {
        let html_body = self.renderer.render(centers)?;

        let message = EmailMessage {
            to: recipient.unwrap_or(&self.config.recipient).to_string(),
            subject: self.config.subject.clone(),
            html_body,
        };

        info!(
            "Sending availability notification for {} centers to {}",
            centers.len(),
            message.to
        );

        let message_id = self.email_service.send_email(&message).await?;
        Ok(message_id)
    }
}
