use crate::types::*;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_ses::Client as SesClient;
use uuid::Uuid;

/// Capability to deliver an HTML email
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Sends the message and returns the provider's message id.
    async fn send_email(&self, message: &EmailMessage) -> Result<String, NotificationError>;
}

/// Email service backed by AWS SES.
#[derive(Debug, Clone)]
pub struct SesEmailService {
    ses_client: SesClient,
    from_email: String,
}

impl SesEmailService {
    /// Creates a new SES email service. Credentials and region come from the standard AWS
    /// environment chain.
    pub async fn new(from_email: impl Into<String>) -> Result<Self, NotificationError> {
        let from_email = from_email.into();
        if from_email.trim().is_empty() {
            return Err(NotificationError::Config(
                "sender address must not be empty".to_string(),
            ));
        }

        let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        let ses_client = SesClient::new(&config);

        Ok(Self {
            ses_client,
            from_email,
        })
    }

    /// Sender address used for every message.
    pub fn from_email(&self) -> &str {
        &self.from_email
    }
}

#[async_trait]
impl EmailService for SesEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, NotificationError> {
        log::info!(
            "📧 Sending '{}' to {} via AWS SES...",
            message.subject,
            message.to
        );

        let subject_content = aws_sdk_ses::types::Content::builder()
            .data(&message.subject)
            .charset("UTF-8")
            .build()
            .map_err(|e| {
                log::error!("❌ Failed to build subject content: {}", e);
                NotificationError::SesError(format!("Failed to build subject: {}", e))
            })?;

        let html_content = aws_sdk_ses::types::Content::builder()
            .data(&message.html_body)
            .charset("UTF-8")
            .build()
            .map_err(|e| {
                log::error!("❌ Failed to build HTML content: {}", e);
                NotificationError::SesError(format!("Failed to build HTML body: {}", e))
            })?;

        let body = aws_sdk_ses::types::Body::builder()
            .html(html_content)
            .build();

        let email = aws_sdk_ses::types::Message::builder()
            .subject(subject_content)
            .body(body)
            .build();

        let destination = aws_sdk_ses::types::Destination::builder()
            .to_addresses(&message.to)
            .build();

        let result = self
            .ses_client
            .send_email()
            .source(format!("Covicheck <{}>", self.from_email))
            .destination(destination)
            .message(email)
            .send()
            .await;

        match result {
            Ok(output) => {
                let message_id = output.message_id().to_string();
                log::info!("✅ Email sent to {}", message.to);
                log::info!("📧 SES Message ID: {}", message_id);
                Ok(message_id)
            }
            Err(e) => {
                log::error!("❌ AWS SES error: {:#?}", e);
                let error_msg = if let Some(service_error) = e.as_service_error() {
                    format!("AWS SES service error: {:?}", service_error)
                } else {
                    format!("AWS SES error: {}", e)
                };
                Err(NotificationError::SesError(error_msg))
            }
        }
    }
}

/// Prints the email to stdout instead of sending it. Used for dry runs.
pub struct StdoutEmailService;

impl StdoutEmailService {
    fn format(message: &EmailMessage) -> String {
        format!(
            "To: {}\nSubject: {}\n\n{}",
            message.to, message.subject, message.html_body
        )
    }
}

#[async_trait]
impl EmailService for StdoutEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, NotificationError> {
        log::info!("📧 [DRY RUN] Printing email for {}", message.to);
        println!("{}", Self::format(message));

        Ok(format!("dry-run-{}", Uuid::new_v4()))
    }
}
