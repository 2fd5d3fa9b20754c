//! SMTP mail delivery for one-time codes.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::ApiConfig;
use crate::domain::repository::MailSender;
use crate::error::ApiError;

/// Sends plain-text mail over SMTP (STARTTLS). Cheap to clone: the transport
/// shares its connection pool internally.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    /// Build the transport from config. Connects lazily on first send.
    pub fn from_config(config: &ApiConfig) -> Self {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .expect("invalid SMTP_HOST")
            .port(config.smtp_port);
        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }
        Self {
            transport: builder.build(),
            from: config.smtp_from.clone(),
        }
    }
}

impl MailSender for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), ApiError> {
        let email = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|_| ApiError::Configuration("invalid SMTP_FROM address"))?,
            )
            .to(to
                .parse()
                .map_err(|_| ApiError::Validation("invalid email".into()))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_owned())
            .map_err(|e| ApiError::Upstream(format!("failed to build email: {e}")))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| ApiError::Upstream(format!("failed to send email: {e}")))?;

        tracing::info!(to, "email sent");
        Ok(())
    }
}
