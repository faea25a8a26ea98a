use super::email::{LeadEmail, Notifier};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let from: Mailbox = config.from.parse()?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port);

        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        info!("SMTP notifier configured for {}:{}", config.host, config.port);

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

/// Builds the outgoing message; the submitter's address becomes `Reply-To`.
pub fn build_message(from: &Mailbox, email: &LeadEmail) -> Result<Message> {
    if email.to.is_empty() {
        return Err(AppError::Notification("no recipients configured".to_string()));
    }

    let mut builder = Message::builder()
        .from(from.clone())
        .reply_to(email.reply_to.parse::<Mailbox>()?)
        .subject(email.subject.as_str())
        .header(ContentType::TEXT_PLAIN);

    for recipient in &email.to {
        builder = builder.to(recipient.parse::<Mailbox>()?);
    }

    Ok(builder.body(email.body.clone())?)
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, email: &LeadEmail) -> Result<()> {
        let message = build_message(&self.from, email)?;
        let response = self.transport.send(message).await?;
        debug!(code = %response.code(), "Lead notification accepted by SMTP server");
        Ok(())
    }
}
