use crate::error::Result;
use crate::models::SubmissionRecord;
use async_trait::async_trait;
use chrono_tz::Tz;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone)]
pub struct MailSettings {
    pub recipients: Vec<String>,
    pub subject: String,
    pub heading: String,
    pub timezone: Tz,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            recipients: Vec::new(),
            subject: "Novo Lead".to_string(),
            heading: "Novo lead".to_string(),
            timezone: chrono_tz::America::Sao_Paulo,
        }
    }
}

/// Plain-text notification for one accepted lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadEmail {
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
    pub reply_to: String,
}

impl LeadEmail {
    pub fn from_record(record: &SubmissionRecord, settings: &MailSettings) -> Self {
        let body = format!(
            "{}:\n\n\
             Nome: {}\n\
             Email: {}\n\
             Telefone: {}\n\
             Empresa: {}\n\
             Interesse: {}\n\
             Mensagem: {}\n\
             Data/Hora: {}",
            settings.heading,
            record.name,
            record.email,
            record.phone,
            record.company,
            record.interest,
            record.message,
            record.timestamp,
        );

        Self {
            to: settings.recipients.clone(),
            subject: settings.subject.clone(),
            body,
            reply_to: record.email.clone(),
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, email: &LeadEmail) -> Result<()>;
}

/// Writes notifications to the log. Used when outgoing mail is disabled.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, email: &LeadEmail) -> Result<()> {
        info!(
            to = %email.to.join(", "),
            reply_to = %email.reply_to,
            subject = %email.subject,
            "Mail disabled, lead notification logged only\n{}",
            email.body
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubmissionPayload;

    #[test]
    fn test_email_body_and_headers() {
        let payload = SubmissionPayload::from_pairs([
            ("nome", "Carlos"),
            ("email", "c@x.com"),
            ("telefone", "11999999999"),
            ("interesse", "Consultoria"),
        ]);
        let record = SubmissionRecord::from_payload(&payload, "16/10/2026, 14:03:05".to_string());
        let settings = MailSettings {
            recipients: vec!["a@example.com".to_string(), "b@example.com".to_string()],
            subject: "Novo Lead - Lucas Santos".to_string(),
            heading: "Novo lead - Lucas Santos".to_string(),
            ..MailSettings::default()
        };

        let email = LeadEmail::from_record(&record, &settings);

        assert_eq!(email.to, vec!["a@example.com", "b@example.com"]);
        assert_eq!(email.reply_to, "c@x.com");
        assert_eq!(
            email.body,
            "Novo lead - Lucas Santos:\n\n\
             Nome: Carlos\n\
             Email: c@x.com\n\
             Telefone: 11999999999\n\
             Empresa: Não informado\n\
             Interesse: Consultoria\n\
             Mensagem: Nenhuma\n\
             Data/Hora: 16/10/2026, 14:03:05"
        );
    }

    #[tokio::test]
    async fn test_log_notifier_accepts_everything() {
        let email = LeadEmail {
            to: vec!["a@example.com".to_string()],
            subject: "s".to_string(),
            body: "b".to_string(),
            reply_to: "not an address".to_string(),
        };
        assert!(LogNotifier.send(&email).await.is_ok());
    }
}
