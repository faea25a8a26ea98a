use crate::{
    error::{AppError, Result},
    models::{fields, format_timestamp, SubmissionPayload, SubmissionRecord, WebhookResponse},
    notify::{LeadEmail, MailSettings, Notifier},
    store::LeadStore,
    validation::first_missing,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

pub const WEBHOOK_REQUIRED_FIELDS: [&str; 3] = [fields::NAME, fields::EMAIL, fields::PHONE];

/// Server side of the contact pipeline: records a lead and notifies the owners.
#[derive(Clone)]
pub struct LeadService {
    store: Arc<dyn LeadStore>,
    notifier: Arc<dyn Notifier>,
    settings: MailSettings,
}

impl LeadService {
    pub fn new(store: Arc<dyn LeadStore>, notifier: Arc<dyn Notifier>, settings: MailSettings) -> Self {
        Self {
            store,
            notifier,
            settings,
        }
    }

    pub fn store(&self) -> &Arc<dyn LeadStore> {
        &self.store
    }

    /// Converts the outcome of parsing plus acceptance into the webhook body.
    /// No error leaves this function.
    pub async fn handle(&self, parsed: Result<SubmissionPayload>) -> WebhookResponse {
        let outcome = match parsed {
            Ok(payload) => self.accept(&payload, Utc::now()).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => WebhookResponse::ok(),
            Err(e) => {
                if !matches!(e, AppError::MissingField(_)) {
                    warn!("Lead submission failed: {}", e);
                }
                WebhookResponse::failure(e.to_string())
            }
        }
    }

    /// Appends the record first, then sends the notification. A failed send
    /// leaves the record in place.
    pub async fn accept(&self, payload: &SubmissionPayload, now: DateTime<Utc>) -> Result<()> {
        if let Some(field) = first_missing(payload, &WEBHOOK_REQUIRED_FIELDS) {
            return Err(AppError::MissingField(field.to_string()));
        }

        let record = SubmissionRecord::from_payload(payload, format_timestamp(now, self.settings.timezone));
        self.store.append(&record).await?;
        info!(store = self.store.kind(), "Lead recorded");

        let email = LeadEmail::from_record(&record, &self.settings);
        self.notifier.send(&email).await?;

        Ok(())
    }
}
