//! Append-only lead records

use super::submission::{fields, SubmissionPayload};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

pub const NOT_INFORMED: &str = "Não informado";
pub const NO_MESSAGE: &str = "Nenhuma";

/// Timestamp pattern of the pt-BR locale: `16/10/2026, 14:03:05`.
pub const LOCALE_TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

pub fn format_timestamp(now: DateTime<Utc>, tz: Tz) -> String {
    now.with_timezone(&tz).format(LOCALE_TIMESTAMP_FORMAT).to_string()
}

/// One accepted webhook submission. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub timestamp: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub interest: String,
    pub message: String,
}

impl SubmissionRecord {
    pub fn from_payload(payload: &SubmissionPayload, timestamp: String) -> Self {
        Self {
            timestamp,
            name: payload.get(fields::NAME).unwrap_or_default().to_string(),
            email: payload.get(fields::EMAIL).unwrap_or_default().to_string(),
            phone: payload.get(fields::PHONE).unwrap_or_default().to_string(),
            company: payload.or_default(fields::COMPANY, NOT_INFORMED).to_string(),
            interest: payload.or_default(fields::INTEREST, NOT_INFORMED).to_string(),
            message: payload.or_default(fields::MESSAGE, NO_MESSAGE).to_string(),
        }
    }

    /// Columns in sheet order.
    pub fn row(&self) -> [&str; 7] {
        [
            &self.timestamp,
            &self.name,
            &self.email,
            &self.phone,
            &self.company,
            &self.interest,
            &self.message,
        ]
    }
}
