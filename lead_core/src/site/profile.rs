//! Per-site contact form profiles

use super::{deep_link, MessageTemplate};
use crate::models::{fields, FormBinding, SubmissionPayload};
use crate::validation::validate_whatsapp_number;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormVariant {
    /// Engineering portfolio: name, email, phone and area of interest.
    Lead,
    /// Crane rental quote: name, phone, city and requested service.
    Service,
}

impl FormVariant {
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            FormVariant::Lead => &[fields::NAME, fields::EMAIL, fields::PHONE, fields::INTEREST],
            FormVariant::Service => &[fields::NAME, fields::PHONE, fields::CITY, fields::SERVICE],
        }
    }

    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            FormVariant::Lead => &[
                fields::NAME,
                fields::EMAIL,
                fields::PHONE,
                fields::COMPANY,
                fields::INTEREST,
                fields::MESSAGE,
            ],
            FormVariant::Service => &[
                fields::NAME,
                fields::PHONE,
                fields::EMAIL,
                fields::CITY,
                fields::SERVICE,
                fields::MESSAGE,
            ],
        }
    }

    pub fn template(&self) -> MessageTemplate {
        match self {
            FormVariant::Lead => MessageTemplate::LEAD,
            FormVariant::Service => MessageTemplate::SERVICE,
        }
    }

    pub fn binding(&self) -> FormBinding {
        FormBinding::new(self.fields())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteProfile {
    pub title: String,
    pub whatsapp_number: String,
    pub variant: FormVariant,
    pub attribution: String,
}

impl SiteProfile {
    pub fn portfolio() -> Self {
        Self {
            title: "🏗️ *CONTATO - ENG. LUCAS SANTOS*".to_string(),
            whatsapp_number: "5511973933390".to_string(),
            variant: FormVariant::Lead,
            attribution: "Enviado pelo site institucional".to_string(),
        }
    }

    pub fn required_fields(&self) -> &'static [&'static str] {
        self.variant.required_fields()
    }

    pub fn render_message(&self, payload: &SubmissionPayload) -> String {
        self.variant
            .template()
            .render(&self.title, payload, &self.attribution)
    }

    pub fn deep_link_for(&self, message: &str) -> String {
        deep_link(&self.whatsapp_number, message)
    }

    pub fn check(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("site title cannot be empty".to_string());
        }
        validate_whatsapp_number(&self.whatsapp_number)
            .map_err(|e| format!("{} ({})", e.code, self.whatsapp_number))
    }
}
