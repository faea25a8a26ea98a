//! Fixed WhatsApp message templates

use crate::models::{fields, SubmissionPayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Rendered even when the value is empty.
    Always,
    /// Dropped when the value is absent or empty.
    OmitIfEmpty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateLine {
    pub emoji: &'static str,
    pub label: &'static str,
    pub field: &'static str,
    pub rule: FieldRule,
}

const fn line(emoji: &'static str, label: &'static str, field: &'static str, rule: FieldRule) -> TemplateLine {
    TemplateLine { emoji, label, field, rule }
}

const LEAD_LINES: &[TemplateLine] = &[
    line("👤", "Nome", fields::NAME, FieldRule::Always),
    line("📧", "Email", fields::EMAIL, FieldRule::Always),
    line("📱", "Telefone", fields::PHONE, FieldRule::Always),
    line("🏢", "Empresa", fields::COMPANY, FieldRule::OmitIfEmpty),
    line("🎯", "Interesse", fields::INTEREST, FieldRule::Always),
    line("💬", "Mensagem", fields::MESSAGE, FieldRule::OmitIfEmpty),
];

const SERVICE_LINES: &[TemplateLine] = &[
    line("👤", "Nome", fields::NAME, FieldRule::Always),
    line("📱", "Telefone", fields::PHONE, FieldRule::Always),
    line("📧", "Email", fields::EMAIL, FieldRule::OmitIfEmpty),
    line("📍", "Cidade", fields::CITY, FieldRule::Always),
    line("🚛", "Serviço", fields::SERVICE, FieldRule::Always),
    line("💬", "Mensagem", fields::MESSAGE, FieldRule::OmitIfEmpty),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageTemplate {
    lines: &'static [TemplateLine],
}

impl MessageTemplate {
    pub const LEAD: MessageTemplate = MessageTemplate { lines: LEAD_LINES };
    pub const SERVICE: MessageTemplate = MessageTemplate { lines: SERVICE_LINES };

    pub fn lines(&self) -> &'static [TemplateLine] {
        self.lines
    }

    /// Title, one `emoji *Label:* value` line per kept field, then a `---`
    /// separator and the attribution line.
    pub fn render(&self, title: &str, payload: &SubmissionPayload, attribution: &str) -> String {
        let mut out = String::with_capacity(256);
        out.push_str(title);
        out.push_str("\n\n");

        for line in self.lines {
            if line.rule == FieldRule::OmitIfEmpty && !payload.has_value(line.field) {
                continue;
            }
            let value = payload.get(line.field).unwrap_or_default();
            out.push_str(&format!("{} *{}:* {}\n", line.emoji, line.label, value));
        }

        out.push_str("\n---\n");
        out.push_str(attribution);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_message_layout() {
        let payload = SubmissionPayload::from_pairs([
            ("nome", "Carlos"),
            ("email", "c@x.com"),
            ("telefone", "11999999999"),
            ("interesse", "Consultoria"),
        ]);

        let message = MessageTemplate::LEAD.render(
            "🏗️ *CONTATO - ENG. LUCAS SANTOS*",
            &payload,
            "Enviado pelo site institucional",
        );

        assert_eq!(
            message,
            "🏗️ *CONTATO - ENG. LUCAS SANTOS*\n\n\
             👤 *Nome:* Carlos\n\
             📧 *Email:* c@x.com\n\
             📱 *Telefone:* 11999999999\n\
             🎯 *Interesse:* Consultoria\n\
             \n---\n\
             Enviado pelo site institucional"
        );
    }

    #[test]
    fn test_lead_message_keeps_optional_lines_when_filled() {
        let payload = SubmissionPayload::from_pairs([
            ("nome", "Carlos"),
            ("email", "c@x.com"),
            ("telefone", "11999999999"),
            ("empresa", "Construtora XYZ"),
            ("interesse", "Laudo"),
            ("mensagem", "Preciso de um laudo estrutural"),
        ]);

        let message = MessageTemplate::LEAD.render("T", &payload, "A");
        assert!(message.contains("🏢 *Empresa:* Construtora XYZ\n"));
        assert!(message.contains("💬 *Mensagem:* Preciso de um laudo estrutural\n"));
    }

    #[test]
    fn test_service_message_omits_empty_optional_lines() {
        let payload = SubmissionPayload::from_pairs([
            ("nome", "Ana"),
            ("telefone", "11987654321"),
            ("email", ""),
            ("cidade", "Jundiaí"),
            ("servico", "Guincho"),
            ("mensagem", ""),
        ]);

        let message = MessageTemplate::SERVICE.render("🚛 *ORÇAMENTO*", &payload, "Enviado pelo site");

        assert!(!message.contains("Email"));
        assert!(!message.contains("Mensagem"));
        assert!(message.contains("👤 *Nome:* Ana\n"));
        assert!(message.contains("📱 *Telefone:* 11987654321\n"));
        assert!(message.contains("📍 *Cidade:* Jundiaí\n"));
        assert!(message.contains("🚛 *Serviço:* Guincho\n"));
        assert!(message.ends_with("\n---\nEnviado pelo site"));
    }
}
