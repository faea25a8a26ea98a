//! Submission validators

use super::rules::validate_email;
use crate::models::SubmissionPayload;
use serde::{Deserialize, Serialize};

/// True when every required field is present and non-blank after trimming.
/// Fields not listed in `required` are never inspected.
pub fn validate(payload: &SubmissionPayload, required: &[&str]) -> bool {
    required
        .iter()
        .all(|field| payload.get(field).map_or(false, |v| !v.trim().is_empty()))
}

/// First required field, in declared order, that is absent or the empty string.
///
/// Whitespace counts as a value here; the webhook only checks presence.
pub fn first_missing<'a>(payload: &SubmissionPayload, required: &[&'a str]) -> Option<&'a str> {
    required
        .iter()
        .copied()
        .find(|field| !payload.has_value(field))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Select,
    TextArea,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldState {
    Valid,
    Invalid,
}

/// Result of checking a single input when it loses focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldCheck {
    pub state: FieldState,
    pub shows_error: bool,
}

pub fn check_field(kind: FieldKind, value: &str, required: bool) -> FieldCheck {
    let trimmed = value.trim();
    let well_formed = match kind {
        FieldKind::Email if !trimmed.is_empty() => validate_email(trimmed).is_ok(),
        _ => true,
    };

    let state = if well_formed && !trimmed.is_empty() {
        FieldState::Valid
    } else {
        FieldState::Invalid
    };

    FieldCheck {
        state,
        shows_error: state == FieldState::Invalid && required,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEAD_REQUIRED: [&str; 4] = ["nome", "email", "telefone", "interesse"];

    fn complete() -> SubmissionPayload {
        SubmissionPayload::from_pairs([
            ("nome", "Carlos"),
            ("email", "c@x.com"),
            ("telefone", "11999999999"),
            ("interesse", "Consultoria"),
        ])
    }

    #[test]
    fn test_complete_payload_passes() {
        assert!(validate(&complete(), &LEAD_REQUIRED));
    }

    #[test]
    fn test_each_missing_or_blank_field_fails() {
        for field in LEAD_REQUIRED {
            let mut blank = complete();
            blank.insert(field, "   \t");
            assert!(!validate(&blank, &LEAD_REQUIRED), "blank {} accepted", field);

            let mut empty = complete();
            empty.insert(field, "");
            assert!(!validate(&empty, &LEAD_REQUIRED), "empty {} accepted", field);

            let absent = SubmissionPayload::from_pairs(
                complete().iter().filter(|(k, _)| *k != field).map(|(k, v)| (k.to_string(), v.to_string())),
            );
            assert!(!validate(&absent, &LEAD_REQUIRED), "absent {} accepted", field);
        }
    }

    #[test]
    fn test_optional_and_extra_fields_ignored() {
        let mut payload = complete();
        payload.insert("empresa", "");
        payload.insert("mensagem", "  ");
        payload.insert("utm_source", "google");
        assert!(validate(&payload, &LEAD_REQUIRED));
    }

    #[test]
    fn test_validate_is_repeatable() {
        let mut payload = complete();
        payload.insert("telefone", " ");
        let first = validate(&payload, &LEAD_REQUIRED);
        let second = validate(&payload, &LEAD_REQUIRED);
        assert_eq!(first, second);
        assert!(!first);
    }

    #[test]
    fn test_first_missing_short_circuits_in_order() {
        let payload = SubmissionPayload::from_pairs([("nome", "A"), ("telefone", "11")]);
        assert_eq!(first_missing(&payload, &["nome", "email", "telefone"]), Some("email"));

        let payload = SubmissionPayload::new();
        assert_eq!(first_missing(&payload, &["nome", "email", "telefone"]), Some("nome"));

        let payload = SubmissionPayload::from_pairs([("nome", " "), ("email", "a@b.co"), ("telefone", "1")]);
        assert_eq!(first_missing(&payload, &["nome", "email", "telefone"]), None);
    }

    #[test]
    fn test_check_field() {
        let check = check_field(FieldKind::Text, "  ", true);
        assert_eq!(check.state, FieldState::Invalid);
        assert!(check.shows_error);

        let check = check_field(FieldKind::TextArea, "", false);
        assert_eq!(check.state, FieldState::Invalid);
        assert!(!check.shows_error);

        let check = check_field(FieldKind::Email, "not-an-email", true);
        assert!(check.shows_error);

        let check = check_field(FieldKind::Email, "ana@empresa.com.br", true);
        assert_eq!(check.state, FieldState::Valid);
        assert!(!check.shows_error);
    }
}
