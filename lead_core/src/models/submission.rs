//! Submission payloads and form field bindings

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub mod fields {
    pub const NAME: &str = "nome";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "telefone";
    pub const COMPANY: &str = "empresa";
    pub const INTEREST: &str = "interesse";
    pub const MESSAGE: &str = "mensagem";
    pub const CITY: &str = "cidade";
    pub const SERVICE: &str = "servico";
}

/// Field values captured from a single submit trigger.
///
/// Built fresh for every submission and dropped once dispatched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionPayload {
    values: BTreeMap<String, String>,
}

impl SubmissionPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Flattens a JSON object into string values. Falsy scalars (`null`,
    /// `false`, `0`) are treated as absent, so they fail presence checks and
    /// take the record's fallback text.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            AppError::BadRequest("submission body must be a JSON object".to_string())
        })?;

        let mut payload = Self::new();
        for (key, member) in object {
            let text = match member {
                serde_json::Value::Null | serde_json::Value::Bool(false) => continue,
                serde_json::Value::Number(n) if n.as_f64() == Some(0.0) => continue,
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            payload.insert(key.clone(), text);
        }

        Ok(payload)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Present and non-empty, without trimming.
    pub fn has_value(&self, field: &str) -> bool {
        self.get(field).map_or(false, |v| !v.is_empty())
    }

    /// Value of `field`, or `fallback` when it is absent or empty.
    pub fn or_default<'a>(&'a self, field: &str, fallback: &'a str) -> &'a str {
        match self.get(field) {
            Some(value) if !value.is_empty() => value,
            _ => fallback,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<HashMap<String, String>> for SubmissionPayload {
    fn from(map: HashMap<String, String>) -> Self {
        Self::from_pairs(map)
    }
}

/// Source of raw field values keyed by element identifier.
pub trait FieldSource {
    fn value(&self, id: &str) -> Option<String>;
}

impl FieldSource for HashMap<String, String> {
    fn value(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

impl FieldSource for BTreeMap<String, String> {
    fn value(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

impl FieldSource for SubmissionPayload {
    fn value(&self, id: &str) -> Option<String> {
        self.get(id).map(str::to_string)
    }
}

/// Binds canonical field names to the element identifiers of one form on a page.
///
/// A page may carry a second copy of a form whose identifiers end in a numeric
/// suffix (`nome2`, `telefone2`, ...).
#[derive(Debug, Clone)]
pub struct FormBinding {
    fields: Vec<&'static str>,
    suffix: Option<String>,
}

impl FormBinding {
    pub fn new(fields: &[&'static str]) -> Self {
        Self {
            fields: fields.to_vec(),
            suffix: None,
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        self.suffix = if suffix.is_empty() { None } else { Some(suffix) };
        self
    }

    pub fn element_id(&self, field: &str) -> String {
        match &self.suffix {
            Some(suffix) => format!("{}{}", field, suffix),
            None => field.to_string(),
        }
    }

    /// Reads every bound field from `source`; fields the source lacks are left absent.
    pub fn collect(&self, source: &dyn FieldSource) -> SubmissionPayload {
        let mut payload = SubmissionPayload::new();
        for field in &self.fields {
            if let Some(value) = source.value(&self.element_id(field)) {
                payload.insert(*field, value);
            }
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_flattens_values() {
        let payload = SubmissionPayload::from_json(&json!({
            "nome": "Ana",
            "telefone": 11999999999u64,
            "empresa": null,
            "aceite": true
        }))
        .unwrap();

        assert_eq!(payload.get("nome"), Some("Ana"));
        assert_eq!(payload.get("telefone"), Some("11999999999"));
        assert_eq!(payload.get("empresa"), None);
        assert_eq!(payload.get("aceite"), Some("true"));
    }

    #[test]
    fn test_from_json_drops_falsy_scalars() {
        let payload = SubmissionPayload::from_json(&json!({
            "nome": false,
            "telefone": 0,
            "empresa": 0.0,
            "email": "0",
            "interesse": 7
        }))
        .unwrap();

        assert_eq!(payload.get("nome"), None);
        assert_eq!(payload.get("telefone"), None);
        assert_eq!(payload.get("empresa"), None);
        assert_eq!(payload.get("email"), Some("0"));
        assert_eq!(payload.get("interesse"), Some("7"));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(SubmissionPayload::from_json(&json!(["nome"])).is_err());
        assert!(SubmissionPayload::from_json(&json!("nome")).is_err());
    }

    #[test]
    fn test_or_default_treats_empty_as_absent() {
        let payload = SubmissionPayload::from_pairs([("empresa", ""), ("interesse", "Laudo")]);
        assert_eq!(payload.or_default("empresa", "Não informado"), "Não informado");
        assert_eq!(payload.or_default("mensagem", "Nenhuma"), "Nenhuma");
        assert_eq!(payload.or_default("interesse", "Não informado"), "Laudo");
    }

    #[test]
    fn test_binding_with_suffix() {
        let mut page = HashMap::new();
        page.insert("nome".to_string(), "Primary".to_string());
        page.insert("nome2".to_string(), "Secondary".to_string());
        page.insert("telefone2".to_string(), "11988887777".to_string());

        let binding = FormBinding::new(&[fields::NAME, fields::PHONE, fields::CITY]).with_suffix("2");
        assert_eq!(binding.element_id(fields::NAME), "nome2");

        let payload = binding.collect(&page);
        assert_eq!(payload.get(fields::NAME), Some("Secondary"));
        assert_eq!(payload.get(fields::PHONE), Some("11988887777"));
        assert_eq!(payload.get(fields::CITY), None);
        assert_eq!(payload.len(), 2);
    }

    #[test]
    fn test_binding_without_suffix() {
        let mut page = HashMap::new();
        page.insert("nome".to_string(), "Primary".to_string());

        let payload = FormBinding::new(&[fields::NAME]).with_suffix("").collect(&page);
        assert_eq!(payload.get(fields::NAME), Some("Primary"));
    }
}
