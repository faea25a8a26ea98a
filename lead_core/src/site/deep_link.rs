use crate::error::{AppError, Result};

pub const WHATSAPP_BASE_URL: &str = "https://wa.me";

pub fn deep_link(number: &str, message: &str) -> String {
    format!(
        "{}/{}?text={}",
        WHATSAPP_BASE_URL,
        number,
        urlencoding::encode(message)
    )
}

/// Recovers the pre-filled message from a deep link built by [`deep_link`].
pub fn message_from_deep_link(url: &str) -> Result<String> {
    let (_, query) = url
        .split_once('?')
        .ok_or_else(|| AppError::BadRequest("deep link has no query string".to_string()))?;

    let encoded = query
        .split('&')
        .find_map(|pair| pair.strip_prefix("text="))
        .ok_or_else(|| AppError::BadRequest("deep link has no text parameter".to_string()))?;

    urlencoding::decode(encoded)
        .map(|text| text.into_owned())
        .map_err(|e| AppError::BadRequest(format!("deep link text is not UTF-8: {}", e)))
}
