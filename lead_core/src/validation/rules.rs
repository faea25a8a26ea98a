//! Validation rules shared by forms and configuration

use lazy_static::lazy_static;
use regex::Regex;
use validator::{ValidateEmail, ValidationError};

lazy_static! {
    static ref WHATSAPP_NUMBER_REGEX: Regex = Regex::new(
        r"^[1-9]\d{7,14}$"
    ).unwrap();

    static ref TIMEZONE_REGEX: Regex = Regex::new(
        r"^[A-Za-z_]+(?:/[A-Za-z0-9_+-]+)*$"
    ).unwrap();
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::new("Email cannot be empty"));
    }

    if email.len() > 254 {
        return Err(ValidationError::new("Email is too long"));
    }

    if !email.validate_email() {
        return Err(ValidationError::new("Invalid email format"));
    }

    Ok(())
}

/// International number without `+` or separators, as used in `wa.me` links.
pub fn validate_whatsapp_number(number: &str) -> Result<(), ValidationError> {
    if !WHATSAPP_NUMBER_REGEX.is_match(number) {
        return Err(ValidationError::new(
            "WhatsApp number must contain 8 to 15 digits with country code"
        ));
    }

    Ok(())
}

pub fn validate_timezone_name(name: &str) -> Result<(), ValidationError> {
    if !TIMEZONE_REGEX.is_match(name) || name.parse::<chrono_tz::Tz>().is_err() {
        return Err(ValidationError::new("Unknown time zone"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(validate_email("c@x.com").is_ok());
        assert!(validate_email("contato@munck.com.br").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn test_whatsapp_number_validation() {
        assert!(validate_whatsapp_number("5511973933390").is_ok());
        assert!(validate_whatsapp_number("+5511973933390").is_err());
        assert!(validate_whatsapp_number("55 11 97393-3390").is_err());
        assert!(validate_whatsapp_number("").is_err());
    }

    #[test]
    fn test_timezone_validation() {
        assert!(validate_timezone_name("America/Sao_Paulo").is_ok());
        assert!(validate_timezone_name("UTC").is_ok());
        assert!(validate_timezone_name("Mars/Olympus").is_err());
    }
}
