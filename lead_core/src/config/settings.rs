use crate::dispatch::DispatchSettings;
use crate::notify::{MailSettings, SmtpConfig};
use crate::site::SiteProfile;
use crate::validation::{validate_email, validate_timezone_name};
use chrono_tz::Tz;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub mail: MailConfig,
    pub locale: LocaleConfig,
    pub dispatch: DispatchConfig,
    pub cors: CorsConfig,
    pub sites: HashMap<String, SiteProfile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `sqlite:<path>`; an empty value or `memory` keeps leads in process memory.
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    /// When disabled, notifications are written to the log instead of sent.
    pub enabled: bool,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    /// Lead notifications go to every address here; deployments list the
    /// sales and engineering inboxes, in that order.
    pub recipients: Vec<String>,
    pub subject: String,
    pub heading: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    pub timezone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub busy_delay_ms: u64,
    pub toast_duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut sites = HashMap::new();
        sites.insert("portfolio".to_string(), SiteProfile::portfolio());

        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            mail: MailConfig::default(),
            locale: LocaleConfig::default(),
            dispatch: DispatchConfig::default(),
            cors: CorsConfig::default(),
            sites,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:./leads.db".to_string(),
            max_connections: 5,
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: String::new(),
            smtp_port: 587,
            username: String::new(),
            password: String::new(),
            from: "site@example.com".to_string(),
            recipients: vec![
                "comercial@example.com".to_string(),
                "engenharia@example.com".to_string(),
            ],
            subject: "Novo Lead - Lucas Santos".to_string(),
            heading: "Novo lead - Lucas Santos".to_string(),
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            timezone: "America/Sao_Paulo".to_string(),
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            busy_delay_ms: 1500,
            toast_duration_ms: 4000,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Defaults, then `config.toml` if present, then `APP__SECTION__KEY` variables.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if std::path::Path::new("config.toml").exists() {
            builder = builder.add_source(File::with_name("config"));
        }

        builder = builder.add_source(
            Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("mail.recipients")
                .with_list_parse_key("cors.allowed_origins")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if self.uses_database() && self.database.max_connections == 0 {
            return Err(ConfigError::Message(
                "Database max connections must be greater than 0".to_string(),
            ));
        }

        if validate_timezone_name(&self.locale.timezone).is_err() {
            return Err(ConfigError::Message(format!(
                "Unknown time zone: {}",
                self.locale.timezone
            )));
        }

        if self.mail.enabled {
            if self.mail.smtp_host.is_empty() {
                return Err(ConfigError::Message(
                    "SMTP host is required when mail is enabled".to_string(),
                ));
            }
            if validate_email(&self.mail.from).is_err() {
                return Err(ConfigError::Message(format!(
                    "Invalid sender address: {}",
                    self.mail.from
                )));
            }
        }

        if self.mail.recipients.is_empty() {
            return Err(ConfigError::Message(
                "At least one lead recipient is required".to_string(),
            ));
        }

        if let Some(bad) = self.mail.recipients.iter().find(|r| validate_email(r).is_err()) {
            return Err(ConfigError::Message(format!("Invalid recipient address: {}", bad)));
        }

        for (key, site) in &self.sites {
            site.check()
                .map_err(|e| ConfigError::Message(format!("Site '{}': {}", key, e)))?;
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn uses_database(&self) -> bool {
        let url = self.database.url.trim();
        !(url.is_empty() || url == "memory" || url == "sqlite::memory:")
    }

    pub fn timezone(&self) -> Tz {
        self.locale.timezone.parse().unwrap_or(chrono_tz::America::Sao_Paulo)
    }

    pub fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings {
            busy_delay: Duration::from_millis(self.dispatch.busy_delay_ms),
            toast_duration: Duration::from_millis(self.dispatch.toast_duration_ms),
        }
    }

    pub fn mail_settings(&self) -> MailSettings {
        MailSettings {
            recipients: self.mail.recipients.clone(),
            subject: self.mail.subject.clone(),
            heading: self.mail.heading.clone(),
            timezone: self.timezone(),
        }
    }

    pub fn smtp_config(&self) -> SmtpConfig {
        SmtpConfig {
            host: self.mail.smtp_host.clone(),
            port: self.mail.smtp_port,
            username: self.mail.username.clone(),
            password: self.mail.password.clone(),
            from: self.mail.from.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.url, "sqlite:./leads.db");
        assert!(config.sites.contains_key("portfolio"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.locale.timezone = "Nowhere/Place".to_string();
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.mail.enabled = true;
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.mail.recipients.clear();
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.mail.recipients.push("not-an-address".to_string());
        assert!(config.validate().is_err());

        config = AppConfig::default();
        let mut site = SiteProfile::portfolio();
        site.whatsapp_number = "11 9999".to_string();
        config.sites.insert("munck".to_string(), site);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bind_address() {
        let mut config = AppConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");

        config.server.host = "0.0.0.0".to_string();
        config.server.port = 8080;
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_memory_database_urls() {
        let mut config = AppConfig::default();
        assert!(config.uses_database());

        for url in ["", "memory", "sqlite::memory:"] {
            config.database.url = url.to_string();
            assert!(!config.uses_database());
        }
    }

    #[test]
    fn test_derived_settings() {
        let config = AppConfig::default();
        assert_eq!(config.timezone(), chrono_tz::America::Sao_Paulo);
        assert_eq!(config.dispatch_settings().busy_delay, Duration::from_millis(1500));
        assert_eq!(config.mail_settings().recipients.len(), 2);
        assert_eq!(config.smtp_config().port, 587);
    }

    #[test]
    fn test_defaults_survive_round_trip_through_config() {
        let config = Config::builder()
            .add_source(Config::try_from(&AppConfig::default()).unwrap())
            .build()
            .unwrap();
        let loaded: AppConfig = config.try_deserialize().unwrap();

        assert!(loaded.cors.allowed_origins.is_empty());
        assert_eq!(loaded.mail.recipients.len(), 2);
        assert_eq!(loaded.dispatch.busy_delay_ms, 1500);
        assert!(loaded.sites.contains_key("portfolio"));
    }

    #[test]
    fn test_partial_sections_fall_back_to_defaults() {
        let config = Config::builder()
            .set_override("server.port", 8081)
            .unwrap()
            .build()
            .unwrap();
        let loaded: AppConfig = config.try_deserialize().unwrap();

        assert_eq!(loaded.server.port, 8081);
        assert_eq!(loaded.server.host, "127.0.0.1");
        assert!(loaded.cors.allowed_origins.is_empty());
        assert_eq!(loaded.locale.timezone, "America/Sao_Paulo");
    }

    #[test]
    fn test_config_loading() {
        std::env::remove_var("APP__CORS__ALLOWED_ORIGINS");

        let config = AppConfig::load().expect("Should load default configuration");
        assert!(config.validate().is_ok());
        assert!(config.cors.allowed_origins.is_empty());
        assert!(config.sites.contains_key("portfolio"));
    }
}
