pub mod settings;

pub use settings::{
    AppConfig, CorsConfig, DatabaseConfig, DispatchConfig, LocaleConfig, MailConfig, ServerConfig,
};
