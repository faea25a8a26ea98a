//! Lead notifications

pub mod email;
pub mod smtp;

pub use email::{LeadEmail, LogNotifier, MailSettings, Notifier};
pub use smtp::{SmtpConfig, SmtpNotifier};
