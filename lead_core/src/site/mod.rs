//! Site profiles, message templates and WhatsApp deep links

pub mod deep_link;
pub mod profile;
pub mod template;

pub use deep_link::{deep_link, message_from_deep_link, WHATSAPP_BASE_URL};
pub use profile::{FormVariant, SiteProfile};
pub use template::{FieldRule, MessageTemplate, TemplateLine};
