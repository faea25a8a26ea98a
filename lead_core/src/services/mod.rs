pub mod lead_service;

pub use lead_service::{LeadService, WEBHOOK_REQUIRED_FIELDS};
