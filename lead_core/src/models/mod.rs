pub mod record;
pub mod request;
pub mod submission;

pub use record::{format_timestamp, SubmissionRecord, NOT_INFORMED, NO_MESSAGE};
pub use request::{ApiResponse, DispatchResult, WebhookResponse};
pub use submission::{fields, FieldSource, FormBinding, SubmissionPayload};
