//! Submission validation: required-field predicates and per-field checks

pub mod rules;
pub mod validators;

pub use rules::*;
pub use validators::*;
