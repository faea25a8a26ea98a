//! Append-only storage for accepted submissions

use crate::error::{AppError, Result};
use crate::models::SubmissionRecord;
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Durable home of submission records. Implementations only ever append;
/// atomicity of a single append is the implementation's responsibility.
#[async_trait]
pub trait LeadStore: Send + Sync {
    async fn append(&self, record: &SubmissionRecord) -> Result<()>;
    async fn count(&self) -> Result<u64>;
    async fn records(&self) -> Result<Vec<SubmissionRecord>>;

    fn kind(&self) -> &'static str;
}

/// Process-local store used when no database is configured.
#[derive(Clone, Default)]
pub struct MemoryLeadStore {
    records: Arc<RwLock<Vec<SubmissionRecord>>>,
}

impl MemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeadStore for MemoryLeadStore {
    async fn append(&self, record: &SubmissionRecord) -> Result<()> {
        let mut records = self.records.write()
            .map_err(|_| AppError::Store("lead store lock poisoned".to_string()))?;

        records.push(record.clone());
        Ok(())
    }

    async fn count(&self) -> Result<u64> {
        let records = self.records.read()
            .map_err(|_| AppError::InternalServerError)?;

        Ok(records.len() as u64)
    }

    async fn records(&self) -> Result<Vec<SubmissionRecord>> {
        let records = self.records.read()
            .map_err(|_| AppError::InternalServerError)?;

        Ok(records.clone())
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}
