use crate::error::{AppError, Result};
use crate::models::SubmissionRecord;
use crate::store::LeadStore;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

/// SQLite-backed lead sheet. Rows are inserted once and never touched again.
#[derive(Clone)]
pub struct LeadRepository {
    pool: SqlitePool,
}

impl LeadRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl LeadStore for LeadRepository {
    async fn append(&self, record: &SubmissionRecord) -> Result<()> {
        sqlx::query(r#"
            INSERT INTO leads (recorded_at, nome, email, telefone, empresa, interesse, mensagem)
            VALUES (?, ?, ?, ?, ?, ?, ?)
        "#)
        .bind(&record.timestamp)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.phone)
        .bind(&record.company)
        .bind(&record.interest)
        .bind(&record.message)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;

        Ok(())
    }

    async fn count(&self) -> Result<u64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM leads")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)?;

        let count: i64 = row.try_get("count").map_err(AppError::from)?;
        Ok(count as u64)
    }

    async fn records(&self) -> Result<Vec<SubmissionRecord>> {
        let rows = sqlx::query(r#"
            SELECT recorded_at, nome, email, telefone, empresa, interesse, mensagem
            FROM leads
            ORDER BY id ASC
        "#)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        rows.into_iter()
            .map(|row| {
                Ok(SubmissionRecord {
                    timestamp: row.try_get("recorded_at")?,
                    name: row.try_get("nome")?,
                    email: row.try_get("email")?,
                    phone: row.try_get("telefone")?,
                    company: row.try_get("empresa")?,
                    interest: row.try_get("interesse")?,
                    message: row.try_get("mensagem")?,
                })
            })
            .collect::<std::result::Result<Vec<_>, sqlx::Error>>()
            .map_err(AppError::from)
    }

    fn kind(&self) -> &'static str {
        "sqlite"
    }
}
