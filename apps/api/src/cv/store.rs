//! CV record store: append-only writes, recency-ordered cache lookups,
//! (user, id)-scoped reads and deletes.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::cv::{CvRow, CvSummary};

/// Fields of a CV record about to be persisted.
pub struct NewCvRecord {
    pub user_id: Uuid,
    pub job_description: String,
    pub cache_key: String,
    pub generated_content: Value,
    pub ats_score: i32,
}

/// Persistence seam for CV records. The production implementation is
/// `PgCvStore`; the orchestrator tests use an in-memory mock.
#[async_trait]
pub trait CvStore: Send + Sync {
    /// Most recent record for (user, cache key), if any. The cache key is a
    /// lookup key, not a uniqueness constraint — duplicates may exist and the
    /// latest one wins.
    async fn find_cached(&self, user_id: Uuid, cache_key: &str)
        -> Result<Option<CvRow>, AppError>;

    async fn insert(&self, record: NewCvRecord) -> Result<CvRow, AppError>;

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<CvRow>, AppError>;

    /// History listing, newest first, without the content blobs.
    async fn list(&self, user_id: Uuid) -> Result<Vec<CvSummary>, AppError>;

    /// Returns false when no row matched (user, id).
    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError>;
}

pub struct PgCvStore {
    pool: PgPool,
}

impl PgCvStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CvStore for PgCvStore {
    async fn find_cached(
        &self,
        user_id: Uuid,
        cache_key: &str,
    ) -> Result<Option<CvRow>, AppError> {
        Ok(sqlx::query_as::<_, CvRow>(
            r#"
            SELECT * FROM cvs
            WHERE user_id = $1 AND cache_key = $2
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(cache_key)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn insert(&self, record: NewCvRecord) -> Result<CvRow, AppError> {
        Ok(sqlx::query_as::<_, CvRow>(
            r#"
            INSERT INTO cvs (id, user_id, job_description, cache_key, generated_content, ats_score)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(record.user_id)
        .bind(&record.job_description)
        .bind(&record.cache_key)
        .bind(&record.generated_content)
        .bind(record.ats_score)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<CvRow>, AppError> {
        Ok(
            sqlx::query_as::<_, CvRow>("SELECT * FROM cvs WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn list(&self, user_id: Uuid) -> Result<Vec<CvSummary>, AppError> {
        Ok(sqlx::query_as::<_, CvSummary>(
            r#"
            SELECT id, job_description, ats_score, created_at
            FROM cvs
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM cvs WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
