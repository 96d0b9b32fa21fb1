//! Profile persistence: keyed read plus full-document upsert.

use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{ProfileInput, ProfileRow};

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, user_id: Uuid) -> Result<Option<ProfileRow>, AppError>;

    /// Creates the profile on first save, otherwise replaces the whole
    /// document. There is never more than one profile per user.
    async fn upsert(&self, user_id: Uuid, input: &ProfileInput) -> Result<ProfileRow, AppError>;
}

pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get(&self, user_id: Uuid) -> Result<Option<ProfileRow>, AppError> {
        Ok(
            sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn upsert(&self, user_id: Uuid, input: &ProfileInput) -> Result<ProfileRow, AppError> {
        let experience = serde_json::to_value(&input.experience)
            .context("serializing experience entries")?;
        let education =
            serde_json::to_value(&input.education).context("serializing education entries")?;
        let languages =
            serde_json::to_value(&input.languages).context("serializing language entries")?;
        let complementary_education = serde_json::to_value(&input.complementary_education)
            .context("serializing complementary education entries")?;

        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO profiles
                (id, user_id, full_name, job_title, phone, email, city, linkedin, portfolio,
                 summary, experience, education, technical_skills, soft_skills, languages,
                 certifications, complementary_education)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ON CONFLICT (user_id) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                job_title = EXCLUDED.job_title,
                phone = EXCLUDED.phone,
                email = EXCLUDED.email,
                city = EXCLUDED.city,
                linkedin = EXCLUDED.linkedin,
                portfolio = EXCLUDED.portfolio,
                summary = EXCLUDED.summary,
                experience = EXCLUDED.experience,
                education = EXCLUDED.education,
                technical_skills = EXCLUDED.technical_skills,
                soft_skills = EXCLUDED.soft_skills,
                languages = EXCLUDED.languages,
                certifications = EXCLUDED.certifications,
                complementary_education = EXCLUDED.complementary_education,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&input.full_name)
        .bind(&input.job_title)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.city)
        .bind(&input.linkedin)
        .bind(&input.portfolio)
        .bind(&input.summary)
        .bind(experience)
        .bind(education)
        .bind(&input.technical_skills)
        .bind(&input.soft_skills)
        .bind(languages)
        .bind(&input.certifications)
        .bind(complementary_education)
        .fetch_one(&self.pool)
        .await?;

        info!("Profile saved for user {user_id}");
        Ok(row)
    }
}
