//! CV Generation — orchestrates the generation pipeline.
//!
//! Flow: validate job description → load profile → cache lookup →
//!       LLM generate → best-effort ATS score → persist one CV record.
//!
//! A cache hit short-circuits before any external call: repeating an
//! identical (profile, vacancy) pair is idempotent and cost-free.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::ats::scorer::AtsScorer;
use crate::cv::store::{CvStore, NewCvRecord};
use crate::errors::AppError;
use crate::generation::cache_key::cache_key;
use crate::llm_client::prompts::{CV_SYSTEM_PROMPT, CV_USER_TEMPLATE};
use crate::llm_client::{call_json, GenerationService};
use crate::models::cv::GeneratedCvContent;
use crate::profile::store::ProfileStore;

const MIN_JD_CHARS: usize = 50;
const MAX_JD_CHARS: usize = 5000;
const GENERATION_MAX_TOKENS: u32 = 4096;

/// Output language for the generated CV. The model is told to ignore the
/// job description's language and write in this one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputLanguage {
    #[default]
    Es,
    En,
}

impl OutputLanguage {
    fn prompt_name(self) -> &'static str {
        match self {
            OutputLanguage::Es => "Spanish",
            OutputLanguage::En => "English",
        }
    }
}

pub struct GenerateParams {
    pub user_id: Uuid,
    pub job_description: String,
    pub language: OutputLanguage,
}

pub struct GenerationOutcome {
    pub cv_id: Uuid,
    pub content: GeneratedCvContent,
    pub ats_score: i32,
    pub from_cache: bool,
}

/// Job descriptions must hold between 50 and 5000 characters; checked before
/// any I/O here and in the standalone scoring endpoint.
pub fn validate_job_description(job_description: &str) -> Result<(), AppError> {
    let chars = job_description.chars().count();
    if !(MIN_JD_CHARS..=MAX_JD_CHARS).contains(&chars) {
        return Err(AppError::Validation(format!(
            "jobDescription must be between {MIN_JD_CHARS} and {MAX_JD_CHARS} characters (got {chars})"
        )));
    }
    Ok(())
}

/// Runs the generation pipeline. Exactly one durable write on a cache miss,
/// zero writes and zero external calls on a cache hit.
pub async fn generate_cv(
    profiles: &dyn ProfileStore,
    cvs: &dyn CvStore,
    llm: &dyn GenerationService,
    scorer: &dyn AtsScorer,
    params: GenerateParams,
) -> Result<GenerationOutcome, AppError> {
    // Step 1: Validate input before any I/O
    validate_job_description(&params.job_description)?;

    // Step 2: Load profile — absence is user-correctable, not transient
    let profile = profiles.get(params.user_id).await?.ok_or_else(|| {
        AppError::Validation("Complete your profile before generating a CV".to_string())
    })?;

    // Step 3: Cache lookup by (profile identity, job description)
    let key = cache_key(profile.id, &params.job_description);
    if let Some(cached) = cvs.find_cached(params.user_id, &key).await? {
        info!("Generation cache hit for user {} (cv {})", params.user_id, cached.id);
        let content: GeneratedCvContent = serde_json::from_value(cached.generated_content)
            .context("stored CV content does not match the document schema")?;
        return Ok(GenerationOutcome {
            cv_id: cached.id,
            content,
            ats_score: cached.ats_score,
            from_cache: true,
        });
    }

    // Step 4: Generate — parse failure is fatal and nothing is persisted
    let profile_json =
        serde_json::to_string(&profile).context("serializing profile for prompt")?;
    let prompt = CV_USER_TEMPLATE
        .replace("{job_description}", &params.job_description)
        .replace("{profile_json}", &profile_json)
        .replace("{output_language}", params.language.prompt_name());

    let content: GeneratedCvContent =
        call_json(llm, CV_SYSTEM_PROMPT, &prompt, GENERATION_MAX_TOKENS)
            .await
            .map_err(|e| AppError::Llm(format!("CV generation failed: {e}")))?;

    // Step 5: Best-effort ATS score — failure never fails the generation
    let ats_score = match scorer.score(&content, &params.job_description).await {
        Ok(response) => response.score.clamp(0, 100),
        Err(e) => {
            warn!("ATS scoring failed, saving CV with score 0: {e}");
            0
        }
    };

    // Step 6: Persist the single CV record for this invocation
    let generated_content =
        serde_json::to_value(&content).context("serializing generated CV content")?;
    let row = cvs
        .insert(NewCvRecord {
            user_id: params.user_id,
            job_description: params.job_description,
            cache_key: key,
            generated_content,
            ats_score,
        })
        .await?;

    info!(
        "Generated CV {} for user {} (ats_score {})",
        row.id, params.user_id, ats_score
    );

    Ok(GenerationOutcome {
        cv_id: row.id,
        content,
        ats_score,
        from_cache: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ats::scorer::AtsScorer;
    use crate::llm_client::LlmError;
    use crate::models::cv::{AtsScoreResponse, CvRow, CvSummary};
    use crate::models::profile::ProfileRow;
    use async_trait::async_trait;
    use chrono::Utc;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const CV_JSON: &str = r#"{
        "summary": "Backend developer focused on Rust services.",
        "experience": [],
        "education": [],
        "technicalSkills": ["Rust"],
        "softSkills": [],
        "languages": [{"name": "English", "level": "C1"}]
    }"#;

    fn valid_jd() -> String {
        "We are hiring a senior Rust engineer to build resilient backend services.".to_string()
    }

    fn profile_row(user_id: Uuid) -> ProfileRow {
        ProfileRow {
            id: Uuid::new_v4(),
            user_id,
            full_name: Some("Ana Torres".to_string()),
            job_title: Some("Backend Developer".to_string()),
            phone: None,
            email: None,
            city: None,
            linkedin: None,
            portfolio: None,
            summary: Some("Backend developer".to_string()),
            experience: json!([]),
            education: json!([]),
            technical_skills: vec!["Rust".to_string()],
            soft_skills: vec![],
            languages: json!([]),
            certifications: vec![],
            complementary_education: json!([]),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    struct MockProfiles(Option<ProfileRow>);

    #[async_trait]
    impl ProfileStore for MockProfiles {
        async fn get(&self, _user_id: Uuid) -> Result<Option<ProfileRow>, AppError> {
            Ok(self.0.clone())
        }

        async fn upsert(
            &self,
            _user_id: Uuid,
            _input: &crate::models::profile::ProfileInput,
        ) -> Result<ProfileRow, AppError> {
            unimplemented!("not used by the generation pipeline")
        }
    }

    #[derive(Default)]
    struct MockCvs {
        rows: Mutex<Vec<CvRow>>,
        inserts: AtomicUsize,
    }

    #[async_trait]
    impl CvStore for MockCvs {
        async fn find_cached(
            &self,
            user_id: Uuid,
            cache_key: &str,
        ) -> Result<Option<CvRow>, AppError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .filter(|r| r.user_id == user_id && r.cache_key == cache_key)
                .max_by_key(|r| r.created_at)
                .cloned())
        }

        async fn insert(&self, record: NewCvRecord) -> Result<CvRow, AppError> {
            self.inserts.fetch_add(1, Ordering::SeqCst);
            let row = CvRow {
                id: Uuid::new_v4(),
                user_id: record.user_id,
                job_description: record.job_description,
                cache_key: record.cache_key,
                generated_content: record.generated_content,
                ats_score: record.ats_score,
                created_at: Utc::now(),
            };
            self.rows.lock().unwrap().push(row.clone());
            Ok(row)
        }

        async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<CvRow>, AppError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .find(|r| r.user_id == user_id && r.id == id)
                .cloned())
        }

        async fn list(&self, _user_id: Uuid) -> Result<Vec<CvSummary>, AppError> {
            Ok(vec![])
        }

        async fn delete(&self, _user_id: Uuid, _id: Uuid) -> Result<bool, AppError> {
            Ok(false)
        }
    }

    struct MockLlm {
        response: Result<String, ()>,
        calls: AtomicUsize,
    }

    impl MockLlm {
        fn returning(text: &str) -> Self {
            Self {
                response: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                response: Err(()),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GenerationService for MockLlm {
        async fn complete(
            &self,
            _system: &str,
            _prompt: &str,
            _max_tokens: u32,
        ) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response
                .clone()
                .map_err(|_| LlmError::Exhausted { attempts: 3 })
        }
    }

    struct MockScorer {
        result: Result<i32, ()>,
    }

    #[async_trait]
    impl AtsScorer for MockScorer {
        async fn score(
            &self,
            _cv: &GeneratedCvContent,
            _job_description: &str,
        ) -> Result<AtsScoreResponse, AppError> {
            match self.result {
                Ok(score) => Ok(AtsScoreResponse {
                    score,
                    matched_keywords: vec![],
                    missing_keywords: vec![],
                    suggestions: vec![],
                }),
                Err(_) => Err(AppError::Llm("scorer exploded".to_string())),
            }
        }
    }

    fn params(user_id: Uuid, jd: String) -> GenerateParams {
        GenerateParams {
            user_id,
            job_description: jd,
            language: OutputLanguage::Es,
        }
    }

    #[test]
    fn test_job_description_bounds() {
        assert!(validate_job_description(&"x".repeat(49)).is_err());
        assert!(validate_job_description(&"x".repeat(50)).is_ok());
        assert!(validate_job_description(&"x".repeat(5000)).is_ok());
        assert!(validate_job_description(&"x".repeat(5001)).is_err());
    }

    #[tokio::test]
    async fn test_short_jd_rejected_before_any_external_call() {
        let user_id = Uuid::new_v4();
        let profiles = MockProfiles(Some(profile_row(user_id)));
        let cvs = MockCvs::default();
        let llm = MockLlm::returning(CV_JSON);
        let scorer = MockScorer { result: Ok(90) };

        let result = generate_cv(&profiles, &cvs, &llm, &scorer, params(user_id, "x".repeat(49)))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(llm.call_count(), 0);
        assert_eq!(cvs.inserts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_profile_is_user_correctable_error() {
        let user_id = Uuid::new_v4();
        let profiles = MockProfiles(None);
        let cvs = MockCvs::default();
        let llm = MockLlm::returning(CV_JSON);
        let scorer = MockScorer { result: Ok(90) };

        let result = generate_cv(&profiles, &cvs, &llm, &scorer, params(user_id, valid_jd())).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_repeat_request_is_served_from_cache() {
        let user_id = Uuid::new_v4();
        let profiles = MockProfiles(Some(profile_row(user_id)));
        let cvs = MockCvs::default();
        let llm = MockLlm::returning(CV_JSON);
        let scorer = MockScorer { result: Ok(85) };

        let first = generate_cv(&profiles, &cvs, &llm, &scorer, params(user_id, valid_jd()))
            .await
            .unwrap();
        assert!(!first.from_cache);
        assert_eq!(llm.call_count(), 1);
        assert_eq!(cvs.inserts.load(Ordering::SeqCst), 1);

        let second = generate_cv(&profiles, &cvs, &llm, &scorer, params(user_id, valid_jd()))
            .await
            .unwrap();
        assert!(second.from_cache);
        assert_eq!(second.cv_id, first.cv_id);
        assert_eq!(second.content.summary, first.content.summary);
        assert_eq!(second.ats_score, 85);
        // no new external call, no new write
        assert_eq!(llm.call_count(), 1);
        assert_eq!(cvs.inserts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_different_jd_misses_cache() {
        let user_id = Uuid::new_v4();
        let profiles = MockProfiles(Some(profile_row(user_id)));
        let cvs = MockCvs::default();
        let llm = MockLlm::returning(CV_JSON);
        let scorer = MockScorer { result: Ok(70) };

        generate_cv(&profiles, &cvs, &llm, &scorer, params(user_id, valid_jd()))
            .await
            .unwrap();
        let other_jd = format!("{} Now with an extra requirement.", valid_jd());
        let outcome = generate_cv(&profiles, &cvs, &llm, &scorer, params(user_id, other_jd))
            .await
            .unwrap();

        assert!(!outcome.from_cache);
        assert_eq!(llm.call_count(), 2);
        assert_eq!(cvs.inserts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_llm_failure_persists_nothing() {
        let user_id = Uuid::new_v4();
        let profiles = MockProfiles(Some(profile_row(user_id)));
        let cvs = MockCvs::default();
        let llm = MockLlm::failing();
        let scorer = MockScorer { result: Ok(90) };

        let result = generate_cv(&profiles, &cvs, &llm, &scorer, params(user_id, valid_jd())).await;

        assert!(matches!(result, Err(AppError::Llm(_))));
        assert_eq!(cvs.inserts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_llm_output_is_fatal() {
        let user_id = Uuid::new_v4();
        let profiles = MockProfiles(Some(profile_row(user_id)));
        let cvs = MockCvs::default();
        let llm = MockLlm::returning("I am sorry, I cannot produce JSON today.");
        let scorer = MockScorer { result: Ok(90) };

        let result = generate_cv(&profiles, &cvs, &llm, &scorer, params(user_id, valid_jd())).await;

        assert!(matches!(result, Err(AppError::Llm(_))));
        assert_eq!(cvs.inserts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fenced_llm_output_is_accepted() {
        let user_id = Uuid::new_v4();
        let profiles = MockProfiles(Some(profile_row(user_id)));
        let cvs = MockCvs::default();
        let llm = MockLlm::returning(&format!("```json\n{CV_JSON}\n```"));
        let scorer = MockScorer { result: Ok(88) };

        let outcome = generate_cv(&profiles, &cvs, &llm, &scorer, params(user_id, valid_jd()))
            .await
            .unwrap();
        assert_eq!(outcome.ats_score, 88);
    }

    #[tokio::test]
    async fn test_scorer_failure_still_persists_with_score_0() {
        let user_id = Uuid::new_v4();
        let profiles = MockProfiles(Some(profile_row(user_id)));
        let cvs = MockCvs::default();
        let llm = MockLlm::returning(CV_JSON);
        let scorer = MockScorer { result: Err(()) };

        let outcome = generate_cv(&profiles, &cvs, &llm, &scorer, params(user_id, valid_jd()))
            .await
            .unwrap();

        assert!(!outcome.from_cache);
        assert_eq!(outcome.ats_score, 0);
        assert_eq!(cvs.inserts.load(Ordering::SeqCst), 1);
        let stored = cvs.rows.lock().unwrap()[0].clone();
        assert_eq!(stored.ats_score, 0);
    }

    #[tokio::test]
    async fn test_out_of_range_score_is_clamped() {
        let user_id = Uuid::new_v4();
        let profiles = MockProfiles(Some(profile_row(user_id)));
        let cvs = MockCvs::default();
        let llm = MockLlm::returning(CV_JSON);
        let scorer = MockScorer { result: Ok(140) };

        let outcome = generate_cv(&profiles, &cvs, &llm, &scorer, params(user_id, valid_jd()))
            .await
            .unwrap();
        assert_eq!(outcome.ats_score, 100);
    }
}
