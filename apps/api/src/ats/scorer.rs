#![allow(dead_code)]

//! ATS Scoring — pluggable, trait-based scorer that rates a generated CV
//! against a job description.
//!
//! Primary: `LlmAtsScorer` (delegates the full judgment — keyword density,
//! structure, gap analysis — to the generation service).
//! Also present: `KeywordAtsScorer`, the pure-Rust keyword-overlap utility.
//! It is deterministic and fully testable but not wired into the primary flow.
//!
//! `AppState` holds an `Arc<dyn AtsScorer>`.

use async_trait::async_trait;

use crate::ats::keywords::keyword_overlap;
use crate::errors::AppError;
use crate::llm_client::prompts::{ATS_SYSTEM_PROMPT, ATS_USER_TEMPLATE};
use crate::llm_client::{call_json, LlmClient};
use crate::models::cv::{AtsScoreResponse, GeneratedCvContent};

const ATS_MAX_TOKENS: u32 = 1024;

/// The ATS scorer trait. Implement this to swap backends without touching
/// the endpoint, handler, or orchestrator code.
#[async_trait]
pub trait AtsScorer: Send + Sync {
    async fn score(
        &self,
        cv: &GeneratedCvContent,
        job_description: &str,
    ) -> Result<AtsScoreResponse, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmAtsScorer — primary implementation
// ────────────────────────────────────────────────────────────────────────────

/// Delegates scoring to the generation service with a dedicated instruction
/// prompt. A malformed response is fatal to this call; the generation
/// orchestrator treats that failure as non-fatal to the overall workflow.
pub struct LlmAtsScorer(pub LlmClient);

#[async_trait]
impl AtsScorer for LlmAtsScorer {
    async fn score(
        &self,
        cv: &GeneratedCvContent,
        job_description: &str,
    ) -> Result<AtsScoreResponse, AppError> {
        let cv_json = serde_json::to_string(cv)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("CV serialization failed: {e}")))?;
        let prompt = ATS_USER_TEMPLATE
            .replace("{cv_json}", &cv_json)
            .replace("{job_description}", job_description);

        call_json::<AtsScoreResponse>(&self.0, ATS_SYSTEM_PROMPT, &prompt, ATS_MAX_TOKENS)
            .await
            .map_err(|e| AppError::Llm(format!("ATS scoring failed: {e}")))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordAtsScorer — local, LLM-independent utility
// ────────────────────────────────────────────────────────────────────────────

/// Pure keyword-overlap scorer: score = matched / vacancy-keywords × 100.
/// No structural or readability judgment — a coarse local signal only.
pub struct KeywordAtsScorer;

#[async_trait]
impl AtsScorer for KeywordAtsScorer {
    async fn score(
        &self,
        cv: &GeneratedCvContent,
        job_description: &str,
    ) -> Result<AtsScoreResponse, AppError> {
        Ok(compute_keyword_score(cv, job_description))
    }
}

fn compute_keyword_score(cv: &GeneratedCvContent, job_description: &str) -> AtsScoreResponse {
    let overlap = keyword_overlap(&cv.searchable_text(), job_description);
    let total = overlap.matched.len() + overlap.missing.len();

    let score = if total == 0 {
        0
    } else {
        ((overlap.matched.len() as f64 / total as f64) * 100.0).round() as i32
    };

    let suggestions = build_suggestions(score, &overlap.missing);

    AtsScoreResponse {
        score,
        matched_keywords: overlap.matched,
        missing_keywords: overlap.missing,
        suggestions,
    }
}

/// Mirrors the service-side instruction locally: below 80, at least 3
/// concrete suggestions.
fn build_suggestions(score: i32, missing: &[String]) -> Vec<String> {
    if score >= 80 {
        return vec![];
    }

    let mut suggestions: Vec<String> = missing
        .iter()
        .take(3)
        .map(|kw| format!("Work the keyword \"{kw}\" into your summary or experience bullets."))
        .collect();

    if suggestions.len() < 3 {
        suggestions.push(
            "Mirror the vacancy's wording for the skills you already have.".to_string(),
        );
    }
    if suggestions.len() < 3 {
        suggestions.push(
            "Quantify achievements in your experience descriptions.".to_string(),
        );
    }
    if suggestions.len() < 3 {
        suggestions.push("Expand your summary to cover the role's core requirements.".to_string());
    }

    suggestions
}
