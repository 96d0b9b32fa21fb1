use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::ats::scorer::AtsScorer;
use crate::config::Config;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is constructed once at startup; there is no other shared
/// mutable state between concurrent requests.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub llm: LlmClient,
    pub config: Config,
    /// Pluggable ATS scorer. Production wires `LlmAtsScorer`.
    pub scorer: Arc<dyn AtsScorer>,
}
