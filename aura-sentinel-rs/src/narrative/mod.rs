//! Forensic narrative generation
//!
//! `NarrativeGenerator` turns a raw log record into an investigation
//! narrative via a `TextGenerationBackend`. Its public operations never fail:
//! any backend error is logged and replaced by [`FALLBACK_NARRATIVE`].

pub mod prompt;

use std::sync::Arc;

use log::{debug, error, info, warn};
use serde_json::Value;

use crate::config::{GeminiConfig, ServiceConfig};
use crate::core::{SamplingConfig, TextGenerationBackend};
use crate::error::{ErrorContext, Result, ServiceError};
use crate::services::gemini::GeminiClient;
use crate::util::{generate_request_id, measure_time_async, sanitize_for_logging};

pub use prompt::{SYSTEM_INSTRUCTION, STAKING_CONTEXT};

/// Returned in place of a narrative whenever generation fails
pub const FALLBACK_NARRATIVE: &str =
    "Critical Error: AI Narrative Generation Failed. Manual Investigation Required.";

/// Generates forensic narratives for security alerts.
///
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct NarrativeGenerator {
    backend: Arc<dyn TextGenerationBackend>,
    persona: Arc<str>,
}

impl NarrativeGenerator {
    /// Generator backed by any `TextGenerationBackend`, with the default persona
    pub fn new(backend: Arc<dyn TextGenerationBackend>) -> Self {
        Self {
            backend,
            persona: Arc::from(SYSTEM_INSTRUCTION),
        }
    }

    /// Generator backed by Gemini, configured from `GEMINI_*` environment
    /// variables (and `.env`).
    ///
    /// A missing `GEMINI_API_KEY` is only warned about here; every call then
    /// returns the fallback narrative.
    pub fn from_env() -> Result<Self> {
        Self::from_config(GeminiConfig::from_env())
    }

    /// Generator backed by Gemini with an explicit configuration
    pub fn from_config(config: GeminiConfig) -> Result<Self> {
        if let Err(e) = config.validate() {
            warn!("Gemini configuration is incomplete, narratives will fall back: {}", e);
        }

        info!(
            "Narrative generator initialized (model: {}, endpoint: {})",
            config.model, config.base_url
        );

        let client = GeminiClient::new_with_config(config)?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Replace the persona sent as the system instruction
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = Arc::from(persona.into());
        self
    }

    /// The persona sent with every request
    pub fn persona(&self) -> &str {
        &self.persona
    }

    /// Generate a forensic narrative for a log record.
    ///
    /// Returns the backend's text verbatim, or [`FALLBACK_NARRATIVE`] if
    /// generation failed for any reason.
    pub async fn generate_investigation(&self, record: &Value) -> String {
        let request_id = generate_request_id();

        match self.investigate(&request_id, record).await {
            Ok(narrative) => narrative,
            Err(e) => {
                report_failure(&request_id, &e);
                FALLBACK_NARRATIVE.to_string()
            }
        }
    }

    /// Like [`generate_investigation`](Self::generate_investigation), but
    /// returns the failure instead of the fallback narrative
    pub async fn try_generate_investigation(&self, record: &Value) -> Result<String> {
        self.investigate(&generate_request_id(), record).await
    }

    /// Generate a narrative for a staking event.
    ///
    /// The record gets a `context` field pointing the analyst at slashing
    /// risks and exfiltration patterns; otherwise identical to
    /// [`generate_investigation`](Self::generate_investigation).
    pub async fn investigate_staking_anomalies(&self, record: &Value) -> String {
        self.generate_investigation(&prompt::with_staking_context(record)).await
    }

    async fn investigate(&self, request_id: &str, record: &Value) -> Result<String> {
        let user_prompt = prompt::compose_prompt(record);
        debug!("[{}] Investigation prompt is {} bytes", request_id, user_prompt.len());

        let (result, elapsed) = measure_time_async(|| {
            self.backend.generate(&self.persona, &user_prompt, &SamplingConfig::FORENSIC)
        })
        .await;

        debug!("[{}] Backend call finished in {:?}", request_id, elapsed);

        match result {
            Ok(narrative) if narrative.trim().is_empty() => Err(ServiceError::parsing(
                "Backend returned an empty narrative",
            )
            .with_context(ErrorContext::new().request_id(request_id))),
            Ok(narrative) => Ok(narrative),
            Err(e) => Err(e.with_context(ErrorContext::new().request_id(request_id))),
        }
    }
}

fn report_failure(request_id: &str, err: &ServiceError) {
    let detail = sanitize_for_logging(&err.to_string());

    if err.is_configuration() {
        error!(
            "[{}] Narrative generation failed, check GEMINI_API_KEY and model settings: {}",
            request_id, detail
        );
    } else if err.is_transient() {
        warn!("[{}] Narrative backend unavailable: {}", request_id, detail);
    } else {
        warn!("[{}] Narrative generation failed: {}", request_id, detail);
    }
}
