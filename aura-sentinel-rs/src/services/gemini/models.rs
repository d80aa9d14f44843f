//! Gemini API data models
//!
//! This module contains type definitions for `generateContent` requests and
//! responses. Field names follow the REST API's camelCase.

use serde::{Serialize, Deserialize};

use crate::core::{SafetySetting, SamplingConfig};
use crate::error::{Result, ServiceError};

/// Finish reasons that mean the candidate's text was withheld
const BLOCKED_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "RECITATION",
    "BLOCKLIST",
    "PROHIBITED_CONTENT",
    "SPII",
];

/// A single part of a content turn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Part {
    /// Text payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()) }
    }
}

/// A content turn ("user", "model") or a system instruction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    /// Author role, absent for system instructions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Ordered parts of the turn
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// A user turn with a single text part
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::text(text)],
        }
    }

    /// A system instruction with a single text part
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

/// Generation parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl From<&SamplingConfig> for GenerationConfig {
    fn from(config: &SamplingConfig) -> Self {
        Self {
            temperature: Some(config.temperature),
            top_k: Some(config.top_k),
            top_p: Some(config.top_p),
            max_output_tokens: Some(config.max_output_tokens),
        }
    }
}

/// `models/{model}:generateContent` request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Persistent instruction steering every turn
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,

    /// Conversation turns
    pub contents: Vec<Content>,

    /// Sampling parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,

    /// Safety filter thresholds
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub safety_settings: Vec<SafetySetting>,
}

impl GenerateContentRequest {
    /// Single-turn request: persona as system instruction, prompt as the user turn
    pub fn single_turn(persona: &str, prompt: &str, config: &SamplingConfig) -> Self {
        Self {
            system_instruction: Some(Content::system(persona)),
            contents: vec![Content::user(prompt)],
            generation_config: Some(GenerationConfig::from(config)),
            safety_settings: config.safety.to_vec(),
        }
    }
}

/// Safety rating attached to a candidate or prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyRating {
    pub category: String,
    pub probability: String,
    #[serde(default)]
    pub blocked: bool,
}

/// A generated candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content
    #[serde(default)]
    pub content: Option<Content>,

    /// Reason generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,

    /// Per-category safety ratings
    #[serde(default)]
    pub safety_ratings: Vec<SafetyRating>,

    #[serde(default)]
    pub index: Option<u32>,
}

/// Feedback on the prompt itself
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Set when the prompt was blocked
    #[serde(default)]
    pub block_reason: Option<String>,

    #[serde(default)]
    pub safety_ratings: Vec<SafetyRating>,
}

/// Token usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}

/// `generateContent` response body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,

    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,

    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// Text of the first candidate.
    ///
    /// Fails when the prompt or the candidate was blocked, or when there is
    /// no text to return.
    pub fn text(&self) -> Result<String> {
        let Some(candidate) = self.candidates.first() else {
            return match self.prompt_feedback.as_ref().and_then(|f| f.block_reason.as_deref()) {
                Some(reason) => Err(ServiceError::safety_blocked(format!(
                    "Prompt blocked: {}",
                    reason
                ))),
                None => Err(ServiceError::parsing("No candidates returned")),
            };
        };

        if let Some(reason) = candidate.finish_reason.as_deref() {
            if BLOCKED_FINISH_REASONS.contains(&reason) {
                return Err(ServiceError::safety_blocked(format!(
                    "Candidate withheld: {}",
                    reason
                )));
            }
        }

        let text: String = candidate
            .content
            .iter()
            .flat_map(|content| content.parts.iter())
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.is_empty() {
            return Err(ServiceError::parsing("Candidate contained no text"));
        }

        Ok(text)
    }
}
