//! Core abstractions for AuraSentinel
//!
//! This module provides the trait interfaces the narrative generator and the
//! backend clients meet at:
//!
//! - `TextGenerationBackend`: the capability the generator depends on
//! - `ServiceClient`: identity of a concrete backend client
//! - `AuthenticatedClient`: credential handling for a backend client
//! - `SamplingConfig`: generation parameters sent with every request

use async_trait::async_trait;
use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A generative-text backend.
///
/// Implementations send the persona as the system instruction and the prompt
/// as a single user turn, and return the generated text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerationBackend: Send + Sync {
    /// Generate text for `prompt` under the `persona` instruction
    async fn generate(&self, persona: &str, prompt: &str, config: &SamplingConfig) -> Result<String>;
}

/// Base trait for concrete backend clients
pub trait ServiceClient: Send + Sync {
    /// The client name/identifier
    fn name(&self) -> &str;

    /// The base URL for the service
    fn base_url(&self) -> &str;

    /// Service API version
    fn version(&self) -> &str;
}

/// Trait for clients that require authentication
pub trait AuthenticatedClient: Send + Sync {
    /// Authentication scheme (e.g., "ApiKey")
    fn auth_type(&self) -> &str;

    /// Set authentication credentials
    fn set_auth(&mut self, auth: impl Into<String> + Send) -> Result<()>;

    /// Check if client has credentials configured
    fn is_authenticated(&self) -> bool;

    /// Add authentication headers to a request
    fn apply_auth(&self, headers: &mut HashMap<String, String>) -> Result<()>;
}

/// Content category screened by the backend's safety filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
}

/// Probability level at which content in a category is blocked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    BlockLowAndAbove,
    BlockMediumAndAbove,
    BlockOnlyHigh,
    BlockNone,
}

/// One safety filter rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

/// Sampling and safety parameters for a generation call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    /// Sampling temperature
    pub temperature: f32,

    /// Top-k sampling
    pub top_k: u32,

    /// Nucleus sampling
    pub top_p: f32,

    /// Cap on generated tokens
    pub max_output_tokens: u32,

    /// Safety filter rules
    pub safety: &'static [SafetySetting],
}

impl SamplingConfig {
    /// Low-randomness configuration used for every forensic narrative
    pub const FORENSIC: SamplingConfig = SamplingConfig {
        temperature: 0.2,
        top_k: 40,
        top_p: 0.95,
        max_output_tokens: 1024,
        safety: &[SafetySetting {
            category: HarmCategory::Harassment,
            threshold: HarmBlockThreshold::BlockMediumAndAbove,
        }],
    };
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self::FORENSIC
    }
}
