//! Gemini API client implementation
//!
//! This module provides a strongly-typed client for the Gemini
//! `generateContent` endpoint and plugs it in as a `TextGenerationBackend`.

mod models;
pub use models::*;

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;

use crate::config::{GeminiConfig, ServiceConfig};
use crate::core::{AuthenticatedClient, SamplingConfig, ServiceClient, TextGenerationBackend};
use crate::error::{ErrorContext, Result, ServiceError};
use crate::services::common::{build_http_client, parse_error_response, UserAgent};

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    /// HTTP client
    http_client: Client,

    /// Configuration
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new Gemini client with custom configuration.
    ///
    /// The API key is not checked here; an empty key fails the first call.
    pub fn new_with_config(config: GeminiConfig) -> Result<Self> {
        let http_client = build_http_client(
            Some(UserAgent {
                extra: Some("Gemini-Client".to_string()),
                ..UserAgent::default()
            }),
            Some(config.timeout),
        )?;

        Ok(Self { http_client, config })
    }

    /// Create a new builder for the Gemini client
    pub fn builder() -> GeminiClientBuilder {
        GeminiClientBuilder::default()
    }

    /// Send a `generateContent` request
    pub async fn generate_content(&self, request: &GenerateContentRequest) -> Result<GenerateContentResponse> {
        let endpoint = format!("models/{}:generateContent", self.config.model);
        let url = format!("{}/{}", self.base_url(), endpoint);

        let mut auth_headers = HashMap::new();
        self.apply_auth(&mut auth_headers)
            .map_err(|e| e.with_context(ErrorContext::for_service(self.name()).endpoint(endpoint.as_str())))?;

        debug!("Sending request to Gemini: POST {}", url);
        let start_time = Instant::now();

        let mut builder = self.http_client.post(&url);
        for (key, value) in &auth_headers {
            builder = builder.header(key, value);
        }

        let response = builder.json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(parse_error_response(self.name(), &endpoint, response).await);
        }

        let body = response.json::<GenerateContentResponse>().await?;

        debug!(
            "Gemini responded {} in {:.2}ms",
            status.as_u16(),
            start_time.elapsed().as_secs_f64() * 1000.0
        );

        if let Some(ref usage) = body.usage_metadata {
            info!(
                "Gemini request completed. Used {} tokens ({} prompt, {} generated)",
                usage.total_token_count, usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(body)
    }
}

impl ServiceClient for GeminiClient {
    fn name(&self) -> &str {
        self.config.service_name()
    }

    fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn version(&self) -> &str {
        self.config
            .base_url
            .rsplit('/')
            .next()
            .filter(|segment| segment.starts_with('v'))
            .unwrap_or("v1beta")
    }
}

impl AuthenticatedClient for GeminiClient {
    fn auth_type(&self) -> &str {
        "ApiKey"
    }

    fn set_auth(&mut self, auth: impl Into<String> + Send) -> Result<()> {
        self.config.api_key = auth.into();
        Ok(())
    }

    fn is_authenticated(&self) -> bool {
        !self.config.api_key.trim().is_empty()
    }

    fn apply_auth(&self, headers: &mut HashMap<String, String>) -> Result<()> {
        if !self.is_authenticated() {
            return Err(ServiceError::configuration(
                "No API key set for Gemini client; set GEMINI_API_KEY",
            ));
        }

        headers.insert(API_KEY_HEADER.to_string(), self.config.api_key.clone());
        Ok(())
    }
}

#[async_trait]
impl TextGenerationBackend for GeminiClient {
    async fn generate(&self, persona: &str, prompt: &str, config: &SamplingConfig) -> Result<String> {
        let request = GenerateContentRequest::single_turn(persona, prompt, config);
        let response = self.generate_content(&request).await?;

        response.text().map_err(|e| {
            e.with_context(ErrorContext::for_service(self.name()).endpoint("generateContent"))
        })
    }
}

/// Builder for Gemini client
#[derive(Default)]
pub struct GeminiClientBuilder {
    /// API key for authentication
    api_key: Option<String>,

    /// Model name
    model: Option<String>,

    /// Base URL for the API
    base_url: Option<String>,

    /// Request timeout
    timeout: Option<Duration>,
}

impl GeminiClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the timeout in seconds
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(Duration::from_secs(seconds));
        self
    }

    /// Build the Gemini client.
    ///
    /// Unset values come from the environment, then from defaults.
    pub fn build(self) -> Result<GeminiClient> {
        let mut config = GeminiConfig::from_env();

        if let Some(api_key) = self.api_key {
            config.api_key = api_key;
        }

        if let Some(model) = self.model {
            config.model = model;
        }

        if let Some(base_url) = self.base_url {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }

        GeminiClient::new_with_config(config)
    }
}
