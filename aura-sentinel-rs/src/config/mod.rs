//! Configuration management for the narrative backend
//!
//! This module provides utilities for loading and validating configuration
//! for the generative-text backend, with support for environment variables
//! and `.env` files.

use std::env;
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use once_cell::sync::Lazy;
use url::Url;

use crate::error::{Result, ServiceError};
use crate::util::parse_duration;

/// Default Gemini REST endpoint
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Gemini model
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro";

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Base trait for configuration providers
pub trait ConfigProvider: Send + Sync {
    /// Get a string configuration value
    fn get_string(&self, key: &str) -> Result<String>;
}

/// Extension methods for configuration providers
pub trait ConfigProviderExt: ConfigProvider {
    /// Get a duration configuration value ("30s", "2m", "1500ms" or plain seconds)
    fn get_duration(&self, key: &str) -> Result<Duration> {
        let value = self.get_string(key)?;
        parse_duration(&value)
            .ok_or_else(|| ServiceError::configuration(format!("Invalid duration for key {}: {}", key, value)))
    }

    /// Get a string configuration value with a default
    fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_string(key).unwrap_or_else(|_| default.to_string())
    }
}

impl<T: ConfigProvider> ConfigProviderExt for T {}

/// Environment variable based configuration provider
#[derive(Debug, Clone, Default)]
pub struct EnvConfigProvider {
    /// Optional prefix for environment variables
    prefix: Option<String>,

    /// Optional namespace for variables (e.g., "GEMINI")
    namespace: Option<String>,
}

impl EnvConfigProvider {
    /// Create a new environment variable config provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a prefix for environment variables
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set a namespace for environment variables
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Format a configuration key as an environment variable
    pub(crate) fn format_key(&self, key: &str) -> String {
        let mut env_key = String::new();

        if let Some(ref prefix) = self.prefix {
            env_key.push_str(prefix);
            env_key.push('_');
        }

        if let Some(ref namespace) = self.namespace {
            env_key.push_str(namespace);
            env_key.push('_');
        }

        // Add the key itself (uppercase and replace non-alphanumeric with underscores)
        env_key.push_str(&key.to_uppercase().replace(|c: char| !c.is_ascii_alphanumeric(), "_"));

        env_key
    }
}

impl ConfigProvider for EnvConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        let env_key = self.format_key(key);

        env::var(&env_key)
            .map_err(|e| {
                match e {
                    env::VarError::NotPresent => {
                        ServiceError::configuration(format!("Environment variable not set: {}", env_key))
                    }
                    env::VarError::NotUnicode(_) => {
                        ServiceError::configuration(format!("Environment variable is not valid unicode: {}", env_key))
                    }
                }
            })
    }
}

/// In-memory config provider for testing or static configuration
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigProvider {
    values: HashMap<String, String>,
}

impl MemoryConfigProvider {
    /// Create a new empty memory config provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a configuration value
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: ToString,
    {
        self.values.insert(key.into(), value.to_string());
    }
}

impl ConfigProvider for MemoryConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| ServiceError::configuration(format!("Configuration key not found: {}", key)))
    }
}

/// Global default configuration provider.
///
/// Unprefixed, so `gemini_api_key` resolves to `GEMINI_API_KEY`.
pub static DEFAULT_PROVIDER: Lazy<Arc<EnvConfigProvider>> = Lazy::new(|| {
    Arc::new(EnvConfigProvider::new())
});

/// Load a `.env` file from the working directory or its parents, once.
///
/// A missing file is not an error; real environment variables win.
pub fn load_dotenv() {
    static LOADED: Lazy<()> = Lazy::new(|| {
        if let Ok(path) = dotenv::dotenv() {
            log::debug!("Loaded environment from {}", path.display());
        }
    });
    Lazy::force(&LOADED);
}

/// Trait for backend-specific configuration
pub trait ServiceConfig: Debug + Send + Sync {
    /// Validate this configuration
    fn validate(&self) -> Result<()>;

    /// Service name
    fn service_name(&self) -> &str;
}

/// Configuration for the Gemini API
#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key, possibly empty
    pub api_key: String,

    /// Model used for generation
    pub model: String,

    /// Base URL (can be changed for proxies)
    pub base_url: String,

    /// Request timeout, never zero
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() { "<unset>" } else { "<redacted>" };
        f.debug_struct("GeminiConfig")
            .field("api_key", &api_key)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GeminiConfig {
    /// Load configuration from a config provider.
    ///
    /// A missing API key is not an error here: the key is left empty and the
    /// first generation call fails instead.
    pub fn from_provider<P: ConfigProvider + ConfigProviderExt>(provider: &P) -> Self {
        let api_key = provider.get_string_or("gemini_api_key", "");
        let model = provider.get_string_or("gemini_model", DEFAULT_GEMINI_MODEL);
        let base_url = provider.get_string_or("gemini_base_url", DEFAULT_GEMINI_BASE_URL);
        let timeout = provider
            .get_duration("gemini_timeout")
            .ok()
            .filter(|d| !d.is_zero())
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECONDS));

        Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Load configuration from the process environment (after `.env`)
    pub fn from_env() -> Self {
        load_dotenv();
        Self::from_provider(&**DEFAULT_PROVIDER)
    }
}

impl ServiceConfig for GeminiConfig {
    fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ServiceError::configuration("GEMINI_API_KEY is not set"));
        }

        if self.model.is_empty() {
            return Err(ServiceError::configuration("Gemini model is required"));
        }

        Url::parse(&self.base_url)
            .map_err(|e| ServiceError::configuration(format!("Invalid Gemini base URL {}: {}", self.base_url, e)))?;

        Ok(())
    }

    fn service_name(&self) -> &str {
        "gemini"
    }
}
