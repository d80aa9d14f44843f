//! Tests for configuration management functionality
//!
//! These tests verify that configuration providers and the Gemini
//! configuration behave correctly.

#[cfg(test)]
mod tests {
    use std::env;
    use std::time::Duration;

    use crate::config::{
        ConfigProvider, ConfigProviderExt, EnvConfigProvider, GeminiConfig, MemoryConfigProvider,
        ServiceConfig, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_TIMEOUT_SECONDS,
    };

    #[test]
    fn test_memory_config_provider() {
        let mut provider = MemoryConfigProvider::new();
        provider.set("api_key", "test_key");
        provider.set("timeout", "30s");
        provider.set("retries", 3);

        assert_eq!(provider.get_string("api_key").unwrap(), "test_key");
        assert_eq!(provider.get_duration("timeout").unwrap(), Duration::from_secs(30));
        assert_eq!(provider.get_string("retries").unwrap(), "3");
        assert_eq!(provider.get_string_or("missing", "default"), "default");

        assert!(provider.get_string("missing").is_err());
        assert!(provider.get_duration("api_key").is_err());
    }

    #[test]
    fn test_env_config_provider() {
        env::set_var("AURA_TEST_SERVICE_API_KEY", "env_test_key");

        let provider = EnvConfigProvider::new()
            .with_prefix("AURA_TEST")
            .with_namespace("SERVICE");

        assert_eq!(provider.get_string("api_key").unwrap(), "env_test_key");
        assert_eq!(provider.format_key("api-key"), "AURA_TEST_SERVICE_API_KEY");
        assert!(provider.get_string("NON_EXISTENT").is_err());

        env::remove_var("AURA_TEST_SERVICE_API_KEY");
    }

    #[test]
    fn test_gemini_config_from_provider() {
        let mut provider = MemoryConfigProvider::new();
        provider.set("gemini_api_key", "test_api_key");
        provider.set("gemini_model", "gemini-1.5-flash");
        provider.set("gemini_base_url", "https://proxy.example.com/v1beta/");
        provider.set("gemini_timeout", "2m");

        let config = GeminiConfig::from_provider(&provider);
        assert_eq!(config.api_key, "test_api_key");
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.base_url, "https://proxy.example.com/v1beta");
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_api_key_is_deferred() {
        let config = GeminiConfig::from_provider(&MemoryConfigProvider::new());

        // Loading succeeds with defaults...
        assert!(config.api_key.is_empty());
        assert_eq!(config.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECONDS));

        // ...and only validation reports the gap
        let err = config.validate().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_invalid_timeout_falls_back_to_default() {
        for value in ["whenever", "0s", "-5", "400000000000000000m", "6000000000000000h"] {
            let mut provider = MemoryConfigProvider::new();
            provider.set("gemini_timeout", value);

            let config = GeminiConfig::from_provider(&provider);
            assert_eq!(
                config.timeout,
                Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
                "timeout {:?} was not rejected",
                value
            );
        }
    }

    #[test]
    fn test_sub_second_timeout_is_kept() {
        let mut provider = MemoryConfigProvider::new();
        provider.set("gemini_timeout", "500ms");

        let config = GeminiConfig::from_provider(&provider);
        assert_eq!(config.timeout, Duration::from_millis(500));
    }

    #[test]
    fn test_invalid_base_url_fails_validation() {
        let config = GeminiConfig {
            api_key: "key".to_string(),
            base_url: "not a url".to_string(),
            ..GeminiConfig::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_output_redacts_api_key() {
        let config = GeminiConfig {
            api_key: "AIzaSuperSecret".to_string(),
            ..GeminiConfig::default()
        };

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("AIzaSuperSecret"));
        assert!(rendered.contains("<redacted>"));
    }
}
