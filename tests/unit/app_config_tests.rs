/*!
 * Tests for application configuration functionality
 */

use doctran::app_config::{Config, LogLevel, TranslationProvider};
use doctran::translation::PacingStrategy;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "zh-CN");
    assert_eq!(config.target_language, "es");
    assert_eq!(config.translation.provider, TranslationProvider::Google);
    assert_eq!(config.translation.common.max_chunk_size, 1500);
    assert_eq!(config.translation.common.max_retries, 3);
    assert_eq!(config.translation.common.pacing.strategy, PacingStrategy::Fixed);
    assert_eq!(config.translation.common.pacing.retry_delay_ms, 3000);
    assert_eq!(config.document.converter_command, "soffice");
    assert_eq!(config.document.conversion_timeout_secs, 30);
    assert_eq!(config.log_level, LogLevel::Info);

    for provider in TranslationProvider::ALL {
        assert!(config.translation.get_provider_config(&provider).is_some());
    }
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.source_language = "auto".to_string();
    assert!(config.validate().is_ok());

    config.target_language = "auto".to_string();
    assert!(config.validate().is_err());
    config.target_language = "fr".to_string();

    config.translation.common.max_chunk_size = 0;
    assert!(config.validate().is_err());
    config.translation.common.max_chunk_size = 1500;

    config.translation.common.max_retries = 0;
    assert!(config.validate().is_err());
    config.translation.common.max_retries = 3;

    // Microsoft requires a subscription key
    config.translation.provider = TranslationProvider::Microsoft;
    assert!(config.validate().is_err());
    if let Some(provider) = config.translation.available_providers.iter_mut().find(|p| p.provider_type == "microsoft") {
        provider.api_key = "key".to_string();
    }
    assert!(config.validate().is_ok());
}

/// Test that malformed endpoints are rejected
#[test]
fn test_config_validation_withBadEndpoint_shouldFail() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::MyMemory;
    if let Some(provider) = config.translation.available_providers.iter_mut().find(|p| p.provider_type == "mymemory") {
        provider.endpoint = "ftp://api.mymemory.translated.net".to_string();
    }
    assert!(config.validate().is_err());

    if let Some(provider) = config.translation.available_providers.iter_mut().find(|p| p.provider_type == "mymemory") {
        provider.endpoint = "not a url".to_string();
    }
    assert!(config.validate().is_err());
}

/// Test loading a partial configuration file
#[test]
fn test_config_deserialize_withMinimalJson_shouldFillDefaults() {
    let json = r#"{
        "source_language": "English",
        "target_language": "ca",
        "translation": {
            "provider": "mymemory",
            "available_providers": [
                { "type": "mymemory", "email": "me@example.com" }
            ],
            "common": { "pacing": { "strategy": "exponential" } }
        }
    }"#;

    let mut config: Config = serde_json::from_str(json).unwrap();
    assert_eq!(config.translation.provider, TranslationProvider::MyMemory);
    assert_eq!(config.translation.common.max_chunk_size, 1500);
    assert_eq!(config.translation.common.pacing.strategy, PacingStrategy::Exponential);
    assert_eq!(config.translation.get_endpoint(), "https://api.mymemory.translated.net");
    assert_eq!(config.translation.get_timeout_secs(), 30);

    config.normalize_languages().unwrap();
    assert_eq!(config.source_language, "en");
    assert!(config.validate().is_ok());
}

/// Test provider parsing and display
#[test]
fn test_translation_provider_fromStr_shouldRoundTripDisplay() {
    for provider in TranslationProvider::ALL {
        let parsed: TranslationProvider = provider.to_string().parse().unwrap();
        assert_eq!(parsed, provider);
    }
    assert!("deepl".parse::<TranslationProvider>().is_err());
}
