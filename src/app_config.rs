use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use url::Url;

use crate::language_utils;
use crate::translation::pacing::PacingConfig;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code, or "auto"
    pub source_language: String,

    /// Target language code
    pub target_language: String,

    /// Translation config
    pub translation: TranslationConfig,

    /// Document handling config
    #[serde(default)]
    pub document: DocumentConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation backend type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Google Translate public endpoint
    #[default]
    Google,
    // @provider: Microsoft Azure Translator
    Microsoft,
    // @provider: MyMemory community translation memory
    MyMemory,
}

impl TranslationProvider {
    /// All providers in selection order
    pub const ALL: [TranslationProvider; 3] = [Self::Google, Self::Microsoft, Self::MyMemory];

    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Google => "Google Translate",
            Self::Microsoft => "Microsoft Translator",
            Self::MyMemory => "MyMemory",
        }
    }

    // @returns: Short description shown in listings
    pub fn description(&self) -> &str {
        match self {
            Self::Google => "Most popular, great for Chinese",
            Self::Microsoft => "Professional, good for business",
            Self::MyMemory => "Community-driven, free alternative",
        }
    }

    // @returns: Lowercase provider identifier (selection key)
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Google => "google".to_string(),
            Self::Microsoft => "microsoft".to_string(),
            Self::MyMemory => "mymemory".to_string(),
        }
    }
}

// Implement Display trait for TranslationProvider
impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranslationProvider
impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "microsoft" => Ok(Self::Microsoft),
            "mymemory" => Ok(Self::MyMemory),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: API key (Microsoft subscription key, MyMemory key)
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Azure resource region
    #[serde(default)]
    pub region: Option<String>,

    // @field: Contact e-mail (raises MyMemory's free quota)
    #[serde(default)]
    pub email: Option<String>,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        Self {
            provider_type: provider_type.to_lowercase_string(),
            api_key: String::new(),
            endpoint: default_endpoint(provider_type),
            region: None,
            email: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Available translation providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// Maximum characters per backend request
    #[serde(default = "default_max_chunk_size")]
    pub max_chunk_size: usize,

    /// Attempts per chunk before the sentinel is substituted
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay policy between backend calls
    #[serde(default)]
    pub pacing: PacingConfig,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: default_max_chunk_size(),
            max_retries: default_max_retries(),
            pacing: PacingConfig::default(),
        }
    }
}

/// Document handling configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DocumentConfig {
    /// Office suite binary used to convert legacy .doc files
    #[serde(default = "default_converter_command")]
    pub converter_command: String,

    /// Seconds to wait for the conversion
    #[serde(default = "default_conversion_timeout_secs")]
    pub conversion_timeout_secs: u64,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            converter_command: default_converter_command(),
            conversion_timeout_secs: default_conversion_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_max_chunk_size() -> usize {
    1500
}

fn default_max_retries() -> u32 {
    3
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_conversion_timeout_secs() -> u64 {
    30
}

fn default_converter_command() -> String {
    "soffice".to_string()
}

fn default_endpoint(provider: TranslationProvider) -> String {
    match provider {
        TranslationProvider::Google => "https://translate.googleapis.com".to_string(),
        TranslationProvider::Microsoft => "https://api.cognitive.microsofttranslator.com".to_string(),
        TranslationProvider::MyMemory => "https://api.mymemory.translated.net".to_string(),
    }
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if !language_utils::validate_source_code(&self.source_language) {
            return Err(anyhow!("Invalid source language: {}", self.source_language));
        }
        if !language_utils::validate_target_code(&self.target_language) {
            return Err(anyhow!("Invalid target language: {}", self.target_language));
        }

        if self.translation.common.max_chunk_size == 0 {
            return Err(anyhow!("max_chunk_size must be greater than zero"));
        }
        if self.translation.common.max_retries == 0 {
            return Err(anyhow!("max_retries must be at least 1"));
        }

        let endpoint = self.translation.get_endpoint();
        let url = Url::parse(&endpoint)
            .map_err(|e| anyhow!("Invalid endpoint '{}' for {}: {}", endpoint, self.translation.provider, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow!("Endpoint must use http or https: {}", endpoint));
        }

        // Azure Translator refuses anonymous requests
        if self.translation.provider == TranslationProvider::Microsoft
            && self.translation.get_api_key().is_empty()
        {
            return Err(anyhow!("Translation API key is required for Microsoft provider"));
        }

        Ok(())
    }

    /// Resolve display names and ISO codes in the language fields to backend codes
    pub fn normalize_languages(&mut self) -> Result<()> {
        self.source_language = language_utils::resolve_language_code(&self.source_language)?.to_string();
        self.target_language = language_utils::resolve_language_code(&self.target_language)?.to_string();
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: "zh-CN".to_string(),
            target_language: "es".to_string(),
            translation: TranslationConfig::default(),
            document: DocumentConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(&self.provider)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &TranslationProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers.iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get the API key for the active provider
    pub fn get_api_key(&self) -> String {
        self.get_active_provider_config()
            .map(|p| p.api_key.clone())
            .unwrap_or_default()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        default_endpoint(self.provider)
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        self.get_active_provider_config()
            .map(|p| p.timeout_secs)
            .filter(|t| *t > 0)
            .unwrap_or_else(default_timeout_secs)
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            available_providers: TranslationProvider::ALL
                .iter()
                .map(|p| ProviderConfig::new(*p))
                .collect(),
            common: TranslationCommonConfig::default(),
        }
    }
}
