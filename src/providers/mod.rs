/*!
 * Translation backend implementations.
 *
 * This module contains client implementations for the supported services:
 * - Google: public Google Translate endpoint
 * - Microsoft: Azure Translator API
 * - MyMemory: MyMemory translation memory API
 */

use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;
use std::time::Duration;

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::{ProviderError, TranslationError};

/// Common trait for all translation backends
///
/// This trait defines the interface that all backend implementations must follow,
/// allowing them to be used interchangeably by the translation pipeline.
/// Backends make exactly one request per call; retries belong to the caller.
#[async_trait]
pub trait TranslationBackend: Send + Sync + Debug {
    /// Selection key of this backend
    fn name(&self) -> &str;

    /// Longest text, in characters, the service accepts in one request
    fn max_request_chars(&self) -> Option<usize> {
        None
    }

    /// Translate `text` from `source_language` ("auto" allowed) to `target_language`
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError>;
}

pub mod google;
pub mod microsoft;
pub mod mock;
pub mod mymemory;

pub use google::GoogleTranslate;
pub use microsoft::MicrosoftTranslator;
pub use mymemory::MyMemory;

/// Build the HTTP client shared by the backend implementations
pub(crate) fn http_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .unwrap_or_default()
}

/// Map a reqwest transport failure onto the provider taxonomy
pub(crate) fn transport_error(service: &str, error: reqwest::Error) -> ProviderError {
    if error.is_timeout() || error.is_connect() {
        ProviderError::ConnectionError(format!("{}: {}", service, error))
    } else {
        ProviderError::RequestFailed(format!("{}: {}", service, error))
    }
}

/// Create the backend selected in the configuration
pub fn create_backend(config: &TranslationConfig) -> Result<Box<dyn TranslationBackend>, TranslationError> {
    let endpoint = config.get_endpoint();
    let timeout_secs = config.get_timeout_secs();
    let provider_config = config.get_active_provider_config();

    let backend: Box<dyn TranslationBackend> = match config.provider {
        TranslationProvider::Google => Box::new(GoogleTranslate::new(endpoint, timeout_secs)),
        TranslationProvider::Microsoft => {
            let api_key = config.get_api_key();
            if api_key.is_empty() {
                return Err(TranslationError::Config(
                    "Microsoft Translator requires an API key".to_string(),
                ));
            }
            let region = provider_config.and_then(|p| p.region.clone());
            Box::new(MicrosoftTranslator::new(api_key, endpoint, region, timeout_secs))
        }
        TranslationProvider::MyMemory => {
            let email = provider_config.and_then(|p| p.email.clone());
            let api_key = Some(config.get_api_key()).filter(|k| !k.is_empty());
            Box::new(MyMemory::new(endpoint, email, api_key, timeout_secs))
        }
    };

    Ok(backend)
}
