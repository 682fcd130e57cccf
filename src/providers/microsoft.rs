use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::language_utils::AUTO_DETECT;
use crate::providers::{TranslationBackend, http_client, transport_error};

/// Azure Translator (v3) client
#[derive(Debug)]
pub struct MicrosoftTranslator {
    /// HTTP client for API requests
    client: Client,
    /// Subscription key
    api_key: String,
    /// API endpoint URL
    endpoint: String,
    /// Azure region of the resource, required for regional keys
    region: Option<String>,
}

/// One text element of a translate request
#[derive(Debug, Serialize)]
pub struct TranslateTextItem {
    #[serde(rename = "Text")]
    pub text: String,
}

/// One element of a translate response
#[derive(Debug, Deserialize)]
pub struct TranslateResult {
    /// Translations, one per requested target language
    pub translations: Vec<TranslationItem>,
}

/// A single translation in a response
#[derive(Debug, Deserialize)]
pub struct TranslationItem {
    /// Translated text
    pub text: String,
    /// Target language code
    pub to: String,
}

impl MicrosoftTranslator {
    /// Create a new Azure Translator client
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        region: Option<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: http_client(timeout_secs),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            region,
        }
    }

    /// Query parameters for a request; auto-detection omits `from`
    pub fn query_params(source_language: &str, target_language: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("api-version", "3.0".to_string()),
            ("to", target_language.to_string()),
        ];
        if source_language != AUTO_DETECT {
            params.push(("from", source_language.to_string()));
        }
        params
    }

    /// Extract the first translation from a response body
    pub fn extract_text(results: Vec<TranslateResult>) -> Result<String, ProviderError> {
        results
            .into_iter()
            .next()
            .and_then(|r| r.translations.into_iter().next())
            .map(|t| t.text)
            .ok_or_else(|| ProviderError::ParseError("Microsoft Translator returned no translations".to_string()))
    }
}

#[async_trait]
impl TranslationBackend for MicrosoftTranslator {
    fn name(&self) -> &str {
        "microsoft"
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let api_url = format!("{}/translate", self.endpoint.trim_end_matches('/'));
        let body = vec![TranslateTextItem { text: text.to_string() }];

        let mut request = self.client.post(&api_url)
            .query(&Self::query_params(source_language, target_language))
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .json(&body);
        if let Some(region) = &self.region {
            request = request.header("Ocp-Apim-Subscription-Region", region);
        }

        let response = request.send().await
            .map_err(|e| transport_error("Microsoft Translator", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Microsoft Translator error ({}): {}", status, error_text);
            return Err(ProviderError::from_status(status.as_u16(), error_text));
        }

        let results = response.json::<Vec<TranslateResult>>().await
            .map_err(|e| ProviderError::ParseError(format!("Microsoft Translator response: {}", e)))?;

        Self::extract_text(results)
    }
}
