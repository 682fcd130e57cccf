use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;

use crate::errors::ProviderError;
use crate::providers::{TranslationBackend, http_client, transport_error};

/// Google Translate client using the public `translate_a/single` endpoint
#[derive(Debug)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Base URL, without the path
    endpoint: String,
}

impl GoogleTranslate {
    /// Create a new Google Translate client
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: http_client(timeout_secs),
            endpoint: endpoint.into(),
        }
    }

    fn api_url(&self) -> String {
        format!("{}/translate_a/single", self.endpoint.trim_end_matches('/'))
    }

    /// Extract the translated text from the nested-array response body.
    ///
    /// The first element is a list of segments; each segment starts with the
    /// translated text of one source sentence.
    pub fn parse_response(body: &str) -> Result<String, ProviderError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(format!("Google response is not JSON: {}", e)))?;

        let segments = value
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::ParseError("Google response has no translation segments".to_string()))?;

        let translated: String = segments
            .iter()
            .filter_map(|segment| segment.get(0).and_then(Value::as_str))
            .collect();

        if translated.is_empty() {
            return Err(ProviderError::ParseError("Google response contained empty translation".to_string()));
        }

        Ok(translated)
    }
}

#[async_trait]
impl TranslationBackend for GoogleTranslate {
    fn name(&self) -> &str {
        "google"
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let response = self.client.post(self.api_url())
            .query(&[
                ("client", "gtx"),
                ("sl", source_language),
                ("tl", target_language),
                ("dt", "t"),
            ])
            .form(&[("q", text)])
            .send()
            .await
            .map_err(|e| transport_error("Google Translate", e))?;

        let status = response.status();
        let body = response.text().await
            .map_err(|e| transport_error("Google Translate", e))?;

        if !status.is_success() {
            return Err(ProviderError::from_status(status.as_u16(), body));
        }

        debug!("Google Translate returned {} bytes", body.len());
        Self::parse_response(&body)
    }
}
