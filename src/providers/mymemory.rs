use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::language_utils::AUTO_DETECT;
use crate::providers::{TranslationBackend, http_client, transport_error};

/// Longest `q` the `/get` endpoint accepts
pub const MAX_QUERY_CHARS: usize = 500;

/// MyMemory translation memory client
#[derive(Debug)]
pub struct MyMemory {
    /// HTTP client for API requests
    client: Client,
    /// API endpoint URL
    endpoint: String,
    /// Contact e-mail, raises the anonymous daily quota
    email: Option<String>,
    /// Optional private key
    api_key: Option<String>,
}

/// MyMemory `/get` response
#[derive(Debug, Deserialize)]
pub struct MyMemoryResponse {
    #[serde(rename = "responseData")]
    pub response_data: MyMemoryData,
    /// Status code inside the body; may be a number or a string
    #[serde(rename = "responseStatus")]
    pub response_status: serde_json::Value,
    #[serde(rename = "responseDetails", default)]
    pub response_details: Option<String>,
}

/// Translation payload of a MyMemory response
#[derive(Debug, Deserialize)]
pub struct MyMemoryData {
    #[serde(rename = "translatedText")]
    pub translated_text: Option<String>,
}

impl MyMemory {
    /// Create a new MyMemory client
    pub fn new(
        endpoint: impl Into<String>,
        email: Option<String>,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: http_client(timeout_secs),
            endpoint: endpoint.into(),
            email,
            api_key,
        }
    }

    /// Language pair parameter; auto-detection is spelled `autodetect`
    pub fn langpair(source_language: &str, target_language: &str) -> String {
        let source = if source_language == AUTO_DETECT { "autodetect" } else { source_language };
        format!("{}|{}", source, target_language)
    }

    /// Interpret a decoded response, honouring the in-body status code
    pub fn extract_text(response: MyMemoryResponse) -> Result<String, ProviderError> {
        let status = match &response.response_status {
            serde_json::Value::Number(n) => n.as_u64().unwrap_or(0) as u16,
            serde_json::Value::String(s) => s.parse().unwrap_or(0),
            _ => 0,
        };
        let details = response.response_details.unwrap_or_default();

        if status != 200 {
            return Err(ProviderError::from_status(status, details));
        }

        response.response_data.translated_text
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ProviderError::ParseError("MyMemory returned no translated text".to_string()))
    }
}

#[async_trait]
impl TranslationBackend for MyMemory {
    fn name(&self) -> &str {
        "mymemory"
    }

    fn max_request_chars(&self) -> Option<usize> {
        Some(MAX_QUERY_CHARS)
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let api_url = format!("{}/get", self.endpoint.trim_end_matches('/'));

        let mut params = vec![
            ("q", text.to_string()),
            ("langpair", Self::langpair(source_language, target_language)),
        ];
        if let Some(email) = &self.email {
            params.push(("de", email.clone()));
        }
        if let Some(key) = &self.api_key {
            params.push(("key", key.clone()));
        }

        let response = self.client.get(&api_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| transport_error("MyMemory", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status.as_u16(), error_text));
        }

        let body = response.json::<MyMemoryResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("MyMemory response: {}", e)))?;

        Self::extract_text(body)
    }
}
