use std::time::Duration;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use reqwest::{Client, StatusCode};
use url::Url;
use log::{debug, error};

use crate::errors::ProviderError;
use crate::providers::{Provider, TranslationRequest};

/// Status MyMemory reports when the caller exhausted its quota
const RATE_LIMIT_STATUS: u16 = 403;

/// MyMemory client for the free translation API
#[derive(Debug)]
pub struct MyMemory {
    /// HTTP client for API requests
    client: Client,
    /// Full URL of the `get` endpoint
    endpoint: String,
    /// Optional contact email, raises the daily quota
    contact_email: Option<String>,
}

/// MyMemory translation response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyMemoryResponse {
    /// Status of the translation, 200 on success
    #[serde(deserialize_with = "deserialize_status")]
    pub response_status: u16,

    /// Translation payload
    #[serde(default)]
    pub response_data: Option<MyMemoryData>,

    /// Error details reported alongside a failed status
    #[serde(default)]
    pub response_details: Option<String>,
}

/// Translation payload of a MyMemory response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyMemoryData {
    /// The translated text
    #[serde(default)]
    pub translated_text: Option<String>,
}

/// MyMemory sends `responseStatus` either as a number or as a numeric string
fn deserialize_status<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Status {
        Number(u16),
        Text(String),
    }

    match Status::deserialize(deserializer)? {
        Status::Number(n) => Ok(n),
        Status::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

impl MyMemoryResponse {
    /// Turn a decoded response into the translated text or a provider error
    pub fn into_translation(self) -> Result<String, ProviderError> {
        let translated = self
            .response_data
            .and_then(|data| data.translated_text)
            .filter(|text| !text.is_empty());

        match (self.response_status, translated) {
            (200, Some(text)) => Ok(text),
            (RATE_LIMIT_STATUS, _) => Err(ProviderError::RateLimited(
                self.response_details
                    .unwrap_or_else(|| "API rate limit exceeded".to_string()),
            )),
            (status, _) => Err(ProviderError::TranslationFailed {
                status,
                message: self.response_details.unwrap_or_else(|| "Unknown error".to_string()),
            }),
        }
    }
}

impl MyMemory {
    /// Create a new MyMemory client
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            contact_email: None,
        }
    }

    /// Attach a contact email to every request
    pub fn with_contact_email(mut self, email: Option<String>) -> Self {
        self.contact_email = email.filter(|e| !e.trim().is_empty());
        self
    }

    /// Build the request URL, `?q=<text>&langpair=<source>|<target>`
    pub fn request_url(&self, request: &TranslationRequest) -> Result<Url, ProviderError> {
        let langpair = format!("{}|{}", request.source, request.target);
        let mut params = vec![("q", request.text.as_str()), ("langpair", langpair.as_str())];
        if let Some(email) = &self.contact_email {
            params.push(("de", email.as_str()));
        }

        Url::parse_with_params(&self.endpoint, &params)
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint {}: {}", self.endpoint, e)))
    }
}

#[async_trait]
impl Provider for MyMemory {
    async fn translate(&self, request: TranslationRequest) -> Result<String, ProviderError> {
        let url = self.request_url(&request)?;

        let response = self.client.get(url)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to send request to MyMemory: {}", e)))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited(format!("HTTP {}", status)));
        }

        let body = response.text().await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read MyMemory response: {}", e)))?;

        let parsed = match serde_json::from_str::<MyMemoryResponse>(&body) {
            Ok(parsed) => parsed,
            Err(e) if !status.is_success() => {
                error!("MyMemory API error ({}): {}", status, body);
                return Err(ProviderError::TranslationFailed {
                    status: status.as_u16(),
                    message: e.to_string(),
                });
            }
            Err(e) => return Err(ProviderError::ParseError(e.to_string())),
        };

        debug!(
            "Translation API response for {} -> {}: status {}",
            request.source, request.target, parsed.response_status
        );

        parsed.into_translation()
    }

    fn name(&self) -> &str {
        "MyMemory"
    }
}
