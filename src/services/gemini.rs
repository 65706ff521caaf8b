use reqwest::StatusCode;
use serde_json::Value;

use super::GenerativeService;
use crate::error::AnalysisError;
use crate::interpreter::extract_error_message;
use crate::models::RequestPayload;

const NO_DETAILS: &str = "Brak dodatkowych informacji";

pub struct GeminiService {
    api_key: Option<String>,
    endpoint: String,
    client: reqwest::Client,
}

impl GeminiService {
    pub fn new(api_key: Option<String>, endpoint: String) -> Self {
        Self {
            api_key,
            endpoint,
            client: reqwest::Client::new(),
        }
    }
}

/// Upstream message, else the reason phrase, else a generic note
fn api_error_message(status: StatusCode, api_message: String) -> String {
    if !api_message.is_empty() {
        return api_message;
    }

    status.canonical_reason().unwrap_or(NO_DETAILS).to_string()
}

#[async_trait::async_trait]
impl GenerativeService for GeminiService {
    fn ensure_configured(&self) -> Result<(), AnalysisError> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(()),
            _ => Err(AnalysisError::MissingApiKey),
        }
    }

    async fn generate(&self, payload: &RequestPayload) -> Result<Value, AnalysisError> {
        self.ensure_configured()?;
        let api_key = self.api_key.as_deref().ok_or(AnalysisError::MissingApiKey)?;

        log::info!("🤖 Sending request to Gemini: {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", api_key)])
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        log::debug!("📥 Gemini response status: {}", status);

        let body = response.text().await?;
        log::debug!("📄 Raw Gemini response size: {} bytes", body.len());

        // Error envelopes and odd proxies may not send JSON at all
        let data: Option<Value> = serde_json::from_str(&body).ok();

        if !status.is_success() {
            let message = api_error_message(status, extract_error_message(data.as_ref()));

            log::error!("❌ Gemini API error ({}): {}", status, message);
            return Err(AnalysisError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(data.unwrap_or(Value::Null))
    }
}
