use serde_json::Value;

use crate::error::AnalysisError;
use crate::models::RequestPayload;

/// Trait for hosted multimodal models (Gemini, test doubles, ...)
#[async_trait::async_trait]
pub trait GenerativeService: Send + Sync {
    /// Fail early when the service cannot be called at all (e.g. no API key)
    fn ensure_configured(&self) -> Result<(), AnalysisError> {
        Ok(())
    }

    /// Send the payload and return the raw, untrusted JSON answer
    async fn generate(&self, payload: &RequestPayload) -> Result<Value, AnalysisError>;
}
