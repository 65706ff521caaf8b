use chrono::Utc;
use std::path::Path;
use std::sync::Arc;

use crate::error::AnalysisError;
use crate::interpreter::{
    apply_inline_markup, build_payload, extract_text, format_paragraphs, parse_calories,
};
use crate::models::{mime_type_for_path, MealAnalysis, MealImage};
use crate::services::GenerativeService;

/// Runs one meal analysis end to end. Holds no per-request state.
pub struct AnalysisHandler {
    service: Arc<dyn GenerativeService>,
    prompt: String,
}

impl AnalysisHandler {
    pub fn new(service: Arc<dyn GenerativeService>, prompt: String) -> Self {
        Self { service, prompt }
    }

    /// Analyze an image file from disk; `None` means nothing was selected.
    pub async fn analyze_file(&self, path: Option<&Path>) -> Result<MealAnalysis, AnalysisError> {
        let path = path.ok_or(AnalysisError::MissingImage)?;
        self.service.ensure_configured()?;

        log::info!("📸 Reading meal image: {}", path.display());

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| AnalysisError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;

        let image = MealImage::new(bytes, mime_type_for_path(path))?;
        self.analyze_image(Some(image)).await
    }

    /// Analyze an image already in memory (e.g. an upload body).
    pub async fn analyze_image(
        &self,
        image: Option<MealImage>,
    ) -> Result<MealAnalysis, AnalysisError> {
        let image = image.ok_or(AnalysisError::MissingImage)?;
        self.service.ensure_configured()?;

        log::info!(
            "🔄 Processing {} image ({} bytes)",
            image.mime_type(),
            image.bytes().len()
        );

        let payload = build_payload(&self.prompt, &image);
        drop(image);

        let response = self.service.generate(&payload).await?;
        let analysis = interpret_response(&response);

        match analysis.calories.value() {
            Some(kcal) => log::info!("✅ Analysis finished: {} kcal", kcal),
            None => log::warn!("⚠️ Analysis finished without a calorie total"),
        }

        Ok(analysis)
    }
}

/// Everything after the network call: text, calorie total, paragraphs.
pub fn interpret_response(response: &serde_json::Value) -> MealAnalysis {
    let text = extract_text(response);
    let calories = parse_calories(&text);
    let paragraphs = format_paragraphs(&apply_inline_markup(&text));

    MealAnalysis {
        calorie_display: calories.to_string(),
        text,
        calories,
        paragraphs,
        analyzed_at: Utc::now(),
    }
}
