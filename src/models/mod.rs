use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

use crate::error::AnalysisError;

/// Photo of a meal as selected by the user
#[derive(Debug, Clone)]
pub struct MealImage {
    bytes: Vec<u8>,
    mime_type: String,
}

impl MealImage {
    /// Empty files count as "no image selected"
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Result<Self, AnalysisError> {
        if bytes.is_empty() {
            return Err(AnalysisError::MissingImage);
        }

        Ok(Self {
            bytes,
            mime_type: mime_type.into(),
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

/// Guess the MIME type from the file extension, falling back to JPEG
pub fn mime_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        Some("heif") => "image/heif",
        _ => "image/jpeg", // jpg, jpeg and anything unknown
    }
}

// Gemini generateContent request body

#[derive(Debug, Clone, Serialize)]
pub struct RequestPayload {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

/// Calorie total parsed from the model's answer.
///
/// `Absent` is not the same as `Present(0)`: a missing figure is rendered
/// as the `-- kcal` placeholder, never as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalorieEstimate {
    Present(u32),
    #[default]
    Absent,
}

impl CalorieEstimate {
    pub const PLACEHOLDER: &'static str = "-- kcal";

    pub fn value(&self) -> Option<u32> {
        match self {
            CalorieEstimate::Present(kcal) => Some(*kcal),
            CalorieEstimate::Absent => None,
        }
    }
}

impl std::fmt::Display for CalorieEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalorieEstimate::Present(kcal) => write!(f, "{} kcal", kcal),
            CalorieEstimate::Absent => write!(f, "{}", Self::PLACEHOLDER),
        }
    }
}

/// Inline node inside a paragraph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    Emphasis(String),
    LineBreak,
}

/// One displayable paragraph of the model's answer
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Paragraph {
    pub inlines: Vec<Inline>,
}

impl Paragraph {
    pub fn is_empty(&self) -> bool {
        self.inlines.is_empty()
    }

    /// Plain terminal rendering: emphasis markers dropped, breaks become newlines
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        for inline in &self.inlines {
            match inline {
                Inline::Text(text) | Inline::Emphasis(text) => out.push_str(text),
                Inline::LineBreak => out.push('\n'),
            }
        }
        out
    }

    /// Escaped HTML rendering, `<p>...</p>`
    pub fn to_html(&self) -> String {
        let mut out = String::from("<p>");
        for inline in &self.inlines {
            match inline {
                Inline::Text(text) => out.push_str(&escape_html(text)),
                Inline::Emphasis(text) => {
                    out.push_str("<strong>");
                    out.push_str(&escape_html(text));
                    out.push_str("</strong>");
                }
                Inline::LineBreak => out.push_str("<br>"),
            }
        }
        out.push_str("</p>");
        out
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Shown in place of the answer when the model sent no usable text
pub const NO_CONTENT_MESSAGE: &str = "Brak treści odpowiedzi od modelu.";

/// Result of one successful analysis
#[derive(Debug, Clone, Serialize)]
pub struct MealAnalysis {
    pub text: String,
    #[serde(serialize_with = "serialize_calories")]
    pub calories: CalorieEstimate,
    pub calorie_display: String,
    pub paragraphs: Vec<Paragraph>,
    pub analyzed_at: DateTime<Utc>,
}

fn serialize_calories<S>(calories: &CalorieEstimate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    calories.value().serialize(serializer)
}
