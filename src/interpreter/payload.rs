use base64::{engine::general_purpose, Engine};

use crate::models::{Content, InlineData, MealImage, Part, RequestPayload};

/// Build the generateContent body: instruction first, photo second.
pub fn build_payload(prompt: &str, image: &MealImage) -> RequestPayload {
    let data = general_purpose::STANDARD.encode(image.bytes());

    log::debug!("📊 Image size: {} bytes", image.bytes().len());
    log::debug!("🔄 Base64 encoded size: {} bytes", data.len());

    RequestPayload {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![
                Part::Text {
                    text: prompt.to_string(),
                },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: image.mime_type().to_string(),
                        data,
                    },
                },
            ],
        }],
    }
}
