pub mod ai_service;
pub mod gemini; // Google Gemini generateContent client

pub use ai_service::GenerativeService;
pub use gemini::GeminiService;
