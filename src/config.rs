use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1/models/gemini-2.5-flash:generateContent";
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Value shipped in sample `.env` files; treated as "no key".
const API_KEY_PLACEHOLDER: &str = "TWOJ_KLUCZ_API_GEMINI_TUTAJ";

const DEFAULT_PROMPT: &str = include_str!("../prompts/meal_analysis_pl.txt");

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub prompt: String,
    pub server_addr: String,
    pub max_upload_bytes: usize,
}

impl Config {
    /// Load from the process environment (call `dotenv()` first)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GEMINI_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty() && key != API_KEY_PLACEHOLDER);

        if api_key.is_none() {
            log::warn!("⚠️ GEMINI_API_KEY not set, analyses will be rejected");
        }

        let endpoint = lookup("GEMINI_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let prompt = match lookup("ANALYSIS_PROMPT_FILE") {
            Some(path) => {
                let path = PathBuf::from(path);
                std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read prompt file {}", path.display()))?
            }
            None => DEFAULT_PROMPT.to_string(),
        };

        let server_addr =
            lookup("SERVER_ADDR").unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string());

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("MAX_UPLOAD_BYTES must be a byte count, got '{}'", raw))?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            api_key,
            endpoint,
            prompt,
            server_addr,
            max_upload_bytes,
        })
    }
}
