use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;

const DEFAULT_ALLOWED_ORIGINS: &str =
    "http://localhost:8080,http://127.0.0.1:8080,https://ai-exam-generator-react-app.vercel.app";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub google_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub ai_timeout_secs: u64,
    pub max_questions: u32,
    pub max_upload_bytes: usize,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", "0.0.0.0:8000"),
            google_api_key: get_env("GOOGLE_API_KEY")?,
            gemini_model: get_env_or("GEMINI_MODEL", "gemini-2.5-flash"),
            gemini_base_url: get_env_or(
                "GEMINI_BASE_URL",
                "https://generativelanguage.googleapis.com/v1beta",
            ),
            ai_timeout_secs: get_env_parse_or("AI_TIMEOUT_SECS", 120)?,
            max_questions: get_env_parse_or("MAX_QUESTIONS", 100)?,
            max_upload_bytes: get_env_parse_or("MAX_UPLOAD_BYTES", 20 * 1024 * 1024)?,
            allowed_origins: parse_origins(&get_env_or("ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGINS)),
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
