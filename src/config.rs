use std::path::PathBuf;

use anyhow::Context;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const ALLOWED_MODELS: [&str; 2] = ["gemini-2.5-flash", "gemini-2.0-flash"];
pub const DEFAULT_TEMPERATURE: f64 = 0.9;
const DEFAULT_PORT: u16 = 3000;

/// Runtime settings, read once from the environment at start-up.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub default_model: String,
    pub temperature: f64,
    pub port: u16,
    pub static_dir: PathBuf,
    /// `None` disables the daily log file.
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests need not touch
    /// the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_key = lookup("GEMINI_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .context("GEMINI_API_KEY must be set (copy .env.example to .env)")?;

        let default_model = lookup("GEMINI_MODEL")
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let temperature = parse_temperature(lookup("GEMINI_TEMPERATURE").as_deref());

        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let static_dir = lookup("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("public"));

        let log_dir = match lookup("LOG_DIR") {
            Some(dir) if dir.trim().is_empty() => None,
            Some(dir) => Some(PathBuf::from(dir)),
            None => Some(PathBuf::from("logs")),
        };

        Ok(Self { api_key, default_model, temperature, port, static_dir, log_dir })
    }
}

/// Parses a temperature override, falling back to [`DEFAULT_TEMPERATURE`]
/// when the value is absent, unparsable or not finite.
pub fn parse_temperature(raw: Option<&str>) -> f64 {
    raw.and_then(|t| t.trim().parse::<f64>().ok())
        .filter(|t| t.is_finite())
        .unwrap_or(DEFAULT_TEMPERATURE)
}
