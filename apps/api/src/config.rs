use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Directory holding one JSON file per editing session.
    pub session_dir: PathBuf,
    /// Sessions kept in memory before the least recently used is dropped.
    pub session_cache_capacity: usize,
    pub max_upload_bytes: usize,
    /// Oversampling factor the client captures the preview at for export.
    pub export_scale: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let export_scale: u32 =
            parse_env("EXPORT_SCALE", 2).context("EXPORT_SCALE must be a positive integer")?;
        anyhow::ensure!(export_scale > 0, "EXPORT_SCALE must be a positive integer");

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            session_dir: std::env::var("SESSION_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".folio/sessions")),
            session_cache_capacity: parse_env("SESSION_CACHE_CAPACITY", 1024)
                .context("SESSION_CACHE_CAPACITY must be a count")?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            export_scale,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => Ok(raw.trim().parse::<T>()?),
        Err(_) => Ok(default),
    }
}
