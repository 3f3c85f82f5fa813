use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Environment variable holding the upstream credential
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub upstream: UpstreamConfig,
    pub uploads: UploadConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "mock-interview".to_string(),
            http: HttpConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

/// Chat-completion provider settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub api_url: String,
    pub model: String,
    /// Falls back to `OPENAI_API_KEY` when unset
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            api_key: None,
            timeout_secs: 60,
        }
    }
}

/// Recorded video storage
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub dir: PathBuf,
    /// Request body limit for `/api/upload-video`
    pub max_bytes: usize,
    /// Prefix for the absolute URL returned after an upload
    pub public_base_url: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("uploads/videos"),
            max_bytes: 100 * 1024 * 1024, // 100MB
            public_base_url: "http://localhost:3001".to_string(),
        }
    }
}

impl Config {
    /// Load from an optional file, then `MOCK_INTERVIEW__*` environment overrides
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("MOCK_INTERVIEW")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("Failed to read config from {}", path))?;

        let mut cfg: Config = settings
            .try_deserialize()
            .context("Invalid configuration")?;

        if cfg.upstream.api_key.is_none() {
            cfg.upstream.api_key = std::env::var(API_KEY_ENV).ok();
        }

        Ok(cfg)
    }

    pub fn api_key_set(&self) -> bool {
        self.upstream
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.service.http.port, 3001);
        assert_eq!(cfg.upstream.model, "gpt-3.5-turbo");
        assert_eq!(cfg.uploads.max_bytes, 104_857_600);
        assert!(!cfg.api_key_set());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("interview.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[upstream]\nmodel = \"gpt-4o-mini\"\napi_key = \"sk-test\"").unwrap();

        let cfg = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.upstream.model, "gpt-4o-mini");
        assert_eq!(cfg.upstream.timeout_secs, 60);
        assert_eq!(cfg.service.http.port, 3001);
        assert!(cfg.api_key_set());
    }
}
