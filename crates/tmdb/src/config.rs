use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

pub const API_KEY_VAR: &str = "CINESCOPE_TMDB_API_KEY";
pub const BASE_URL_VAR: &str = "CINESCOPE_TMDB_BASE_URL";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("TMDB API key is required. Set {API_KEY_VAR} in the environment.")]
    MissingApiKey,
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Connection settings for the remote movie API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmdbConfig {
    pub api_key: String,
    pub base_url: String,
}

impl TmdbConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(base_url));
        }

        Ok(Self { api_key, base_url })
    }

    /// Read `CINESCOPE_TMDB_API_KEY` (required) and `CINESCOPE_TMDB_BASE_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(API_KEY_VAR).ok_or(ConfigError::MissingApiKey)?;
        let base_url = lookup(BASE_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(api_key, base_url)
    }
}
