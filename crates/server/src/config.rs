use std::time::Duration;

use cinescope_browse::DEFAULT_SEARCH_DELAY;
use cinescope_browse::catalog::DEFAULT_REGION;
use cinescope_tmdb::TmdbConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Tmdb(#[from] cinescope_tmdb::ConfigError),
    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Process configuration, read from `CINESCOPE_*` environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub tmdb: TmdbConfig,
    pub db_path: String,
    pub bind_addr: String,
    pub region: String,
    pub search_delay: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let tmdb = TmdbConfig::from_lookup(&lookup)?;

        let db_path = lookup("CINESCOPE_DB").unwrap_or_else(|| "cinescope.db".to_string());
        let bind_addr =
            lookup("CINESCOPE_BIND").unwrap_or_else(|| "127.0.0.1:8096".to_string());

        let region = match lookup("CINESCOPE_REGION") {
            Some(r) if r.len() == 2 && r.chars().all(|c| c.is_ascii_alphabetic()) => {
                r.to_ascii_uppercase()
            }
            Some(r) => {
                return Err(ConfigError::Invalid {
                    var: "CINESCOPE_REGION",
                    value: r,
                });
            }
            None => DEFAULT_REGION.to_string(),
        };

        let search_delay = match lookup("CINESCOPE_SEARCH_DEBOUNCE_MS") {
            Some(ms) => ms
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::Invalid {
                    var: "CINESCOPE_SEARCH_DEBOUNCE_MS",
                    value: ms,
                })?,
            None => DEFAULT_SEARCH_DELAY,
        };

        Ok(Self {
            tmdb,
            db_path,
            bind_addr,
            region,
            search_delay,
        })
    }
}
