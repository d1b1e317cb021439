use crate::Source;
use std::{env, fmt, time::Duration};

pub const JSEARCH_BASE_URL: &str = "https://jsearch.p.rapidapi.com";
pub const ADZUNA_BASE_URL: &str = "https://api.adzuna.com";
pub const SERPAPI_BASE_URL: &str = "https://serpapi.com";
/// Provider responses are reused for an hour
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Credentials and endpoints of the providers
#[derive(Clone)]
pub struct SourcesConfig {
    pub rapidapi_key: Option<String>,
    pub adzuna_app_id: Option<String>,
    pub adzuna_app_key: Option<String>,
    pub serpapi_key: Option<String>,
    pub jsearch_base_url: String,
    pub adzuna_base_url: String,
    pub serpapi_base_url: String,
    pub cache_ttl: Duration,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            rapidapi_key: None,
            adzuna_app_id: None,
            adzuna_app_key: None,
            serpapi_key: None,
            jsearch_base_url: JSEARCH_BASE_URL.to_owned(),
            adzuna_base_url: ADZUNA_BASE_URL.to_owned(),
            serpapi_base_url: SERPAPI_BASE_URL.to_owned(),
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

impl SourcesConfig {
    /// Reads `RAPIDAPI_KEY`, `ADZUNA_APP_ID`, `ADZUNA_APP_KEY`, `SERPAPI_KEY`
    /// and the optional `*_BASE_URL` overrides. Unset or blank means absent.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            rapidapi_key: env_var("RAPIDAPI_KEY"),
            adzuna_app_id: env_var("ADZUNA_APP_ID"),
            adzuna_app_key: env_var("ADZUNA_APP_KEY"),
            serpapi_key: env_var("SERPAPI_KEY"),
            jsearch_base_url: env_var("JSEARCH_BASE_URL").unwrap_or(defaults.jsearch_base_url),
            adzuna_base_url: env_var("ADZUNA_BASE_URL").unwrap_or(defaults.adzuna_base_url),
            serpapi_base_url: env_var("SERPAPI_BASE_URL").unwrap_or(defaults.serpapi_base_url),
            cache_ttl: defaults.cache_ttl,
        }
    }

    pub fn with_cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }

    /// Providers whose credentials are all present
    pub fn enabled(&self) -> Vec<Source> {
        Source::ALL
            .into_iter()
            .filter(|source| match source {
                Source::JSearch => self.rapidapi_key.is_some(),
                Source::Adzuna => self.adzuna_app_id.is_some() && self.adzuna_app_key.is_some(),
                Source::Google => self.serpapi_key.is_some(),
            })
            .collect()
    }
}

impl fmt::Debug for SourcesConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourcesConfig")
            .field("enabled", &self.enabled())
            .field("jsearch_base_url", &self.jsearch_base_url)
            .field("adzuna_base_url", &self.adzuna_base_url)
            .field("serpapi_base_url", &self.serpapi_base_url)
            .field("cache_ttl", &self.cache_ttl)
            .finish_non_exhaustive()
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
