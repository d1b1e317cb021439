pub mod adzuna;
pub mod api;
mod cache;
pub mod config;
pub mod google;
mod http;
pub mod jsearch;
pub mod normalize;
mod query;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

use serde::{Deserialize, Serialize};
use std::{fmt::Display, sync::Arc};

pub use api::{FetchError, JobSource, Result};
pub use config::SourcesConfig;
pub use normalize::{Normalizer, RelevanceKeywords};
pub use types::{JobId, JobOffer, RawOffer};

/// The job-search providers offers are fetched from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    JSearch,
    Adzuna,
    Google,
}

impl Source {
    /// Every provider, in the order their offers are merged
    pub const ALL: [Source; 3] = [Source::JSearch, Source::Adzuna, Source::Google];

    pub fn tag(&self) -> &'static str {
        match self {
            Source::JSearch => "jsearch",
            Source::Adzuna => "adzuna",
            Source::Google => "google",
        }
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Free-text search handed to every provider
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub keywords: String,
    pub location: Option<String>,
}

impl SearchQuery {
    pub fn new(keywords: impl Into<String>, location: Option<String>) -> Self {
        Self {
            keywords: keywords.into(),
            location,
        }
    }

    /// The keywords, or the provider's own default when none were given
    pub(crate) fn keywords_or<'a>(&'a self, default: &'a str) -> &'a str {
        match self.keywords.trim() {
            "" => default,
            keywords => keywords,
        }
    }

    pub(crate) fn location(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|location| !location.is_empty())
    }
}

/// Builds every provider adapter, sharing one HTTP client between them
pub fn all_sources(config: &SourcesConfig) -> Vec<Arc<dyn JobSource>> {
    let client = reqwest::Client::new();
    vec![
        Arc::new(jsearch::JSearch::new(client.clone(), config)),
        Arc::new(adzuna::Adzuna::new(client.clone(), config)),
        Arc::new(google::GoogleJobs::new(client, config)),
    ]
}
