pub mod fallback;
mod request;

use fallback::{fallback_jobs, FALLBACK_SOURCE};
use job_sources::{
    FetchError, JobOffer, JobSource, Normalizer, RawOffer, RelevanceKeywords, Source,
    SourcesConfig,
};
use serde::{Deserialize, Serialize};
use std::{
    collections::{hash_map::Entry, HashMap},
    sync::Arc,
};
use thiserror::Error;

pub use request::{SearchRequest, SourceSelector};

pub const DEFAULT_KEYWORDS: &str = "developer full stack react";
pub const RESULT_CAP: usize = 30;
pub const DEGRADED_MESSAGE: &str =
    "Erreur lors de la recherche, utilisation des offres de démonstration";

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown job source: '{0}'")]
    UnknownSource(String),
}

/// Body of every job search answer, live or canned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub jobs: Vec<JobOffer>,
    pub source: String,
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResponse {
    fn live(jobs: Vec<JobOffer>, selector: SourceSelector) -> Self {
        Self {
            count: jobs.len(),
            jobs,
            source: selector.label().to_owned(),
            error: None,
        }
    }

    pub fn fallback(keywords: Option<&str>, error: Option<String>) -> Self {
        let jobs = fallback_jobs(keywords);
        Self {
            count: jobs.len(),
            jobs,
            source: FALLBACK_SOURCE.to_owned(),
            error,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == FALLBACK_SOURCE
    }
}

#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Most offers a response carries
    pub result_cap: usize,
    /// Searched for when the caller gives no keywords
    pub default_keywords: String,
    pub relevance: RelevanceKeywords,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            result_cap: RESULT_CAP,
            default_keywords: DEFAULT_KEYWORDS.to_owned(),
            relevance: RelevanceKeywords::default(),
        }
    }
}

/// Fans a search out to the providers and merges what comes back
pub struct Aggregator {
    sources: Vec<Arc<dyn JobSource>>,
    normalizer: Normalizer,
    result_cap: usize,
    default_keywords: String,
}

impl Aggregator {
    pub fn new(sources: Vec<Arc<dyn JobSource>>, config: AggregatorConfig) -> Self {
        Self {
            sources,
            normalizer: Normalizer::new(config.relevance),
            result_cap: config.result_cap,
            default_keywords: config.default_keywords,
        }
    }

    /// Aggregator over the three real providers
    pub fn from_config(sources: &SourcesConfig, config: AggregatorConfig) -> Self {
        Self::new(job_sources::all_sources(sources), config)
    }

    pub fn request_from_params(&self, params: &HashMap<String, String>) -> Result<SearchRequest> {
        SearchRequest::from_params(params, &self.default_keywords)
    }

    /// Queries the selected providers concurrently and waits for every one of them.
    /// A provider that fails, or whose task panics, contributes nothing.
    pub async fn search(&self, request: &SearchRequest) -> SearchResponse {
        let query = request.query();
        let (providers, handles): (Vec<Source>, Vec<_>) = self
            .sources
            .iter()
            .filter(|source| request.selector.includes(source.source()))
            .map(|source| {
                let source = Arc::clone(source);
                let query = query.clone();
                (
                    source.source(),
                    tokio::spawn(async move { source.fetch(&query).await }),
                )
            })
            .unzip();
        let settled = futures::future::join_all(handles).await;

        let mut offers = Vec::new();
        for (provider, outcome) in providers.into_iter().zip(settled) {
            match outcome {
                Ok(Ok(records)) => {
                    log::info!("{} returned {} offers", provider, records.len());
                    offers.extend(self.normalize_all(records, provider, &request.keywords));
                }
                Ok(Err(FetchError::Disabled(_))) => {
                    log::debug!("{} skipped, no credentials configured", provider)
                }
                Ok(Err(e)) => log::error!("{} search error: {}", provider, e),
                Err(e) => log::error!("{} search task failed: {}", provider, e),
            }
        }

        let jobs = rank(offers, self.result_cap);
        if jobs.is_empty() {
            log::info!("no offers found, using fallback");
            // Filtered by the caller's keywords only. Filtering by the defaults
            // would leave a keyword-less search with no offers at all.
            return SearchResponse::fallback(request.requested_keywords(), None);
        }
        SearchResponse::live(jobs, request.selector)
    }

    /// Canned answer for a request that could not be served
    pub fn degraded(&self, keywords: Option<&str>) -> SearchResponse {
        SearchResponse::fallback(keywords, Some(DEGRADED_MESSAGE.to_owned()))
    }

    fn normalize_all<'a>(
        &'a self,
        records: Vec<RawOffer>,
        provider: Source,
        keywords: &'a str,
    ) -> impl Iterator<Item = JobOffer> + 'a {
        records
            .into_iter()
            .map(move |raw| self.normalizer.normalize(raw, provider, keywords))
    }
}

/// Drops duplicate postings, orders by score and keeps the best `cap`.
/// A duplicate replaces the earlier offer in place; equal scores keep merge order.
pub fn rank(offers: Vec<JobOffer>, cap: usize) -> Vec<JobOffer> {
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(offers.len());
    let mut unique: Vec<JobOffer> = Vec::with_capacity(offers.len());
    for offer in offers {
        match positions.entry(offer.dedup_key()) {
            Entry::Occupied(slot) => unique[*slot.get()] = offer,
            Entry::Vacant(slot) => {
                slot.insert(unique.len());
                unique.push(offer);
            }
        }
    }
    unique.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    unique.truncate(cap);
    unique
}
