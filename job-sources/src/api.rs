use crate::{types::RawOffer, SearchQuery, Source};
use async_trait::async_trait;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0} is disabled, no credentials configured")]
    Disabled(Source),
    #[error("Request error: '{0}'")]
    Request(#[from] reqwest::Error),
    #[error("{provider} request not successful, status code: {status}, body: '{body}'")]
    RequestNotOk {
        provider: Source,
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Malformed response from {provider}: {reason}")]
    MalformedResponse { provider: Source, reason: String },
}

impl FetchError {
    /// A disabled provider is configuration, not a failure
    pub fn is_disabled(&self) -> bool {
        matches!(self, FetchError::Disabled(_))
    }
}

/// A job-search provider queried with free-text keywords
#[async_trait]
pub trait JobSource: Send + Sync {
    fn source(&self) -> Source;

    /// Fetch the provider's records for `query`, capped at the provider limit
    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<RawOffer>>;
}
