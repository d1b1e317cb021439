use crate::{cache::ResponseCache, FetchError, Result, Source};
use reqwest::{header::ACCEPT, Client};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// One provider's HTTP endpoint: a shared client plus the provider's own response cache
pub(crate) struct Upstream {
    provider: Source,
    client: Client,
    cache: ResponseCache,
}

impl Upstream {
    pub(crate) fn new(provider: Source, client: Client, cache_ttl: Duration) -> Self {
        Self {
            provider,
            client,
            cache: ResponseCache::new(cache_ttl),
        }
    }

    /// GET `url` and decode the body into `T`.
    /// Only bodies that decode are cached; `url` is the cache key.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<T> {
        if let Some(body) = self.cache.get(url) {
            log::debug!("serving {} response from cache", self.provider);
            return self.decode(body);
        }

        let mut request = self.client.get(url).header(ACCEPT, "application/json");
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_else(|_| "empty".to_owned());
            return Err(FetchError::RequestNotOk {
                provider: self.provider,
                status,
                body,
            });
        }
        let bytes = resp.bytes().await?;
        let body: Value =
            serde_json::from_slice(&bytes).map_err(|e| self.malformed(e.to_string()))?;
        log::debug!(
            "successfully retrieved {} bytes from {}",
            bytes.len(),
            self.provider
        );
        let decoded = self.decode(body.clone())?;
        self.cache.insert(url.to_owned(), body);
        Ok(decoded)
    }

    fn decode<T: DeserializeOwned>(&self, body: Value) -> Result<T> {
        serde_json::from_value(body).map_err(|e| self.malformed(e.to_string()))
    }

    /// Decodes provider records one by one, skipping those that do not fit `T`
    pub(crate) fn decode_records<T: DeserializeOwned>(
        &self,
        records: impl IntoIterator<Item = Value>,
    ) -> Vec<T> {
        records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value(record) {
                Ok(decoded) => Some(decoded),
                Err(e) => {
                    log::warn!("skipping {} record {}: {}", self.provider, index, e);
                    None
                }
            })
            .collect()
    }

    pub(crate) fn malformed(&self, reason: impl Into<String>) -> FetchError {
        FetchError::MalformedResponse {
            provider: self.provider,
            reason: reason.into(),
        }
    }
}
