//! JSearch, the RapidAPI aggregate of LinkedIn, Indeed, Glassdoor and others

pub(crate) mod types;

use crate::{
    config::SourcesConfig, http::Upstream, query::encode_query, FetchError, JobSource,
    RawOffer, Result, SearchQuery, Source,
};
use async_trait::async_trait;
use reqwest::Client;
use types::{ApiResponse, Job};

const RAPIDAPI_HOST: &str = "jsearch.p.rapidapi.com";
const DEFAULT_KEYWORDS: &str = "developer full stack react";
const MAX_RESULTS: usize = 20;

pub struct JSearch {
    api_key: Option<String>,
    base_url: String,
    upstream: Upstream,
}

impl JSearch {
    pub fn new(client: Client, config: &SourcesConfig) -> Self {
        Self {
            api_key: config.rapidapi_key.clone(),
            base_url: config.jsearch_base_url.trim_end_matches('/').to_owned(),
            upstream: Upstream::new(Source::JSearch, client, config.cache_ttl),
        }
    }

    fn search_url(&self, query: &SearchQuery) -> String {
        let mut params = vec![("query", query.keywords_or(DEFAULT_KEYWORDS))];
        if let Some(location) = query.location() {
            params.push(("location", location));
        }
        params.extend([
            ("page", "1"),
            ("num_pages", "3"),
            ("employment_types", "FULLTIME"),
            ("remote_jobs_only", "false"),
        ]);
        format!("{}/search?{}", self.base_url, encode_query(params))
    }
}

#[async_trait]
impl JobSource for JSearch {
    fn source(&self) -> Source {
        Source::JSearch
    }

    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<RawOffer>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(FetchError::Disabled(Source::JSearch))?;
        log::debug!(
            "requesting jobs from jsearch, keywords: {}, location: {:?}",
            query.keywords_or(DEFAULT_KEYWORDS),
            query.location()
        );
        let headers = [("X-RapidAPI-Key", api_key), ("X-RapidAPI-Host", RAPIDAPI_HOST)];
        let response: ApiResponse = self
            .upstream
            .get_json(&self.search_url(query), &headers)
            .await?;
        let jobs = response
            .data
            .ok_or_else(|| self.upstream.malformed("missing 'data' array"))?;
        let jobs: Vec<Job> = self
            .upstream
            .decode_records(jobs.into_iter().take(MAX_RESULTS));
        Ok(jobs.into_iter().map(RawOffer::from).collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{test_support::serve_stub, JobId};
    use axum::{
        extract::Query,
        http::{HeaderMap, StatusCode},
        routing::get,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::{
        collections::HashMap,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
        time::Duration,
    };

    fn job(n: usize) -> Value {
        json!({
            "job_id": format!("js-{}", n),
            "job_title": format!("React Developer {}", n),
            "employer_name": "Acme",
            "job_city": "Paris",
            "job_description": "Build things",
            "job_apply_link": "https://acme.example/apply",
            "job_employment_type": "FULLTIME",
            "job_min_salary": 50000,
            "job_max_salary": 65000,
            "job_salary_currency": "EUR",
            "job_required_skills": ["React"],
            "job_highlights": { "Qualifications": ["3+ years"] }
        })
    }

    /// Answers `/search` when the RapidAPI headers and query are right, counting hits
    async fn stub(body: Value) -> (String, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let router = Router::new().route(
            "/search",
            get(
                move |headers: HeaderMap, Query(params): Query<HashMap<String, String>>| {
                    let counter = counter.clone();
                    let body = body.clone();
                    async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                        let authorized = headers
                            .get("x-rapidapi-key")
                            .map_or(false, |key| key == "test-key")
                            && headers
                                .get("x-rapidapi-host")
                                .map_or(false, |host| host == RAPIDAPI_HOST);
                        if !authorized {
                            return (StatusCode::UNAUTHORIZED, Json(json!({"message": "nope"})));
                        }
                        if params.get("query").map(String::as_str) != Some("react developer")
                            || params.get("employment_types").map(String::as_str)
                                != Some("FULLTIME")
                        {
                            return (StatusCode::BAD_REQUEST, Json(json!({"message": "query"})));
                        }
                        (StatusCode::OK, Json(body))
                    }
                },
            ),
        );
        (serve_stub(router).await, hits)
    }

    fn config(base_url: &str) -> SourcesConfig {
        SourcesConfig {
            rapidapi_key: Some("test-key".to_owned()),
            jsearch_base_url: base_url.to_owned(),
            ..Default::default()
        }
    }

    fn query() -> SearchQuery {
        SearchQuery::new("react developer", None)
    }

    #[tokio::test]
    async fn test_disabled_without_key() {
        let config = SourcesConfig {
            jsearch_base_url: "http://127.0.0.1:9".to_owned(),
            ..Default::default()
        };
        let result = JSearch::new(Client::new(), &config).fetch(&query()).await;
        assert!(matches!(result, Err(FetchError::Disabled(Source::JSearch))));
    }

    #[tokio::test]
    async fn test_fetch_maps_and_caps() {
        let jobs = (0..25).map(job).collect::<Vec<_>>();
        let (base_url, _) = stub(json!({ "status": "OK", "data": jobs })).await;
        let offers = JSearch::new(Client::new(), &config(&base_url))
            .fetch(&query())
            .await
            .expect("jsearch fetch failed");
        assert_eq!(offers.len(), MAX_RESULTS);
        let first = &offers[0];
        assert_eq!(first.id, Some(JobId::from("js-0")));
        assert_eq!(first.title.as_deref(), Some("React Developer 0"));
        assert_eq!(first.company.as_deref(), Some("Acme"));
        assert_eq!(first.location.as_deref(), Some("Paris"));
        assert_eq!(first.link.as_deref(), Some("https://acme.example/apply"));
        assert_eq!(first.salary_min, Some(50000.0));
        assert_eq!(first.salary_currency.as_deref(), Some("EUR"));
        assert_eq!(first.required_skills, vec!["React"]);
        assert_eq!(first.required_qualifications, vec!["3+ years"]);
    }

    #[tokio::test]
    async fn test_status_error() {
        let (base_url, _) = stub(json!({ "data": [] })).await;
        let config = SourcesConfig {
            rapidapi_key: Some("wrong-key".to_owned()),
            ..config(&base_url)
        };
        let result = JSearch::new(Client::new(), &config).fetch(&query()).await;
        match result {
            Err(FetchError::RequestNotOk { status, .. }) => {
                assert_eq!(status, reqwest::StatusCode::UNAUTHORIZED)
            }
            other => panic!("expected RequestNotOk, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_data_is_malformed() {
        let (base_url, _) = stub(json!({ "status": "OK" })).await;
        let result = JSearch::new(Client::new(), &config(&base_url))
            .fetch(&query())
            .await;
        assert!(matches!(
            result,
            Err(FetchError::MalformedResponse {
                provider: Source::JSearch,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_bad_record_skipped() {
        let mut bad = job(2);
        bad["job_min_salary"] = json!("50000");
        let (base_url, _) = stub(json!({ "data": [bad, job(1)] })).await;
        let offers = JSearch::new(Client::new(), &config(&base_url))
            .fetch(&query())
            .await
            .expect("jsearch fetch failed");
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].id, Some(JobId::from("js-1")));
    }

    #[tokio::test]
    async fn test_cached_within_ttl() {
        let (base_url, hits) = stub(json!({ "data": [job(1)] })).await;
        let source = JSearch::new(Client::new(), &config(&base_url));
        source.fetch(&query()).await.expect("first fetch");
        source.fetch(&query()).await.expect("second fetch");
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        let uncached = JSearch::new(
            Client::new(),
            &config(&base_url).with_cache_ttl(Duration::ZERO),
        );
        uncached.fetch(&query()).await.expect("first fetch");
        uncached.fetch(&query()).await.expect("second fetch");
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_search_url() {
        let source = JSearch::new(Client::new(), &config("http://stub/"));
        let url = source.search_url(&SearchQuery::new("", Some("Lyon".to_owned())));
        assert_eq!(
            url,
            "http://stub/search?query=developer%20full%20stack%20react&location=Lyon&page=1&num_pages=3&employment_types=FULLTIME&remote_jobs_only=false"
        );
    }
}
