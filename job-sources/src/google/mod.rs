//! Google Jobs results, read through SerpAPI's `google_jobs` engine

use crate::{
    config::SourcesConfig,
    http::Upstream,
    query::encode_query,
    types::{first_present, JobId, RawOffer},
    FetchError, JobSource, Result, SearchQuery, Source,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

const DEFAULT_KEYWORDS: &str = "developer full stack";
const DEFAULT_LOCATION: &str = "France";
const MAX_RESULTS: usize = 15;

#[derive(Debug, Deserialize)]
struct ApiResponse {
    jobs_results: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ApplyOption {
    link: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DetectedExtensions {
    schedule_type: Option<String>,
    salary: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct Highlight {
    title: Option<String>,
    items: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct Job {
    job_id: Option<JobId>,
    title: Option<String>,
    company_name: Option<String>,
    location: Option<String>,
    description: Option<String>,
    share_link: Option<String>,
    apply_options: Vec<ApplyOption>,
    detected_extensions: Option<DetectedExtensions>,
    job_highlights: Vec<Highlight>,
}

impl From<Job> for RawOffer {
    fn from(job: Job) -> Self {
        let apply_link = first_present(job.apply_options.into_iter().map(|option| option.link));
        let extensions = job.detected_extensions.unwrap_or_default();
        let qualifications = job
            .job_highlights
            .into_iter()
            .filter(|highlight| highlight.title.as_deref() == Some("Qualifications"))
            .flat_map(|highlight| highlight.items)
            .collect();
        RawOffer {
            id: job.job_id,
            title: job.title,
            company: job.company_name,
            location: job.location,
            description: job.description,
            link: first_present([apply_link, job.share_link]),
            employment_type: extensions.schedule_type,
            salary: extensions.salary,
            required_qualifications: qualifications,
            ..Default::default()
        }
    }
}

pub struct GoogleJobs {
    api_key: Option<String>,
    base_url: String,
    upstream: Upstream,
}

impl GoogleJobs {
    pub fn new(client: Client, config: &SourcesConfig) -> Self {
        Self {
            api_key: config.serpapi_key.clone(),
            base_url: config.serpapi_base_url.trim_end_matches('/').to_owned(),
            upstream: Upstream::new(Source::Google, client, config.cache_ttl),
        }
    }

    fn search_url(&self, api_key: &str, query: &SearchQuery) -> String {
        let params = [
            ("engine", "google_jobs"),
            ("q", query.keywords_or(DEFAULT_KEYWORDS)),
            ("location", query.location().unwrap_or(DEFAULT_LOCATION)),
            ("api_key", api_key),
        ];
        format!("{}/search.json?{}", self.base_url, encode_query(params))
    }
}

#[async_trait]
impl JobSource for GoogleJobs {
    fn source(&self) -> Source {
        Source::Google
    }

    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<RawOffer>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(FetchError::Disabled(Source::Google))?;
        log::debug!(
            "requesting jobs from google jobs, keywords: {}, location: {}",
            query.keywords_or(DEFAULT_KEYWORDS),
            query.location().unwrap_or(DEFAULT_LOCATION)
        );
        let response: ApiResponse = self
            .upstream
            .get_json(&self.search_url(api_key, query), &[])
            .await?;
        let jobs = response
            .jobs_results
            .ok_or_else(|| self.upstream.malformed("missing 'jobs_results' array"))?;
        let jobs: Vec<Job> = self
            .upstream
            .decode_records(jobs.into_iter().take(MAX_RESULTS));
        Ok(jobs.into_iter().map(RawOffer::from).collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_support::serve_stub;
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    async fn stub(status: StatusCode, body: Value) -> String {
        let router = Router::new().route(
            "/search.json",
            get(move |Query(params): Query<HashMap<String, String>>| {
                let body = body.clone();
                async move {
                    let expected = params.get("engine").map(String::as_str) == Some("google_jobs")
                        && params.get("api_key").map(String::as_str) == Some("serp")
                        && params.get("location").map(String::as_str) == Some("France");
                    if !expected {
                        return (StatusCode::BAD_REQUEST, Json(json!({"error": "params"})));
                    }
                    (status, Json(body))
                }
            }),
        );
        serve_stub(router).await
    }

    fn config(base_url: &str) -> SourcesConfig {
        SourcesConfig {
            serpapi_key: Some("serp".to_owned()),
            serpapi_base_url: base_url.to_owned(),
            ..Default::default()
        }
    }

    fn google_job(n: usize) -> Value {
        json!({
            "job_id": format!("g-{}", n),
            "title": "Backend Engineer",
            "company_name": format!("Company {}", n),
            "location": "Nantes",
            "description": "APIs in Python",
            "share_link": "https://google.example/share",
            "apply_options": [
                { "title": "Site", "link": "https://company.example/apply" },
                { "title": "Board", "link": "https://board.example/apply" }
            ],
            "detected_extensions": { "schedule_type": "Full-time", "salary": "45K–55K EUR" },
            "job_highlights": [
                { "title": "Qualifications", "items": ["Python", "SQL"] },
                { "title": "Benefits", "items": ["Remote days"] }
            ]
        })
    }

    #[tokio::test]
    async fn test_disabled_without_key() {
        let result = GoogleJobs::new(Client::new(), &SourcesConfig::default())
            .fetch(&SearchQuery::default())
            .await;
        assert!(matches!(result, Err(FetchError::Disabled(Source::Google))));
    }

    #[tokio::test]
    async fn test_fetch_maps_and_caps() {
        let jobs = (0..18).map(google_job).collect::<Vec<_>>();
        let base_url = stub(StatusCode::OK, json!({ "jobs_results": jobs })).await;
        let offers = GoogleJobs::new(Client::new(), &config(&base_url))
            .fetch(&SearchQuery::new("python", None))
            .await
            .expect("google fetch failed");
        assert_eq!(offers.len(), MAX_RESULTS);
        let offer = &offers[0];
        assert_eq!(offer.company.as_deref(), Some("Company 0"));
        assert_eq!(offer.link.as_deref(), Some("https://company.example/apply"));
        assert_eq!(offer.employment_type.as_deref(), Some("Full-time"));
        assert_eq!(offer.salary.as_deref(), Some("45K–55K EUR"));
        assert_eq!(offer.required_qualifications, vec!["Python", "SQL"]);
    }

    #[test]
    fn test_share_link_when_no_apply_option() {
        let job: Job = serde_json::from_value(json!({
            "title": "Dev",
            "share_link": "https://google.example/share",
            "apply_options": [{ "title": "No link" }]
        }))
        .unwrap();
        let raw = RawOffer::from(job);
        assert_eq!(raw.link.as_deref(), Some("https://google.example/share"));
        assert!(raw.required_qualifications.is_empty());
    }

    #[tokio::test]
    async fn test_server_error() {
        let base_url = stub(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "down"})).await;
        let result = GoogleJobs::new(Client::new(), &config(&base_url))
            .fetch(&SearchQuery::new("python", None))
            .await;
        match result {
            Err(FetchError::RequestNotOk { provider, body, .. }) => {
                assert_eq!(provider, Source::Google);
                assert!(body.contains("down"));
            }
            other => panic!("expected RequestNotOk, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_malformed() {
        let router = Router::new().route("/search.json", get(|| async { "<html>quota</html>" }));
        let base_url = serve_stub(router).await;
        let result = GoogleJobs::new(Client::new(), &config(&base_url))
            .fetch(&SearchQuery::new("python", None))
            .await;
        assert!(matches!(
            result,
            Err(FetchError::MalformedResponse {
                provider: Source::Google,
                ..
            })
        ));
    }
}
