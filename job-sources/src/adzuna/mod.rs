use crate::{
    config::SourcesConfig,
    http::Upstream,
    query::encode_query,
    types::{JobId, RawOffer},
    FetchError, JobSource, Result, SearchQuery, Source,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

const DEFAULT_KEYWORDS: &str = "developer";
const DEFAULT_COUNTRY: &str = "fr";
const MAX_RESULTS: usize = 20;

#[derive(Debug, Deserialize)]
struct ApiResponse {
    results: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct Named {
    display_name: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct Job {
    id: Option<JobId>,
    title: Option<String>,
    description: Option<String>,
    redirect_url: Option<String>,
    company: Option<Named>,
    location: Option<Named>,
    contract_time: Option<String>,
    contract_type: Option<String>,
    salary_min: Option<f64>,
    salary_max: Option<f64>,
}

impl From<Job> for RawOffer {
    fn from(job: Job) -> Self {
        RawOffer {
            id: job.id,
            title: job.title,
            company: job.company.and_then(|company| company.display_name),
            location: job.location.and_then(|location| location.display_name),
            description: job.description,
            link: job.redirect_url,
            employment_type: job.contract_time.or(job.contract_type),
            salary_min: job.salary_min,
            salary_max: job.salary_max,
            ..Default::default()
        }
    }
}

/// Adzuna's search is per country. A two-letter location picks the country,
/// anything else is searched as a place inside the default country.
fn country_and_place(location: Option<&str>) -> (String, Option<&str>) {
    match location {
        Some(code) if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) => {
            (code.to_ascii_lowercase(), None)
        }
        place => (DEFAULT_COUNTRY.to_owned(), place),
    }
}

pub struct Adzuna {
    credentials: Option<(String, String)>,
    base_url: String,
    upstream: Upstream,
}

impl Adzuna {
    pub fn new(client: Client, config: &SourcesConfig) -> Self {
        let credentials = config
            .adzuna_app_id
            .clone()
            .zip(config.adzuna_app_key.clone());
        Self {
            credentials,
            base_url: config.adzuna_base_url.trim_end_matches('/').to_owned(),
            upstream: Upstream::new(Source::Adzuna, client, config.cache_ttl),
        }
    }

    fn search_url(&self, app_id: &str, app_key: &str, query: &SearchQuery) -> String {
        let (country, place) = country_and_place(query.location());
        let mut params = vec![
            ("app_id", app_id),
            ("app_key", app_key),
            ("results_per_page", "20"),
            ("what", query.keywords_or(DEFAULT_KEYWORDS)),
        ];
        if let Some(place) = place {
            params.push(("where", place));
        }
        params.push(("content-type", "application/json"));
        format!(
            "{}/v1/api/jobs/{}/search/1?{}",
            self.base_url,
            country,
            encode_query(params)
        )
    }
}

#[async_trait]
impl JobSource for Adzuna {
    fn source(&self) -> Source {
        Source::Adzuna
    }

    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<RawOffer>> {
        let (app_id, app_key) = self
            .credentials
            .as_ref()
            .ok_or(FetchError::Disabled(Source::Adzuna))?;
        log::debug!(
            "requesting jobs from adzuna, keywords: {}, location: {:?}",
            query.keywords_or(DEFAULT_KEYWORDS),
            query.location()
        );
        let response: ApiResponse = self
            .upstream
            .get_json(&self.search_url(app_id, app_key, query), &[])
            .await?;
        let jobs = response
            .results
            .ok_or_else(|| self.upstream.malformed("missing 'results' array"))?;
        let jobs: Vec<Job> = self
            .upstream
            .decode_records(jobs.into_iter().take(MAX_RESULTS));
        Ok(jobs.into_iter().map(RawOffer::from).collect())
    }
}
