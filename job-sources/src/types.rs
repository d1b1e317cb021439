use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Provider ids come either as JSON numbers or strings and are echoed as sent
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobId {
    Number(i64),
    Text(String),
}

impl JobId {
    /// Zero and empty ids carry no identity and get replaced
    pub(crate) fn is_blank(&self) -> bool {
        match self {
            JobId::Number(n) => *n == 0,
            JobId::Text(s) => s.trim().is_empty(),
        }
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        JobId::Text(s.to_owned())
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        JobId::Text(s)
    }
}

impl Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobId::Number(n) => write!(f, "{}", n),
            JobId::Text(s) => f.write_str(s),
        }
    }
}

/// A job offer in the shape every response carries, whatever provider it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobOffer {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    #[serde(rename = "type")]
    pub employment_type: String,
    /// Relevance score in `85..=98`
    #[serde(rename = "match")]
    pub match_score: u8,
    pub description: String,
    pub requirements: Vec<String>,
    pub link: String,
}

impl JobOffer {
    /// Offers sharing this key are the same posting; exact, case-sensitive
    pub fn dedup_key(&self) -> String {
        format!("{}-{}", self.title, self.company)
    }
}

/// What an adapter could read from one provider record, before defaults and scoring
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawOffer {
    pub id: Option<JobId>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub employment_type: Option<String>,
    /// Ready-made salary text, preferred over the amounts below
    pub salary: Option<String>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub salary_currency: Option<String>,
    pub required_skills: Vec<String>,
    pub required_qualifications: Vec<String>,
}

/// First value that is present and not blank
pub(crate) fn first_present<I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
}
