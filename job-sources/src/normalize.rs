//! Turns provider records into [`JobOffer`]s: defaults, salary text,
//! requirements, relevance score, description cut and id.

use crate::{
    types::{first_present, JobId, JobOffer, RawOffer},
    Source,
};
use chrono::Utc;
use uuid::Uuid;

pub const DEFAULT_TITLE: &str = "Poste non spécifié";
pub const DEFAULT_COMPANY: &str = "Entreprise non spécifiée";
pub const DEFAULT_LOCATION: &str = "Lieu non spécifié";
pub const DEFAULT_SALARY: &str = "Non spécifié";
pub const DEFAULT_EMPLOYMENT_TYPE: &str = "Temps plein";
pub const DEFAULT_REQUIREMENT: &str = "Non spécifié";
pub const DEFAULT_LINK: &str = "#";

pub const MIN_MATCH: u8 = 85;
pub const MAX_MATCH: u8 = 98;
const MATCH_PER_HIT: usize = 2;

/// Descriptions longer than this many characters are cut and marked with `...`
pub const DESCRIPTION_LIMIT: usize = 300;
const ELLIPSIS: &str = "...";

pub const DEFAULT_RELEVANCE_KEYWORDS: [&str; 22] = [
    "agentforce",
    "salesforce",
    "wordpress",
    "react",
    "next.js",
    "node.js",
    "typescript",
    "javascript",
    "full stack",
    "fullstack",
    "developer",
    "développeur",
    "engineer",
    "ingénieur",
    "frontend",
    "backend",
    "api",
    "rest",
    "graphql",
    "woocommerce",
    "php",
    "python",
];

/// Technology and role terms an offer is scored against.
/// Stored lowercased and without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelevanceKeywords(Vec<String>);

impl RelevanceKeywords {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut terms: Vec<String> = Vec::new();
        for keyword in keywords {
            let term = keyword.as_ref().trim().to_lowercase();
            if !term.is_empty() && !terms.contains(&term) {
                terms.push(term);
            }
        }
        Self(terms)
    }

    pub fn terms(&self) -> &[String] {
        &self.0
    }

    /// `85 + 2` per term found in title, description or search keywords, at most `98`
    pub fn score(&self, title: &str, description: &str, keywords: &str) -> u8 {
        let haystack = format!("{} {} {}", title, description, keywords).to_lowercase();
        let hits = self
            .0
            .iter()
            .filter(|term| haystack.contains(term.as_str()))
            .count();
        let score = usize::from(MIN_MATCH).saturating_add(hits.saturating_mul(MATCH_PER_HIT));
        score.min(usize::from(MAX_MATCH)) as u8
    }
}

impl Default for RelevanceKeywords {
    fn default() -> Self {
        Self::new(DEFAULT_RELEVANCE_KEYWORDS)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    relevance: RelevanceKeywords,
}

impl Normalizer {
    pub fn new(relevance: RelevanceKeywords) -> Self {
        Self { relevance }
    }

    pub fn relevance(&self) -> &RelevanceKeywords {
        &self.relevance
    }

    /// `keywords` are the search keywords, which count towards the score
    pub fn normalize(&self, raw: RawOffer, source: Source, keywords: &str) -> JobOffer {
        let title = or_default(raw.title, DEFAULT_TITLE);
        let company = or_default(raw.company, DEFAULT_COMPANY);
        let description = first_present([raw.description]).unwrap_or_default();
        let match_score = self.relevance.score(&title, &description, keywords);

        let mut requirements = raw.required_skills;
        requirements.extend(raw.required_qualifications);
        requirements.retain(|requirement| !requirement.trim().is_empty());
        if requirements.is_empty() {
            requirements.push(DEFAULT_REQUIREMENT.to_owned());
        }

        JobOffer {
            id: raw
                .id
                .filter(|id| !id.is_blank())
                .unwrap_or_else(|| synthesize_id(source)),
            title,
            company,
            location: or_default(raw.location, DEFAULT_LOCATION),
            salary: salary_label(
                raw.salary,
                raw.salary_min,
                raw.salary_max,
                raw.salary_currency.as_deref(),
            ),
            employment_type: or_default(raw.employment_type, DEFAULT_EMPLOYMENT_TYPE),
            match_score,
            description: truncate_description(&description),
            requirements,
            link: or_default(raw.link, DEFAULT_LINK),
        }
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    first_present([value]).unwrap_or_else(|| default.to_owned())
}

/// Placeholder id for records without one. Not unique across requests;
/// deduplication keys on title and company, never on id.
fn synthesize_id(source: Source) -> JobId {
    JobId::Text(format!(
        "{}-{}-{}",
        source,
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple()
    ))
}

/// Ready-made text, then `min - max`, then `Jusqu'à max`
fn salary_label(
    salary: Option<String>,
    min: Option<f64>,
    max: Option<f64>,
    currency: Option<&str>,
) -> String {
    if let Some(salary) = first_present([salary]) {
        return salary;
    }
    let min = min.filter(|amount| amount.is_finite() && *amount != 0.0);
    let max = max.filter(|amount| amount.is_finite() && *amount != 0.0);
    match (min, max) {
        (Some(min), Some(max)) => with_currency(
            format!("{} - {}", format_amount(min), format_amount(max)),
            currency,
        ),
        (None, Some(max)) => with_currency(format!("Jusqu'à {}", format_amount(max)), currency),
        _ => DEFAULT_SALARY.to_owned(),
    }
}

fn with_currency(amount: String, currency: Option<&str>) -> String {
    match currency.map(str::trim).filter(|c| !c.is_empty()) {
        Some(currency) => format!("{} {}", amount, currency),
        None => amount,
    }
}

fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("{}", amount as i64)
    } else {
        format!("{}", amount)
    }
}

pub(crate) fn truncate_description(description: &str) -> String {
    match description.char_indices().nth(DESCRIPTION_LIMIT) {
        Some((cut, _)) => format!("{}{}", &description[..cut], ELLIPSIS),
        None => description.to_owned(),
    }
}
