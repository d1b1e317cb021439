use crate::{Error, Result};
use job_sources::{SearchQuery, Source};
use std::{collections::HashMap, str::FromStr};

/// Which providers a search goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceSelector {
    #[default]
    All,
    Only(Source),
}

impl SourceSelector {
    pub fn includes(&self, source: Source) -> bool {
        match self {
            SourceSelector::All => true,
            SourceSelector::Only(only) => *only == source,
        }
    }

    /// The `source` echoed in live responses
    pub fn label(&self) -> &'static str {
        match self {
            SourceSelector::All => "multi",
            SourceSelector::Only(source) => source.tag(),
        }
    }
}

impl FromStr for SourceSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(SourceSelector::All);
        }
        Source::ALL
            .into_iter()
            .find(|source| source.tag().eq_ignore_ascii_case(s))
            .map(SourceSelector::Only)
            .ok_or_else(|| Error::UnknownSource(s.to_owned()))
    }
}

/// A search as read from the `keywords`, `location` and `source` query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// What providers are asked for and offers are scored against
    pub keywords: String,
    pub location: Option<String>,
    pub selector: SourceSelector,
    requested_keywords: Option<String>,
}

impl SearchRequest {
    /// Missing or blank `keywords` are replaced by `default_keywords`
    pub fn new(
        keywords: Option<&str>,
        location: Option<&str>,
        selector: SourceSelector,
        default_keywords: &str,
    ) -> Self {
        let requested_keywords = non_blank(keywords);
        Self {
            keywords: requested_keywords
                .clone()
                .unwrap_or_else(|| default_keywords.to_owned()),
            location: non_blank(location),
            selector,
            requested_keywords,
        }
    }

    pub fn from_params(params: &HashMap<String, String>, default_keywords: &str) -> Result<Self> {
        let selector = match params.get("source") {
            Some(source) => source.parse()?,
            None => SourceSelector::All,
        };
        Ok(Self::new(
            params.get("keywords").map(String::as_str),
            params.get("location").map(String::as_str),
            selector,
            default_keywords,
        ))
    }

    /// The keywords the caller typed, if any; canned offers are filtered by these
    pub fn requested_keywords(&self) -> Option<&str> {
        self.requested_keywords.as_deref()
    }

    pub(crate) fn query(&self) -> SearchQuery {
        SearchQuery::new(self.keywords.clone(), self.location.clone())
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}
