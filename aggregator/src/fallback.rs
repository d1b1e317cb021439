//! Canned offers served when no provider produced anything.

use job_sources::{JobId, JobOffer};
use lazy_static::lazy_static;

/// The `source` of a response made of canned offers
pub const FALLBACK_SOURCE: &str = "fallback";

#[allow(clippy::too_many_arguments)]
fn offer(
    id: &str,
    title: &str,
    company: &str,
    location: &str,
    salary: &str,
    match_score: u8,
    description: &str,
    requirements: &[&str],
    link: &str,
) -> JobOffer {
    JobOffer {
        id: JobId::from(id),
        title: title.to_owned(),
        company: company.to_owned(),
        location: location.to_owned(),
        salary: salary.to_owned(),
        employment_type: "Temps plein".to_owned(),
        match_score,
        description: description.to_owned(),
        requirements: requirements.iter().map(|r| r.to_string()).collect(),
        link: link.to_owned(),
    }
}

lazy_static! {
    static ref FALLBACK_JOBS: Vec<JobOffer> = vec![
        offer(
            "fallback-1",
            "Développeur Agentforce Senior",
            "Levio",
            "Montréal, QC / Remote",
            "80k - 120k CAD",
            98,
            "Recherche développeur Agentforce expérimenté pour projets de transformation digitale.",
            &["Agentforce", "JavaScript", "React", "API Integration", "5+ ans"],
            "https://levio.ca/careers",
        ),
        offer(
            "fallback-2",
            "Développeur Full Stack (React/Node.js)",
            "StartupXYZ",
            "Remote",
            "70k - 100k USD",
            95,
            "Développeur full stack pour application web moderne.",
            &["React", "Next.js", "Node.js", "TypeScript", "4+ ans"],
            "https://startupxyz.com/careers",
        ),
        offer(
            "fallback-3",
            "WordPress Developer E-commerce",
            "EcomSolutions",
            "Remote",
            "50k - 75k EUR",
            90,
            "Développeur WordPress/WooCommerce pour plateformes e-commerce.",
            &["WordPress", "WooCommerce", "PHP", "JavaScript", "3+ ans"],
            "https://ecomsolutions.com/jobs",
        ),
    ];
}

/// The canned offers whose title, company or description contains `keywords`,
/// ignoring case. No keywords means every offer.
pub fn fallback_jobs(keywords: Option<&str>) -> Vec<JobOffer> {
    let needle = match keywords.map(str::trim).filter(|k| !k.is_empty()) {
        Some(keywords) => keywords.to_lowercase(),
        None => return FALLBACK_JOBS.clone(),
    };
    FALLBACK_JOBS
        .iter()
        .filter(|job| {
            [&job.title, &job.company, &job.description]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}
