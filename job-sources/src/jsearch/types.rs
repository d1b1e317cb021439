use crate::types::{first_present, JobId, RawOffer};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
    pub(crate) data: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub(crate) struct Job {
    job_id: Option<JobId>,
    job_title: Option<String>,
    employer_name: Option<String>,
    job_city: Option<String>,
    job_country: Option<String>,
    job_description: Option<String>,
    job_apply_link: Option<String>,
    job_google_link: Option<String>,
    job_employment_type: Option<String>,
    job_min_salary: Option<f64>,
    job_max_salary: Option<f64>,
    job_salary_currency: Option<String>,
    job_required_skills: Option<Vec<String>>,
    job_highlights: Option<Highlights>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct Highlights {
    #[serde(rename = "Qualifications")]
    qualifications: Vec<String>,
}

impl From<Job> for RawOffer {
    fn from(job: Job) -> Self {
        RawOffer {
            id: job.job_id,
            title: job.job_title,
            company: job.employer_name,
            location: first_present([job.job_city, job.job_country]),
            description: job.job_description,
            link: first_present([job.job_apply_link, job.job_google_link]),
            employment_type: job.job_employment_type,
            salary: None,
            salary_min: job.job_min_salary,
            salary_max: job.job_max_salary,
            salary_currency: job.job_salary_currency,
            required_skills: job.job_required_skills.unwrap_or_default(),
            required_qualifications: job
                .job_highlights
                .map(|highlights| highlights.qualifications)
                .unwrap_or_default(),
        }
    }
}
