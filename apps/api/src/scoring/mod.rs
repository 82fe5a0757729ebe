// Query-time scoring over a snapshot of parsed resumes.
// Everything here is pure: no I/O, no shared state, no locks.

pub mod answer;
pub mod handlers;
pub mod job_match;
pub mod query;
pub mod relevance;
pub mod snippets;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::errors::AppError;
use crate::models::job::JobPosting;
use crate::models::resume::ResumeRecord;
use crate::scoring::answer::compose_answer;
use crate::scoring::job_match::{rank_matches, ScoredMatch};
use crate::scoring::query::QueryTerms;
use crate::scoring::relevance::{rank_candidates, ScoredCandidate};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AskResponse {
    pub query: String,
    pub answer: String,
    pub evidence: Vec<ScoredCandidate>,
    pub total_resumes: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobHeader {
    pub title: String,
    pub company: String,
    pub requirements: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub total_candidates: usize,
    pub top_matches: usize,
    pub requirements: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobMatchResponse {
    pub job: JobHeader,
    pub matches: Vec<ScoredMatch>,
    pub summary: MatchSummary,
}

/// Resolves a caller-supplied result count: absent means `default`,
/// zero or negative means no results.
pub fn resolve_limit(requested: Option<i64>, default: usize) -> usize {
    match requested {
        None => default,
        Some(n) if n <= 0 => 0,
        Some(n) => usize::try_from(n).unwrap_or(usize::MAX),
    }
}

/// Ask flow: rank resumes for a free-text question and summarize the result.
pub fn answer_query(
    query: &str,
    k: usize,
    resumes: &[ResumeRecord],
    catalog: &Catalog,
) -> Result<AskResponse, AppError> {
    let terms = QueryTerms::parse(query)?;
    let evidence = rank_candidates(&terms, resumes, k, catalog);
    let answer = compose_answer(&evidence, terms.text());

    Ok(AskResponse {
        query: terms.text().to_string(),
        answer,
        evidence,
        total_resumes: resumes.len(),
    })
}

/// Match flow: rank resumes against a job posting.
pub fn match_job(
    job: &JobPosting,
    top_n: usize,
    resumes: &[ResumeRecord],
    catalog: &Catalog,
) -> JobMatchResponse {
    let matches = rank_matches(job, resumes, top_n, catalog);

    JobMatchResponse {
        job: JobHeader {
            title: job.title.clone(),
            company: job.company.clone(),
            requirements: job.requirements.clone(),
        },
        summary: MatchSummary {
            total_candidates: resumes.len(),
            top_matches: matches.len(),
            requirements: job.requirements.len(),
        },
        matches,
    }
}
