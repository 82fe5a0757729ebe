//! Scores candidates against a structured job posting.
//!
//! score = matched skills + requirements found in raw text + min(experience entries, cap)
//! match_percentage = min(score × per_point, 100)

use serde::Serialize;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::models::candidate::{CandidateRecord, ExperienceEntry};
use crate::models::job::JobPosting;
use crate::models::resume::ResumeRecord;

/// Candidate view attached to job-flow matches.
#[derive(Debug, Clone, Serialize)]
pub struct MatchedCandidate {
    pub id: Uuid,
    pub name: String,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredMatch {
    pub candidate: MatchedCandidate,
    pub score: u32,
    pub matching_skills: Vec<String>,
    pub missing_requirements: Vec<String>,
    pub match_percentage: u32,
}

/// Score components for one candidate against one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchFacets {
    pub score: u32,
    pub matching_skills: Vec<String>,
    pub missing_requirements: Vec<String>,
}

/// Linear, capped display value. Not a probability.
pub fn match_percentage(score: u32, per_point: u32) -> u32 {
    score.saturating_mul(per_point).min(100)
}

/// Candidate skills that contain, or are contained in, any preferred skill
/// (case-insensitive). Returned in candidate order and casing.
pub fn matching_skills(candidate_skills: &[String], preferred: &[String]) -> Vec<String> {
    let preferred_lower: Vec<String> = preferred.iter().map(|p| p.to_lowercase()).collect();
    candidate_skills
        .iter()
        .filter(|skill| {
            let skill_lower = skill.to_lowercase();
            preferred_lower
                .iter()
                .any(|p| skill_lower.contains(p.as_str()) || p.contains(skill_lower.as_str()))
        })
        .cloned()
        .collect()
}

/// Requirements that do not occur in the candidate's raw text.
pub fn missing_requirements(raw_text: &str, requirements: &[String]) -> Vec<String> {
    let text_lower = raw_text.to_lowercase();
    requirements
        .iter()
        .filter(|req| !text_lower.contains(&req.to_lowercase()))
        .cloned()
        .collect()
}

pub fn evaluate(candidate: &CandidateRecord, job: &JobPosting, experience_cap: u32) -> MatchFacets {
    let matching_skills = matching_skills(&candidate.skills, &job.preferred_skills);
    let missing_requirements = missing_requirements(&candidate.raw_text, &job.requirements);
    let met_requirements = job.requirements.len() - missing_requirements.len();
    let experience_bonus = (candidate.experience.len() as u32).min(experience_cap);

    MatchFacets {
        score: matching_skills.len() as u32 + met_requirements as u32 + experience_bonus,
        matching_skills,
        missing_requirements,
    }
}

/// Scores every resume against `job`, drops zero scores, sorts descending
/// (stable) and keeps at most `top_n`.
pub fn rank_matches(
    job: &JobPosting,
    resumes: &[ResumeRecord],
    top_n: usize,
    catalog: &Catalog,
) -> Vec<ScoredMatch> {
    let tuning = &catalog.tuning;

    let mut matches: Vec<ScoredMatch> = resumes
        .iter()
        .filter_map(|resume| {
            let parsed = &resume.parsed_data;
            let facets = evaluate(parsed, job, tuning.experience_bonus_cap);
            if facets.score == 0 {
                return None;
            }
            Some(ScoredMatch {
                candidate: MatchedCandidate {
                    id: resume.id,
                    name: parsed.name.clone(),
                    skills: parsed.skills.clone(),
                    experience: parsed.experience.clone(),
                },
                score: facets.score,
                matching_skills: facets.matching_skills,
                missing_requirements: facets.missing_requirements,
                match_percentage: match_percentage(facets.score, tuning.match_percent_per_point),
            })
        })
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches.truncate(top_n);
    matches
}
