//! Ranks candidates against a free-text question.
//!
//! score = |distinct query terms found in raw text| + skill_boost × |candidate skills named in the query|

use serde::Serialize;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::models::candidate::CandidateRecord;
use crate::models::resume::ResumeRecord;
use crate::scoring::query::QueryTerms;
use crate::scoring::snippets::select_snippets;

/// Minimal candidate view attached to ask-flow evidence.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateRef {
    pub id: Uuid,
    pub name: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
    pub resume: CandidateRef,
    pub score: u32,
    pub snippets: Vec<String>,
}

pub fn relevance_score(candidate: &CandidateRecord, query: &QueryTerms, skill_boost: u32) -> u32 {
    let text_hits = query.count_in(&candidate.raw_text.to_lowercase()) as u32;
    let skill_hits = candidate
        .skills
        .iter()
        .filter(|s| query.lower().contains(&s.to_lowercase()))
        .count() as u32;
    text_hits + skill_boost * skill_hits
}

/// Scores every resume, drops zero scores, sorts descending (stable) and keeps
/// at most `k`. Each survivor carries its best snippets.
pub fn rank_candidates(
    query: &QueryTerms,
    resumes: &[ResumeRecord],
    k: usize,
    catalog: &Catalog,
) -> Vec<ScoredCandidate> {
    let tuning = &catalog.tuning;

    let mut ranked: Vec<ScoredCandidate> = resumes
        .iter()
        .filter_map(|resume| {
            let parsed = &resume.parsed_data;
            let score = relevance_score(parsed, query, tuning.skill_boost);
            if score == 0 {
                return None;
            }
            let snippets = select_snippets(&parsed.raw_text, query, tuning.snippet_min_len)
                .into_iter()
                .take(tuning.snippets_per_candidate)
                .collect();
            Some(ScoredCandidate {
                resume: CandidateRef {
                    id: resume.id,
                    name: parsed.name.clone(),
                    skills: parsed.skills.clone(),
                },
                score,
                snippets,
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.truncate(k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::test_support::resume;

    fn query(q: &str) -> QueryTerms {
        QueryTerms::parse(q).unwrap()
    }

    #[test]
    fn test_scenario_only_matching_candidate_returned() {
        let resumes = vec![
            resume("Ada", &[], "Wrote Python tooling for the build system."),
            resume("Bob", &[], "Wrote Go services."),
        ];
        let ranked = rank_candidates(&query("python"), &resumes, 3, &Catalog::default());
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].resume.name, "Ada");
        assert!(ranked[0].score >= 1);
    }

    #[test]
    fn test_skill_boost_applies_per_named_skill() {
        let candidate = resume("Ada", &["python", "react"], "nothing relevant").parsed_data;
        // No text hits; two skills named in the query, 2 points each.
        assert_eq!(relevance_score(&candidate, &query("python react"), 2), 4);
    }

    #[test]
    fn test_text_and_skill_points_combine() {
        let candidate = resume("Ada", &["python"], "Python and SQL").parsed_data;
        // "python" + "sql" in text = 2, plus boost for python = 2.
        assert_eq!(relevance_score(&candidate, &query("python sql"), 2), 4);
    }

    #[test]
    fn test_adding_matching_term_never_decreases_score() {
        let candidate = resume("Ada", &["python"], "Python, Docker and AWS on Linux").parsed_data;
        let base = relevance_score(&candidate, &query("python docker"), 2);
        let more = relevance_score(&candidate, &query("python docker linux"), 2);
        assert!(more >= base, "{more} < {base}");
        assert_eq!(more, base + 1);
    }

    #[test]
    fn test_sorted_non_increasing_and_truncated() {
        let resumes = vec![
            resume("one", &[], "rust"),
            resume("three", &[], "rust tokio axum"),
            resume("two", &[], "rust tokio"),
            resume("zero", &[], "java"),
        ];
        let ranked = rank_candidates(&query("rust tokio axum"), &resumes, 2, &Catalog::default());
        let names: Vec<_> = ranked.iter().map(|r| r.resume.name.as_str()).collect();
        assert_eq!(names, vec!["three", "two"]);
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_ties_preserve_input_order() {
        let resumes = vec![
            resume("first", &[], "rust"),
            resume("second", &[], "rust"),
        ];
        let ranked = rank_candidates(&query("rust"), &resumes, 5, &Catalog::default());
        assert_eq!(ranked[0].resume.name, "first");
        assert_eq!(ranked[1].resume.name, "second");
    }

    #[test]
    fn test_zero_scores_never_returned() {
        let resumes = vec![resume("a", &[], "java"), resume("b", &[], "")];
        let ranked = rank_candidates(&query("python"), &resumes, 10, &Catalog::default());
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_k_zero_yields_empty() {
        let resumes = vec![resume("a", &[], "rust")];
        assert!(rank_candidates(&query("rust"), &resumes, 0, &Catalog::default()).is_empty());
    }

    #[test]
    fn test_snippets_capped_at_three() {
        let text = "Rust one is here. Rust two is here. Rust three is here. Rust four is here.";
        let resumes = vec![resume("a", &[], text)];
        let ranked = rank_candidates(&query("rust"), &resumes, 1, &Catalog::default());
        assert_eq!(ranked[0].snippets.len(), 3);
        assert_eq!(ranked[0].snippets[0], "Rust one is here");
    }
}
