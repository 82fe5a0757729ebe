//! One templated sentence summarizing ask-flow results.

use crate::extraction::fields::UNKNOWN_NAME;
use crate::scoring::relevance::ScoredCandidate;

pub fn compose_answer(ranked: &[ScoredCandidate], query: &str) -> String {
    if ranked.is_empty() {
        return format!("No relevant information found for \"{query}\" in the resumes.");
    }

    let names: Vec<&str> = ranked
        .iter()
        .map(|c| c.resume.name.as_str())
        .filter(|name| *name != UNKNOWN_NAME)
        .collect();
    let name_list = if names.is_empty() {
        "several candidates".to_string()
    } else {
        names.join(", ")
    };

    format!(
        "For your query \"{query}\", I found relevant information in {} resumes ({name_list}). The candidates have matching skills and experience.",
        ranked.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::relevance::CandidateRef;
    use uuid::Uuid;

    fn scored(name: &str) -> ScoredCandidate {
        ScoredCandidate {
            resume: CandidateRef {
                id: Uuid::new_v4(),
                name: name.to_string(),
                skills: vec![],
            },
            score: 1,
            snippets: vec![],
        }
    }

    #[test]
    fn test_empty_results_name_the_query() {
        assert_eq!(
            compose_answer(&[], "rust"),
            "No relevant information found for \"rust\" in the resumes."
        );
    }

    #[test]
    fn test_names_joined_and_unknown_skipped() {
        let answer = compose_answer(&[scored("Ada"), scored("Unknown"), scored("Bob")], "python");
        assert_eq!(
            answer,
            "For your query \"python\", I found relevant information in 3 resumes (Ada, Bob). The candidates have matching skills and experience."
        );
    }

    #[test]
    fn test_all_unknown_names() {
        let answer = compose_answer(&[scored("Unknown")], "sql");
        assert!(answer.contains("in 1 resumes (several candidates)"));
    }
}
