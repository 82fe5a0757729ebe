use std::collections::HashSet;

use crate::errors::AppError;

/// A free-text query split into distinct lowercase whitespace-separated terms.
#[derive(Debug, Clone)]
pub struct QueryTerms {
    text: String,
    lower: String,
    terms: Vec<String>,
}

impl QueryTerms {
    /// Rejects empty or whitespace-only queries before any scoring happens.
    pub fn parse(query: &str) -> Result<Self, AppError> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidQuery("query is required".to_string()));
        }
        let lower = query.to_lowercase();
        let mut seen = HashSet::new();
        let terms = lower
            .split_whitespace()
            .filter(|t| seen.insert(*t))
            .map(str::to_string)
            .collect();
        Ok(Self {
            text: query.to_string(),
            lower,
            terms,
        })
    }

    /// The query as the caller wrote it.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lower(&self) -> &str {
        &self.lower
    }

    /// Number of distinct terms occurring in `haystack_lower`, which must
    /// already be lowercased.
    pub fn count_in(&self, haystack_lower: &str) -> usize {
        self.terms
            .iter()
            .filter(|t| haystack_lower.contains(t.as_str()))
            .count()
    }
}
