//! The vocabularies and tuned constants that drive extraction and scoring.
//!
//! Loaded once at startup (built-in defaults, optionally overridden by a TOML file)
//! and passed by reference into the pure extraction/scoring functions. Never mutated.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

const DEFAULT_SKILLS: &[&str] = &[
    "python",
    "javascript",
    "java",
    "react",
    "node",
    "sql",
    "mongodb",
    "aws",
    "docker",
    "kubernetes",
    "machine learning",
    "ai",
    "html",
    "css",
    "typescript",
    "angular",
    "vue",
    "django",
    "flask",
    "spring",
    "git",
    "jenkins",
    "terraform",
    "ansible",
];

const DEFAULT_JOB_TITLES: &[&str] = &[
    "developer",
    "engineer",
    "manager",
    "analyst",
    "specialist",
    "consultant",
];

const DEFAULT_DEGREES: &[&str] = &["bachelor", "master", "phd", "associate", "diploma"];

// ────────────────────────────────────────────────────────────────────────────
// Tuning constants
// ────────────────────────────────────────────────────────────────────────────

/// Every tuned constant used by the heuristics. Changing any of these changes
/// ranking output for the whole corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Leading non-blank lines considered for the candidate name.
    pub name_scan_lines: usize,
    /// Name length must be strictly greater than this.
    pub name_min_len: usize,
    /// Name length must be strictly less than this.
    pub name_max_len: usize,
    /// Raw lines after the experience header that are inspected.
    pub experience_window: usize,
    pub max_experience_entries: usize,
    /// Experience lines must be strictly longer than this.
    pub experience_min_line_len: usize,
    /// Raw lines after the education header that are inspected.
    pub education_window: usize,
    pub max_education_entries: usize,
    /// Education lines must be strictly longer than this.
    pub education_min_line_len: usize,
    pub description_max_chars: usize,
    pub raw_text_max_chars: usize,
    /// Points added per candidate skill named in an ask query.
    pub skill_boost: u32,
    /// Cap on the experience-entry bonus in job matching.
    pub experience_bonus_cap: u32,
    /// Match percentage points per raw job-match score point (capped at 100).
    pub match_percent_per_point: u32,
    /// Sentences must be strictly longer than this (trimmed) to be snippets.
    pub snippet_min_len: usize,
    pub snippets_per_candidate: usize,
    pub default_ask_results: usize,
    pub default_match_results: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            name_scan_lines: 5,
            name_min_len: 2,
            name_max_len: 50,
            experience_window: 5,
            max_experience_entries: 3,
            experience_min_line_len: 10,
            education_window: 3,
            max_education_entries: 2,
            education_min_line_len: 5,
            description_max_chars: 200,
            raw_text_max_chars: 5000,
            skill_boost: 2,
            experience_bonus_cap: 3,
            match_percent_per_point: 20,
            snippet_min_len: 10,
            snippets_per_candidate: 3,
            default_ask_results: 3,
            default_match_results: 5,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skill catalog
// ────────────────────────────────────────────────────────────────────────────

/// Ordered skill vocabulary. Terms are unique case-insensitively; the first
/// spelling wins.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillCatalog {
    terms: Vec<String>,
    terms_lower: Vec<String>,
}

impl SkillCatalog {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        let mut kept_lower = Vec::new();
        for term in terms {
            let term = term.as_ref().trim();
            if term.is_empty() {
                continue;
            }
            let lower = term.to_lowercase();
            if seen.insert(lower.clone()) {
                kept.push(term.to_string());
                kept_lower.push(lower);
            }
        }
        Self {
            terms: kept,
            terms_lower: kept_lower,
        }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns every catalog term that occurs as a substring of `text`,
    /// case-insensitively, in catalog order and catalog casing.
    pub fn find_in(&self, text: &str) -> Vec<String> {
        let text_lower = text.to_lowercase();
        self.terms
            .iter()
            .zip(&self.terms_lower)
            .filter(|(_, lower)| text_lower.contains(lower.as_str()))
            .map(|(term, _)| term.clone())
            .collect()
    }
}

impl Default for SkillCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_SKILLS)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Catalog
// ────────────────────────────────────────────────────────────────────────────

/// Shape of the on-disk catalog file. Missing keys fall back to defaults.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct CatalogFile {
    skills: Vec<String>,
    job_titles: Vec<String>,
    degrees: Vec<String>,
    tuning: Tuning,
}

impl Default for CatalogFile {
    fn default() -> Self {
        Self {
            skills: to_owned_vec(DEFAULT_SKILLS),
            job_titles: to_owned_vec(DEFAULT_JOB_TITLES),
            degrees: to_owned_vec(DEFAULT_DEGREES),
            tuning: Tuning::default(),
        }
    }
}

/// Immutable extraction and scoring configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub skills: SkillCatalog,
    /// Lowercase job-title tokens, e.g. "engineer".
    pub job_titles: Vec<String>,
    /// Lowercase degree keywords in priority order, e.g. "bachelor".
    pub degrees: Vec<String>,
    pub tuning: Tuning,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::from_parts(CatalogFile::default())
    }
}

impl Catalog {
    /// Parses a catalog from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, AppError> {
        let file: CatalogFile = toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse catalog: {e}")))?;
        let catalog = Self::from_parts(file);
        if catalog.skills.is_empty() {
            return Err(AppError::Config(
                "Catalog must define at least one skill".to_string(),
            ));
        }
        Ok(catalog)
    }

    /// Reads and parses a catalog file.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!(
                "Failed to read catalog file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    fn from_parts(file: CatalogFile) -> Self {
        Self {
            skills: SkillCatalog::new(&file.skills),
            job_titles: normalize_words(&file.job_titles),
            degrees: normalize_words(&file.degrees),
            tuning: file.tuning,
        }
    }
}

fn normalize_words(words: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    words
        .iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty() && seen.insert(w.clone()))
        .collect()
}

fn to_owned_vec(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
