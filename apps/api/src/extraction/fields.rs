//! Heuristic, line-windowed extraction of candidate facts.
//!
//! Every rule is a pure function over the canonical text that returns `Option`
//! (or an empty `Vec`) and has a documented fallback. Extraction never fails;
//! a missing signal degrades to `"Unknown"`, an empty string, or an empty list.
//! First match wins everywhere: there is no ranking between competing headers.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::{Catalog, SkillCatalog, Tuning};
use crate::models::candidate::{CandidateRecord, EducationEntry, ExperienceEntry};

pub const UNKNOWN_NAME: &str = "Unknown";
const UNKNOWN_COMPANY: &str = "Unknown";
const FALLBACK_TITLE: &str = "Position";
const FALLBACK_DEGREE: &str = "Degree";

const EXPERIENCE_HEADERS: &[&str] = &["experience", "work", "employment"];
const EDUCATION_HEADERS: &[&str] = &["education", "university", "college", "degree"];

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+?[0-9]{1,3}[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}")
        .expect("valid phone regex")
});

static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:19|20)[0-9]{2}\b").expect("valid year regex"));

// Matches at the start of any word, so "Marcus" or "Junior" also count as dates.
static MONTH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)")
        .expect("valid month regex")
});

/// Builds a `CandidateRecord` from canonical text. Deterministic: the same
/// text and catalog always produce an identical record.
pub fn extract_candidate(text: &str, catalog: &Catalog) -> CandidateRecord {
    let tuning = &catalog.tuning;
    CandidateRecord {
        name: extract_name(text, tuning).unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        email: extract_email(text).unwrap_or_default(),
        phone: extract_phone(text).unwrap_or_default(),
        skills: extract_skills(text, &catalog.skills),
        experience: extract_experience(text, catalog),
        education: extract_education(text, catalog),
        raw_text: truncate_chars(text, tuning.raw_text_max_chars),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Header fields
// ────────────────────────────────────────────────────────────────────────────

/// First of the leading non-blank lines that looks like a person's name.
pub fn extract_name(text: &str, tuning: &Tuning) -> Option<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(tuning.name_scan_lines)
        .find(|line| {
            let len = line.chars().count();
            len > tuning.name_min_len
                && len < tuning.name_max_len
                && !line.contains('@')
                && !looks_like_date(line)
        })
        .map(str::to_string)
}

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn extract_skills(text: &str, skills: &SkillCatalog) -> Vec<String> {
    skills.find_in(text)
}

fn looks_like_date(line: &str) -> bool {
    YEAR_RE.is_match(line) || MONTH_RE.is_match(line)
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// Returns the raw lines following the first header line, or `None` when no
/// line contains any of `headers` (case-insensitive).
fn section_window<'a>(text: &'a str, headers: &[&str], window: usize) -> Option<Vec<&'a str>> {
    let lines: Vec<&str> = text.split('\n').collect();
    let header = lines.iter().position(|line| {
        let lower = line.to_lowercase();
        headers.iter().any(|h| lower.contains(h))
    })?;
    Some(lines[header + 1..].iter().take(window).copied().collect())
}

pub fn extract_experience(text: &str, catalog: &Catalog) -> Vec<ExperienceEntry> {
    let tuning = &catalog.tuning;
    let Some(window) = section_window(text, EXPERIENCE_HEADERS, tuning.experience_window) else {
        return Vec::new();
    };

    window
        .into_iter()
        .map(str::trim)
        .filter(|line| line.chars().count() > tuning.experience_min_line_len)
        .take(tuning.max_experience_entries)
        .map(|line| ExperienceEntry {
            title: job_title(line, &catalog.job_titles)
                .or_else(|| title_before_separator(line))
                .unwrap_or_else(|| FALLBACK_TITLE.to_string()),
            company: company(line).unwrap_or_else(|| UNKNOWN_COMPANY.to_string()),
            duration: String::new(),
            description: truncate_chars(line, tuning.description_max_chars),
        })
        .collect()
}

/// A title-vocabulary token with one neighbour on each side, e.g.
/// "Senior Software Engineer at Acme" -> "Software Engineer at".
/// The title token must not be the first word.
fn job_title(line: &str, titles: &[String]) -> Option<String> {
    let words: Vec<&str> = line.split(' ').collect();
    let idx = (1..words.len()).find(|&i| {
        let lower = words[i].to_lowercase();
        titles.iter().any(|t| *t == lower)
    })?;
    let end = (idx + 2).min(words.len());
    Some(words[idx - 1..end].join(" "))
}

fn title_before_separator(line: &str) -> Option<String> {
    [line.split('-').next(), line.split(" at ").next()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// "... at Acme Corp, Berlin" -> "Acme Corp"; "Engineer - Acme - 2020" -> "Acme".
fn company(line: &str) -> Option<String> {
    let candidate = if let Some((_, after)) = line.split_once(" at ") {
        after.split(',').next()
    } else {
        line.split(" - ").nth(1)
    };
    candidate
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub fn extract_education(text: &str, catalog: &Catalog) -> Vec<EducationEntry> {
    let tuning = &catalog.tuning;
    let Some(window) = section_window(text, EDUCATION_HEADERS, tuning.education_window) else {
        return Vec::new();
    };

    window
        .into_iter()
        .map(str::trim)
        .filter(|line| line.chars().count() > tuning.education_min_line_len)
        .take(tuning.max_education_entries)
        .map(|line| EducationEntry {
            degree: degree(line, &catalog.degrees).unwrap_or_else(|| FALLBACK_DEGREE.to_string()),
            institution: line.to_string(),
            year: year(line).unwrap_or_default(),
        })
        .collect()
}

/// First vocabulary degree contained in the line, capitalized ("phd" -> "Phd").
fn degree(line: &str, degrees: &[String]) -> Option<String> {
    let lower = line.to_lowercase();
    degrees
        .iter()
        .find(|d| lower.contains(d.as_str()))
        .map(|d| capitalize(d))
}

fn year(line: &str) -> Option<String> {
    YEAR_RE.find(line).map(|m| m.as_str().to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Truncates to at most `max` characters (not bytes).
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
