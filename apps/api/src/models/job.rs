use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// A structured job posting. Only `requirements` and `preferred_skills` are scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary_range: Option<SalaryRange>,
}

impl JobPosting {
    /// Trims requirement and skill strings and drops blank ones; a blank string
    /// would otherwise be a substring of every resume.
    pub fn normalized(mut self) -> Result<Self, AppError> {
        self.title = self.title.trim().to_string();
        if self.title.is_empty() {
            return Err(AppError::Validation("title cannot be empty".to_string()));
        }
        self.company = self.company.trim().to_string();
        self.requirements = trim_non_blank(self.requirements);
        self.preferred_skills = trim_non_blank(self.preferred_skills);
        Ok(self)
    }
}

fn trim_non_blank(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: Uuid,
    pub created_date: DateTime<Utc>,
    #[serde(flatten)]
    pub posting: JobPosting,
}

impl JobRecord {
    pub fn new(posting: JobPosting) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_date: Utc::now(),
            posting,
        }
    }
}
