use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::candidate::CandidateRecord;

/// A successfully parsed upload, as held by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub id: Uuid,
    pub original_name: String,
    pub file_size: usize,
    pub upload_date: DateTime<Utc>,
    pub parsed_data: CandidateRecord,
}

impl ResumeRecord {
    pub fn new(original_name: impl Into<String>, file_size: usize, parsed: CandidateRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            original_name: original_name.into(),
            file_size,
            upload_date: Utc::now(),
            parsed_data: parsed,
        }
    }

    pub fn summary(&self) -> ResumeSummary {
        ResumeSummary {
            id: self.id,
            original_name: self.original_name.clone(),
            upload_date: self.upload_date,
            name: self.parsed_data.name.clone(),
            skills: self.parsed_data.skills.clone(),
            experience_count: self.parsed_data.experience.len(),
        }
    }
}

/// Listing view of a resume; omits raw text and contact details.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSummary {
    pub id: Uuid,
    pub original_name: String,
    pub upload_date: DateTime<Utc>,
    pub name: String,
    pub skills: Vec<String>,
    pub experience_count: usize,
}
