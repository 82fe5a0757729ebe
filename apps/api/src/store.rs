//! Resume and job storage.
//!
//! Scoring never reads through the store directly: handlers take a
//! materialized `snapshot()` so a scan cannot observe concurrent inserts.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::JobRecord;
use crate::models::resume::{ResumeRecord, ResumeSummary};

pub const DEFAULT_PAGE_LIMIT: usize = 10;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    /// Case-insensitive search over name, skills, and raw text.
    pub q: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumePage {
    pub resumes: Vec<ResumeSummary>,
    pub pagination: Pagination,
}

/// Persistence collaborator. Carried in `AppState` as `Arc<dyn ResumeStore>`.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn insert_resume(&self, record: ResumeRecord) -> Result<(), AppError>;
    async fn get_resume(&self, id: Uuid) -> Result<Option<ResumeRecord>, AppError>;
    /// Newest uploads first.
    async fn list_resumes(&self, query: &ListQuery) -> Result<ResumePage, AppError>;
    /// Every resume in insertion order, fully materialized.
    async fn snapshot(&self) -> Result<Vec<ResumeRecord>, AppError>;
    async fn insert_job(&self, job: JobRecord) -> Result<(), AppError>;
    async fn get_job(&self, id: Uuid) -> Result<Option<JobRecord>, AppError>;
}

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryStore {
    resumes: RwLock<Vec<ResumeRecord>>,
    jobs: RwLock<HashMap<Uuid, JobRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        info!("Using in-memory resume store");
        Self::default()
    }
}

fn matches_search(record: &ResumeRecord, needle: &str) -> bool {
    let parsed = &record.parsed_data;
    parsed.name.to_lowercase().contains(needle)
        || parsed.skills.iter().any(|s| s.to_lowercase().contains(needle))
        || parsed.raw_text.to_lowercase().contains(needle)
}

#[async_trait]
impl ResumeStore for InMemoryStore {
    async fn insert_resume(&self, record: ResumeRecord) -> Result<(), AppError> {
        self.resumes.write().await.push(record);
        Ok(())
    }

    async fn get_resume(&self, id: Uuid) -> Result<Option<ResumeRecord>, AppError> {
        Ok(self.resumes.read().await.iter().find(|r| r.id == id).cloned())
    }

    async fn list_resumes(&self, query: &ListQuery) -> Result<ResumePage, AppError> {
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        let offset = query.offset.unwrap_or(0);
        let needle = query
            .q
            .as_deref()
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());

        let resumes = self.resumes.read().await;
        let matching: Vec<&ResumeRecord> = resumes
            .iter()
            .rev()
            .filter(|r| needle.as_deref().map_or(true, |n| matches_search(r, n)))
            .collect();

        let total = matching.len();
        let page = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(ResumeRecord::summary)
            .collect();

        Ok(ResumePage {
            resumes: page,
            pagination: Pagination {
                total,
                limit,
                offset,
                has_more: total > offset.saturating_add(limit),
            },
        })
    }

    async fn snapshot(&self) -> Result<Vec<ResumeRecord>, AppError> {
        Ok(self.resumes.read().await.clone())
    }

    async fn insert_job(&self, job: JobRecord) -> Result<(), AppError> {
        self.jobs.write().await.insert(job.id, job);
        Ok(())
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<JobRecord>, AppError> {
        Ok(self.jobs.read().await.get(&id).cloned())
    }
}
