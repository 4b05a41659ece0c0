use async_trait::async_trait;
use serde::Serialize;

use super::domain::{Candidate, NewCandidate};

/// Storage abstraction so the service and router can be exercised against
/// in-memory doubles.
#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// Persist a candidate together with one link row per supplied
    /// job-offer id, atomically: either the candidate and all of its links
    /// exist afterwards, or nothing does. Returns the generated id.
    async fn create(
        &self,
        candidate: NewCandidate,
        job_offer_ids: &[i64],
    ) -> Result<i64, StoreError>;

    /// Fetch one page of candidates in insertion order, each carrying its
    /// linked job offers, plus the total count ignoring pagination.
    async fn list(&self, params: PageParams) -> Result<CandidatePage, StoreError>;
}

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Email must be unique.")]
    EmailConflict,
    #[error("{0}")]
    Unavailable(String),
}

/// Pagination window. Always well-formed: `page >= 1`, `limit >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: u64,
    pub limit: u64,
}

impl PageParams {
    pub const DEFAULT_PAGE: u64 = 1;
    pub const DEFAULT_LIMIT: u64 = 10;

    /// Build from raw query-string values. Absent, non-numeric, or
    /// non-positive inputs fall back to the defaults rather than erroring.
    /// No upper bound is placed on `limit`.
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_positive(page, Self::DEFAULT_PAGE),
            limit: parse_positive(limit, Self::DEFAULT_LIMIT),
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

fn parse_positive(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

/// One page of candidates as returned by `GET /candidates`.
#[derive(Debug, Clone, Serialize)]
pub struct CandidatePage {
    pub data: Vec<Candidate>,
    pub total: u64,
    pub page: u64,
}
