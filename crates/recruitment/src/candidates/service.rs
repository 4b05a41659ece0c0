use std::sync::Arc;

use tracing::info;

use super::domain::CandidateSubmission;
use super::store::{CandidatePage, CandidateStore, PageParams, StoreError};
use super::validation::{validate, ValidationError};

/// Service composing the validation engine and the candidate store.
pub struct CandidateService<S> {
    store: Arc<S>,
}

impl<S> CandidateService<S>
where
    S: CandidateStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Validate a submission and persist the candidate together with its
    /// job-offer links. Returns the generated candidate id.
    pub async fn create(
        &self,
        submission: CandidateSubmission,
    ) -> Result<i64, CandidateServiceError> {
        let (candidate, job_offer_ids) = validate(submission)?;
        let candidate_id = self.store.create(candidate, &job_offer_ids).await?;
        info!(candidate_id, links = job_offer_ids.len(), "candidate recorded");
        Ok(candidate_id)
    }

    /// Fetch one page of candidates with their job offers attached.
    pub async fn list(&self, params: PageParams) -> Result<CandidatePage, CandidateServiceError> {
        Ok(self.store.list(params).await?)
    }
}

/// Error raised by the candidate service.
#[derive(Debug, thiserror::Error)]
pub enum CandidateServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
