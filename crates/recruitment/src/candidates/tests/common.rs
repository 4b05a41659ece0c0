use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::{json, Value};

use crate::candidates::domain::{Candidate, CandidateSubmission, JobOffer, NewCandidate};
use crate::candidates::router::candidate_router;
use crate::candidates::service::CandidateService;
use crate::candidates::store::{CandidatePage, CandidateStore, PageParams, StoreError};

pub(super) fn submission() -> CandidateSubmission {
    CandidateSubmission {
        first_name: Some("Jan".to_string()),
        last_name: Some("Kowalski".to_string()),
        email: Some("jan.kowalski@example.com".to_string()),
        phone: Some("+48 600 700 800".to_string()),
        experience: Some(5),
        notes: Some("Strong backend background.".to_string()),
        recruitment_status: Some("new".to_string()),
        consent_date: Some("2025-01-15T09:30:00Z".to_string()),
        job_offer_ids: json!([1, 2]),
    }
}

pub(super) fn empty_submission() -> CandidateSubmission {
    CandidateSubmission {
        job_offer_ids: json!([1]),
        ..CandidateSubmission::default()
    }
}

pub(super) struct StoredCandidate {
    pub(super) candidate: NewCandidate,
    pub(super) job_offer_ids: Vec<i64>,
}

/// In-memory stand-in for the SQLite store so the service and router can
/// be tested without touching disk. Job offers are synthesized from the
/// linked ids.
#[derive(Default)]
pub(super) struct MemoryStore {
    records: Mutex<Vec<StoredCandidate>>,
}

impl MemoryStore {
    pub(super) fn stored(&self) -> usize {
        self.records.lock().expect("store mutex poisoned").len()
    }
}

#[async_trait]
impl CandidateStore for MemoryStore {
    async fn create(
        &self,
        candidate: NewCandidate,
        job_offer_ids: &[i64],
    ) -> Result<i64, StoreError> {
        let mut records = self.records.lock().expect("store mutex poisoned");
        if records
            .iter()
            .any(|record| record.candidate.email == candidate.email)
        {
            return Err(StoreError::EmailConflict);
        }
        records.push(StoredCandidate {
            candidate,
            job_offer_ids: job_offer_ids.to_vec(),
        });
        Ok(records.len() as i64)
    }

    async fn list(&self, params: PageParams) -> Result<CandidatePage, StoreError> {
        let records = self.records.lock().expect("store mutex poisoned");
        let total = records.len() as u64;
        let data = records
            .iter()
            .enumerate()
            .skip(params.offset() as usize)
            .take(params.limit as usize)
            .map(|(index, record)| Candidate {
                id: index as i64 + 1,
                first_name: record.candidate.first_name.clone(),
                last_name: record.candidate.last_name.clone(),
                email: record.candidate.email.clone(),
                phone: record.candidate.phone.clone(),
                experience: record.candidate.experience,
                notes: record.candidate.notes.clone(),
                recruitment_status: record.candidate.recruitment_status,
                consent_date: record.candidate.consent_date.clone(),
                job_offers: record
                    .job_offer_ids
                    .iter()
                    .map(|id| JobOffer {
                        id: *id,
                        title: format!("Offer {id}"),
                    })
                    .collect(),
            })
            .collect();

        Ok(CandidatePage {
            data,
            total,
            page: params.page,
        })
    }
}

/// Store double whose insert always reports an email conflict.
pub(super) struct ConflictStore;

#[async_trait]
impl CandidateStore for ConflictStore {
    async fn create(
        &self,
        _candidate: NewCandidate,
        _job_offer_ids: &[i64],
    ) -> Result<i64, StoreError> {
        Err(StoreError::EmailConflict)
    }

    async fn list(&self, _params: PageParams) -> Result<CandidatePage, StoreError> {
        Err(StoreError::Unavailable("read only".to_string()))
    }
}

/// Store double simulating a database outage.
pub(super) struct UnavailableStore;

#[async_trait]
impl CandidateStore for UnavailableStore {
    async fn create(
        &self,
        _candidate: NewCandidate,
        _job_offer_ids: &[i64],
    ) -> Result<i64, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    async fn list(&self, _params: PageParams) -> Result<CandidatePage, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (Arc<CandidateService<MemoryStore>>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = Arc::new(CandidateService::new(store.clone()));
    (service, store)
}

pub(super) fn memory_router() -> (axum::Router, Arc<MemoryStore>) {
    let (service, store) = build_service();
    (candidate_router(service), store)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
