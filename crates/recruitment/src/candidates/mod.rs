//! Candidate intake: validation, transactional persistence with job-offer
//! links, best-effort legacy mirroring, and the HTTP surface.

pub mod domain;
pub mod notifier;
pub mod router;
pub mod service;
pub mod sqlite;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{Candidate, CandidateSubmission, JobOffer, NewCandidate, RecruitmentStatus};
pub use notifier::{HttpLegacyNotifier, LegacyCandidate, LegacyNotifier, NotifyError};
pub use router::candidate_router;
pub use service::{CandidateService, CandidateServiceError};
pub use sqlite::SqliteCandidateStore;
pub use store::{CandidatePage, CandidateStore, PageParams, StoreError};
pub use validation::{validate, ValidationError};
