//! Candidate intake service: records job candidates together with the job
//! offers they applied to, and forwards a minimal copy of each new candidate
//! to a legacy system on a best-effort basis.

pub mod candidates;
pub mod config;
pub mod error;
pub mod telemetry;
