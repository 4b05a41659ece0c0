use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw intake payload for `POST /candidates`. Every field is optional at
/// the wire level so that missing or empty data reaches the validation
/// engine as data rather than as a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSubmission {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub experience: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub recruitment_status: Option<String>,
    #[serde(default)]
    pub consent_date: Option<String>,
    /// Kept as raw JSON so "missing", "not an array", and "empty" can all
    /// be answered with the same top-level error.
    #[serde(default)]
    pub job_offer_ids: Value,
}

/// Stage a candidate sits at in the recruitment pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecruitmentStatus {
    New,
    InInterview,
    Accepted,
    Rejected,
}

impl RecruitmentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            RecruitmentStatus::New => "new",
            RecruitmentStatus::InInterview => "in-interview",
            RecruitmentStatus::Accepted => "accepted",
            RecruitmentStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "new" => Some(Self::New),
            "in-interview" => Some(Self::InInterview),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// A fully validated candidate, ready to be persisted. Values are carried
/// verbatim from the submission; no trimming or other normalization is
/// applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCandidate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub experience: i64,
    pub notes: String,
    pub recruitment_status: RecruitmentStatus,
    pub consent_date: String,
}

/// A persisted candidate row together with the job offers it is linked to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub experience: i64,
    pub notes: String,
    pub recruitment_status: RecruitmentStatus,
    pub consent_date: String,
    pub job_offers: Vec<JobOffer>,
}

/// A pre-existing open position. Owned externally; this service only reads
/// it and records links against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobOffer {
    pub id: i64,
    pub title: String,
}
