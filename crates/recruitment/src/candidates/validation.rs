use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use super::domain::{CandidateSubmission, NewCandidate, RecruitmentStatus};

pub const MISSING_JOB_OFFERS: &str = "Candidate must have at least one job offer.";
pub const FIRST_NAME_REQUIRED: &str = "First name is required.";
pub const LAST_NAME_REQUIRED: &str = "Last name is required.";
pub const EMAIL_REQUIRED: &str = "Email address is required.";
pub const EMAIL_INVALID: &str = "Invalid email address format.";
pub const PHONE_REQUIRED: &str = "Phone number is required.";
pub const EXPERIENCE_REQUIRED: &str = "Years of experience are required.";
pub const NOTES_REQUIRED: &str = "Recruiter notes are required.";
pub const STATUS_REQUIRED: &str = "Recruitment status is required.";
pub const STATUS_INVALID: &str = "Invalid recruitment status.";
pub const CONSENT_DATE_REQUIRED: &str = "Recruitment consent date is required.";

/// Outcome of rejecting a submission. The job-offer pre-check produces a
/// single top-level message; field rules produce the full ordered list of
/// violations.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("{MISSING_JOB_OFFERS}")]
    MissingJobOffers,
    #[error("submission failed validation: {}", .0.join(" "))]
    Fields(Vec<String>),
}

/// Validate a raw submission into a persistable candidate plus the list of
/// job-offer ids it applies to.
///
/// The job-offer check runs first and short-circuits; field rules are then
/// evaluated independently, in a fixed order, with every violation
/// collected so the caller can surface them all at once. Field values pass
/// through verbatim; presence means "non-empty string", with no trimming.
pub fn validate(
    submission: CandidateSubmission,
) -> Result<(NewCandidate, Vec<i64>), ValidationError> {
    let job_offer_ids = job_offer_ids(&submission.job_offer_ids)?;

    let mut errors = Vec::new();

    let first_name = require(submission.first_name, FIRST_NAME_REQUIRED, &mut errors);
    let last_name = require(submission.last_name, LAST_NAME_REQUIRED, &mut errors);
    let email = require(submission.email, EMAIL_REQUIRED, &mut errors);
    if let Some(email) = &email {
        if !email_shape().is_match(email) {
            errors.push(EMAIL_INVALID.to_string());
        }
    }
    let phone = require(submission.phone, PHONE_REQUIRED, &mut errors);
    let experience = match submission.experience {
        Some(years) => Some(years),
        None => {
            errors.push(EXPERIENCE_REQUIRED.to_string());
            None
        }
    };
    let notes = require(submission.notes, NOTES_REQUIRED, &mut errors);
    let recruitment_status = match require(submission.recruitment_status, STATUS_REQUIRED, &mut errors)
    {
        Some(raw) => match RecruitmentStatus::parse(&raw) {
            Some(status) => Some(status),
            None => {
                errors.push(STATUS_INVALID.to_string());
                None
            }
        },
        None => None,
    };
    let consent_date = require(submission.consent_date, CONSENT_DATE_REQUIRED, &mut errors);

    match (
        first_name,
        last_name,
        email,
        phone,
        experience,
        notes,
        recruitment_status,
        consent_date,
    ) {
        (
            Some(first_name),
            Some(last_name),
            Some(email),
            Some(phone),
            Some(experience),
            Some(notes),
            Some(recruitment_status),
            Some(consent_date),
        ) if errors.is_empty() => Ok((
            NewCandidate {
                first_name,
                last_name,
                email,
                phone,
                experience,
                notes,
                recruitment_status,
                consent_date,
            },
            job_offer_ids,
        )),
        _ => Err(ValidationError::Fields(errors)),
    }
}

/// A field is present when it is supplied and non-empty. No trimming: a
/// whitespace-only value counts as present.
fn require(value: Option<String>, message: &str, errors: &mut Vec<String>) -> Option<String> {
    match value {
        Some(value) if !value.is_empty() => Some(value),
        _ => {
            errors.push(message.to_string());
            None
        }
    }
}

/// The pre-check: `jobOfferIds` must be a non-empty array of integer ids.
/// Anything else (missing, null, a scalar, an empty array, or an array
/// with non-integer elements) yields the single top-level error.
fn job_offer_ids(raw: &Value) -> Result<Vec<i64>, ValidationError> {
    let items = raw.as_array().ok_or(ValidationError::MissingJobOffers)?;
    if items.is_empty() {
        return Err(ValidationError::MissingJobOffers);
    }
    items
        .iter()
        .map(|item| item.as_i64().ok_or(ValidationError::MissingJobOffers))
        .collect()
}

fn email_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern compiles"))
}
