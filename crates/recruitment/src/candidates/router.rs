use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::CandidateSubmission;
use super::service::{CandidateService, CandidateServiceError};
use super::store::{CandidateStore, PageParams, StoreError};
use super::validation::ValidationError;

/// Router builder exposing the candidate intake and listing endpoints.
pub fn candidate_router<S>(service: Arc<CandidateService<S>>) -> Router
where
    S: CandidateStore + 'static,
{
    Router::new()
        .route(
            "/candidates",
            post(create_handler::<S>).get(list_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn create_handler<S>(
    State(service): State<Arc<CandidateService<S>>>,
    axum::Json(submission): axum::Json<CandidateSubmission>,
) -> Response
where
    S: CandidateStore + 'static,
{
    match service.create(submission).await {
        Ok(id) => (StatusCode::CREATED, axum::Json(json!({ "id": id }))).into_response(),
        Err(CandidateServiceError::Validation(ValidationError::MissingJobOffers)) => {
            let payload = json!({
                "error": ValidationError::MissingJobOffers.to_string(),
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(CandidateServiceError::Validation(ValidationError::Fields(errors))) => {
            let payload = json!({ "errors": errors });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(CandidateServiceError::Store(StoreError::EmailConflict)) => {
            let payload = json!({
                "error": StoreError::EmailConflict.to_string(),
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn list_handler<S>(
    State(service): State<Arc<CandidateService<S>>>,
    Query(query): Query<HashMap<String, String>>,
) -> Response
where
    S: CandidateStore + 'static,
{
    let params = PageParams::from_query(
        query.get("page").map(String::as_str),
        query.get("limit").map(String::as_str),
    );

    match service.list(params).await {
        Ok(page) => (StatusCode::OK, axum::Json(page)).into_response(),
        Err(err) => {
            let payload = json!({
                "error": err.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
