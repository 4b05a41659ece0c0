//! End-to-end tests over the HTTP surface with a real SQLite store and a
//! mocked legacy endpoint.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use httpmock::prelude::*;
use serde_json::{json, Value};
use tower::ServiceExt;

use recruitment::candidates::{
    candidate_router, CandidateService, HttpLegacyNotifier, SqliteCandidateStore,
};
use recruitment::config::LegacyConfig;

const API_KEY: &str = "0194ec39-4437-7c7f-b720-7cd7b2c8d7f4";

fn legacy_config(url: String) -> LegacyConfig {
    LegacyConfig {
        url,
        api_key: API_KEY.to_string(),
        timeout_ms: 1000,
    }
}

fn open_store(
    path: &str,
    legacy_url: String,
) -> Arc<SqliteCandidateStore<HttpLegacyNotifier>> {
    let notifier =
        HttpLegacyNotifier::from_config(&legacy_config(legacy_url)).expect("notifier builds");
    Arc::new(SqliteCandidateStore::open(path, Arc::new(notifier)).expect("store opens"))
}

fn router_for(store: Arc<SqliteCandidateStore<HttpLegacyNotifier>>) -> axum::Router {
    candidate_router(Arc::new(CandidateService::new(store)))
}

fn submission_body(email: &str, job_offer_ids: Value) -> Value {
    json!({
        "firstName": "Maria",
        "lastName": "Nowak",
        "email": email,
        "phone": "+48 501 502 503",
        "experience": 7,
        "notes": "Referred by an employee.",
        "recruitmentStatus": "in-interview",
        "consentDate": "2025-02-01T08:00:00Z",
        "jobOfferIds": job_offer_ids,
    })
}

fn post_candidates(body: &Value) -> Request<Body> {
    Request::post("/candidates")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[tokio::test]
async fn create_then_list_round_trips_every_field() {
    let legacy = MockServer::start();
    let legacy_mock = legacy.mock(|when, then| {
        when.method(POST)
            .path("/candidates")
            .header("x-api-key", API_KEY)
            .json_body(json!({
                "firstName": "Maria",
                "lastName": "Nowak",
                "email": "maria@example.com",
            }));
        then.status(201);
    });

    let store = open_store(":memory:", legacy.url("/candidates"));
    let backend = store.add_job_offer("Backend Engineer").await.expect("offer");
    let data_eng = store.add_job_offer("Data Engineer").await.expect("offer");
    let router = router_for(store);

    let created = router
        .clone()
        .oneshot(post_candidates(&submission_body(
            "maria@example.com",
            json!([backend, data_eng]),
        )))
        .await
        .expect("route executes");
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = read_json_body(created).await;
    assert_eq!(created, json!({ "id": 1 }));

    // The legacy mirror received exactly the three fields, once.
    legacy_mock.assert();

    let listed = router
        .oneshot(Request::get("/candidates").body(Body::empty()).unwrap())
        .await
        .expect("route executes");
    assert_eq!(listed.status(), StatusCode::OK);
    let listed = read_json_body(listed).await;

    assert_eq!(listed.get("total"), Some(&json!(1)));
    assert_eq!(listed.get("page"), Some(&json!(1)));
    let row = &listed["data"][0];
    assert_eq!(row.get("firstName"), Some(&json!("Maria")));
    assert_eq!(row.get("lastName"), Some(&json!("Nowak")));
    assert_eq!(row.get("email"), Some(&json!("maria@example.com")));
    assert_eq!(row.get("phone"), Some(&json!("+48 501 502 503")));
    assert_eq!(row.get("experience"), Some(&json!(7)));
    assert_eq!(row.get("notes"), Some(&json!("Referred by an employee.")));
    assert_eq!(row.get("recruitmentStatus"), Some(&json!("in-interview")));
    assert_eq!(row.get("consentDate"), Some(&json!("2025-02-01T08:00:00Z")));

    let offers = row["jobOffers"].as_array().expect("nested offers");
    assert_eq!(offers.len(), 2);
    assert_eq!(offers[0].get("title"), Some(&json!("Backend Engineer")));
}

#[tokio::test]
async fn duplicate_email_is_a_conflict_and_leaves_one_row() {
    let legacy = MockServer::start();
    legacy.mock(|when, then| {
        when.method(POST).path("/candidates");
        then.status(201);
    });

    let store = open_store(":memory:", legacy.url("/candidates"));
    let router = router_for(store);
    let body = submission_body("taken@example.com", json!([1]));

    let first = router
        .clone()
        .oneshot(post_candidates(&body))
        .await
        .expect("route executes");
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = router
        .clone()
        .oneshot(post_candidates(&body))
        .await
        .expect("route executes");
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(
        read_json_body(second).await,
        json!({ "error": "Email must be unique." })
    );

    let listed = read_json_body(
        router
            .oneshot(Request::get("/candidates").body(Body::empty()).unwrap())
            .await
            .expect("route executes"),
    )
    .await;
    assert_eq!(listed.get("total"), Some(&json!(1)));
}

#[tokio::test]
async fn legacy_rejection_does_not_change_the_creation_outcome() {
    let legacy = MockServer::start();
    let legacy_mock = legacy.mock(|when, then| {
        when.method(POST).path("/candidates");
        then.status(500);
    });

    let store = open_store(":memory:", legacy.url("/candidates"));
    let router = router_for(store);

    let response = router
        .clone()
        .oneshot(post_candidates(&submission_body(
            "maria@example.com",
            json!([1, 2, 3]),
        )))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    legacy_mock.assert();

    let listed = read_json_body(
        router
            .oneshot(Request::get("/candidates").body(Body::empty()).unwrap())
            .await
            .expect("route executes"),
    )
    .await;
    assert_eq!(listed.get("total"), Some(&json!(1)));
    assert_eq!(listed["data"][0]["jobOffers"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn unreachable_legacy_system_does_not_change_the_creation_outcome() {
    // Nothing listens on this port; the notifier times out or is refused.
    let store = open_store(":memory:", "http://127.0.0.1:9/candidates".to_string());
    let router = router_for(store);

    let response = router
        .oneshot(post_candidates(&submission_body(
            "maria@example.com",
            json!([5]),
        )))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn candidates_survive_a_store_reopen() {
    let legacy = MockServer::start();
    legacy.mock(|when, then| {
        when.method(POST).path("/candidates");
        then.status(201);
    });

    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir
        .path()
        .join("recruitment.db")
        .to_string_lossy()
        .into_owned();

    {
        let store = open_store(&db_path, legacy.url("/candidates"));
        let router = router_for(store);
        let response = router
            .oneshot(post_candidates(&submission_body(
                "maria@example.com",
                json!([1]),
            )))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let reopened = open_store(&db_path, legacy.url("/candidates"));
    let router = router_for(reopened);
    let listed = read_json_body(
        router
            .oneshot(Request::get("/candidates").body(Body::empty()).unwrap())
            .await
            .expect("route executes"),
    )
    .await;
    assert_eq!(listed.get("total"), Some(&json!(1)));
    assert_eq!(listed["data"][0]["email"], json!("maria@example.com"));
}
