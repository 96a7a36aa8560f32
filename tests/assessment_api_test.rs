use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use competency_backend::{
    config::Config, database::MemoryStore, middleware::auth::issue_token, router, AppState,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

const SECRET: &str = "test_secret_key";

fn test_config() -> Config {
    Config {
        server_address: "127.0.0.1:0".into(),
        database_url: None,
        database_max_connections: 1,
        jwt_secret: SECRET.into(),
        public_rps: 1000,
        admin_rps: 1000,
        log_json: false,
    }
}

fn setup_app() -> Router {
    let store = Arc::new(MemoryStore::new());
    router(AppState::new(store, test_config()))
}

fn token(sub: &str, role: &str) -> String {
    issue_token(SECRET, sub, Some(role), chrono::Duration::hours(1)).expect("token")
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    bearer: Option<&str>,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", t));
    }
    let req = match body {
        Some(b) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, json)
}

fn five_question_assessment(skill: &str) -> JsonValue {
    let questions: Vec<JsonValue> = (1..=5)
        .map(|i| {
            json!({
                "question": format!("Question {}", i),
                "options": ["alpha", "beta", "gamma"],
                "correct_answer": "beta"
            })
        })
        .collect();
    json!({
        "skill_name": skill,
        "description": "Quarterly check",
        "category": "technical",
        "questions": questions,
        "passing_score": 70,
        "time_limit_minutes": 15
    })
}

async fn create_assessment(app: &Router, skill: &str) -> String {
    let admin = token("hr-1", "hr");
    let (status, body) = send(
        app,
        "POST",
        "/api/admin/assessments",
        Some(&admin),
        Some(five_question_assessment(skill)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().expect("assessment id").to_string()
}

#[tokio::test]
async fn submission_flow_end_to_end() {
    let app = setup_app();
    let id = create_assessment(&app, "Data Analysis").await;
    let employee = token("emp-100", "employee");

    let (status, view) = send(&app, "GET", &format!("/api/assessments/{}", id), Some(&employee), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["total_questions"], 5);
    assert!(!view.to_string().contains("correct_answer"));

    let (status, state) = send(
        &app,
        "GET",
        "/api/competencies/Data%20Analysis",
        Some(&employee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["status"], "not_assessed");

    let submit = json!({
        "answers": { "1": "beta", "2": "beta", "3": "beta", "4": "beta", "5": "alpha" },
        "time_taken_seconds": 240
    });
    let (status, graded) = send(
        &app,
        "POST",
        &format!("/api/assessments/{}/submit", id),
        Some(&employee),
        Some(submit),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(graded["score"], 80);
    assert_eq!(graded["total_questions"], 5);
    assert_eq!(graded["correct_answers"], 4);
    assert_eq!(graded["passed"], true);
    assert_eq!(graded["level"], "Advanced");
    assert_eq!(graded["passing_score"], 70);
    assert_eq!(graded["breakdown"][4]["correct_answer"], "beta");
    assert_eq!(graded["breakdown"][4]["is_correct"], false);

    let (_, state) = send(
        &app,
        "GET",
        "/api/competencies/Data%20Analysis",
        Some(&employee),
        None,
    )
    .await;
    assert_eq!(state["status"], "assessed");
    assert_eq!(state["competency"]["score"], 80);
    assert_eq!(state["competency"]["level"], "Advanced");
    assert_eq!(state["competency"]["category"], "technical");

    // Second attempt with nothing answered replaces the competency.
    let (status, graded) = send(
        &app,
        "POST",
        &format!("/api/assessments/{}/submit", id),
        Some(&employee),
        Some(json!({ "answers": {} })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(graded["score"], 0);
    assert_eq!(graded["passed"], false);
    assert_eq!(graded["level"], "Beginner");

    let (_, competencies) = send(&app, "GET", "/api/competencies", Some(&employee), None).await;
    let competencies = competencies.as_array().expect("array");
    assert_eq!(competencies.len(), 1);
    assert_eq!(competencies[0]["score"], 0);
    assert_eq!(competencies[0]["level"], "Beginner");

    let (_, results) = send(&app, "GET", "/api/results", Some(&employee), None).await;
    let results = results.as_array().expect("array");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["score"], 0);
    assert_eq!(results[1]["score"], 80);
    assert_eq!(results[1]["time_taken_seconds"], 240);

    let admin = token("hr-1", "hr");
    let (status, history) = send(
        &app,
        "GET",
        "/api/admin/employees/emp-100/results",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn routes_require_identity_and_role() {
    let app = setup_app();
    let id = create_assessment(&app, "Excel").await;

    let (status, body) = send(&app, "GET", &format!("/api/assessments/{}", id), None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "missing_authorization");

    let (status, _) = send(
        &app,
        "GET",
        "/api/competencies",
        Some("not-a-jwt"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let employee = token("emp-1", "employee");
    let (status, body) = send(&app, "GET", "/api/admin/assessments", Some(&employee), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");

    let (status, _) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn inactive_and_unknown_assessments() {
    let app = setup_app();
    let id = create_assessment(&app, "Negotiation").await;
    let admin = token("admin-1", "admin");
    let employee = token("emp-2", "employee");

    let (status, updated) = send(
        &app,
        "PATCH",
        &format!("/api/admin/assessments/{}", id),
        Some(&admin),
        Some(json!({ "is_active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["is_active"], false);

    let (status, body) = send(&app, "GET", &format!("/api/assessments/{}", id), Some(&employee), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "assessment_inactive");

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/assessments/{}/submit", id),
        Some(&employee),
        Some(json!({ "answers": { "1": "beta" } })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, catalogue) = send(&app, "GET", "/api/assessments", Some(&employee), None).await;
    assert_eq!(catalogue.as_array().map(Vec::len), Some(0));

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/assessments/{}", uuid::Uuid::new_v4()),
        Some(&employee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, listed) = send(
        &app,
        "GET",
        "/api/admin/assessments?is_active=false",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed[0]["questions"][0]["correct_answer"], "beta");
}

#[tokio::test]
async fn malformed_input_is_rejected() {
    let app = setup_app();
    let id = create_assessment(&app, "Bookkeeping").await;
    let admin = token("hr-1", "hr");
    let employee = token("emp-3", "employee");

    let mut bad = five_question_assessment("Broken");
    bad["questions"][0]["correct_answer"] = json!("delta");
    let (status, _) = send(&app, "POST", "/api/admin/assessments", Some(&admin), Some(bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut bad_threshold = five_question_assessment("Broken");
    bad_threshold["passing_score"] = json!(150);
    let (status, _) = send(
        &app,
        "POST",
        "/api/admin/assessments",
        Some(&admin),
        Some(bad_threshold),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/assessments/{}/submit", id),
        Some(&employee),
        Some(json!({ "answers": { "9": "beta" } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/assessments/{}/submit", id),
        Some(&employee),
        Some(json!({ "answers": {}, "time_taken_seconds": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, results) = send(&app, "GET", "/api/results", Some(&employee), None).await;
    assert_eq!(results.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn blank_answer_key_cannot_be_created() {
    let app = setup_app();
    let admin = token("hr-1", "hr");

    let blank_key = json!({
        "skill_name": "Typing",
        "category": "technical",
        "questions": [
            { "question": "Pick one", "options": ["", "yes"], "correct_answer": "" }
        ],
        "passing_score": 50,
        "time_limit_minutes": 5
    });
    let (status, body) = send(&app, "POST", "/api/admin/assessments", Some(&admin), Some(blank_key)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (_, listed) = send(&app, "GET", "/api/admin/assessments", Some(&admin), None).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn wrongly_shaped_requests_get_json_errors() {
    let app = setup_app();
    let id = create_assessment(&app, "Forecasting").await;
    let employee = token("emp-5", "employee");
    let submit_uri = format!("/api/assessments/{}/submit", id);

    for body in [json!({ "answers": 5 }), json!({ "answers": { "abc": "beta" } })] {
        let (status, err) = send(&app, "POST", &submit_uri, Some(&employee), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(err["error"].is_string());
    }

    let (status, err) = send(&app, "GET", "/api/assessments/not-a-uuid", Some(&employee), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["error"].is_string());

    let admin = token("hr-1", "hr");
    let (status, err) = send(
        &app,
        "GET",
        "/api/admin/assessments?is_active=maybe",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["error"].is_string());

    let (_, results) = send(&app, "GET", "/api/results", Some(&employee), None).await;
    assert_eq!(results.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn competency_export_and_api_docs() {
    let app = setup_app();
    let id = create_assessment(&app, "Scheduling").await;
    let employee = token("emp-4", "employee");
    send(
        &app,
        "POST",
        &format!("/api/assessments/{}/submit", id),
        Some(&employee),
        Some(json!({ "answers": { "1": "beta", "2": "beta" } })),
    )
    .await;

    let admin = token("hr-1", "hr");
    let req = Request::builder()
        .method("GET")
        .uri("/api/admin/competencies/export")
        .header(header::AUTHORIZATION, format!("Bearer {}", admin))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.contains("spreadsheetml"));
    let bytes = to_bytes(resp.into_body(), 4 * 1024 * 1024).await.unwrap();
    assert_eq!(&bytes[..2], b"PK");

    let (status, doc) = send(&app, "GET", "/api/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/assessments/{id}/submit"].is_object());
}
