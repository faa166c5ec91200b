//! Page content reads, upserts and seeding over HTTP.

#![allow(clippy::unwrap_used)]

use axum::http::{Method, StatusCode};
use serde_json::{Value, json};
use tokio::task::JoinSet;

use megaprime_integration_tests::TestApp;

const SEEDED_KEYS: [&str; 7] = [
    "hero",
    "project-overview",
    "nearby-connectivity",
    "amenities",
    "about-us",
    "construction-updates",
    "faq",
];

async fn seed(app: &TestApp, token: &str, query: &str) -> Value {
    let response = app
        .request(
            Method::POST,
            &format!("/api/content/init{query}"),
            Some(token),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    response.body
}

fn keys(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|item| item["sectionId"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn list_is_empty_before_seeding() {
    let app = TestApp::new();
    let response = app.get("/api/content").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn upsert_round_trip() {
    let app = TestApp::new();
    let token = app.register_admin().await;
    let content = json!({
        "heading": "Welcome Home",
        "subheading": "Now booking",
        "description": "Three towers, one address."
    });

    let put = app.put_content(&token, "hero", "Hero Section", &content).await;
    assert_eq!(put.status, StatusCode::OK);

    let get = app.get("/api/content/hero").await;
    assert_eq!(get.status, StatusCode::OK);
    assert_eq!(get.body["sectionId"], "hero");
    assert_eq!(get.body["title"], "Hero Section");
    assert_eq!(get.body["content"], content);
    assert_eq!(get.body, put.body);
}

#[tokio::test]
async fn upsert_is_idempotent() {
    let app = TestApp::new();
    let token = app.register_admin().await;
    let content = json!({"title": "FAQ", "questions": []});

    app.put_content(&token, "faq", "FAQ", &content).await;
    let first = app.get("/api/content/faq").await;
    app.put_content(&token, "faq", "FAQ", &content).await;
    let second = app.get("/api/content/faq").await;

    assert_eq!(first.body["content"], second.body["content"]);
    assert_eq!(first.body["title"], second.body["title"]);
    assert_eq!(keys(&app.get("/api/content").await.body), ["faq"]);
}

#[tokio::test]
async fn upsert_replaces_rather_than_merges() {
    let app = TestApp::new();
    let token = app.register_admin().await;

    app.put_content(&token, "promo", "Promo", &json!({"a": 1, "b": 2}))
        .await;
    app.put_content(&token, "promo", "Promo banner", &json!({"c": 3}))
        .await;

    let get = app.get("/api/content/promo").await;
    assert_eq!(get.body["title"], "Promo banner");
    assert_eq!(get.body["content"], json!({"c": 3}));
}

#[tokio::test]
async fn schema_mismatch_is_kept_verbatim() {
    let app = TestApp::new();
    let token = app.register_admin().await;
    let content = json!({"heading": "Only a heading", "ctaLabel": "Book a visit"});

    let put = app.put_content(&token, "hero", "Hero", &content).await;
    assert_eq!(put.status, StatusCode::OK);
    assert_eq!(app.get("/api/content/hero").await.body["content"], content);
}

#[tokio::test]
async fn upsert_validation_errors() {
    let app = TestApp::new();
    let token = app.register_admin().await;

    let blank_title = app.put_content(&token, "hero", "  ", &json!({})).await;
    assert_eq!(blank_title.status, StatusCode::BAD_REQUEST);

    let scalar = app.put_content(&token, "hero", "Hero", &json!(42)).await;
    assert_eq!(scalar.status, StatusCode::BAD_REQUEST);

    let null = app.put_content(&token, "hero", "Hero", &Value::Null).await;
    assert_eq!(null.status, StatusCode::BAD_REQUEST);

    let bad_key = app.put_content(&token, "hero.v2", "Hero", &json!({})).await;
    assert_eq!(bad_key.status, StatusCode::BAD_REQUEST);

    assert_eq!(app.get("/api/content/hero").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn upsert_with_missing_or_wrong_typed_fields_is_bad_request() {
    let app = TestApp::new();
    let token = app.register_admin().await;

    let cases = [
        (json!({"content": {"heading": "Hi"}}), Some("Title is required")),
        (
            json!({"title": "Hero"}),
            Some("Content must be a JSON object or array"),
        ),
        (json!({"title": 7, "content": {}}), None),
    ];
    for (body, message) in cases {
        let response = app
            .request(Method::PUT, "/api/content/hero", Some(&token), Some(&body))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{body}");
        if let Some(message) = message {
            assert_eq!(response.body["message"], message);
        }
    }

    assert_eq!(app.get("/api/content/hero").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn upsert_requires_admin() {
    let app = TestApp::new();
    let response = app
        .request(
            Method::PUT,
            "/api/content/hero",
            None,
            Some(&json!({"title": "Hero", "content": {}})),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.get("/api/content/hero").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_section_is_not_found() {
    let app = TestApp::new();
    let response = app.get("/api/content/does-not-exist").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Content not found");
}

#[tokio::test]
async fn malformed_section_key_reads_as_not_found() {
    let app = TestApp::new();
    for uri in ["/api/content/hero.v2", "/api/content/hero%20banner"] {
        let response = app.get(uri).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(response.body["message"], "Content not found");
    }
}

#[tokio::test]
async fn seeding_twice_keeps_one_document_per_key() {
    let app = TestApp::new();
    let token = app.register_admin().await;

    let first = seed(&app, &token, "").await;
    assert_eq!(first["message"], "Initial content created successfully");
    seed(&app, &token, "").await;

    assert_eq!(keys(&app.get("/api/content").await.body), SEEDED_KEYS);
    assert_eq!(
        app.get("/api/content/contact-info").await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn seeding_clobbers_manual_edits() {
    let app = TestApp::new();
    let token = app.register_admin().await;
    seed(&app, &token, "").await;

    app.put_content(&token, "hero", "My Hero", &json!({"heading": "Edited"}))
        .await;
    seed(&app, &token, "").await;

    let hero = app.get("/api/content/hero").await;
    assert_eq!(hero.body["title"], "Hero Section");
    assert_eq!(hero.body["content"]["heading"], "Welcome to MegaPrime Residency");
}

#[tokio::test]
async fn seeding_missing_only_keeps_manual_edits() {
    let app = TestApp::new();
    let token = app.register_admin().await;

    app.put_content(&token, "hero", "My Hero", &json!({"heading": "Edited"}))
        .await;
    let report = seed(&app, &token, "?mode=missing-only").await;
    assert_eq!(report["skipped"], json!(["hero"]));
    assert_eq!(report["written"].as_array().unwrap().len(), 6);

    let hero = app.get("/api/content/hero").await;
    assert_eq!(hero.body["title"], "My Hero");
}

#[tokio::test]
async fn seeded_defaults_have_expected_shape() {
    let app = TestApp::new();
    let token = app.register_admin().await;
    seed(&app, &token, "").await;

    let amenities = app.get("/api/content/amenities").await.body;
    assert_eq!(amenities["content"]["amenities"].as_array().unwrap().len(), 6);

    let construction = app.get("/api/content/construction-updates").await.body;
    assert_eq!(construction["content"]["phases"][1]["status"], "In Progress");

    let faq = app.get("/api/content/faq").await.body;
    assert_eq!(faq["content"]["questions"].as_array().unwrap().len(), 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_upserts_are_last_write_wins() {
    let app = TestApp::new();
    let token = app.register_admin().await;

    let mut tasks = JoinSet::new();
    for i in 0..16 {
        let app = app.clone();
        let token = token.clone();
        tasks.spawn(async move {
            let content = json!({"writer": i, "payload": [i, i, i]});
            app.put_content(&token, "race", &format!("Writer {i}"), &content)
                .await
                .status
        });
    }
    while let Some(status) = tasks.join_next().await {
        assert_eq!(status.unwrap(), StatusCode::OK);
    }

    let get = app.get("/api/content/race").await;
    let writer = get.body["content"]["writer"].as_i64().unwrap();
    assert_eq!(get.body["title"], format!("Writer {writer}"));
    assert_eq!(get.body["content"]["payload"], json!([writer, writer, writer]));
    assert_eq!(keys(&app.get("/api/content").await.body), ["race"]);
}
