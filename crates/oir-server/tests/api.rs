use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use oir_core::{
    seed, DocumentUploader, MemoryDocumentStore, Registry, RegistryConfig, UserDirectory,
};
use oir_server::{routes, AppState};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use warp::http::StatusCode;

const LIMIT: u64 = 16 * 1024 * 1024;

fn state(seeded: bool) -> AppState {
    let registry = Registry::new(RegistryConfig::default());
    if seeded {
        seed::populate(&registry).unwrap();
    }
    let uploader = DocumentUploader::new(
        Arc::new(MemoryDocumentStore::new()),
        RegistryConfig::default().upload,
    );
    AppState::new(
        Arc::new(registry),
        Arc::new(UserDirectory::default().with_cost(4)),
        uploader,
    )
}

fn body(res: &warp::http::Response<warp::hyper::body::Bytes>) -> Value {
    serde_json::from_slice(res.body()).unwrap()
}

fn natasha() -> Value {
    json!({
        "name": "Natasha Utubasi",
        "email": "natasha@oir.gov.pg",
        "password": "registrar-2025",
        "role": "manager",
        "department": "Registry"
    })
}

#[tokio::test]
async fn user_is_created_and_listed_without_credentials() {
    let api = routes(state(false), LIMIT);

    let res = warp::test::request()
        .method("POST")
        .path("/api/users")
        .json(&natasha())
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(body(&res), json!({ "message": "User created successfully" }));

    let res = warp::test::request().path("/api/users").reply(&api).await;
    assert_eq!(res.status(), StatusCode::OK);
    let users = body(&res);
    assert_eq!(users.as_array().unwrap().len(), 1);
    assert_eq!(users[0]["email"], "natasha@oir.gov.pg");
    assert_eq!(users[0]["status"], "active");
    assert!(users[0].get("password").is_none());
    assert!(users[0].get("passwordHash").is_none());
}

#[tokio::test]
async fn invalid_user_lists_every_problem() {
    let api = routes(state(false), LIMIT);
    let res = warp::test::request()
        .method("POST")
        .path("/api/users")
        .json(&json!({ "name": "N", "email": "nope", "password": "short", "role": "owner" }))
        .reply(&api)
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = body(&res);
    assert_eq!(json["error"], "Failed to create user");
    assert_eq!(json["details"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let api = routes(state(false), LIMIT);
    for expected in [StatusCode::CREATED, StatusCode::BAD_REQUEST] {
        let res = warp::test::request()
            .method("POST")
            .path("/api/users")
            .json(&natasha())
            .reply(&api)
            .await;
        assert_eq!(res.status(), expected);
    }
}

#[tokio::test]
async fn malformed_user_body_gets_the_endpoint_error_shape() {
    let api = routes(state(false), LIMIT);
    let res = warp::test::request()
        .method("POST")
        .path("/api/users")
        .body("{not json")
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body(&res)["error"], "Failed to create user");
}

#[tokio::test]
async fn upload_returns_the_stored_path() {
    let api = routes(state(false), LIMIT);
    let res = warp::test::request()
        .method("POST")
        .path("/api/documents/upload")
        .json(&json!({
            "file": STANDARD.encode(b"%PDF-1.7 constitution"),
            "folder": "rules",
            "documentType": "Constitution",
            "reference": "AMWU-2024",
            "description": "Rules and constitution",
            "fileType": "pdf"
        }))
        .reply(&api)
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let json = body(&res);
    assert_eq!(json["success"], true);
    let path = json["path"].as_str().unwrap();
    assert!(path.starts_with("rules/"));
    assert!(path.ends_with("-AMWU-2024.pdf"));
}

#[tokio::test]
async fn rejected_upload_reports_failure() {
    let api = routes(state(false), LIMIT);
    let res = warp::test::request()
        .method("POST")
        .path("/api/documents/upload")
        .json(&json!({
            "file": STANDARD.encode(b"MZ"),
            "folder": "rules",
            "reference": "setup",
            "fileType": "exe"
        }))
        .reply(&api)
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = body(&res);
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("invalid file type"));
}

#[tokio::test]
async fn search_ranks_seeded_records() {
    let api = routes(state(true), LIMIT);
    let res = warp::test::request()
        .path("/api/search?q=amwu")
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let results = body(&res);
    let results = results.as_array().unwrap();
    assert_eq!(results[0]["title"], "AMWU_Constitution_2024.pdf");
    assert_eq!(results[0]["type"], "constitution");
    assert!(results.iter().any(|r| r["type"] == "union"));

    let res = warp::test::request()
        .path("/api/search?q=amwu&exclude=unions")
        .reply(&api)
        .await;
    let results = body(&res);
    assert!(results
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["type"] != "union"));

    let res = warp::test::request()
        .path("/api/search?q=amwu&include=planets")
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unions_can_be_registered_and_filtered() {
    let api = routes(state(true), LIMIT);
    let res = warp::test::request()
        .method("POST")
        .path("/api/unions")
        .json(&json!({
            "name": "Test Union",
            "abbreviation": "TU",
            "province": "Central",
            "industries": ["Mining"]
        }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = body(&res);
    assert_eq!(created["status"], "pending");
    assert_eq!(created["memberCount"], 0);

    let res = warp::test::request()
        .path("/api/unions?status=pending")
        .reply(&api)
        .await;
    let pending = body(&res);
    assert_eq!(pending.as_array().unwrap().len(), 1);
    assert_eq!(pending[0]["code"], created["code"]);

    let res = warp::test::request()
        .method("POST")
        .path("/api/unions")
        .json(&json!({ "name": "Test Union" }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body(&res)["error"], "Failed to register union");
}

#[tokio::test]
async fn workflow_board_and_stats() {
    let api = routes(state(true), LIMIT);
    let res = warp::test::request()
        .path("/api/workflows?category=tribunal&status=processed")
        .reply(&api)
        .await;
    assert_eq!(body(&res).as_array().unwrap().len(), 2);

    let res = warp::test::request()
        .path("/api/workflows/stats")
        .reply(&api)
        .await;
    let stats = body(&res);
    assert_eq!(stats["total"], 7);
    assert_eq!(stats["pendingNec"], 1);
}

#[tokio::test]
async fn catalog_lists_folders_and_file_types() {
    let api = routes(state(false), LIMIT);
    let res = warp::test::request().path("/api/catalog").reply(&api).await;
    let catalog = body(&res);
    assert_eq!(catalog["folders"].as_array().unwrap().len(), 12);
    assert_eq!(catalog["fileTypes"], json!(["pdf", "docx", "xlsx", "jpg", "png"]));
    assert_eq!(catalog["maxUploadBytes"], 10 * 1024 * 1024);
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let api = routes(state(false), LIMIT);
    let res = warp::test::request().path("/api/nowhere").reply(&api).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body(&res), json!({ "error": "not found" }));
}
