//! Lock → presign → PUT → complete → unlock, against a mock API and storage.

mod support;

use std::path::PathBuf;
use std::sync::Mutex;

use desk_client::ApiError;
use desk_client::uploads::{LocalFile, local_files};
use pretty_assertions::assert_eq;
use serde_json::json;
use support::client;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_files(dir: &TempDir, names: &[&str]) -> Vec<LocalFile> {
    let paths: Vec<PathBuf> = names
        .iter()
        .map(|name| {
            let p = dir.path().join(name);
            std::fs::write(&p, format!("contents of {name}")).unwrap();
            p
        })
        .collect();
    local_files(&paths).unwrap()
}

async fn mount_lock(server: &MockServer, lock_status: u16, unlock_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/v1/cases/C-1/lock"))
        .respond_with(ResponseTemplate::new(lock_status).set_body_json(json!({
            "message": "Case is locked by another user"
        })))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/cases/C-1/lock"))
        .respond_with(ResponseTemplate::new(204))
        .expect(unlock_calls)
        .mount(server)
        .await;
}

async fn mount_presign(server: &MockServer, targets: serde_json::Value, calls: u64) {
    Mock::given(method("POST"))
        .and(path("/v1/cases/C-1/uploads/presigned-urls"))
        .respond_with(ResponseTemplate::new(200).set_body_json(targets))
        .expect(calls)
        .mount(server)
        .await;
}

async fn mount_complete(server: &MockServer, uids: serde_json::Value, calls: u64) {
    Mock::given(method("POST"))
        .and(path("/v1/cases/C-1/uploads/complete"))
        .and(body_json(json!({ "uids": uids })))
        .respond_with(ResponseTemplate::new(204))
        .expect(calls)
        .mount(server)
        .await;
}

fn target(server: &MockServer, uid: &str, name: &str) -> serde_json::Value {
    json!({
        "uid": uid,
        "filePath": name,
        "url": format!("{}/storage/{name}", server.uri()),
        "expiresIn": 900
    })
}

#[tokio::test]
async fn successful_batch_completes_and_unlocks_once() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let files = write_files(&dir, &["upper.stl", "lower.stl"]);

    mount_lock(&server, 200, 1).await;
    Mock::given(method("POST"))
        .and(path("/v1/cases/C-1/uploads/presigned-urls"))
        .and(body_json(json!({ "filePaths": ["upper.stl", "lower.stl"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            target(&server, "f-1", "upper.stl"),
            target(&server, "f-2", "lower.stl"),
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/storage/upper.stl"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/storage/lower.stl"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    mount_complete(&server, json!(["f-1", "f-2"]), 1).await;

    let seen = Mutex::new(Vec::new());
    let uids = client(&server)
        .upload_case_files("C-1", &files, &|name| {
            seen.lock().unwrap().push(name.to_string());
        })
        .await
        .unwrap();

    assert_eq!(uids, vec!["f-1".to_string(), "f-2".to_string()]);
    let mut seen = seen.into_inner().unwrap();
    seen.sort();
    assert_eq!(seen, vec!["lower.stl", "upper.stl"]);
}

#[tokio::test]
async fn failed_put_skips_complete_and_unlocks_once() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let files = write_files(&dir, &["upper.stl", "lower.stl"]);

    mount_lock(&server, 200, 1).await;
    mount_presign(
        &server,
        json!([
            target(&server, "f-1", "upper.stl"),
            target(&server, "f-2", "lower.stl"),
        ]),
        1,
    )
    .await;
    Mock::given(method("PUT"))
        .and(path("/storage/upper.stl"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/storage/lower.stl"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    mount_complete(&server, json!(["f-1", "f-2"]), 0).await;

    let err = client(&server)
        .upload_case_files("C-1", &files, &|_| {})
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed to upload lower.stl: 403 Forbidden");
}

#[tokio::test]
async fn refused_lock_still_unlocks_once() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let files = write_files(&dir, &["upper.stl"]);

    mount_lock(&server, 409, 1).await;
    mount_presign(&server, json!([]), 0).await;

    let err = client(&server)
        .upload_case_files("C-1", &files, &|_| {})
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Case is locked by another user (Error 409)");
}

#[tokio::test]
async fn unknown_presigned_path_fails_the_batch() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let files = write_files(&dir, &["upper.stl"]);

    mount_lock(&server, 200, 1).await;
    mount_presign(&server, json!([target(&server, "f-9", "renamed.stl")]), 1).await;
    mount_complete(&server, json!(["f-9"]), 0).await;

    let err = client(&server)
        .upload_case_files("C-1", &files, &|_| {})
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::UnknownUploadPath(ref p) if p == "renamed.stl"));
    assert_eq!(err.to_string(), "File not found for path: renamed.stl");
}

#[tokio::test]
async fn unlock_failure_after_success_is_reported() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let files = write_files(&dir, &["upper.stl"]);

    Mock::given(method("POST"))
        .and(path("/v1/cases/C-1/lock"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/cases/C-1/lock"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "Unlock failed" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_presign(&server, json!([target(&server, "f-1", "upper.stl")]), 1).await;
    Mock::given(method("PUT"))
        .and(path("/storage/upper.stl"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    mount_complete(&server, json!(["f-1"]), 1).await;

    let err = client(&server)
        .upload_case_files("C-1", &files, &|_| {})
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Unlock failed (Server Error)");
}
