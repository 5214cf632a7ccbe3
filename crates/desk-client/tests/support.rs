//! Shared fixtures for the wiremock-backed tests.

#![allow(dead_code)]

use std::sync::Arc;

use desk_auth::StaticToken;
use desk_cache::QueryCache;
use desk_client::{ApiClient, CaseDesk};
use desk_config::ApiConfig;
use serde_json::{Value, json};
use wiremock::MockServer;

pub const TOKEN: &str = "test-token";

pub fn client(server: &MockServer) -> ApiClient {
    let config = ApiConfig {
        base_url: server.uri(),
        ..Default::default()
    };
    ApiClient::new(&config, Arc::new(StaticToken(Some(TOKEN.into())))).expect("client")
}

pub fn desk(server: &MockServer) -> CaseDesk {
    CaseDesk::new(client(server), QueryCache::default())
}

pub fn case_json(code: &str, status: Option<&str>) -> Value {
    json!({
        "code": code,
        "description": "",
        "caseName": format!("{code} name"),
        "doctorFirstName": "Maria",
        "doctorLastName": "Lopez",
        "patientFirstName": "John",
        "patientLastName": "Smith",
        "isLocked": false,
        "status": status,
        "createdAt": "2025-03-01T10:00:00Z",
        "updatedAt": "2025-03-01T10:00:00Z"
    })
}

pub fn offset_page(items: Vec<Value>) -> Value {
    let total = items.len();
    json!({
        "items": items,
        "totalCount": total,
        "totalPages": 1,
        "pageNumber": 0,
        "hasNext": false,
        "hasPrev": false
    })
}

pub fn invitation_json(uid: &str) -> Value {
    json!({
        "uid": uid,
        "accountUid": "acc-1",
        "email": format!("{uid}@example.com"),
        "status": "PENDING",
        "createdAt": "2025-03-01T00:00:00Z",
        "expiresAt": "2025-03-08T00:00:00Z",
        "acceptedAt": null,
        "invitedByUid": "user-7"
    })
}

pub fn lock_json(code: &str, locked: bool) -> Value {
    json!({ "isLocked": locked, "canBeUnlocked": locked, "caseCode": code })
}

pub fn case_file_json(uid: &str, key: &str, status: &str) -> Value {
    json!({
        "uid": uid,
        "key": key,
        "status": status,
        "caseCode": "C-1",
        "createdAt": "2025-03-01T10:00:00Z",
        "updatedAt": "2025-03-01T10:00:00Z"
    })
}

pub fn file_page(items: Vec<Value>) -> Value {
    let total = items.len();
    json!({
        "data": items,
        "totalCount": total,
        "totalPages": 1,
        "pageNumber": 0,
        "hasNext": false,
        "hasPrev": false
    })
}

pub fn comment_json(uid: &str, content: &str) -> Value {
    json!({
        "uid": uid,
        "createdAt": "2025-03-02T10:00:00Z",
        "createdByUid": "user-7",
        "createdByName": "Maria Lopez",
        "content": content
    })
}

pub fn history_json(uid: &str, event: &str) -> Value {
    json!({
        "uid": uid,
        "createdAt": "2025-03-02T10:00:00Z",
        "actorUid": "user-7",
        "actorFullName": "Maria Lopez",
        "eventType": event,
        "actionDescription": format!("{event} on C-1")
    })
}
