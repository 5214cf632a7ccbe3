//! Cached reads and write-side invalidation through `CaseDesk`.

mod support;

use desk_client::InvitationFeed;
use desk_client::invitations::InvitationFilter;
use desk_client::service::OverviewPages;
use desk_core::entities::CaseFile;
use desk_core::page::PageRequest;
use pretty_assertions::assert_eq;
use serde_json::json;
use support::{
    case_file_json, case_json, comment_json, desk, file_page, history_json, invitation_json,
    lock_json, offset_page,
};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn repeated_reads_share_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/cases/C-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(case_json("C-1", None)))
        .expect(1)
        .mount(&server)
        .await;

    let desk = desk(&server);
    let (a, b) = tokio::join!(desk.case("C-1"), desk.case("C-1"));
    assert_eq!(a.unwrap().code, "C-1");
    assert_eq!(b.unwrap().code, "C-1");
    desk.case("C-1").await.unwrap();
}

#[tokio::test]
async fn comment_add_invalidates_comments_and_history() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/cases/C-1/comments"))
        .and(query_param("sort", "createdAt,asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(offset_page(vec![])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/cases/C-1/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [],
            "totalCount": 0,
            "totalPages": 0,
            "pageNumber": 0,
            "hasNext": false,
            "hasPrev": false
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/cases/C-1/comments"))
        .and(body_json(json!({ "content": "Please re-scan" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "uid": "cm-1",
            "createdAt": "2025-03-02T10:00:00Z",
            "createdByUid": "user-7",
            "createdByName": "Maria Lopez",
            "content": "Please re-scan"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let desk = desk(&server);
    let page = PageRequest::first(10);
    let sort = "createdAt".parse().unwrap();

    desk.comments("C-1", page, Some(&sort)).await.unwrap();
    desk.case_files("C-1", page).await.unwrap();

    desk.add_comment("C-1", "  Please re-scan ").await.unwrap();

    desk.comments("C-1", page, Some(&sort)).await.unwrap();
    desk.case_files("C-1", page).await.unwrap();
}

#[tokio::test]
async fn final_status_blocks_approve_and_reject() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/cases/C-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(case_json("C-1", Some("APPROVED"))),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/cases/C-1/status"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let desk = desk(&server);
    let err = desk.approve("C-1").await.unwrap_err();
    assert_eq!(err.to_string(), "case C-1: is already Approved");
    assert!(desk.reject("C-1").await.is_err());
}

#[tokio::test]
async fn custom_status_allows_approve() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/cases/C-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(case_json("C-1", Some("On hold"))),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/cases/C-1/status"))
        .and(body_json(json!({ "status": "APPROVED" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    desk(&server).approve("C-1").await.unwrap();
}

#[tokio::test]
async fn blank_custom_status_is_rejected_locally() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let err = desk(&server)
        .set_custom_status("C-1", "   ")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Status cannot be empty"));
}

#[tokio::test]
async fn sending_an_invitation_resets_the_feed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/invitations"))
        .and(body_json(json!({ "email": "new@example.com" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(invitation_json("new")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/invitations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [invitation_json("new"), invitation_json("old")],
            "nextCursor": null,
            "hasMore": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let desk = desk(&server);
    let mut feed = InvitationFeed::new(InvitationFilter::default(), 10);
    feed.apply(
        Some("c2"),
        serde_json::from_value(json!({
            "items": [invitation_json("stale")],
            "nextCursor": "c3",
            "hasMore": true
        }))
        .unwrap(),
    );

    let sent = desk
        .send_invitation(" new@example.com ", &mut feed)
        .await
        .unwrap();
    assert_eq!(sent.invitation.uid, "new");
    assert!(sent.reload.is_ok());

    let uids: Vec<&str> = feed.items().iter().map(|i| i.uid.as_str()).collect();
    assert_eq!(uids, vec!["new", "old"]);
    assert_eq!(feed.next_cursor(), None);
}

#[tokio::test]
async fn accepting_a_non_pending_invitation_sends_nothing() {
    let server = MockServer::start().await;
    let mut accepted = invitation_json("inv-1");
    accepted["status"] = json!("ACCEPTED");
    Mock::given(method("GET"))
        .and(path("/v1/invitations/inv-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(accepted))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/invitations/inv-1/accept"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let err = desk(&server)
        .accept_invitation("inv-1", "longenough", "longenough")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("can no longer be accepted"));
}

#[tokio::test]
async fn failed_reload_after_send_still_reports_the_invitation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/invitations"))
        .respond_with(ResponseTemplate::new(201).set_body_json(invitation_json("new")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/invitations"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({ "message": "down" })))
        .expect(1)
        .mount(&server)
        .await;

    let desk = desk(&server);
    let mut feed = InvitationFeed::new(InvitationFilter::default(), 10);
    let sent = desk
        .send_invitation("new@example.com", &mut feed)
        .await
        .unwrap();

    assert_eq!(sent.invitation.uid, "new");
    assert_eq!(
        sent.reload.unwrap_err().to_string(),
        "down (Service Unavailable)"
    );
    assert!(feed.items().is_empty());
}

#[tokio::test]
async fn deleting_files_stops_at_first_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/cases/C-1/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(file_page(vec![])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/cases/C-1/files/f-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/cases/C-1/files/f-2"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/cases/C-1/files/f-3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let desk = desk(&server);
    let page = PageRequest::first(10);
    desk.case_files("C-1", page).await.unwrap();

    let uids = vec!["f-1".to_string(), "f-2".to_string(), "f-3".to_string()];
    let err = desk.delete_files("C-1", &uids).await.unwrap_err();
    assert_eq!(err.to_string(), "boom (Server Error)");

    // f-1 was deleted, so the cached page is stale.
    desk.case_files("C-1", page).await.unwrap();
}

#[tokio::test]
async fn case_overview_loads_each_section_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/cases/C-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(case_json("C-1", None)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/cases/C-1/lock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lock_json("C-1", true)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/cases/C-1/files"))
        .and(query_param("size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(file_page(vec![
            case_file_json("f-1", "scans/upper.stl", "UPLOADED"),
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/cases/C-1/comments"))
        .and(query_param("sort", "createdAt,asc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(offset_page(vec![comment_json("cm-1", "Looks good")])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/cases/C-1/history"))
        .and(query_param("size", "50"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(offset_page(vec![history_json("h-1", "CASE_LOCKED")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let desk = desk(&server);
    let pages = OverviewPages {
        files: PageRequest::first(10),
        comments: PageRequest::first(10),
        comment_sort: Some("createdAt".parse().unwrap()),
        history: PageRequest::first(50),
    };

    let overview = desk.case_overview("C-1", &pages).await.unwrap();
    assert_eq!(overview.case.code, "C-1");
    assert!(overview.lock.is_locked);
    assert_eq!(overview.files.items[0].file_name(), "upper.stl");
    assert_eq!(overview.comments.items[0].content, "Looks good");
    assert_eq!(overview.history.items[0].event_type, "CASE_LOCKED");

    let again = desk.case_overview("C-1", &pages).await.unwrap();
    assert_eq!(again.files.items.len(), 1);
}

#[tokio::test]
async fn lock_and_unlock_refetch_case_and_lock_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/cases/C-1/lock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lock_json("C-1", false)))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/cases/C-1/lock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lock_json("C-1", true)))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/cases/C-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(case_json("C-1", None)))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/cases/C-1/lock"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/cases/C-1/lock"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let desk = desk(&server);
    assert!(!desk.case_lock("C-1").await.unwrap().is_locked);
    desk.case("C-1").await.unwrap();

    desk.lock_case("C-1").await.unwrap();
    assert!(desk.case_lock("C-1").await.unwrap().is_locked);
    desk.case("C-1").await.unwrap();
    // Cached until the next write.
    assert!(desk.case_lock("C-1").await.unwrap().is_locked);

    desk.unlock_case("C-1").await.unwrap();
    desk.case_lock("C-1").await.unwrap();
}

fn case_files(values: Vec<serde_json::Value>) -> Vec<CaseFile> {
    values
        .into_iter()
        .map(|v| serde_json::from_value(v).unwrap())
        .collect()
}

async fn mount_download(server: &MockServer, uid: &str, key: &str, body: &'static [u8]) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/cases/C-1/files/{uid}/download-url")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uid": uid,
            "filePath": key,
            "url": format!("{}/storage/{uid}", server.uri()),
            "expiresIn": 60
        })))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/storage/{uid}")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn download_skips_pending_files() {
    let server = MockServer::start().await;
    mount_download(&server, "f-1", "scans/upper.stl", b"upper").await;
    mount_download(&server, "f-3", "scans/bite.stl", b"bite").await;
    Mock::given(method("GET"))
        .and(path("/v1/cases/C-1/files/f-2/download-url"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let files = case_files(vec![
        case_file_json("f-1", "scans/upper.stl", "UPLOADED"),
        case_file_json("f-2", "scans/lower.stl", "PENDING"),
        case_file_json("f-3", "scans/bite.stl", "REUPLOAD"),
    ]);
    let dir = tempfile::TempDir::new().unwrap();
    let report = desk(&server)
        .download_files("C-1", &files, dir.path())
        .await
        .unwrap();

    assert_eq!(report.skipped_pending, 1);
    assert_eq!(
        report.written,
        vec![dir.path().join("upper.stl"), dir.path().join("bite.stl")]
    );
    assert_eq!(std::fs::read(dir.path().join("bite.stl")).unwrap(), b"bite");
}

#[tokio::test]
async fn download_with_clashing_names_requests_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let files = case_files(vec![
        case_file_json("f-1", "scans/upper.stl", "UPLOADED"),
        case_file_json("f-2", "rescans/upper.stl", "UPLOADED"),
    ]);
    let dir = tempfile::TempDir::new().unwrap();
    let err = desk(&server)
        .download_files("C-1", &files, dir.path())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("would both download as 'upper.stl'"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
