//! Integration tests for the typed admin API client
//!
//! Runs every port method against a wiremock backend and checks the request
//! shape as well as the decoded response.

use serde_json::json;
use wadash_core::{AccessPort, AllowlistPort, DataPort, ExportPort, SessionPort};
use wadash_domain::{AccessGrant, ApiConfig, DashError, ListQuery, SessionStatus};
use wadash_infra::ApiClient;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer, retries: u32) -> ApiClient {
    ApiClient::new(ApiConfig {
        base_url: server.uri(),
        api_key: "admin-key".into(),
        timeout_ms: 2_000,
        retries,
        backoff_unit_ms: 5,
    })
    .expect("client builds")
}

fn message_page() -> serde_json::Value {
    json!({
        "data": [{
            "id": "m1",
            "timestamp": "2026-01-04T10:00:00Z",
            "group_id": "g1@g.us",
            "group_name": "Runners",
            "sender_phone": "15551234567",
            "sender_name": "Ana",
            "message_text": "Morning run at 7",
            "media_urls": null,
            "media_type": null,
            "has_media": "False",
            "created_at": "2026-01-04T10:00:01Z"
        }],
        "total": 125,
        "page": 2,
        "limit": 50,
        "pages": 3
    })
}

#[tokio::test]
async fn empty_search_is_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/messages"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "50"))
        .and(query_param_is_missing("search"))
        .and(query_param_is_missing("group_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(message_page()))
        .expect(1)
        .mount(&server)
        .await;

    let query = ListQuery::messages().page(2).search("");
    let page = client(&server, 0).messages(&query).await.expect("messages");

    assert_eq!(page.page_count, 3);
    assert!(!page.items[0].has_media);
    assert!(page.is_consistent());

    let requests = server.received_requests().await.expect("recorded");
    assert_eq!(requests[0].url.query(), Some("page=2&limit=50"));
}

#[tokio::test]
async fn repeated_fetch_is_stable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(message_page()))
        .expect(2)
        .mount(&server)
        .await;

    let api = client(&server, 0);
    let query = ListQuery::messages().page(2);
    let first = api.messages(&query).await.expect("first");
    let second = api.messages(&query).await.expect("second");
    assert_eq!(first, second);
}

#[tokio::test]
async fn contacts_never_send_group_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/contacts"))
        .and(query_param("search", "ana"))
        .and(query_param_is_missing("group_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "phone": "15551234567",
                "name": "Ana",
                "message_count": "4",
                "groups": "Runners, Chess"
            }],
            "total": 1, "page": 1, "limit": 50, "pages": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = ListQuery::contacts().search("ana").group("g1@g.us");
    let page = client(&server, 0).contacts(&query).await.expect("contacts");
    assert_eq!(page.items[0].message_count, 4);
}

#[tokio::test]
async fn members_send_group_filter_and_read_summary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/group-members"))
        .and(query_param("group_id", "g1@g.us"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"phone": "1", "group_id": "g1@g.us", "role": "superadmin"}],
            "total": 1, "page": 1, "limit": 100, "pages": 1,
            "groups_summary": [{"group_id": "g1@g.us", "group_name": "Runners", "member_count": 1}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let members =
        client(&server, 0).group_members(&ListQuery::members().group("g1@g.us")).await.unwrap();
    assert_eq!(members.page.items.len(), 1);
    assert_eq!(members.groups_summary[0].group_name, "Runners");
}

#[tokio::test]
async fn stats_retries_twice_regardless_of_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let err = client(&server, 0).stats().await.unwrap_err();
    assert_eq!(err, DashError::Api { status: 503, message: "Service Unavailable".into() });
}

#[tokio::test]
async fn health_is_unauthenticated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "circuit_breakers": {"waha": "closed"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let report = client(&server, 0).health().await.expect("health");
    assert_eq!(report.status.as_deref(), Some("ok"));

    let requests = server.received_requests().await.expect("recorded");
    assert!(requests[0].headers.get("x-api-key").is_none());
}

#[tokio::test]
async fn session_state_and_empty_control_reply() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/session"))
        .and(header("x-api-key", "admin-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "default",
            "status": "WORKING",
            "me": {"id": "15551234567@c.us", "pushName": "Ops"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/session/stop"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server, 0);
    let state = api.session().await.expect("session");
    assert_eq!(state.status, SessionStatus::Working);
    assert_eq!(state.phone(), Some("15551234567"));

    let reply = api.stop_session().await.expect("stop");
    assert!(reply.is_empty());
}

#[tokio::test]
async fn qr_code_is_raw_bytes() {
    let server = MockServer::start().await;
    let png = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a];
    Mock::given(method("GET"))
        .and(path("/api/session/qr"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png.clone(), "image/png"))
        .mount(&server)
        .await;

    assert_eq!(client(&server, 0).qr_code().await.expect("qr"), png);
}

#[tokio::test]
async fn add_filter_group_posts_entry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/filter/groups"))
        .and(body_json(json!({
            "group_id": "g1@g.us",
            "group_name": "Runners",
            "notes": "Added from discovery"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "message": "Group added"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ack = client(&server, 0)
        .add_filter_group("g1@g.us", "Runners", "Added from discovery")
        .await
        .expect("add");
    assert!(ack.success);
    assert_eq!(ack.message, "Group added");
}

#[tokio::test]
async fn remove_filter_group_encodes_id_and_hard_deletes() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/filter/groups/120363%40g.us"))
        .and(query_param("hard_delete", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let ack = client(&server, 0).remove_filter_group("120363@g.us").await.expect("remove");
    assert!(ack.success);
}

#[tokio::test]
async fn remove_missing_group_surfaces_detail() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Group not found"})),
        )
        .mount(&server)
        .await;

    let err = client(&server, 0).remove_filter_group("nope").await.unwrap_err();
    assert_eq!(err.user_message(), "Group not found");
}

#[tokio::test]
async fn sheet_copy_omits_unset_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/export/group-members/sheet"))
        .and(body_json(json!({"tab_name": "Members"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Copied 12 rows",
            "tab_name": "Members",
            "row_count": 12
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server, 0)
        .copy_group_members_to_sheet(None, Some("Members"))
        .await
        .expect("sheet copy");
    assert_eq!(result.row_count, 12);
}

#[tokio::test]
async fn csv_export_uses_server_filename() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/export/group-members/csv"))
        .and(query_param("group_id", "g1@g.us"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-disposition", "attachment; filename=\"runners.csv\"")
                .set_body_raw("phone,name\n1,Ana\n", "text/csv"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("temp dir");
    let written = client(&server, 0)
        .export_group_members_csv(Some("g1@g.us"), dir.path())
        .await
        .expect("export");

    assert_eq!(written, dir.path().join("runners.csv"));
    assert_eq!(std::fs::read_to_string(&written).unwrap(), "phone,name\n1,Ana\n");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn failed_csv_export_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/export/group-members/csv"))
        .and(query_param_is_missing("group_id"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "Export failed"})))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("temp dir");
    let err = client(&server, 0).export_group_members_csv(None, dir.path()).await.unwrap_err();

    assert_eq!(err.user_message(), "Export failed");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn access_status_maps_to_grant() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/access/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "has_access": false,
            "spreadsheet_url": null,
            "email": null,
            "created_at": null
        })))
        .mount(&server)
        .await;

    assert_eq!(client(&server, 0).access_status().await.unwrap(), AccessGrant::NotGranted);
}

#[tokio::test]
async fn partial_access_status_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/access/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"has_access": true, "email": "ops@example.com"})),
        )
        .mount(&server)
        .await;

    let err = client(&server, 0).access_status().await.unwrap_err();
    assert!(matches!(err, DashError::Parse(_)));
}

#[tokio::test]
async fn access_request_posts_email() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/access/request"))
        .and(body_json(json!({"email": "ops@example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Access granted",
            "spreadsheet_url": "https://docs.example/sheet/1",
            "email": "ops@example.com",
            "created_at": "2026-01-04T10:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server, 0).request_sheet_access("  ops@example.com ").await.unwrap();
    assert_eq!(result.spreadsheet_url, "https://docs.example/sheet/1");
}

#[tokio::test]
async fn blank_access_email_is_rejected_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/access/request"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server, 0).request_sheet_access("   ").await.unwrap_err();
    assert!(matches!(err, DashError::InvalidInput(_)));
}

#[tokio::test]
async fn discovery_lists_groups() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/filter/discover"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "groups": [
                {"group_id": "g1@g.us", "group_name": "Runners", "participant_count": 12},
                {"group_id": "g2@g.us", "group_name": null, "participant_count": null}
            ]
        })))
        .mount(&server)
        .await;

    let found = client(&server, 0).discover_groups().await.unwrap();
    assert_eq!(found.groups.len(), 2);
    assert_eq!(found.groups[1].group_name, "");
    assert_eq!(found.groups[1].participant_count, 0);
}
