use plane_api::{ApiClient, ApiError, CommentRequest, IssueRequest, NameResolver};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROJECT: &str = "/workspaces/acme/projects/p-1";

fn client(mock_server: &MockServer) -> ApiClient {
    ApiClient::new(mock_server.uri())
        .unwrap()
        .with_api_key("test-key")
}

async fn mount_states(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("{PROJECT}/states/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"id": "s-1", "name": "Todo", "group": "unstarted"},
                {"id": "s-2", "name": "Done", "group": "completed"}
            ],
            "next_page_results": false
        })))
        .mount(mock_server)
        .await;
}

async fn mount_members(mock_server: &MockServer, calls: u64) {
    Mock::given(method("GET"))
        .and(path(format!("{PROJECT}/members/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "m-1", "display_name": "ana"},
            {"id": "m-2", "display_name": "bo"},
            {"id": "m-3", "display_name": "sam"},
            {"id": "m-4", "display_name": "sam"}
        ])))
        .expect(calls)
        .mount(mock_server)
        .await;
}

fn issue_json() -> serde_json::Value {
    json!({
        "id": "i-1",
        "name": "Ship it",
        "state": "s-2",
        "assignees": ["m-1", "m-2"],
        "project": "p-1"
    })
}

#[tokio::test]
async fn test_state_name_resolves_to_id() {
    let mock_server = MockServer::start().await;
    mount_states(&mock_server).await;

    let client = client(&mock_server);
    let resolver = NameResolver::new(&client, "acme", "p-1");

    assert_eq!(resolver.state_id("Done").await.unwrap(), "s-2");

    let err = resolver.state_id("Archived").await.unwrap_err();
    assert!(err.is_not_found());
    match err.root() {
        ApiError::NotFound { kind, key } => {
            assert_eq!(*kind, "state");
            assert_eq!(key, "Archived");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_state_names_are_case_sensitive() {
    let mock_server = MockServer::start().await;
    mount_states(&mock_server).await;

    let client = client(&mock_server);
    let err = NameResolver::new(&client, "acme", "p-1")
        .state_id("done")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_duplicate_display_name_is_ambiguous() {
    let mock_server = MockServer::start().await;
    mount_members(&mock_server, 1).await;

    let client = client(&mock_server);
    let err = NameResolver::new(&client, "acme", "p-1")
        .member_id("sam")
        .await
        .unwrap_err();

    match err.root() {
        ApiError::AmbiguousName { kind, name, count } => {
            assert_eq!(*kind, "member");
            assert_eq!(name, "sam");
            assert_eq!(*count, 2);
        }
        other => panic!("expected AmbiguousName, got {other:?}"),
    }
    assert!(err.suggestion().is_some());
}

#[tokio::test]
async fn test_create_issue_resolves_names_with_one_member_listing() {
    let mock_server = MockServer::start().await;
    mount_states(&mock_server).await;
    mount_members(&mock_server, 1).await;

    Mock::given(method("POST"))
        .and(path(format!("{PROJECT}/issues/")))
        .and(body_json(json!({
            "name": "Ship it",
            "state": "s-2",
            "assignees": ["m-1", "m-2"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(issue_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = IssueRequest {
        state_name: Some("Done".to_string()),
        assignee_names: vec!["ana".to_string(), "bo".to_string()],
        ..IssueRequest::named("Ship it")
    };
    let issue = client(&mock_server)
        .issues()
        .create("acme", "p-1", &request)
        .await
        .unwrap();

    assert_eq!(issue.state.as_deref(), Some("s-2"));
}

#[tokio::test]
async fn test_explicit_ids_skip_resolution() {
    let mock_server = MockServer::start().await;
    mount_members(&mock_server, 0).await;

    Mock::given(method("GET"))
        .and(path(format!("{PROJECT}/states/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("{PROJECT}/issues/i-1/")))
        .and(body_json(json!({"state": "s-2", "assignees": ["m-1"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(issue_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = IssueRequest {
        state: Some("s-2".to_string()),
        state_name: Some("Todo".to_string()),
        assignees: vec!["m-1".to_string()],
        assignee_names: vec!["bo".to_string()],
        ..IssueRequest::default()
    };
    client(&mock_server)
        .issues()
        .update("acme", "p-1", "i-1", &request)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unknown_state_name_blocks_create() {
    let mock_server = MockServer::start().await;
    mount_states(&mock_server).await;

    Mock::given(method("POST"))
        .and(path(format!("{PROJECT}/issues/")))
        .respond_with(ResponseTemplate::new(201).set_body_json(issue_json()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let request = IssueRequest {
        state_name: Some("Archived".to_string()),
        ..IssueRequest::named("Ship it")
    };
    let err = client(&mock_server)
        .issues()
        .create("acme", "p-1", &request)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("Archived"));
}

#[tokio::test]
async fn test_update_by_sequence_id_resolves_in_issue_project() {
    let mock_server = MockServer::start().await;
    mount_states(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/workspaces/acme/issues/WEB-7/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "i-7",
            "name": "Fix login",
            "project": "p-1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/workspaces/acme/issues/WEB-7/"))
        .and(body_json(json!({"state": "s-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "i-7",
            "name": "Fix login",
            "state": "s-1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = IssueRequest {
        state_name: Some("Todo".to_string()),
        ..IssueRequest::default()
    };
    let issue = client(&mock_server)
        .issues()
        .update_by_sequence_id("acme", "WEB-7", &request)
        .await
        .unwrap();
    assert_eq!(issue.state.as_deref(), Some("s-1"));
}

#[tokio::test]
async fn test_comment_attribution_is_corrected() {
    let mock_server = MockServer::start().await;
    mount_members(&mock_server, 1).await;

    Mock::given(method("POST"))
        .and(path(format!("{PROJECT}/issues/i-1/comments/")))
        .and(body_json(json!({"comment_html": "<p>hi</p>", "created_by": "m-2"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "c-1",
            "comment_html": "<p>hi</p>",
            "created_by": "owner"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("{PROJECT}/issues/i-1/comments/c-1/")))
        .and(body_json(json!({"actor": "m-2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "c-1",
            "comment_html": "<p>hi</p>",
            "created_by": "owner",
            "actor": "m-2"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let comment = client(&mock_server)
        .comments()
        .create(
            "acme",
            "p-1",
            "i-1",
            &CommentRequest::new("<p>hi</p>").by_member("bo"),
        )
        .await
        .unwrap();

    assert_eq!(comment.actor.as_deref(), Some("m-2"));
}

#[tokio::test]
async fn test_comment_kept_when_correction_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{PROJECT}/issues/i-1/comments/")))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "c-1",
            "comment_html": "<p>hi</p>",
            "created_by": "owner"
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("{PROJECT}/issues/i-1/comments/c-1/")))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"error": "not allowed"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = CommentRequest {
        member_id: Some("m-2".to_string()),
        ..CommentRequest::new("<p>hi</p>")
    };
    let comment = client(&mock_server)
        .comments()
        .create("acme", "p-1", "i-1", &request)
        .await
        .unwrap();

    assert_eq!(comment.id, "c-1");
    assert_eq!(comment.created_by.as_deref(), Some("owner"));
    assert!(comment.actor.is_none());
}

#[tokio::test]
async fn test_comment_without_author_is_not_patched() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{PROJECT}/issues/i-1/comments/")))
        .and(body_json(json!({"comment_html": "<p>hi</p>"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "c-1",
            "comment_html": "<p>hi</p>",
            "created_by": "owner"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("{PROJECT}/issues/i-1/comments/c-1/")))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    client(&mock_server)
        .comments()
        .create("acme", "p-1", "i-1", &CommentRequest::new("<p>hi</p>"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_comment_update_sends_actor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path(format!("{PROJECT}/issues/i-1/comments/c-1/")))
        .and(body_json(json!({"comment_html": "<p>edited</p>", "actor": "m-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "c-1",
            "comment_html": "<p>edited</p>",
            "actor": "m-1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = CommentRequest {
        member_id: Some("m-1".to_string()),
        ..CommentRequest::new("<p>edited</p>")
    };
    let comment = client(&mock_server)
        .comments()
        .update("acme", "p-1", "i-1", "c-1", &request)
        .await
        .unwrap();
    assert_eq!(comment.comment_html, "<p>edited</p>");
}
