use plane_api::{
    ApiClient, CreateProject, CycleRequest, IssueRequest, LabelRequest, LinkRequest,
    ModuleRequest, PageQuery, StateRequest, UpdateProject, WorklogRequest,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROJECT: &str = "/workspaces/acme/projects/p-1";

fn client(mock_server: &MockServer) -> ApiClient {
    ApiClient::new(mock_server.uri())
        .unwrap()
        .with_api_key("test-key")
}

fn project_json() -> serde_json::Value {
    json!({
        "id": "p-1",
        "name": "Website",
        "identifier": "WEB",
        "description": "Marketing site",
        "workspace": "w-1",
        "created_at": "2024-05-01T09:30:00Z"
    })
}

#[tokio::test]
async fn test_create_then_get_project() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/workspaces/acme/projects/"))
        .and(body_json(json!({
            "name": "Website",
            "identifier": "WEB",
            "description": "Marketing site"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(project_json()))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/workspaces/acme/projects/p-1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_json()))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let created = client
        .projects()
        .create(
            "acme",
            &CreateProject {
                name: "Website".to_string(),
                identifier: "WEB".to_string(),
                description: Some("Marketing site".to_string()),
            },
        )
        .await
        .unwrap();
    let fetched = client.projects().get("acme", &created.id).await.unwrap();

    assert_eq!(created, fetched);
    assert_eq!(fetched.identifier, "WEB");
    assert!(fetched.created_at.is_some());
}

#[tokio::test]
async fn test_patch_sends_only_supplied_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/workspaces/acme/projects/p-1/"))
        .and(body_json(json!({"name": "Web"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p-1",
            "name": "Web",
            "identifier": "WEB",
            "description": "Marketing site"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let updated = client(&mock_server)
        .projects()
        .update(
            "acme",
            "p-1",
            &UpdateProject {
                name: Some("Web".to_string()),
                description: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Web");
    assert_eq!(updated.description.as_deref(), Some("Marketing site"));
}

#[tokio::test]
async fn test_get_after_delete_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{PROJECT}/issues/i-1/")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{PROJECT}/issues/i-1/")))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Issue does not exist"})),
        )
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    client.issues().delete("acme", "p-1", "i-1").await.unwrap();

    let err = client.issues().get("acme", "p-1", "i-1").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.api_message(), Some("Issue does not exist"));
}

#[tokio::test]
async fn test_empty_lists_in_both_shapes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{PROJECT}/cycles/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{PROJECT}/modules/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [],
            "total_count": 0,
            "next_page_results": false
        })))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    assert!(client.cycles().list("acme", "p-1").await.unwrap().is_empty());
    assert!(client.modules().list("acme", "p-1").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_issue_list_unwraps_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{PROJECT}/issues/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"id": "i-1", "name": "Fix login", "sequence_id": 1, "assignees": ["m-1"]},
                {"id": "i-2", "name": "Ship it", "sequence_id": 2, "labels": null}
            ],
            "total_count": 2,
            "next_cursor": "100:1:0",
            "next_page_results": false
        })))
        .mount(&mock_server)
        .await;

    let issues = client(&mock_server)
        .issues()
        .list("acme", "p-1")
        .await
        .unwrap();

    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].assignees, vec!["m-1"]);
    assert!(issues[1].labels.is_empty());
}

#[tokio::test]
async fn test_list_page_passes_cursor_and_returns_next() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{PROJECT}/issues/")))
        .and(query_param("per_page", "1"))
        .and(query_param("cursor", "1:0:0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": "i-1", "name": "Fix login"}],
            "total_count": 3,
            "next_cursor": "1:1:0",
            "next_page_results": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let page = client(&mock_server)
        .issues()
        .list_page("acme", "p-1", &PageQuery::new().per_page(1).cursor("1:0:0"))
        .await
        .unwrap();

    assert_eq!(page.results.len(), 1);
    assert_eq!(page.total_count, Some(3));
    assert_eq!(page.next_cursor(), Some("1:1:0"));
}

#[tokio::test]
async fn test_issue_by_sequence_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/workspaces/acme/issues/WEB-42/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "i-42",
            "name": "Fix login",
            "sequence_id": 42,
            "project": "p-1"
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/workspaces/acme/issues/WEB-42/"))
        .and(body_json(json!({"priority": "high"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "i-42",
            "name": "Fix login",
            "priority": "high"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let issue = client
        .issues()
        .get_by_sequence_id("acme", "WEB-42")
        .await
        .unwrap();
    assert_eq!(issue.sequence_id, Some(42));

    let request = IssueRequest {
        priority: Some("high".to_string()),
        ..IssueRequest::default()
    };
    let updated = client
        .issues()
        .update_by_sequence_id("acme", "WEB-42", &request)
        .await
        .unwrap();
    assert_eq!(updated.priority.as_deref(), Some("high"));

    // Only the PATCH went out; no names meant no lookup.
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_cycle_issue_membership() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{PROJECT}/cycles/c-1/cycle-issues/")))
        .and(body_json(json!({"issues": ["i-1", "i-2"]})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            {"id": "ci-1", "issue": "i-1"},
            {"id": "ci-2", "issue": "i-2"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{PROJECT}/cycles/c-1/cycle-issues/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "i-1", "name": "Fix login"},
            {"id": "i-2", "name": "Ship it"}
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{PROJECT}/cycles/c-1/cycle-issues/i-2/")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let cycles = client.cycles();
    cycles
        .add_issues("acme", "p-1", "c-1", &["i-1".to_string(), "i-2".to_string()])
        .await
        .unwrap();

    let issues = cycles.list_issues("acme", "p-1", "c-1").await.unwrap();
    let ids: Vec<_> = issues.iter().map(|issue| issue.id.as_str()).collect();
    assert_eq!(ids, ["i-1", "i-2"]);

    cycles.remove_issue("acme", "p-1", "c-1", "i-2").await.unwrap();
}

#[tokio::test]
async fn test_module_add_issues_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{PROJECT}/modules/m-1/module-issues/")))
        .and(body_json(json!({"issues": ["i-9"]})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    client(&mock_server)
        .modules()
        .add_issues("acme", "p-1", "m-1", &["i-9".to_string()])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_cycle_with_dates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{PROJECT}/cycles/")))
        .and(body_json(json!({
            "name": "Sprint 1",
            "start_date": "2024-06-01",
            "end_date": "2024-06-14"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "c-1",
            "name": "Sprint 1",
            "start_date": "2024-06-01",
            "end_date": "2024-06-14"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = CycleRequest {
        name: Some("Sprint 1".to_string()),
        start_date: Some("2024-06-01".to_string()),
        end_date: Some("2024-06-14".to_string()),
        ..CycleRequest::default()
    };
    let cycle = client(&mock_server)
        .cycles()
        .create("acme", "p-1", &request)
        .await
        .unwrap();
    assert_eq!(cycle.end_date.as_deref(), Some("2024-06-14"));
}

#[tokio::test]
async fn test_issue_links() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{PROJECT}/issues/i-1/links/")))
        .and(body_json(json!({"title": "Design", "url": "https://example.com/design"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "l-1",
            "title": "Design",
            "url": "https://example.com/design",
            "metadata": {}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let link = client(&mock_server)
        .links()
        .create(
            "acme",
            "p-1",
            "i-1",
            &LinkRequest {
                title: Some("Design".to_string()),
                url: Some("https://example.com/design".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(link.url, "https://example.com/design");
}

#[tokio::test]
async fn test_worklogs_and_totals() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{PROJECT}/issues/i-1/worklogs/")))
        .and(body_json(json!({"description": "review", "duration": 90})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "w-1",
            "description": "review",
            "duration": 90,
            "logged_by": "m-1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{PROJECT}/total-worklogs/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"issue_id": "i-1", "duration": 90},
            {"issue_id": "i-2", "duration": 15.5}
        ])))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let worklog = client
        .worklogs()
        .create(
            "acme",
            "p-1",
            "i-1",
            &WorklogRequest {
                description: Some("review".to_string()),
                duration: Some(90),
            },
        )
        .await
        .unwrap();
    assert_eq!(worklog.duration, 90);

    let totals = client.worklogs().total_time("acme", "p-1").await.unwrap();
    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].issue_id, "i-1");
    assert_eq!(totals[1].duration, 15.5);
}

#[tokio::test]
async fn test_member_get_filters_listing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{PROJECT}/members/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "m-1", "display_name": "ana", "email": "ana@example.com"},
            {"id": "m-2", "display_name": "bo"}
        ])))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let member = client.members().get("acme", "p-1", "m-2").await.unwrap();
    assert_eq!(member.display_name, "bo");

    let err = client
        .members()
        .get("acme", "p-1", "m-404")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("m-404"));
}

#[tokio::test]
async fn test_label_create_get_and_partial_update() {
    let mock_server = MockServer::start().await;
    let label = json!({
        "id": "l-1",
        "name": "bug",
        "color": "#ff5a5f",
        "description": "Something is broken"
    });

    Mock::given(method("POST"))
        .and(path(format!("{PROJECT}/labels/")))
        .and(body_json(json!({
            "name": "bug",
            "color": "#ff5a5f",
            "description": "Something is broken"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(label.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{PROJECT}/labels/l-1/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(label))
        .mount(&mock_server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("{PROJECT}/labels/l-1/")))
        .and(body_json(json!({"color": "#00aa00"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "l-1",
            "name": "bug",
            "color": "#00aa00",
            "description": "Something is broken"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let created = client
        .labels()
        .create(
            "acme",
            "p-1",
            &LabelRequest {
                name: Some("bug".to_string()),
                color: Some("#ff5a5f".to_string()),
                description: Some("Something is broken".to_string()),
                ..LabelRequest::default()
            },
        )
        .await
        .unwrap();
    let fetched = client.labels().get("acme", "p-1", &created.id).await.unwrap();
    assert_eq!(created, fetched);

    let updated = client
        .labels()
        .update(
            "acme",
            "p-1",
            "l-1",
            &LabelRequest {
                color: Some("#00aa00".to_string()),
                ..LabelRequest::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.color.as_deref(), Some("#00aa00"));
    assert_eq!(updated.name, fetched.name);
    assert_eq!(updated.description, fetched.description);
}

#[tokio::test]
async fn test_state_create_get_and_partial_update() {
    let mock_server = MockServer::start().await;
    let state = json!({
        "id": "s-3",
        "name": "In Review",
        "color": "#f59e0b",
        "group": "started"
    });

    Mock::given(method("POST"))
        .and(path(format!("{PROJECT}/states/")))
        .and(body_json(json!({
            "name": "In Review",
            "color": "#f59e0b",
            "group": "started"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(state.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{PROJECT}/states/s-3/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(state))
        .mount(&mock_server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("{PROJECT}/states/s-3/")))
        .and(body_json(json!({"name": "Reviewing"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "s-3",
            "name": "Reviewing",
            "color": "#f59e0b",
            "group": "started"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let created = client
        .states()
        .create(
            "acme",
            "p-1",
            &StateRequest {
                name: Some("In Review".to_string()),
                color: Some("#f59e0b".to_string()),
                group: Some("started".to_string()),
                ..StateRequest::default()
            },
        )
        .await
        .unwrap();
    let fetched = client.states().get("acme", "p-1", &created.id).await.unwrap();
    assert_eq!(created, fetched);

    let updated = client
        .states()
        .update(
            "acme",
            "p-1",
            "s-3",
            &StateRequest {
                name: Some("Reviewing".to_string()),
                ..StateRequest::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Reviewing");
    assert_eq!(updated.group.as_deref(), Some("started"));
}

#[tokio::test]
async fn test_module_lifecycle_and_membership() {
    let mock_server = MockServer::start().await;
    let module = json!({
        "id": "m-1",
        "name": "Checkout",
        "status": "planned",
        "target_date": "2024-07-01"
    });

    Mock::given(method("POST"))
        .and(path(format!("{PROJECT}/modules/")))
        .and(body_json(json!({"name": "Checkout", "status": "planned", "target_date": "2024-07-01"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(module.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{PROJECT}/modules/m-1/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(module))
        .mount(&mock_server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("{PROJECT}/modules/m-1/")))
        .and(body_json(json!({"status": "in-progress"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "m-1",
            "name": "Checkout",
            "status": "in-progress",
            "target_date": "2024-07-01"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{PROJECT}/modules/m-1/module-issues/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": "i-9", "name": "Pay with card"}],
            "next_page_results": false
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{PROJECT}/modules/m-1/module-issues/i-9/")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let modules = client.modules();
    let created = modules
        .create(
            "acme",
            "p-1",
            &ModuleRequest {
                name: Some("Checkout".to_string()),
                status: Some("planned".to_string()),
                target_date: Some("2024-07-01".to_string()),
                ..ModuleRequest::default()
            },
        )
        .await
        .unwrap();
    let fetched = modules.get("acme", "p-1", &created.id).await.unwrap();
    assert_eq!(created, fetched);

    let updated = modules
        .update(
            "acme",
            "p-1",
            "m-1",
            &ModuleRequest {
                status: Some("in-progress".to_string()),
                ..ModuleRequest::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status.as_deref(), Some("in-progress"));
    assert_eq!(updated.target_date, fetched.target_date);

    let issues = modules.list_issues("acme", "p-1", "m-1").await.unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].id, "i-9");

    modules.remove_issue("acme", "p-1", "m-1", "i-9").await.unwrap();
}
