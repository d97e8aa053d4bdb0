//! Tests for resource listings

use super::issues::encode_project;
use super::*;
use crate::error::Error;
use crate::http::{HttpClient, HttpClientConfig};
use crate::types::SortOrder;
use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder().base_url(server.uri()).build();
    HttpClient::with_config(config).unwrap()
}

fn project_json(id: u64) -> Value {
    json!({
        "id": id,
        "name": format!("project-{id}"),
        "path_with_namespace": format!("group/project-{id}"),
        "web_url": format!("https://gitlab.example.com/group/project-{id}"),
        "created_at": "2024-01-15T10:30:00.000Z",
        "visibility": "private"
    })
}

fn ids(projects: &[Project]) -> Vec<u64> {
    projects.iter().map(|p| p.id).collect()
}

// ============================================================================
// ListOptions Tests
// ============================================================================

#[test]
fn test_list_options_empty() {
    assert!(ListOptions::new().to_query().is_empty());
}

#[test]
fn test_list_options_offset_query() {
    let query = ListOptions::new()
        .per_page(20)
        .order_by("created_at")
        .sort(SortOrder::Asc)
        .param("archived", false)
        .to_query();

    assert_eq!(
        query,
        vec![
            ("per_page".to_string(), "20".to_string()),
            ("order_by".to_string(), "created_at".to_string()),
            ("sort".to_string(), "asc".to_string()),
            ("archived".to_string(), "false".to_string()),
        ]
    );
}

#[test]
fn test_list_options_keyset_defaults_order_by() {
    let query = ListOptions::new().keyset().to_query();

    assert_eq!(
        query,
        vec![
            ("pagination".to_string(), "keyset".to_string()),
            ("order_by".to_string(), "id".to_string()),
        ]
    );
}

#[test]
fn test_encode_project() {
    assert_eq!(encode_project("42"), "42");
    assert_eq!(encode_project("group/sub/project"), "group%2Fsub%2Fproject");
}

#[test]
fn test_project_deserialize_minimal() {
    let project: Project = serde_json::from_value(json!({
        "id": 1,
        "name": "demo",
        "path_with_namespace": "me/demo",
        "web_url": "https://gitlab.example.com/me/demo",
        "unknown_field": {"ignored": true}
    }))
    .unwrap();

    assert_eq!(project.id, 1);
    assert!(!project.archived);
    assert!(project.created_at.is_none());
}

// ============================================================================
// Listing Tests
// ============================================================================

#[tokio::test]
async fn test_projects_offset_collect() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-page", "2")
                .insert_header("x-per-page", "2")
                .set_body_json(json!([project_json(3)])),
        )
        .with_priority(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param("per_page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-page", "1")
                .insert_header("x-per-page", "2")
                .insert_header("x-next-page", "2")
                .set_body_json(json!([project_json(1), project_json(2)])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let projects = Projects::new(client_for(&mock_server));
    let all = projects
        .list(&ListOptions::new().per_page(2))
        .collect()
        .await
        .unwrap();

    assert_eq!(ids(&all), vec![1, 2, 3]);
    assert_eq!(all[0].visibility.as_deref(), Some("private"));
}

#[tokio::test]
async fn test_projects_keyset_scan() {
    let mock_server = MockServer::start().await;
    let next = format!(
        "{}/projects?id_after=2&order_by=id&pagination=keyset&per_page=2&sort=asc",
        mock_server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param("id_after", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([project_json(3)])))
        .with_priority(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param("pagination", "keyset"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", format!("<{next}>; rel=\"next\"").as_str())
                .set_body_json(json!([project_json(1), project_json(2)])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let projects = Projects::new(client_for(&mock_server));
    let options = ListOptions::new().keyset().per_page(2).sort(SortOrder::Asc);
    let (stream, outcome) = projects.list(&options).scan();

    let seen: Vec<Project> = stream.collect().await;

    assert_eq!(ids(&seen), vec![1, 2, 3]);
    assert!(outcome.err().is_ok());
}

#[tokio::test]
async fn test_server_error_on_second_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .with_priority(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-next-page", "2")
                .set_body_json(json!([project_json(1)])),
        )
        .mount(&mock_server)
        .await;

    let list = Projects::new(client_for(&mock_server)).list(&ListOptions::new());

    // scan: prefix, then the error through the outcome
    let (stream, outcome) = list.scan();
    let seen: Vec<Project> = stream.collect().await;
    assert_eq!(ids(&seen), vec![1]);
    assert!(matches!(
        outcome.err(),
        Err(Error::HttpStatus { status: 500, .. })
    ));

    // scan2: prefix, then exactly one error element
    let paired: Vec<_> = list.scan2().collect().await;
    assert_eq!(paired.len(), 2);
    assert_eq!(paired[0].as_ref().unwrap().id, 1);
    assert!(matches!(paired[1], Err(Error::HttpStatus { status: 500, .. })));

    // collect: the error only
    assert!(list.collect().await.is_err());
}

#[tokio::test]
async fn test_take_does_not_request_next_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([project_json(3)])))
        .with_priority(1)
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-next-page", "2")
                .set_body_json(json!([project_json(1), project_json(2)])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let list = Projects::new(client_for(&mock_server)).list(&ListOptions::new());
    let first_two: Vec<_> = list.scan2().take(2).collect().await;

    assert_eq!(first_two.len(), 2);
    assert!(first_two.iter().all(Result::is_ok));
}

#[tokio::test]
async fn test_issues_list_in_state() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/group%2Fproject/issues"))
        .and(query_param("state", "closed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 100,
                "iid": 1,
                "project_id": 7,
                "title": "Crash on start",
                "state": "closed",
                "labels": ["bug"],
                "created_at": "2024-03-01T08:00:00Z"
            }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let issues = Issues::new(client_for(&mock_server));
    let list = issues.list_in_state("group/project", IssueState::Closed, &ListOptions::new());
    assert_eq!(list.path(), "projects/group%2Fproject/issues");

    let all = list.collect().await.unwrap();

    assert_eq!(all.len(), 1);
    assert_eq!(all[0].iid, 1);
    assert_eq!(all[0].labels, vec!["bug".to_string()]);
}

#[tokio::test]
async fn test_list_membership_adds_membership_filter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param("membership", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([project_json(9)])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let projects = Projects::new(client_for(&mock_server));
    let all = projects
        .list_membership(&ListOptions::new())
        .collect()
        .await
        .unwrap();

    assert_eq!(ids(&all), vec![9]);
}

#[test]
fn test_list_owned_sends_owned_filter() {
    let client = HttpClient::new().unwrap();
    let list = Projects::new(client).list_owned(&ListOptions::new().per_page(5));

    assert_eq!(
        list.query(),
        &vec![
            ("per_page".to_string(), "5".to_string()),
            ("owned".to_string(), "true".to_string()),
        ]
    );
    assert!(!list.query().iter().any(|(k, _)| k == "membership"));
}
