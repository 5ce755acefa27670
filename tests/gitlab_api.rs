//! HTTP-level tests for the GitLab client, backed by httpmock.

use httpmock::prelude::*;
use serde_json::json;

use glsweep::config::Config;
use glsweep::gitlab::Client;
use glsweep::SweepError;

fn client(server: &MockServer) -> Client {
    Client::new(&Config {
        url: server.base_url(),
        token: "test-token".to_string(),
        ..Config::default()
    })
    .unwrap()
}

#[test]
fn paginated_fetch_unions_all_pages_in_order() {
    let server = MockServer::start();

    let page1 = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v4/projects/g%2Fp/registry/repositories")
            .query_param("page", "1");
        then.status(200)
            .header("x-page", "1")
            .header("x-total-pages", "3")
            .json_body(json!([{"id": 1, "name": "", "path": "g/p", "location": ""}]));
    });
    let page2 = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v4/projects/g%2Fp/registry/repositories")
            .query_param("page", "2");
        then.status(200)
            .header("x-page", "2")
            .header("x-total-pages", "3")
            .json_body(json!([{"id": 2, "name": "x", "path": "g/p/x", "location": ""}]));
    });
    let page3 = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v4/projects/g%2Fp/registry/repositories")
            .query_param("page", "3");
        then.status(200)
            .header("x-page", "3")
            .header("x-total-pages", "3")
            .json_body(json!([{"id": 3, "name": "y", "path": "g/p/y", "location": ""}]));
    });

    let repos = client(&server).registry_repositories("g/p").unwrap();

    let ids: Vec<u64> = repos.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    page1.assert();
    page2.assert();
    page3.assert();
}

#[test]
fn missing_pagination_headers_mean_a_single_page() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v4/projects/g%2Fp/registry/repositories");
        then.status(200)
            .json_body(json!([{"id": 7, "name": "", "path": "g/p", "location": ""}]));
    });

    let repos = client(&server).registry_repositories("g/p").unwrap();
    assert_eq!(repos.len(), 1);
    mock.assert_hits(1);
}

#[test]
fn includes_private_token_header() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v4/runners")
            .header("PRIVATE-TOKEN", "test-token");
        then.status(200).json_body(json!([]));
    });

    client(&server).runners(None).unwrap();
    mock.assert();
}

#[test]
fn api_error_carries_status_and_url() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET)
            .path("/api/v4/projects/g%2Fp/registry/repositories");
        then.status(403).json_body(json!({"message": "403 Forbidden"}));
    });

    let err = client(&server).registry_repositories("g/p").unwrap_err();
    match err {
        SweepError::Api { status, url } => {
            assert_eq!(status, 403);
            assert!(url.contains("/registry/repositories"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn delete_tags_passes_the_policy_through() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(DELETE)
            .path("/api/v4/projects/g%2Fp/registry/repositories/42/tags")
            .query_param("name_regex_delete", "^v.*")
            .query_param("keep_n", "3");
        then.status(202);
    });

    let status = client(&server)
        .delete_tags("g/p", 42, "^v.*", Some(3))
        .unwrap();
    assert_eq!(status, 202);
    mock.assert();
}

#[test]
fn delete_tags_without_keep_sends_no_keep_n() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(DELETE)
            .path("/api/v4/projects/g%2Fp/registry/repositories/42/tags")
            .query_param("name_regex_delete", ".*")
            .query_param_missing("keep_n");
        then.status(202);
    });

    client(&server).delete_tags("g/p", 42, ".*", None).unwrap();
    mock.assert();
}

#[test]
fn runner_listing_is_scoped_server_side() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v4/runners")
            .query_param("scope", "offline");
        then.status(200).json_body(json!([
            {"id": 6, "description": "runner-6", "status": "offline"}
        ]));
    });

    let runners = client(&server).runners(Some("offline")).unwrap();
    assert_eq!(runners.len(), 1);
    assert_eq!(runners[0].id, 6);
    mock.assert();
}
