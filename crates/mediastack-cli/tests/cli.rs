use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("mediastack-cli").expect("binary should build");
    cmd.env_remove("MEDIASTACK_API_KEY")
        .env_remove("MEDIASTACK_BASE_URL")
        .env_remove("MEDIASTACK_TIMEOUT_SECS");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("news"))
        .stdout(predicate::str::contains("sources"))
        .stdout(predicate::str::contains("tools"))
        .stdout(predicate::str::contains("mcp"));
}

#[test]
fn test_tools_works_without_api_key() {
    let output = cli().arg("tools").assert().success().get_output().stdout.clone();
    let listed: Value = serde_json::from_slice(&output).expect("tools output is JSON");

    let names: Vec<&str> = listed["tools"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|t| t["name"].as_str())
        .collect();
    assert_eq!(names, vec!["get_latest_news", "get_sources"]);
    assert!(listed["tools"][0]["inputSchema"].is_object());
}

#[test]
fn test_news_without_api_key_fails() {
    cli()
        .args(["news", "--keywords", "rust"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("MEDIASTACK_API_KEY"));
}

#[test]
fn test_invalid_sort_fails_before_credential_lookup() {
    cli()
        .args(["news", "--sort", "relevance"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid sort option"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sources_against_mock_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/sources"))
        .and(query_param("search", "bbc"))
        .and(query_param("limit", "1"))
        .and(query_param("access_key", "cli-test-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": [{"name": "BBC News"}]})),
        )
        .expect(1)
        .mount(&upstream)
        .await;

    let output = cli()
        .env("MEDIASTACK_API_KEY", "cli-test-key")
        .args([
            "sources",
            "--search",
            "bbc",
            "--limit",
            "0",
            "--base-url",
            &format!("{}/v1", upstream.uri()),
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let body: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(body["data"][0]["name"], "BBC News");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upstream_error_exits_non_zero() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"code": "usage_limit_reached", "message": "Monthly usage limit reached."}
        })))
        .mount(&upstream)
        .await;

    cli()
        .env("MEDIASTACK_API_KEY", "cli-test-key")
        .env("MEDIASTACK_BASE_URL", format!("{}/v1", upstream.uri()))
        .arg("news")
        .assert()
        .failure()
        .stderr(predicate::str::contains("usage_limit_reached"));
}
