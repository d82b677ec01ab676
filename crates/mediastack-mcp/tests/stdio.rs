//! Integration tests for the stdio transport.
//!
//! These spawn the `mediastack-mcp` binary and exchange line-delimited
//! JSON-RPC messages over its pipes.

use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Read, Write};
use std::process::{Child, ChildStdout, Command, Stdio};
use std::time::{Duration, Instant};

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mediastack-mcp"));
    cmd.env_remove("MEDIASTACK_API_KEY")
        .env_remove("MEDIASTACK_BASE_URL")
        .env("RUST_LOG", "info")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

/// Kills the child on drop so a failing test does not leak processes.
struct ProcessGuard {
    child: Option<Child>,
    stdout: Option<BufReader<ChildStdout>>,
}

impl ProcessGuard {
    fn spawn(mut cmd: Command) -> Self {
        let mut child = cmd.spawn().expect("failed to spawn mediastack-mcp");
        let stdout = child.stdout.take().map(BufReader::new);
        Self {
            child: Some(child),
            stdout,
        }
    }

    fn child_mut(&mut self) -> &mut Child {
        self.child.as_mut().expect("child taken")
    }

    fn send_line(&mut self, line: &str) {
        let stdin = self
            .child_mut()
            .stdin
            .as_mut()
            .expect("child process should have stdin piped");
        writeln!(stdin, "{}", line).expect("failed to write request");
        stdin.flush().expect("failed to flush request");
    }

    fn read_response(&mut self) -> Value {
        let mut line = String::new();
        self.stdout
            .as_mut()
            .expect("stdout taken")
            .read_line(&mut line)
            .expect("failed to read response");
        serde_json::from_str(&line)
            .unwrap_or_else(|e| panic!("stdout line is not JSON ({}): {:?}", e, line))
    }

    fn request(&mut self, request: Value) -> Value {
        self.send_line(&request.to_string());
        self.read_response()
    }

    /// Close stdin and wait for a clean exit, returning stderr.
    fn finish(mut self) -> String {
        let child = self.child_mut();
        drop(child.stdin.take());

        let start = Instant::now();
        let status = loop {
            match child.try_wait().expect("failed to check server status") {
                Some(status) => break status,
                None => {
                    if start.elapsed() > Duration::from_secs(5) {
                        panic!("server did not exit within timeout");
                    }
                    std::thread::sleep(Duration::from_millis(10));
                }
            }
        };
        assert!(status.success(), "server exited with error: {:?}", status);

        let mut stderr = String::new();
        if let Some(mut pipe) = child.stderr.take() {
            pipe.read_to_string(&mut stderr).ok();
        }
        stderr
    }
}

impl Drop for ProcessGuard {
    fn drop(&mut self) {
        if let Some(mut c) = self.child.take() {
            let _ = c.kill();
            let _ = c.wait();
        }
    }
}

#[test]
fn test_initialize_and_stderr_isolation() {
    let mut server = ProcessGuard::spawn(command());

    let response = server.request(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {}
    }));

    assert_eq!(response["jsonrpc"], "2.0");
    assert_eq!(response["id"], 1);
    assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(response["result"]["serverInfo"]["name"], "mediastack");
    assert!(response["result"]["capabilities"]["tools"].is_object());

    let stderr = server.finish();
    assert!(stderr.contains("MCP server initialized"));
    assert!(!response.to_string().contains("MCP server initialized"));
}

#[test]
fn test_tools_list_without_api_key() {
    let mut server = ProcessGuard::spawn(command());

    let response = server.request(json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}));
    let tools = response["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
    assert_eq!(names, vec!["get_latest_news", "get_sources"]);
    assert!(tools[0]["inputSchema"]["properties"]["keywords"].is_object());

    server.finish();
}

#[test]
fn test_tool_call_without_api_key_is_tool_failure() {
    let mut server = ProcessGuard::spawn(command());

    let response = server.request(json!({
        "jsonrpc": "2.0",
        "id": 3,
        "method": "tools/call",
        "params": {"name": "get_latest_news", "arguments": {"keywords": "rust"}}
    }));

    assert!(response.get("error").is_none());
    assert_eq!(response["result"]["isError"], true);
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    let payload: Value = serde_json::from_str(text).unwrap();
    assert_eq!(payload["error"]["kind"], "configuration_error");

    // The server keeps serving after a tool failure.
    let response = server.request(json!({"jsonrpc": "2.0", "id": 4, "method": "ping"}));
    assert_eq!(response["id"], 4);

    server.finish();
}

#[test]
fn test_protocol_errors() {
    let mut server = ProcessGuard::spawn(command());

    server.send_line("{this is not json");
    let response = server.read_response();
    assert_eq!(response["id"], Value::Null);
    assert_eq!(response["error"]["code"], -32700);

    let response = server.request(json!({"jsonrpc": "1.0", "id": 5, "method": "ping"}));
    assert_eq!(response["error"]["code"], -32600);

    let response = server.request(json!({
        "jsonrpc": "2.0",
        "id": 6,
        "method": "tools/call",
        "params": {"name": "get_weather", "arguments": {}}
    }));
    assert_eq!(response["error"]["code"], -32601);
    assert_eq!(response["error"]["message"], "Unknown tool: get_weather");

    server.finish();
}

#[test]
fn test_notification_produces_no_output() {
    let mut server = ProcessGuard::spawn(command());

    server.send_line(&json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string());
    // The next line on stdout must be the ping response, not a reply to the notification.
    let response = server.request(json!({"jsonrpc": "2.0", "id": 7, "method": "ping"}));
    assert_eq!(response["id"], 7);
    assert_eq!(response["result"], json!({}));

    server.finish();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_tool_call_against_mock_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/sources"))
        .and(query_param("access_key", "stdio-test-key"))
        .and(query_param("countries", "de"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": [{"name": "Spiegel"}]})),
        )
        .expect(1)
        .mount(&upstream)
        .await;

    let mut cmd = command();
    cmd.env("MEDIASTACK_API_KEY", "stdio-test-key")
        .env("MEDIASTACK_BASE_URL", format!("{}/v1", upstream.uri()));
    let mut server = ProcessGuard::spawn(cmd);

    let response = server.request(json!({
        "jsonrpc": "2.0",
        "id": 8,
        "method": "tools/call",
        "params": {"name": "get_sources", "arguments": {"countries": "de"}}
    }));

    assert_eq!(response["result"]["isError"], false);
    assert_eq!(
        response["result"]["structuredContent"]["data"][0]["name"],
        "Spiegel"
    );

    let stderr = server.finish();
    assert!(!stderr.contains("stdio-test-key"));
}
