//! CLI smoke tests: run the binary against a local server and check the
//! snapshot files it writes.

use std::thread;

use predicates::prelude::*;

/// Serves a fixed HTML body for every request and returns the origin.
fn spawn_page_server(body: &'static str) -> String {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("start test server");
    let addr = server.server_addr();
    thread::spawn(move || {
        for request in server.incoming_requests() {
            let _ = request.respond(tiny_http::Response::from_string(body));
        }
    });
    format!("http://{addr}")
}

const PAGE: &str = r#"<html><head>
    <script>var newsCardsData = [{"id": 1, "headline": "Rain delays play"}];</script>
</head><body><div id="root">scoreboard placeholder</div></body></html>"#;

#[test]
fn fast_extraction_writes_homepage_json() {
    let origin = spawn_page_server(PAGE);
    let out_dir = tempfile::tempdir().expect("create temp dir");

    let mut cmd = assert_cmd::Command::cargo_bin("score_mirror").unwrap();
    cmd.args([
        "/",
        "--fast",
        "--origin",
        origin.as_str(),
        "--out",
        out_dir.path().to_str().unwrap(),
        "--delay-ms",
        "0",
        "--log-level",
        "error",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Saved /"));

    let saved = out_dir.path().join("homepage.json");
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&saved).expect("read homepage.json"))
            .expect("valid JSON snapshot");
    assert_eq!(json["fastMode"], true);
    assert_eq!(json["newsCards"][0]["id"], 1);
    assert!(json.get("elements").is_none());
}

#[test]
fn page_path_maps_to_underscored_file_name() {
    let origin = spawn_page_server(PAGE);
    let out_dir = tempfile::tempdir().expect("create temp dir");

    let mut cmd = assert_cmd::Command::cargo_bin("score_mirror").unwrap();
    cmd.args([
        "/cricket-news",
        "--fast",
        "--origin",
        origin.as_str(),
        "--out",
        out_dir.path().to_str().unwrap(),
        "--delay-ms",
        "0",
        "--log-level",
        "error",
    ])
    .assert()
    .success();

    assert!(out_dir.path().join("_cricket-news.json").exists());
}

#[test]
fn failed_fetch_exits_nonzero() {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("start test server");
    let addr = server.server_addr();
    thread::spawn(move || {
        for request in server.incoming_requests() {
            let _ =
                request.respond(tiny_http::Response::from_string("nope").with_status_code(500));
        }
    });

    let origin = format!("http://{addr}");
    let mut cmd = assert_cmd::Command::cargo_bin("score_mirror").unwrap();
    cmd.args([
        "/",
        "--origin",
        origin.as_str(),
        "--delay-ms",
        "0",
        "--log-level",
        "error",
    ])
    .assert()
    .failure();
}
