//! End-to-end extraction tests against a local HTTP server.
//!
//! These tests exercise the whole pipeline (fetch, parse, locate, build)
//! the way the serving layer uses it, with `tiny_http` standing in for the
//! remote site.

use std::thread;
use std::time::Duration;

use score_mirror::{Config, ExtractError, Extractor, FetchError, Snapshot};

/// Spawns a server on an ephemeral port that handles every request with
/// `handler`, returning the server's origin (`http://127.0.0.1:<port>`).
fn spawn_server<F>(handler: F) -> String
where
    F: Fn(tiny_http::Request) + Send + 'static,
{
    let server = tiny_http::Server::http("127.0.0.1:0").expect("start test server");
    let addr = server.server_addr();
    thread::spawn(move || {
        for request in server.incoming_requests() {
            handler(request);
        }
    });
    format!("http://{addr}")
}

/// Serves a fixed HTML body for every request.
fn spawn_page_server(body: &'static str) -> String {
    spawn_server(move |request| {
        let header = tiny_http::Header::from_bytes(
            &b"Content-Type"[..],
            &b"text/html; charset=utf-8"[..],
        )
        .expect("header");
        let _ = request.respond(tiny_http::Response::from_string(body).with_header(header));
    })
}

fn test_config(origin: &str) -> Config {
    Config {
        origin: origin.to_string(),
        timeout_seconds: 5,
        delay_ms: 0,
        ..Default::default()
    }
}

const FULL_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta name="description" content="Live cricket scores">
    <meta property="og:title" content="Home of Cricket">
    <link rel="stylesheet" href="/css/site.css" media="screen">
    <style>body { margin: 0; }</style>
    <script type="application/ld+json">{"@type": "WebSite", "name": "Scores"}</script>
    <script src="/js/app.js"></script>
    <script>
        var pageKind = "home";
        function initMenus() {}
        var newsCardsData = [ [101, 102], {"headline": "Series level ]"} , {"id": 3} ];
        var matchesList = {"matches": [{"id": 7, "state": "live"}], "refreshMs": 30000};
    </script>
</head>
<body>
    <div class="a b" id="x" data-panel="scores">Hello World!!</div>
    <p>A perfectly ordinary paragraph that runs well past the point where anyone would bother reading it, padded out with more words than any scoreboard caption has a right to carry, purely so that its text content clearly exceeds the two hundred character truncation boundary applied to element descriptors.</p>
    <img src="/img/logo.png" alt="logo">
    <img src="https://cdn.example.com/banner.jpg">
    <a href="/cricket-news" class="nav">News</a>
</body>
</html>"#;

#[tokio::test]
async fn full_extraction_end_to_end() {
    let origin = spawn_page_server(FULL_PAGE);
    let extractor = Extractor::from_config(&test_config(&origin)).unwrap();

    let snapshot = extractor.extract_everything("/", false).await.unwrap();
    let Snapshot::Full(full) = snapshot else {
        panic!("expected full snapshot");
    };

    assert_eq!(full.raw_html, FULL_PAGE);
    assert_eq!(full.html_length, FULL_PAGE.len());

    // The div's descriptor and the class/id sets
    let div = full
        .elements
        .iter()
        .find(|e| e.tag == "div")
        .expect("div descriptor");
    assert_eq!(div.class_name, "a b");
    assert_eq!(div.id, "x");
    assert!(full.css.all_classes.contains(&"a".to_string()));
    assert!(full.css.all_classes.contains(&"b".to_string()));
    assert!(full.css.all_ids.contains(&"x".to_string()));

    // Truncation caps hold even for long paragraphs
    let p = full.elements.iter().find(|e| e.tag == "p").unwrap();
    assert_eq!(p.text.chars().count(), 200);
    assert!(full.elements.iter().all(|e| e.html.chars().count() <= 500));

    // Relative URLs come out absolute against the test origin
    assert_eq!(full.css.external[0].href, format!("{origin}/css/site.css"));
    assert_eq!(full.images[0].src, format!("{origin}/img/logo.png"));
    assert_eq!(full.images[1].src, "https://cdn.example.com/banner.jpg");
    assert_eq!(full.links[0].href, format!("{origin}/cricket-news"));
    assert_eq!(full.javascript.external[0].src, format!("{origin}/js/app.js"));

    // Embedded data: the nested news array needs the manual scanner
    assert_eq!(full.news_cards.len(), 3);
    assert_eq!(full.news_cards[2]["id"], 3);
    assert_eq!(full.matches_list.len(), 1);
    assert_eq!(full.matches_list[0]["state"], "live");

    // Ambient inventories
    assert_eq!(
        full.meta.get("description"),
        Some(&"Live cricket scores".to_string())
    );
    assert_eq!(
        full.meta.get("og:title"),
        Some(&"Home of Cricket".to_string())
    );
    assert_eq!(full.structured_data.len(), 1);
    assert_eq!(full.data_attributes.get("data-panel"), Some(&1));
    assert_eq!(full.javascript.variables.get("pageKind"), Some(&true));
    assert!(full
        .javascript
        .functions
        .contains(&"initMenus".to_string()));
    assert!(!full.text_content.is_empty());

    // Full snapshots never carry the fast-mode marker
    let json = serde_json::to_value(Snapshot::Full(full)).unwrap();
    assert!(json.get("fastMode").is_none());
}

#[tokio::test]
async fn fast_mode_returns_embedded_data_only() {
    let origin = spawn_page_server(FULL_PAGE);
    let extractor = Extractor::from_config(&test_config(&origin)).unwrap();

    let snapshot = extractor.extract_everything("/", true).await.unwrap();
    let Snapshot::Fast(fast) = &snapshot else {
        panic!("expected fast snapshot");
    };

    assert!(fast.fast_mode);
    assert_eq!(fast.html_length, FULL_PAGE.len());
    assert_eq!(fast.news_cards.len(), 3);
    assert_eq!(fast.matches_list.len(), 1);

    // No inventory fields in the serialized form
    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["fastMode"], true);
    assert!(json.get("elements").is_none());
    assert!(json.get("textContent").is_none());
    assert!(json.get("rawHtml").is_none());
}

#[tokio::test]
async fn fast_mode_without_matching_scripts_yields_empty_lists() {
    let origin = spawn_page_server("<html><body><p>no data here</p></body></html>");
    let extractor = Extractor::from_config(&test_config(&origin)).unwrap();

    let snapshot = extractor.extract_everything("/", true).await.unwrap();
    let Snapshot::Fast(fast) = snapshot else {
        panic!("expected fast snapshot");
    };
    assert!(fast.news_cards.is_empty());
    assert!(fast.matches_list.is_empty());
    assert!(fast.fast_mode);
    assert!(fast.html_length > 0);
}

#[tokio::test]
async fn absolute_page_url_passes_through() {
    let origin = spawn_page_server("<html><body><p>standalone page</p></body></html>");
    // The configured origin points elsewhere; the absolute URL must win
    let extractor = Extractor::from_config(&test_config("https://www.cricbuzz.com")).unwrap();

    let snapshot = extractor
        .extract_everything(&format!("{origin}/somewhere"), true)
        .await
        .unwrap();
    assert!(snapshot.html_length() > 0);
}

#[tokio::test]
async fn http_500_is_a_fetch_error() {
    let origin = spawn_server(|request| {
        let _ = request.respond(tiny_http::Response::from_string("boom").with_status_code(500));
    });
    let extractor = Extractor::from_config(&test_config(&origin)).unwrap();

    let err = extractor
        .extract_everything("/", false)
        .await
        .expect_err("expected fetch failure");
    assert!(matches!(
        err,
        ExtractError::Fetch(FetchError::Status { .. })
    ));
}

#[tokio::test]
async fn empty_body_is_a_fetch_error() {
    let origin = spawn_page_server("");
    let extractor = Extractor::from_config(&test_config(&origin)).unwrap();

    let err = extractor
        .extract_everything("/", true)
        .await
        .expect_err("expected fetch failure");
    assert!(matches!(
        err,
        ExtractError::Fetch(FetchError::EmptyBody { .. })
    ));
}

#[tokio::test]
async fn slow_server_times_out_as_fetch_error() {
    let origin = spawn_server(|request| {
        // Outlast the client's 1s timeout before answering
        thread::sleep(Duration::from_secs(3));
        let _ = request.respond(tiny_http::Response::from_string("<html></html>"));
    });
    let mut config = test_config(&origin);
    config.timeout_seconds = 1;
    let extractor = Extractor::from_config(&config).unwrap();

    let err = extractor
        .extract_everything("/", false)
        .await
        .expect_err("expected timeout");
    assert!(matches!(
        err,
        ExtractError::Fetch(FetchError::Request { .. })
    ));
}
