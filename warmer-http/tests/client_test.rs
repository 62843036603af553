use std::collections::BTreeMap;
use std::net::TcpListener;

use warmer_http::{HttpClient, HttpConfig, HttpError, HttpManager};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn test_get_applies_profile_headers_and_cookies() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .and(header("authorization", "Bearer premium"))
        .and(header("cookie", "region=eu; tier=gold"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Cache", "HIT")
                .set_body_string("<html></html>"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let manager = HttpManager::new().unwrap();
    let response = manager
        .get(
            &format!("{}/page", mock_server.uri()),
            &map(&[("Authorization", "Bearer premium")]),
            &map(&[("tier", "gold"), ("region", "eu")]),
        )
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.header("x-cache"), Some("HIT"));
    assert_eq!(response.body_bytes, 13);
}

#[tokio::test]
async fn test_non_success_status_is_a_completed_exchange() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let manager = HttpManager::new().unwrap();
    let response = manager
        .get(&mock_server.uri(), &BTreeMap::new(), &BTreeMap::new())
        .await
        .unwrap();

    assert_eq!(response.status, 503);
    assert!(!response.is_success());
    assert!(response.header("x-cache").is_none());
}

#[tokio::test]
async fn test_user_agent_from_config() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("user-agent", "warmup-test/1.0"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpConfig {
        user_agent: "warmup-test/1.0".to_string(),
        ..HttpConfig::default()
    };
    let manager = HttpManager::with_config(config).unwrap();
    let response = manager
        .get(&mock_server.uri(), &BTreeMap::new(), &BTreeMap::new())
        .await
        .unwrap();

    assert_eq!(response.status, 204);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Grab a free port and release it so nothing is listening there
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let manager = HttpManager::new().unwrap();
    let result = manager
        .get(
            &format!("http://127.0.0.1:{}/", port),
            &BTreeMap::new(),
            &BTreeMap::new(),
        )
        .await;

    match result {
        Err(HttpError::Connection(detail)) => assert!(!detail.is_empty()),
        other => panic!("expected connection error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_header_name_is_rejected() {
    let manager = HttpManager::new().unwrap();
    let result = manager
        .get(
            "http://127.0.0.1:9/",
            &map(&[("bad header", "x")]),
            &BTreeMap::new(),
        )
        .await;

    assert!(matches!(result, Err(HttpError::InvalidHeaderName(name)) if name == "bad header"));
}

#[tokio::test]
async fn test_invalid_url_is_rejected() {
    let manager = HttpManager::new().unwrap();
    let result = manager
        .get("not a url", &BTreeMap::new(), &BTreeMap::new())
        .await;

    assert!(matches!(result, Err(HttpError::InvalidUrl(_))));
}
