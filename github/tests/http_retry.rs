use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;
use std::time::Duration;

use bosun_github::ApiError;
use bosun_github::RetryConfig;
use bosun_github::with_retry;
use http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;
use serde_json::json;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::method;
use wiremock::matchers::path;

const ISSUE_PATH: &str = "/repos/acme/widgets/issues/7";

async fn fetch_issue(client: &reqwest::Client, url: &str) -> Result<Value, ApiError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        let headers = response.headers().clone();
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_response(status, headers, body));
    }
    response.json().await.map_err(ApiError::from)
}

fn quick_config() -> RetryConfig {
    RetryConfig {
        base_delay: Duration::from_millis(10),
        max_delay: Duration::from_millis(50),
        ..Default::default()
    }
}

#[tokio::test]
async fn transient_responses_are_retried_until_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ISSUE_PATH))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ISSUE_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ISSUE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "number": 7, "title": "widget" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let url = format!("{}{ISSUE_PATH}", server.uri());
    let calls = AtomicU32::new(0);

    let issue = with_retry(&quick_config(), || {
        calls.fetch_add(1, Ordering::SeqCst);
        fetch_issue(&client, &url)
    })
    .await
    .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(issue["number"], json!(7));
}

#[tokio::test]
async fn not_found_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ISSUE_PATH))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let url = format!("{}{ISSUE_PATH}", server.uri());
    let calls = AtomicU32::new(0);

    let err = with_retry(&quick_config(), || {
        calls.fetch_add(1, Ordering::SeqCst);
        fetch_issue(&client, &url)
    })
    .await
    .unwrap_err();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
}
