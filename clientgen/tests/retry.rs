//! Integration tests for the retry transport against a mock HTTP server.

use std::time::{Duration, Instant};

use clientgen::{RequestContext, RetryPolicy, TransportError, execute_with_retries};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn get(client: &reqwest::Client, url: String) -> reqwest::Request {
    client.get(url).build().expect("valid request")
}

#[tokio::test]
async fn persistent_server_error_uses_whole_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let started = Instant::now();
    let response = execute_with_retries(
        &client,
        get(&client, format!("{}/flaky", server.uri())),
        &RetryPolicy::default(),
        &RequestContext::new(),
    )
    .await
    .expect("final 5xx response is returned, not an error");

    assert_eq!(response.status().as_u16(), 503);
    // 100ms after attempt 1 plus 200ms after attempt 2, nothing after attempt 3.
    assert!(started.elapsed() >= Duration::from_millis(300));
}

#[tokio::test]
async fn success_returns_after_one_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let response = execute_with_retries(
        &client,
        get(&client, server.uri()),
        &RetryPolicy::default(),
        &RequestContext::new(),
    )
    .await
    .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn client_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
        .expect(1)
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let response = execute_with_retries(
        &client,
        get(&client, server.uri()),
        &RetryPolicy::default(),
        &RequestContext::new(),
    )
    .await
    .unwrap();

    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(response.text().await.unwrap(), "missing");
}

#[tokio::test]
async fn recovers_after_one_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let response = execute_with_retries(
        &client,
        get(&client, server.uri()),
        &RetryPolicy::new(3, Duration::from_millis(5)),
        &RequestContext::new(),
    )
    .await
    .unwrap();

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn post_body_is_resent_on_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let request = client
        .post(server.uri())
        .body(r#"{"name":"widget"}"#)
        .build()
        .unwrap();

    let response = execute_with_retries(
        &client,
        request,
        &RetryPolicy::new(2, Duration::from_millis(1)),
        &RequestContext::new(),
    )
    .await
    .unwrap();
    assert_eq!(response.status().as_u16(), 500);

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 2);
    assert!(received.iter().all(|r| r.body == br#"{"name":"widget"}"#));
}

#[tokio::test]
async fn transport_failure_surfaces_after_budget() {
    // Reserve a port, then free it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = reqwest::Client::new();
    let result = execute_with_retries(
        &client,
        get(&client, format!("http://{addr}/")),
        &RetryPolicy::new(2, Duration::from_millis(1)),
        &RequestContext::new(),
    )
    .await;

    assert!(matches!(result, Err(TransportError::Http(_))));
}

#[tokio::test]
async fn cancelled_context_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let ctx = RequestContext::new();
    ctx.cancel();

    let client = reqwest::Client::new();
    let result = execute_with_retries(
        &client,
        get(&client, server.uri()),
        &RetryPolicy::default(),
        &ctx,
    )
    .await;

    assert!(matches!(result, Err(TransportError::Cancelled)));
}

#[tokio::test]
async fn cancellation_interrupts_backoff() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = RequestContext::new();
    let token = ctx.cancellation_token();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        token.cancel();
    });

    let client = reqwest::Client::new();
    let started = Instant::now();
    let result = execute_with_retries(
        &client,
        get(&client, server.uri()),
        &RetryPolicy::new(3, Duration::from_secs(5)),
        &ctx,
    )
    .await;

    assert!(matches!(result, Err(TransportError::Cancelled)));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn deadline_interrupts_backoff() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let result = execute_with_retries(
        &client,
        get(&client, server.uri()),
        &RetryPolicy::new(3, Duration::from_secs(5)),
        &RequestContext::with_timeout(Duration::from_millis(200)),
    )
    .await;

    assert!(matches!(result, Err(TransportError::DeadlineExceeded)));
}

#[tokio::test]
async fn zero_budget_makes_no_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let result = execute_with_retries(
        &client,
        get(&client, server.uri()),
        &RetryPolicy::new(0, Duration::from_millis(100)),
        &RequestContext::new(),
    )
    .await;

    assert!(matches!(result, Err(TransportError::NoAttempts)));
}
